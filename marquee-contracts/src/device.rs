/// Screen orientation lock targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Landscape,
    Portrait,
}

/// Process-wide device chrome. Calls are issued and not awaited; nothing
/// about their completion is relied upon.
#[cfg_attr(feature = "mocks", mockall::automock)]
pub trait OrientationGuard {
    fn lock(&self, orientation: Orientation);

    fn hide_navigation_bar(&self);

    fn show_navigation_bar(&self);
}
