use marquee_model::PlaybackFailure;

/// Why the screen asks the host to pop it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DismissReason {
    PlaybackFailed(PlaybackFailure),
}

/// The navigation stack hosting the screen.
#[cfg_attr(feature = "mocks", mockall::automock)]
pub trait HostNavigator {
    fn dismiss(&self, reason: DismissReason);
}
