//! Trait surfaces for everything the playback screen talks to but does not
//! own: the native engine, device chrome, the hardware back button and the
//! host navigation stack.

pub mod back;
pub mod device;
pub mod engine;
pub mod host;

/// Frequently used traits and handles for screen and platform crates.
pub mod prelude {
    pub use super::back::{
        BackDisposition, BackHandler, BackHandlerRegistry, BackSubscription,
        SubscriptionId,
    };
    pub use super::device::{Orientation, OrientationGuard};
    pub use super::engine::VideoEngine;
    pub use super::host::{DismissReason, HostNavigator};
}

#[cfg(feature = "mocks")]
pub use device::MockOrientationGuard;
#[cfg(feature = "mocks")]
pub use host::MockHostNavigator;
