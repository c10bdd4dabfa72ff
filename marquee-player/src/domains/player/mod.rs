//! Player domain
//!
//! Messages, the update function and the view model over one
//! [`marquee_core::PlayerScreen`].

pub mod commands;
pub mod messages;
pub mod track_selection;
pub mod update;
pub mod view;

pub use messages::Message;
pub use update::{UpdateResult, update};
pub use view::PlayerView;
