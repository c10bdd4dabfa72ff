//! Console front-end for the marquee playback screen.
//!
//! The screen logic lives in `marquee-core`; this crate wires it to a
//! simulated engine and a terminal, Elm style: every input becomes a
//! [`domains::player::messages::Message`] and goes through one
//! [`domains::player::update::update`] function, and the terminal shows a
//! [`domains::player::view::PlayerView`] derived from the screen.

pub mod app;
pub mod cli;
pub mod domains;
pub mod infra;

pub use app::{AppConfig, ExitReason};
