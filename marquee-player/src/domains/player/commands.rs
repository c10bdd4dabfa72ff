//! Terminal input
//!
//! One command per line. Times are in seconds, track positions are the row
//! keys shown in the selector (`-` picks the default row).

use std::time::Instant;

use marquee_model::{TrackChoice, TrackKind};
use thiserror::Error;

use super::messages::Message;

pub const HELP: &str = "\
commands:
  p            play / pause
  f, r         skip forward / back
  s <secs>     seek
  scrub <secs> move the slider without seeking, `release` to seek
  tap          show / hide controls
  m            mute
  vol <0-1>    volume
  z            zoom (fit / fill)
  bg on|off    background playback
  pip on|off   picture-in-picture
  tracks       open the track selector
  audio|video|text <n|->  pick a draft track
  apply, cancel           close the selector
  i            show the player
  b, q         back (leave the player)";

#[derive(Debug, Clone)]
pub enum Command {
    Send(Message),
    Show,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ParseError(pub String);

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Command::Show);
    };
    let arg = words.next();

    let message = match head {
        "p" | "play" | "pause" => Message::PlayPause,
        "f" => Message::SkipForward,
        "r" => Message::SkipBackward,
        "s" | "seek" => Message::SeekTo(seconds_arg(head, arg)?),
        "scrub" => Message::Scrub(seconds_arg(head, arg)?),
        "release" => Message::ScrubReleased,
        "tap" => Message::VideoTapped,
        "m" | "mute" => Message::ToggleMute,
        "vol" => Message::SetVolume(
            arg.and_then(|raw| raw.parse().ok())
                .ok_or_else(|| ParseError("vol needs a number".into()))?,
        ),
        "z" | "zoom" => Message::ToggleResizeMode,
        "bg" => Message::SetBackgroundPlay(switch_arg(head, arg)?),
        "pip" => Message::SetPictureInPicture(switch_arg(head, arg)?),
        "tracks" => Message::OpenTrackSelector,
        "audio" => Message::SelectDraftTrack(TrackKind::Audio, choice_arg(head, arg)?),
        "video" => Message::SelectDraftTrack(TrackKind::Video, choice_arg(head, arg)?),
        "text" => Message::SelectDraftTrack(TrackKind::Text, choice_arg(head, arg)?),
        "apply" => Message::ApplyTrackSelection,
        "cancel" => Message::CancelTrackSelection,
        "b" | "back" | "q" | "quit" => Message::HardwareBack,
        "i" | "info" => return Ok(Command::Show),
        "h" | "help" | "?" => return Ok(Command::Help),
        other => return Err(ParseError(format!("unknown command '{other}'"))),
    };
    Ok(Command::Send(message))
}

/// Tick message for the current instant.
pub fn tick() -> Message {
    Message::Tick(Instant::now())
}

fn seconds_arg(head: &str, arg: Option<&str>) -> Result<u64, ParseError> {
    arg.and_then(|raw| raw.parse::<f64>().ok())
        .and_then(marquee_model::secs_to_millis)
        .ok_or_else(|| ParseError(format!("{head} needs a time in seconds")))
}

fn switch_arg(head: &str, arg: Option<&str>) -> Result<bool, ParseError> {
    match arg {
        Some("on") => Ok(true),
        Some("off") => Ok(false),
        _ => Err(ParseError(format!("{head} needs on or off"))),
    }
}

fn choice_arg(head: &str, arg: Option<&str>) -> Result<TrackChoice, ParseError> {
    match arg {
        Some("-") => Ok(TrackChoice::Unset),
        Some(raw) => raw
            .parse()
            .map(TrackChoice::Index)
            .map_err(|_| ParseError(format!("{head} needs a row number or -"))),
        None => Err(ParseError(format!("{head} needs a row number or -"))),
    }
}
