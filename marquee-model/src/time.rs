//! Unit conversion at the engine boundary. The engine speaks seconds as
//! floating point, everything above it stores whole milliseconds.

pub const MILLIS_PER_SECOND: f64 = 1000.0;

/// Convert an engine time to milliseconds. Negative and non-finite inputs
/// have no meaningful position and yield `None`.
pub fn secs_to_millis(secs: f64) -> Option<u64> {
    if !secs.is_finite() || secs < 0.0 {
        return None;
    }
    Some((secs * MILLIS_PER_SECOND).round() as u64)
}

pub fn millis_to_secs(millis: u64) -> f64 {
    millis as f64 / MILLIS_PER_SECOND
}
