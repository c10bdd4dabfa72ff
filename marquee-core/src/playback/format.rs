/// Render a millisecond position as `M:SS`, or `H:MM:SS` once it reaches an
/// hour. Rounds to the nearest whole second before splitting so a value like
/// 119.5 s reads `2:00`, never `1:60`.
pub fn format_duration(millis: u64) -> String {
    let total_seconds = millis.saturating_add(500) / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}
