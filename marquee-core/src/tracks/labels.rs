use marquee_model::{Track, TrackCatalog, TrackChoice, TrackKind};

/// Label for a selector row.
pub fn track_label(kind: TrackKind, track: &Track) -> String {
    let mut parts = Vec::new();

    if let Some(lang) = &track.language {
        parts.push(format_language_code(lang));
    } else if let Some(title) = &track.title {
        parts.push(title.clone());
    } else if let (TrackKind::Video, Some(height)) = (kind, track.height) {
        parts.push(format!("{height}p"));
    } else {
        parts.push(format!("Track {}", track.index + 1));
    }

    let mut details = Vec::new();
    match kind {
        TrackKind::Audio => {
            if let Some(codec) = &track.codec {
                details.push(format_audio_codec(codec));
            }
            if let Some(channels) = track.channels {
                details.push(format_channels(channels));
            }
        }
        TrackKind::Video => {
            if let (Some(height), true) =
                (track.height, track.language.is_some() || track.title.is_some())
            {
                details.push(format!("{height}p"));
            }
            if let Some(bitrate) = track.bitrate {
                details.push(format_bitrate(bitrate));
            }
        }
        TrackKind::Text => {
            if let Some(codec) = &track.codec {
                details.push(format_subtitle_codec(codec));
            }
        }
    }

    if !details.is_empty() {
        parts.push(format!("({})", details.join(" ")));
    }

    parts.join(" ")
}

/// Label for a choice, including the sentinel.
pub fn choice_label(
    kind: TrackKind,
    choice: TrackChoice,
    catalog: &TrackCatalog,
) -> String {
    match catalog.track(kind, choice) {
        Some(track) => track_label(kind, track),
        None => match kind {
            TrackKind::Audio => "Default".to_string(),
            TrackKind::Video => "Auto".to_string(),
            TrackKind::Text => "Off".to_string(),
        },
    }
}

/// Convert language code to human-readable name
fn format_language_code(code: &str) -> String {
    match code.to_lowercase().as_str() {
        "en" | "eng" => "English",
        "es" | "spa" => "Spanish",
        "fr" | "fra" | "fre" => "French",
        "de" | "deu" | "ger" => "German",
        "it" | "ita" => "Italian",
        "pt" | "por" => "Portuguese",
        "ru" | "rus" => "Russian",
        "ja" | "jpn" => "Japanese",
        "zh" | "chi" | "zho" => "Chinese",
        "ko" | "kor" => "Korean",
        "ar" | "ara" => "Arabic",
        "hi" | "hin" => "Hindi",
        "nl" | "nld" | "dut" => "Dutch",
        "sv" | "swe" => "Swedish",
        "pl" | "pol" => "Polish",
        "tr" | "tur" => "Turkish",
        _ => code,
    }
    .to_string()
}

fn format_audio_codec(codec: &str) -> String {
    let lower = codec.to_lowercase();
    // eac3 before ac3: "eac3" contains "ac3"
    let name = if lower.contains("eac3") || lower.contains("eac-3") {
        "E-AC3"
    } else if lower.contains("ac3") || lower.contains("ac-3") {
        "AC3"
    } else if lower.contains("aac") || lower.contains("mp4a") {
        "AAC"
    } else if lower.contains("opus") {
        "Opus"
    } else if lower.contains("mp3") {
        "MP3"
    } else if lower.contains("flac") {
        "FLAC"
    } else {
        codec
    };
    name.to_string()
}

fn format_subtitle_codec(codec: &str) -> String {
    let lower = codec.to_lowercase();
    let name = if lower.contains("vtt") {
        "WebVTT"
    } else if lower.contains("srt") || lower.contains("subrip") {
        "SRT"
    } else if lower.contains("ttml") {
        "TTML"
    } else if lower.contains("608") || lower.contains("708") {
        "CC"
    } else {
        codec
    };
    name.to_string()
}

fn format_channels(channels: u32) -> String {
    match channels {
        1 => "Mono".to_string(),
        2 => "Stereo".to_string(),
        6 => "5.1".to_string(),
        8 => "7.1".to_string(),
        _ => format!("{channels} ch"),
    }
}

fn format_bitrate(bits_per_second: u64) -> String {
    if bits_per_second >= 1_000_000 {
        format!("{:.1} Mbps", bits_per_second as f64 / 1_000_000.0)
    } else {
        format!("{} kbps", bits_per_second / 1_000)
    }
}
