use std::time::Duration;

/// Parse a boolean value from a raw string, accepting common env-style forms.
///
/// Accepted truthy values (case-insensitive): `"1"`, `"true"`, `"yes"`, `"on"`.
/// Accepted falsy values: `"0"`, `"false"`, `"no"`, `"off"`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `off`, `none` and `disabled` switch a timeout off; anything else is a
/// humantime duration such as `45s` or `1m 30s`.
pub fn parse_optional_duration(
    raw: &str,
) -> Result<Option<Duration>, humantime::DurationError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "off" | "none" | "disabled" => Ok(None),
        trimmed => humantime::parse_duration(trimmed).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_env_style_booleans() {
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool(" 0 "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn parses_optional_durations() {
        assert_eq!(parse_optional_duration("off"), Ok(None));
        assert_eq!(
            parse_optional_duration("1m 30s"),
            Ok(Some(Duration::from_secs(90)))
        );
        assert!(parse_optional_duration("soon").is_err());
    }
}
