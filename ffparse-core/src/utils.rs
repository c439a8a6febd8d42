//! Human-readable rendering of probe values.
//!
//! ffprobe prints durations as fractional seconds and sizes as byte counts,
//! both as plain strings. The CLI shows them through these helpers.

/// Placeholder for durations that cannot be shown.
const UNKNOWN_DURATION: &str = "??:??:??";

/// Binary units above bytes, smallest first.
const BYTE_UNITS: [&str; 3] = ["KiB", "MiB", "GiB"];

/// Renders whole seconds as `HH:MM:SS`. Fractions are truncated; negative
/// and non-finite inputs render as `??:??:??`.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    if !(seconds.is_finite() && seconds >= 0.0) {
        return UNKNOWN_DURATION.to_string();
    }
    let whole = seconds.trunc() as u64;
    format!("{:02}:{:02}:{:02}", whole / 3600, whole / 60 % 60, whole % 60)
}

/// Renders a byte count in the largest binary unit it fills, up to GiB.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = None;
    for next in BYTE_UNITS {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = Some(next);
    }
    match unit {
        Some(unit) => format!("{value:.2} {unit}"),
        None => format!("{bytes} B"),
    }
}

/// `size` field of a probe section; `N/A` and other non-counts pass through.
#[must_use]
pub fn format_size_field(value: &str) -> String {
    match value.parse::<u64>() {
        Ok(bytes) => format_bytes(bytes),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "00:00:00");
        assert_eq!(format_duration(59.999), "00:00:59");
        assert_eq!(format_duration(3725.9), "01:02:05");
        assert_eq!(format_duration(100.0 * 3600.0), "100:00:00");
        assert_eq!(format_duration(-1.0), UNKNOWN_DURATION);
        assert_eq!(format_duration(f64::NAN), UNKNOWN_DURATION);
        assert_eq!(format_duration(f64::INFINITY), UNKNOWN_DURATION);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.50 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.00 MiB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.00 GiB");
        assert_eq!(format_bytes(2048 * 1024 * 1024 * 1024), "2048.00 GiB");
    }

    #[test]
    fn test_format_size_field() {
        assert_eq!(format_size_field("2048"), "2.00 KiB");
        assert_eq!(format_size_field("N/A"), "N/A");
        assert_eq!(format_size_field("-1"), "-1");
    }
}
