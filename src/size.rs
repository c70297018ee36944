//! Human-readable byte counts for progress output.

const SCALED_UNITS: [&str; 3] = [" bytes", "KB", "MB"];
const LARGEST_UNIT: &str = "GB";

/// Formats a byte count using binary (1024) scaling.
///
/// Values at or beyond 1024 GB stay in gigabytes rather than moving to a
/// larger unit.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in SCALED_UNITS {
        if value < 1024.0 {
            return format!("{value:4.2}{unit}");
        }
        value /= 1024.0;
    }
    format!("{value:4.2}{LARGEST_UNIT}")
}

#[cfg(test)]
mod tests {
    use super::format_size;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(500), "500.00 bytes");
        assert_eq!(format_size(0), "0.00 bytes");
        assert_eq!(format_size(1023), "1023.00 bytes");
    }

    #[test]
    fn test_format_size_binary_units() {
        assert_eq!(format_size(2048), "2.00KB");
        assert_eq!(format_size(1_048_576), "1.00MB");
        assert_eq!(format_size(1_073_741_824), "1.00GB");
    }

    #[test]
    fn test_format_size_rounds_to_two_places() {
        assert_eq!(format_size(1536), "1.50KB");
        assert_eq!(format_size(5 * 1024 * 1024 + 256 * 1024), "5.25MB");
    }

    #[test]
    fn test_format_size_caps_at_gigabytes() {
        assert_eq!(format_size(2048 * 1_073_741_824), "2048.00GB");
    }
}
