//! Display formatting helpers
//!
//! Provides consistent time and size display formatting across the
//! playcard crates.

/// Size unit labels, base 1024
const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a position or duration in seconds as `M:SS`.
///
/// Minutes are unpadded, seconds are zero-padded to two digits.
/// Non-finite or negative inputs display as `0:00`.
///
/// # Examples
///
/// ```
/// use playcard_common::format::format_time;
///
/// assert_eq!(format_time(45.0), "0:45");
/// assert_eq!(format_time(75.0), "1:15");
/// assert_eq!(format_time(634.0), "10:34");
/// ```
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format a byte count with the largest unit whose scaled value is >= 1,
/// to one decimal place. Units are B/KB/MB/GB, base 1024.
///
/// # Examples
///
/// ```
/// use playcard_common::format::format_size;
///
/// assert_eq!(format_size(1500), "1.5 KB");
/// assert_eq!(format_size(2_000_000_000), "1.9 GB");
/// ```
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0.0 B".to_string();
    }
    let exp = (((bytes as f64).ln() / 1024f64.ln()) as usize).min(SIZE_UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(exp as i32);
    format!("{:.1} {}", scaled, SIZE_UNITS[exp])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_pads_seconds_not_minutes() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(45.0), "0:45");
        assert_eq!(format_time(75.0), "1:15");
        assert_eq!(format_time(120.0), "2:00");
        assert_eq!(format_time(634.0), "10:34");
    }

    #[test]
    fn time_truncates_fractional_seconds() {
        assert_eq!(format_time(75.9), "1:15");
    }

    #[test]
    fn time_tolerates_bad_input() {
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn size_picks_largest_fitting_unit() {
        assert_eq!(format_size(500), "500.0 B");
        assert_eq!(format_size(1023), "1023.0 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1500), "1.5 KB");
        assert_eq!(format_size(50_000_000), "47.7 MB");
        assert_eq!(format_size(2_000_000_000), "1.9 GB");
    }

    #[test]
    fn size_saturates_at_gigabytes() {
        assert_eq!(format_size(3_000_000_000_000), "2794.0 GB");
    }

    #[test]
    fn size_handles_zero() {
        assert_eq!(format_size(0), "0.0 B");
    }
}
