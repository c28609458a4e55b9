//! Read-only helpers for rendering the timer.

/// Formats seconds into an `MM:SS` string.
///
/// Both fields are zero-padded to at least two digits; minutes are not
/// capped, so two hours render as `120:00`.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Fraction of the current mode still remaining, in `0.0..=1.0`.
///
/// Returns 0.0 when `total` is zero.
pub fn progress_fraction(remaining: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (remaining as f64 / total as f64).clamp(0.0, 1.0)
}

/// Stroke offset for a radial indicator of the given circumference.
///
/// Full time gives 0 (complete ring); elapsed time gives the circumference.
pub fn dash_offset(remaining: u64, total: u64, circumference: f64) -> f64 {
    circumference - progress_fraction(remaining, total) * circumference
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(5), "00:05");
        assert_eq!(format_time(1500), "25:00");
        assert_eq!(format_time(299), "04:59");
        assert_eq!(format_time(7200), "120:00");
    }

    #[test]
    fn progress_is_remaining_over_total() {
        assert_eq!(progress_fraction(1500, 1500), 1.0);
        assert_eq!(progress_fraction(750, 1500), 0.5);
        assert_eq!(progress_fraction(0, 1500), 0.0);
        assert_eq!(progress_fraction(10, 0), 0.0);
    }

    #[test]
    fn dash_offset_grows_as_time_passes() {
        let c = 100.0;
        assert_eq!(dash_offset(60, 60, c), 0.0);
        assert_eq!(dash_offset(30, 60, c), 50.0);
        assert_eq!(dash_offset(0, 60, c), 100.0);
    }
}
