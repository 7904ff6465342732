//! Utility functions for rendering UI components

/// Formats a second count as zero-padded `mm:ss`, rounding fractional
/// seconds to the nearest whole second.
pub fn format_seconds(total_seconds: f64) -> String {
    let total = total_seconds.max(0.0).round() as u64;
    let minutes = total / 60;
    let seconds = total % 60;
    format!("{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_minutes_and_seconds() {
        assert_eq!(format_seconds(61.4), "01:01");
        assert_eq!(format_seconds(185.0), "03:05");
        assert_eq!(format_seconds(0.0), "00:00");
    }

    #[test]
    fn rounds_fractional_seconds() {
        assert_eq!(format_seconds(61.6), "01:02");
        assert_eq!(format_seconds(-3.0), "00:00");
        assert_eq!(format_seconds(3600.0), "60:00");
    }
}
