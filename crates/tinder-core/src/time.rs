//! Clock formatting for HUD timers

/// Format seconds as `MM:SS`. Minutes are not wrapped.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let minutes = (total / 60.0).floor() as u64;
    let secs = (total % 60.0).floor() as u64;
    format!("{:02}:{:02}", minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "00:00");
        assert_eq!(format_clock(9.99), "00:09");
        assert_eq!(format_clock(125.0), "02:05");
        assert_eq!(format_clock(6000.0), "100:00");
    }

    #[test]
    fn test_negative_is_zero() {
        assert_eq!(format_clock(-3.0), "00:00");
        assert_eq!(format_clock(f64::NAN), "00:00");
    }
}
