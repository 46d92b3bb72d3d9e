/// Formats seconds as zero-padded `MM:SS`. Minutes keep counting past 59.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Seconds to nanoseconds for pipeline positions, saturating at zero.
pub fn seconds_to_nanos(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1_000_000_000.0) as u64
    } else {
        0
    }
}

pub fn nanos_to_seconds(nanos: u64) -> f64 {
    nanos as f64 / 1_000_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(59.99), "00:59");
        assert_eq!(format_time(60.0), "01:00");
        assert_eq!(format_time(120.0), "02:00");
        assert_eq!(format_time(3725.4), "62:05");
        assert_eq!(format_time(-4.0), "00:00");
        assert_eq!(format_time(f64::INFINITY), "00:00");
    }

    #[test]
    fn test_nanosecond_conversion() {
        assert_eq!(seconds_to_nanos(1.5), 1_500_000_000);
        assert_eq!(seconds_to_nanos(-1.0), 0);
        assert_eq!(nanos_to_seconds(2_250_000_000), 2.25);
    }
}
