//! Progress formatting helpers.

use std::time::Duration;

/// Format a duration for display.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = secs / 60.0;
        format!("{:.1}m", mins)
    }
}

/// Counter prefix such as `[3/15]`, padded to the width of `total`.
pub fn format_counter(index: usize, total: usize) -> String {
    let width = total.to_string().len();
    format!("[{:>width$}/{}]", index, total, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_milliseconds() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
    }

    #[test]
    fn formats_seconds() {
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.5s");
    }

    #[test]
    fn formats_minutes() {
        assert_eq!(format_duration(Duration::from_secs(90)), "1.5m");
    }

    #[test]
    fn counter_is_padded() {
        assert_eq!(format_counter(3, 15), "[ 3/15]");
        assert_eq!(format_counter(1, 1), "[1/1]");
    }
}
