//! Human-readable formatting of snapshot figures

/// Coarsest unit that keeps an hour count readable
pub fn format_hours(hours: f64) -> String {
    if hours < 24.0 {
        format!("{} hours", hours.round())
    } else if hours < 24.0 * 7.0 {
        format!("{} days", (hours / 24.0).round())
    } else if hours < 24.0 * 365.0 {
        format!("{} weeks", (hours / (24.0 * 7.0)).round())
    } else {
        format!("{} years", (hours / (24.0 * 365.0)).round())
    }
}

/// Duration in days as days, weeks, months, or years and months
pub fn format_duration(days: f64) -> String {
    if days < 7.0 {
        format!("{} days", days.round())
    } else if days < 30.0 {
        format!("{} weeks", (days / 7.0).round())
    } else if days < 365.0 {
        format!("{} months", (days / 30.0).round())
    } else {
        let years = (days / 365.0).floor();
        let months = ((days % 365.0) / 30.0).round();
        if months > 0.0 {
            format!("{} years, {} months", years, months)
        } else {
            format!("{} years", years)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(5.4), "5 hours");
        assert_eq!(format_hours(48.0), "2 days");
        assert_eq!(format_hours(24.0 * 21.0), "3 weeks");
        assert_eq!(format_hours(73_050.0), "8 years");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(3.0), "3 days");
        assert_eq!(format_duration(14.0), "2 weeks");
        assert_eq!(format_duration(95.0), "3 months");
        assert_eq!(format_duration(730.0), "2 years");
        assert_eq!(format_duration(365.0 * 10.0 + 100.0), "10 years, 3 months");
    }
}
