#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use tomato::libs::formatter::{format_clock, format_duration, format_seconds, progress_bar, FormattedSession};
    use tomato::libs::session::FocusSession;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(90 * 60 + 5), "90:05");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(&Duration::zero()), "00:00");
        assert_eq!(format_duration(&Duration::minutes(59)), "00:59");
        assert_eq!(format_duration(&(Duration::hours(2) + Duration::minutes(5))), "02:05");
        assert_eq!(format_duration(&Duration::minutes(-30)), "00:00");
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(5400), "01:30");
        assert_eq!(format_seconds(59), "00:00");
        assert_eq!(format_seconds(-10), "00:00");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 10), "[----------]");
        assert_eq!(progress_bar(0.6, 10), "[######----]");
        assert_eq!(progress_bar(1.0, 4), "[####]");
        assert_eq!(progress_bar(1.7, 4), "[####]");
        assert_eq!(progress_bar(-0.5, 4), "[----]");
    }

    #[test]
    fn test_formatted_sessions() {
        let now = Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap();
        let sessions = vec![
            FocusSession::closed(10, now - Duration::hours(3), now - Duration::hours(2)),
            FocusSession::new(now - Duration::minutes(45)),
        ];

        let rows = FormattedSession::from_sessions(&sessions, &now);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[0].duration, "01:00");
        assert_eq!(rows[0].status, "completed");
        assert_eq!(rows[1].id, 2);
        assert_eq!(rows[1].end, "-");
        assert_eq!(rows[1].duration, "00:45");
        assert_eq!(rows[1].status, "in_progress");
    }
}
