#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use tomato::db::db::Db;
    use tomato::db::intervals::Intervals;
    use tomato::db::sessions::Sessions;
    use tomato::libs::error::FocusError;
    use tomato::libs::interval::IntervalType;
    use tomato::libs::session::{FocusInterval, FocusSession, SessionStatus};
    use tomato::libs::stats::total_focus_seconds;

    struct SessionsTestContext {
        temp_dir: TempDir,
    }

    impl SessionsTestContext {
        /// Each call opens a new connection to the same database file.
        fn db(&self) -> Db {
            Db::open(self.temp_dir.path().join("tomato.db")).unwrap()
        }
    }

    impl TestContext for SessionsTestContext {
        fn setup() -> Self {
            SessionsTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    fn at(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, min, 0).unwrap()
    }

    #[test_context(SessionsTestContext)]
    #[test]
    fn test_start_and_end_session(ctx: &mut SessionsTestContext) {
        let mut sessions = Sessions::with_db(ctx.db());

        let session = sessions.start(at(14, 9, 0)).unwrap();
        assert!(session.id > 0);
        assert!(session.is_open());
        assert_eq!(session.status, SessionStatus::InProgress);
        assert_eq!(sessions.open().unwrap().len(), 1);

        let ended = sessions.end(session.id, at(14, 9, 25)).unwrap();
        assert_eq!(ended.started_at, at(14, 9, 0));
        assert_eq!(ended.ended_at, Some(at(14, 9, 25)));
        assert_eq!(ended.status, SessionStatus::Completed);
        assert!(sessions.open().unwrap().is_empty());
        assert_eq!(sessions.get(session.id).unwrap(), Some(ended));
    }

    #[test_context(SessionsTestContext)]
    #[test]
    fn test_subsecond_precision_truncated(ctx: &mut SessionsTestContext) {
        let mut sessions = Sessions::with_db(ctx.db());
        let started = at(14, 9, 0) + Duration::milliseconds(750);

        let session = sessions.start(started).unwrap();
        let stored = sessions.get(session.id).unwrap().unwrap();
        assert_eq!(stored.started_at, at(14, 9, 0));
        assert_eq!(stored, session);
    }

    #[test_context(SessionsTestContext)]
    #[test]
    fn test_end_unknown_session(ctx: &mut SessionsTestContext) {
        let mut sessions = Sessions::with_db(ctx.db());

        assert!(matches!(sessions.end(42, at(14, 10, 0)), Err(FocusError::SessionNotFound(42))));
        assert_eq!(sessions.get(42).unwrap(), None);
    }

    #[test_context(SessionsTestContext)]
    #[test]
    fn test_all_sessions_ordered_and_aggregated(ctx: &mut SessionsTestContext) {
        let mut sessions = Sessions::with_db(ctx.db());
        let late = sessions.start(at(14, 13, 0)).unwrap();
        sessions.end(late.id, at(14, 13, 30)).unwrap();
        let early = sessions.start(at(13, 9, 0)).unwrap();
        sessions.end(early.id, at(13, 10, 0)).unwrap();

        let all = sessions.all().unwrap();
        assert_eq!(all.iter().map(|s| s.id).collect::<Vec<_>>(), vec![early.id, late.id]);
        assert_eq!(total_focus_seconds(&all, &at(14, 18, 0)), 5400);
    }

    #[test_context(SessionsTestContext)]
    #[test]
    fn test_sessions_for_date(ctx: &mut SessionsTestContext) {
        let mut sessions = Sessions::with_db(ctx.db());
        sessions.start(at(13, 8, 0)).unwrap();
        sessions.start(at(13, 23, 30)).unwrap();
        sessions.start(at(14, 10, 0)).unwrap();

        let thirteenth = NaiveDate::from_ymd_opt(2025, 3, 13).unwrap();
        let fourteenth = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

        assert_eq!(sessions.for_date(thirteenth, &Utc).unwrap().len(), 2);
        assert_eq!(sessions.for_date(fourteenth, &Utc).unwrap().len(), 1);

        // 23:30 UTC is already the 14th at UTC+2
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(sessions.for_date(thirteenth, &plus_two).unwrap().len(), 1);
        assert_eq!(sessions.for_date(fourteenth, &plus_two).unwrap().len(), 2);
    }

    #[test_context(SessionsTestContext)]
    #[test]
    fn test_record_intervals(ctx: &mut SessionsTestContext) {
        let mut sessions = Sessions::with_db(ctx.db());
        let mut intervals = Intervals::with_db(ctx.db());
        let session = sessions.start(at(14, 9, 0)).unwrap();

        let focus = intervals.start(session.id, IntervalType::Focus, at(14, 9, 0)).unwrap();
        intervals.end(focus.id, at(14, 9, 25)).unwrap();
        let rest = intervals.start(session.id, IntervalType::ShortBreak, at(14, 9, 25)).unwrap();

        let recorded = intervals.for_session(session.id).unwrap();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].interval_type, IntervalType::Focus);
        assert_eq!(recorded[0].ended_at, Some(at(14, 9, 25)));
        assert_eq!(recorded[1].id, rest.id);
        assert_eq!(recorded[1].interval_type, IntervalType::ShortBreak);
        assert_eq!(recorded[1].ended_at, None);
    }

    #[test_context(SessionsTestContext)]
    #[test]
    fn test_interval_requires_session(ctx: &mut SessionsTestContext) {
        let mut intervals = Intervals::with_db(ctx.db());

        assert!(matches!(
            intervals.start(7, IntervalType::Focus, at(14, 9, 0)),
            Err(FocusError::SessionNotFound(7))
        ));
        assert!(matches!(intervals.end(3, at(14, 9, 0)), Err(FocusError::IntervalNotFound(3))));
        assert!(intervals.for_session(7).unwrap().is_empty());
    }

    #[test_context(SessionsTestContext)]
    #[test]
    fn test_stored_records_serialize_to_json(ctx: &mut SessionsTestContext) {
        let mut sessions = Sessions::with_db(ctx.db());
        let mut intervals = Intervals::with_db(ctx.db());
        let session = sessions.start(at(14, 9, 0)).unwrap();
        let focus = intervals.start(session.id, IntervalType::Focus, at(14, 9, 0)).unwrap();

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["started_at"], "2025-03-14T09:00:00Z");
        assert_eq!(json["ended_at"], serde_json::Value::Null);
        assert_eq!(json["status"], "in_progress");
        assert_eq!(serde_json::from_value::<FocusSession>(json).unwrap(), session);

        let json = serde_json::to_value(&focus).unwrap();
        assert_eq!(json["interval_type"], "focus");
        assert_eq!(json["session_id"], session.id);
        assert_eq!(serde_json::from_value::<FocusInterval>(json).unwrap(), focus);
    }
}
