#[cfg(test)]
mod tests {
    use tomato::libs::error::FocusError;
    use tomato::libs::interval::{
        next_interval, Durations, IntervalType, FOCUS_DURATION, LONG_BREAK_DURATION, LONG_BREAK_INTERVAL, SHORT_BREAK_DURATION,
    };

    #[test]
    fn test_focus_followed_by_short_break() {
        for completed in [0, 1, 2, 4, 5, 6] {
            assert_eq!(
                next_interval(IntervalType::Focus, completed, LONG_BREAK_INTERVAL),
                IntervalType::ShortBreak,
                "completed = {}",
                completed
            );
        }
    }

    #[test]
    fn test_every_fourth_focus_followed_by_long_break() {
        for completed in [3, 7, 11, 99] {
            assert_eq!(next_interval(IntervalType::Focus, completed, LONG_BREAK_INTERVAL), IntervalType::LongBreak);
        }
    }

    #[test]
    fn test_breaks_followed_by_focus() {
        for completed in [0, 3, 4, 100] {
            assert_eq!(next_interval(IntervalType::ShortBreak, completed, LONG_BREAK_INTERVAL), IntervalType::Focus);
            assert_eq!(next_interval(IntervalType::LongBreak, completed, LONG_BREAK_INTERVAL), IntervalType::Focus);
        }
    }

    #[test]
    fn test_custom_cadence() {
        assert_eq!(next_interval(IntervalType::Focus, 1, 2), IntervalType::LongBreak);
        assert_eq!(next_interval(IntervalType::Focus, 2, 2), IntervalType::ShortBreak);
        assert_eq!(next_interval(IntervalType::Focus, 0, 1), IntervalType::LongBreak);
    }

    #[test]
    fn test_counter_overflow_saturates() {
        assert_eq!(next_interval(IntervalType::Focus, u32::MAX, LONG_BREAK_INTERVAL), IntervalType::ShortBreak);
    }

    #[test]
    fn test_default_durations() {
        let durations = Durations::default();

        assert_eq!(durations.duration_for(IntervalType::Focus), 1500);
        assert_eq!(durations.duration_for(IntervalType::ShortBreak), 300);
        assert_eq!(durations.duration_for(IntervalType::LongBreak), 900);
        assert_eq!(durations.long_break_every(), 4);
        assert_eq!(FOCUS_DURATION, 1500);
        assert_eq!(SHORT_BREAK_DURATION, 300);
        assert_eq!(LONG_BREAK_DURATION, 900);
    }

    #[test]
    fn test_zero_durations_rejected() {
        assert!(matches!(
            Durations::new(0, 300, 900, 4),
            Err(FocusError::InvalidDuration { interval: IntervalType::Focus })
        ));
        assert!(matches!(
            Durations::new(1500, 0, 900, 4),
            Err(FocusError::InvalidDuration { interval: IntervalType::ShortBreak })
        ));
        assert!(matches!(
            Durations::new(1500, 300, 0, 4),
            Err(FocusError::InvalidDuration { interval: IntervalType::LongBreak })
        ));
        assert!(matches!(Durations::new(1500, 300, 900, 0), Err(FocusError::InvalidLongBreakInterval)));
    }

    #[test]
    fn test_durations_policy_uses_own_cadence() {
        let durations = Durations::new(60, 10, 30, 2).unwrap();
        assert_eq!(durations.next_interval(IntervalType::Focus, 1), IntervalType::LongBreak);
        assert_eq!(durations.next_interval(IntervalType::Focus, 0), IntervalType::ShortBreak);
    }

    #[test]
    fn test_interval_type_names() {
        assert_eq!(IntervalType::ShortBreak.as_str(), "break");
        assert_eq!(IntervalType::LongBreak.as_str(), "long_break");
        assert_eq!("focus".parse::<IntervalType>().unwrap(), IntervalType::Focus);
        assert_eq!("break".parse::<IntervalType>().unwrap(), IntervalType::ShortBreak);
        assert!("nap".parse::<IntervalType>().is_err());

        assert_eq!(serde_json::to_string(&IntervalType::LongBreak).unwrap(), "\"long_break\"");
        assert_eq!(IntervalType::ShortBreak.to_string(), "short break");
        assert!(IntervalType::LongBreak.is_break());
        assert!(!IntervalType::Focus.is_break());
    }
}
