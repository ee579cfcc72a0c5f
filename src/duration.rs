use chrono::{Duration, NaiveTime};

/// Clock formats accepted for bedtime and wake-up fields.
const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// Parse an `HH:MM` (or `HH:MM:SS`) clock string.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
}

/// Hours slept between `bedtime` and `wakeup_time`.
///
/// Both times are placed on the same calendar day. A wake-up earlier than
/// bedtime is moved to the following day, so the result is never negative.
pub fn duration_hours(bedtime: NaiveTime, wakeup_time: NaiveTime) -> f64 {
    let mut elapsed = wakeup_time - bedtime;
    if wakeup_time < bedtime {
        elapsed = elapsed + Duration::days(1);
    }

    elapsed.num_seconds() as f64 / 3600.0
}

/// String form of [`duration_hours`]. Unparseable input yields `0.0`.
pub fn compute_duration(bedtime: &str, wakeup_time: &str) -> f64 {
    match (parse_time(bedtime), parse_time(wakeup_time)) {
        (Some(bed), Some(wake)) => duration_hours(bed, wake),
        _ => {
            tracing::warn!(bedtime, wakeup_time, "Unparseable time, duration set to 0");
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overnight_sleep_rolls_over_midnight() {
        assert_eq!(compute_duration("23:00", "07:00"), 8.0);
    }

    #[test]
    fn same_day_sleep_has_no_rollover() {
        assert_eq!(compute_duration("22:30", "23:15"), 0.75);
    }

    #[test]
    fn identical_times_are_zero_hours() {
        assert_eq!(compute_duration("07:00", "07:00"), 0.0);
    }

    #[test]
    fn malformed_input_fails_soft() {
        assert_eq!(compute_duration("bad", "07:00"), 0.0);
        assert_eq!(compute_duration("23:00", ""), 0.0);
        assert_eq!(compute_duration("25:00", "07:00"), 0.0);
    }

    #[test]
    fn seconds_are_accepted() {
        assert_eq!(compute_duration("23:30:00", "06:00"), 6.5);
    }

    #[test]
    fn one_minute_before_bedtime_is_almost_a_full_day() {
        let hours = compute_duration("08:00", "07:59");
        assert!((hours - (23.0 + 59.0 / 60.0)).abs() < 1e-9);
    }

    #[test]
    fn typed_duration_matches_string_form() {
        let bed = NaiveTime::from_hms_opt(21, 45, 0).unwrap();
        let wake = NaiveTime::from_hms_opt(5, 15, 0).unwrap();
        assert_eq!(duration_hours(bed, wake), 7.5);
        assert_eq!(compute_duration("21:45", "05:15"), 7.5);
    }
}
