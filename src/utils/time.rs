use chrono::{Days, NaiveDate};

/// This is the standard way of converting a date to a string in lifeplanner.
pub fn date_to_record_name(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Returns `length` consecutive dates ending with `end` (inclusive), oldest first.
pub fn rolling_window(end: NaiveDate, length: u64) -> Vec<NaiveDate> {
    (0..length)
        .rev()
        .filter_map(|offset| end.checked_sub_days(Days::new(offset)))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{date_to_record_name, rolling_window};

    #[test]
    fn test_rolling_window_crosses_month() {
        let end = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let window = rolling_window(end, 7)
            .into_iter()
            .map(date_to_record_name)
            .collect::<Vec<_>>();

        assert_eq!(
            window,
            vec![
                "2024-02-25",
                "2024-02-26",
                "2024-02-27",
                "2024-02-28",
                "2024-02-29",
                "2024-03-01",
                "2024-03-02"
            ]
        );
    }
}
