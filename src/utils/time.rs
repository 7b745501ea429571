use chrono::NaiveDate;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// This is the standard way of converting a date to a string in luleme. Journal entries and the
/// check-in history are keyed by it.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{date_key, parse_date_key};

    #[test]
    fn test_date_key_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(date_key(date), "2025-03-05");
        assert_eq!(parse_date_key("2025-03-05"), Some(date));
    }

    #[test]
    fn test_parse_date_key_rejects_garbage() {
        assert_eq!(parse_date_key(""), None);
        assert_eq!(parse_date_key("05/03/2025"), None);
        assert_eq!(parse_date_key("2025-13-01"), None);
    }
}
