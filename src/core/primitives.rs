use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parses a plain decimal number (`"12"`, `"-0.5"`, `"1e3"`).
///
/// Empty strings, whitespace and non-finite values yield `None`.
#[must_use]
pub fn parse_plain_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Formats a number without a trailing `.0` for integral values so numeric
/// cells stringify the same way the source data spelled them.
#[must_use]
pub fn format_plain_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Extracts the year from labels shaped like `2020` or `Year 2020`.
#[must_use]
pub fn parse_year_label(text: &str) -> Option<i32> {
    let digits = text.strip_prefix("Year ").unwrap_or(text);
    if digits.len() == 4 && digits.bytes().all(|byte| byte.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}

/// Parses the temporal spellings seen in cube observations.
///
/// Accepted, in order: RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS`,
/// `YYYY-MM-DD`, `YYYY-MM`, and bare (or `Year `-prefixed) four digit years.
/// Partial dates resolve to the start of their period in UTC.
#[must_use]
pub fn parse_temporal(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(parsed.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    if let Some((year, month)) = trimmed.split_once('-') {
        if year.len() == 4 && month.len() == 2 {
            let year = year.parse::<i32>().ok()?;
            let month = month.parse::<u32>().ok()?;
            return start_of_month(year, month);
        }
    }
    parse_year_label(trimmed).and_then(|year| start_of_month(year, 1))
}

fn start_of_month(year: i32, month: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::{format_plain_number, parse_plain_number, parse_temporal, parse_year_label};

    #[test]
    fn plain_numbers_parse_and_reject() {
        assert_eq!(parse_plain_number(" 42 "), Some(42.0));
        assert_eq!(parse_plain_number("-0.25"), Some(-0.25));
        assert_eq!(parse_plain_number(""), None);
        assert_eq!(parse_plain_number("NaN"), None);
        assert_eq!(parse_plain_number("inf"), None);
        assert_eq!(parse_plain_number("12 kg"), None);
    }

    #[test]
    fn integral_numbers_format_without_fraction() {
        assert_eq!(format_plain_number(2020.0), "2020");
        assert_eq!(format_plain_number(-3.0), "-3");
        assert_eq!(format_plain_number(0.5), "0.5");
    }

    #[test]
    fn year_labels_accept_optional_prefix() {
        assert_eq!(parse_year_label("2019"), Some(2019));
        assert_eq!(parse_year_label("Year 2019"), Some(2019));
        assert_eq!(parse_year_label("Year  2019"), None);
        assert_eq!(parse_year_label("20190"), None);
        assert_eq!(parse_year_label("FY2019"), None);
    }

    #[test]
    fn temporal_parsing_covers_partial_dates() {
        let full = parse_temporal("2021-03-04T05:06:07Z").expect("rfc3339");
        assert_eq!((full.year(), full.month(), full.hour()), (2021, 3, 5));

        let day = parse_temporal("2021-03-04").expect("date");
        assert_eq!((day.year(), day.month(), day.day()), (2021, 3, 4));

        let month = parse_temporal("2021-03").expect("month");
        assert_eq!((month.year(), month.month(), month.day()), (2021, 3, 1));

        let year = parse_temporal("Year 1999").expect("year");
        assert_eq!((year.year(), year.month()), (1999, 1));

        assert!(parse_temporal("not a date").is_none());
        assert!(parse_temporal("2021-13").is_none());
    }
}
