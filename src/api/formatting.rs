use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Timelike, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

pub type NumberFormatterFn = Arc<dyn Fn(f64) -> String + Send + Sync + 'static>;
pub type DateFormatterFn = Arc<dyn Fn(DateTime<Utc>) -> String + Send + Sync + 'static>;

/// Locale used by the built-in formatters (Swiss conventions for the
/// national languages).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FormatLocale {
    #[default]
    En,
    De,
    Fr,
    It,
}

impl FormatLocale {
    fn group_separator(self) -> &'static str {
        match self {
            Self::En => ",",
            Self::De | Self::It => "\u{2019}",
            Self::Fr => "\u{202f}",
        }
    }

    fn decimal_separator(self) -> &'static str {
        match self {
            Self::En | Self::De | Self::It => ".",
            Self::Fr => ",",
        }
    }
}

/// Formats `value` rounded to at most `max_fraction_digits`, trailing zeros
/// trimmed, with locale grouping. Non-finite values render as `"–"`.
#[must_use]
pub fn format_number(value: f64, max_fraction_digits: u32, locale: FormatLocale) -> String {
    if !value.is_finite() {
        return "\u{2013}".to_owned();
    }
    let text = match Decimal::from_f64(value) {
        Some(decimal) => decimal
            .round_dp(max_fraction_digits)
            .normalize()
            .to_string(),
        None => format!("{value:.prec$}", prec = max_fraction_digits as usize),
    };

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push_str(locale.group_separator());
        }
        grouped.push(digit);
    }

    let sign = if grouped.chars().all(|c| c == '0') && fraction.is_empty() {
        ""
    } else {
        sign
    };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}{}{fraction}", locale.decimal_separator())
    }
}

/// Granularity of temporal labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TimeUnit {
    Year,
    Month,
    #[default]
    Day,
    Minute,
}

#[must_use]
pub fn format_date(time: DateTime<Utc>, unit: TimeUnit, locale: FormatLocale) -> String {
    match (unit, locale) {
        (TimeUnit::Year, _) => format!("{}", time.year()),
        (TimeUnit::Month, FormatLocale::En) => format!("{:04}-{:02}", time.year(), time.month()),
        (TimeUnit::Month, _) => format!("{:02}.{:04}", time.month(), time.year()),
        (TimeUnit::Day, FormatLocale::En) => time.format("%Y-%m-%d").to_string(),
        (TimeUnit::Day, _) => time.format("%d.%m.%Y").to_string(),
        (TimeUnit::Minute, FormatLocale::En) => time.format("%Y-%m-%d %H:%M").to_string(),
        (TimeUnit::Minute, _) => format!(
            "{} {:02}:{:02}",
            time.format("%d.%m.%Y"),
            time.hour(),
            time.minute()
        ),
    }
}

/// Formatting functions carried by a chart state.
#[derive(Clone)]
pub struct Formatters {
    pub number: NumberFormatterFn,
    pub date: DateFormatterFn,
    pub locale: FormatLocale,
}

impl Formatters {
    /// Built-in formatters: two fraction digits and day-level dates.
    #[must_use]
    pub fn for_locale(locale: FormatLocale) -> Self {
        Self {
            number: Arc::new(move |value| format_number(value, 2, locale)),
            date: Arc::new(move |time| format_date(time, TimeUnit::Day, locale)),
            locale,
        }
    }

    #[must_use]
    pub fn with_number_formatter(mut self, formatter: NumberFormatterFn) -> Self {
        self.number = formatter;
        self
    }

    #[must_use]
    pub fn with_date_formatter(mut self, formatter: DateFormatterFn) -> Self {
        self.date = formatter;
        self
    }

    #[must_use]
    pub fn format_number(&self, value: f64) -> String {
        (self.number)(value)
    }

    #[must_use]
    pub fn format_date(&self, time: DateTime<Utc>) -> String {
        (self.date)(time)
    }
}

impl Default for Formatters {
    fn default() -> Self {
        Self::for_locale(FormatLocale::default())
    }
}

impl fmt::Debug for Formatters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatters")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{FormatLocale, TimeUnit, format_date, format_number};

    #[test]
    fn numbers_group_per_locale() {
        assert_eq!(format_number(1_234_567.891, 2, FormatLocale::En), "1,234,567.89");
        assert_eq!(format_number(1_234_567.891, 2, FormatLocale::De), "1\u{2019}234\u{2019}567.89");
        assert_eq!(format_number(-1234.5, 2, FormatLocale::Fr), "-1\u{202f}234,5");
        assert_eq!(format_number(999.0, 2, FormatLocale::En), "999");
    }

    #[test]
    fn rounding_and_edge_values() {
        assert_eq!(format_number(0.125, 2, FormatLocale::En), "0.12");
        assert_eq!(format_number(-0.001, 2, FormatLocale::En), "0");
        assert_eq!(format_number(f64::NAN, 2, FormatLocale::En), "\u{2013}");
    }

    #[test]
    fn dates_follow_unit_and_locale() {
        let time = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 0).single().expect("valid time");
        assert_eq!(format_date(time, TimeUnit::Year, FormatLocale::De), "2024");
        assert_eq!(format_date(time, TimeUnit::Month, FormatLocale::En), "2024-03");
        assert_eq!(format_date(time, TimeUnit::Day, FormatLocale::Fr), "09.03.2024");
        assert_eq!(format_date(time, TimeUnit::Minute, FormatLocale::It), "09.03.2024 07:05");
    }
}
