use chrono::{DateTime, Duration, Local, NaiveDate, SecondsFormat, Utc};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// Calendar format of `Entry::date_iso`.
pub const DATE_ISO_FORMAT: &str = "%Y-%m-%d";

/// Relative day names accepted wherever a date is typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum DayKeyword {
    Today,
    Yesterday,
    Tomorrow,
}

impl DayKeyword {
    /// Every accepted keyword, for help and error messages.
    pub fn names() -> Vec<&'static str> {
        DayKeyword::iter().map(<&'static str>::from).collect()
    }

    fn resolve(self, reference: NaiveDate) -> NaiveDate {
        match self {
            DayKeyword::Today => reference,
            DayKeyword::Yesterday => reference - Duration::days(1),
            DayKeyword::Tomorrow => reference + Duration::days(1),
        }
    }
}

/// Local calendar date as `YYYY-MM-DD`.
pub fn iso_date(now: DateTime<Local>) -> String {
    now.date_naive().format(DATE_ISO_FORMAT).to_string()
}

/// Sortable instant: UTC, millisecond precision, `Z` suffix
/// (`2024-01-01T09:30:00.000Z`).
pub fn iso_timestamp(now: DateTime<Local>) -> String {
    now.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a user supplied date.
///
/// Accepts a [`DayKeyword`] (relative to `reference`) or any of `formats`.
/// Surrounding whitespace is ignored.
///
/// ```
/// # use chrono::NaiveDate;
/// # use dj_core::dates::parse_date_input;
/// let reference = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let formats = vec!["%Y-%m-%d".to_string()];
/// assert_eq!(
///     parse_date_input("Yesterday", reference, &formats),
///     NaiveDate::from_ymd_opt(2024, 2, 29)
/// );
/// ```
pub fn parse_date_input(input: &str, reference: NaiveDate, formats: &[String]) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(keyword) = DayKeyword::from_str(input) {
        return Some(keyword.resolve(reference));
    }
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn formats() -> Vec<String> {
        vec!["%Y-%m-%d".to_string(), "%d/%m/%Y".to_string()]
    }

    #[test]
    fn keywords_are_relative_to_reference() {
        let reference = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(
            parse_date_input("today", reference, &formats()),
            Some(reference)
        );
        assert_eq!(
            parse_date_input("YESTERDAY", reference, &formats()),
            NaiveDate::from_ymd_opt(2024, 12, 31)
        );
        assert_eq!(
            parse_date_input(" tomorrow ", reference, &formats()),
            NaiveDate::from_ymd_opt(2025, 1, 2)
        );
    }

    #[test]
    fn keyword_names_are_kebab_case() {
        assert_eq!(DayKeyword::names(), vec!["today", "yesterday", "tomorrow"]);
    }

    #[test]
    fn explicit_formats_are_tried_in_order() {
        let reference = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(
            parse_date_input("2024-06-30", reference, &formats()),
            NaiveDate::from_ymd_opt(2024, 6, 30)
        );
        assert_eq!(
            parse_date_input("30/06/2024", reference, &formats()),
            NaiveDate::from_ymd_opt(2024, 6, 30)
        );
        assert_eq!(parse_date_input("not a date", reference, &formats()), None);
        assert_eq!(parse_date_input("  ", reference, &formats()), None);
    }

    #[test]
    fn timestamps_are_utc_with_millis() {
        let now = Utc
            .with_ymd_and_hms(2024, 1, 1, 9, 30, 0)
            .unwrap()
            .with_timezone(&Local);
        assert_eq!(iso_timestamp(now), "2024-01-01T09:30:00.000Z");
    }
}
