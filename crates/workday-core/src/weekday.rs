//! Day-of-week rule source.

use std::collections::BTreeSet;

use time::{Date, Weekday};

use crate::error::SourceError;
use crate::source::{DayKind, WorkingDaySource};

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

/// Classifies days purely by their weekday.
///
/// Internally stores the non-working weekdays; [`WeekdaySource::working`]
/// takes the dual formulation and stores the complement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdaySource {
    non_working: BTreeSet<u8>,
}

impl WeekdaySource {
    /// Source where the given weekdays are non-working.
    pub fn non_working(days: impl IntoIterator<Item = Weekday>) -> Self {
        Self {
            non_working: days.into_iter().map(Weekday::number_days_from_monday).collect(),
        }
    }

    /// Source where only the given weekdays are working.
    pub fn working(days: impl IntoIterator<Item = Weekday>) -> Self {
        let working: BTreeSet<u8> = days
            .into_iter()
            .map(Weekday::number_days_from_monday)
            .collect();
        Self::non_working(
            ALL_WEEKDAYS
                .into_iter()
                .filter(|day| !working.contains(&day.number_days_from_monday())),
        )
    }

    /// Saturday and Sunday are non-working.
    pub fn weekend() -> Self {
        Self::non_working([Weekday::Saturday, Weekday::Sunday])
    }

    /// Monday to Friday are working.
    pub fn monday_to_friday() -> Self {
        Self::working([
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
        ])
    }

    pub fn non_working_days(&self) -> Vec<Weekday> {
        ALL_WEEKDAYS
            .into_iter()
            .filter(|day| self.non_working.contains(&day.number_days_from_monday()))
            .collect()
    }
}

impl WorkingDaySource for WeekdaySource {
    fn classify(&self, date: Date) -> DayKind {
        DayKind::from_non_working(
            self.non_working
                .contains(&date.weekday().number_days_from_monday()),
        )
    }

    fn describe(&self) -> String {
        let names: Vec<String> = self
            .non_working_days()
            .into_iter()
            .map(|day| day.to_string())
            .collect();
        format!("weekdays non-working [{}]", names.join(", "))
    }
}

/// Parses an English weekday name or three-letter abbreviation.
pub fn parse_weekday(value: &str) -> Result<Weekday, SourceError> {
    let normalized = value.trim().to_ascii_lowercase();
    ALL_WEEKDAYS
        .into_iter()
        .find(|day| {
            let name = day.to_string().to_ascii_lowercase();
            normalized == name || (normalized.len() == 3 && name.starts_with(&normalized))
        })
        .ok_or_else(|| {
            SourceError::invalid_configuration(format!(
                "unknown weekday '{value}', expected a name such as 'monday' or 'sat'"
            ))
        })
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::source::WorkingDaySourceExt;

    #[test]
    fn weekend_flags_saturday_and_sunday() {
        let source = WeekdaySource::weekend();
        assert!(source.is_working_day(date!(2018 - 05 - 18)));
        assert!(source.is_non_working_day(date!(2018 - 05 - 19)));
        assert!(source.is_non_working_day(date!(2018 - 05 - 20)));
        assert!(source.is_working_day(date!(2018 - 05 - 21)));
    }

    #[test]
    fn working_constructor_is_the_complement() {
        assert_eq!(WeekdaySource::monday_to_friday(), WeekdaySource::weekend());
        assert_eq!(
            WeekdaySource::working([Weekday::Wednesday]).non_working_days().len(),
            6
        );
    }

    #[test]
    fn parses_names_and_abbreviations() {
        assert_eq!(parse_weekday("Saturday").unwrap(), Weekday::Saturday);
        assert_eq!(parse_weekday(" sun ").unwrap(), Weekday::Sunday);
        assert_eq!(parse_weekday("TUE").unwrap(), Weekday::Tuesday);
        assert!(parse_weekday("funday").is_err());
        assert!(parse_weekday("mo").is_err());
    }
}
