//! Literal non-working date set.

use std::collections::BTreeSet;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::error::SourceError;
use crate::source::{DayKind, WorkingDaySource};

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const SLASH_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]/[month]/[day]");

/// Non-working days given as an explicit collection of dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateSetSource {
    dates: BTreeSet<Date>,
}

impl DateSetSource {
    pub fn new(dates: impl IntoIterator<Item = Date>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Builds the set from a literal list such as `"2018-05-14,2018-05-15"`.
    pub fn parse(content: &str) -> Result<Self, SourceError> {
        parse_date_list(content).map(Self::new)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn contains(&self, date: Date) -> bool {
        self.dates.contains(&date)
    }
}

impl WorkingDaySource for DateSetSource {
    fn classify(&self, date: Date) -> DayKind {
        DayKind::from_non_working(self.contains(date))
    }

    fn describe(&self) -> String {
        format!("date set ({} dates)", self.dates.len())
    }
}

/// Parses one `YYYY-MM-DD` (or `YYYY/MM/DD`) date.
pub fn parse_date(value: &str) -> Result<Date, SourceError> {
    let trimmed = value.trim();
    Date::parse(trimmed, ISO_DATE)
        .or_else(|_| Date::parse(trimmed, SLASH_DATE))
        .map_err(|_| SourceError::parse(format!("invalid date '{trimmed}', expected YYYY-MM-DD")))
}

/// Parses dates separated by commas and/or newlines. Blank entries and lines
/// starting with `#` are skipped.
pub fn parse_date_list(content: &str) -> Result<Vec<Date>, SourceError> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_date)
        .collect()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::source::WorkingDaySourceExt;

    #[test]
    fn parses_comma_and_newline_separated_lists() {
        let dates = parse_date_list("2018-05-14, 2018/05/15\n# comment\n\n2018-12-25\n")
            .expect("list should parse");
        assert_eq!(
            dates,
            vec![date!(2018 - 05 - 14), date!(2018 - 05 - 15), date!(2018 - 12 - 25)]
        );
    }

    #[test]
    fn rejects_malformed_entries() {
        let error = parse_date_list("2018-05-14,not-a-date").expect_err("should fail");
        assert!(error.message().contains("not-a-date"));
    }

    #[test]
    fn membership_decides_classification() {
        let source = DateSetSource::parse("2018/05/14,2018/05/15").expect("valid");
        assert!(source.is_non_working_day(date!(2018 - 05 - 15)));
        assert!(source.is_working_day(date!(2018 - 05 - 16)));
        assert_eq!(source.len(), 2);
    }
}
