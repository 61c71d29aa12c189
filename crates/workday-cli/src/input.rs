//! Date arguments: a bare date or a local date-time.

use std::fmt::{Display, Formatter};

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};
use workday_core::{parse_date, CalendarDate, CalendarError};

use crate::error::CliError;

const DATE_TIME_SECONDS: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const DATE_TIME_MINUTES: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");

/// A command-line date, walked with its time-of-day intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarInput {
    Date(Date),
    DateTime(PrimitiveDateTime),
}

impl CalendarInput {
    pub fn parse(raw: &str) -> Result<Self, CliError> {
        let raw = raw.trim();
        if raw.contains('T') {
            return PrimitiveDateTime::parse(raw, DATE_TIME_SECONDS)
                .or_else(|_| PrimitiveDateTime::parse(raw, DATE_TIME_MINUTES))
                .map(Self::DateTime)
                .map_err(|_| {
                    CliError::InvalidArgument(format!(
                        "'{raw}' is not a date-time, expected YYYY-MM-DDTHH:MM[:SS]"
                    ))
                });
        }

        parse_date(raw)
            .map(Self::Date)
            .map_err(|error| CliError::InvalidArgument(error.message().to_owned()))
    }
}

impl CalendarDate for CalendarInput {
    fn calendar_date(&self) -> Date {
        match self {
            Self::Date(date) => *date,
            Self::DateTime(date_time) => date_time.date(),
        }
    }

    fn shift_days(self, days: i64) -> Result<Self, CalendarError> {
        match self {
            Self::Date(date) => date.shift_days(days).map(Self::Date),
            Self::DateTime(date_time) => date_time.shift_days(days).map(Self::DateTime),
        }
    }
}

impl Display for CalendarInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{date}"),
            Self::DateTime(date_time) => {
                let formatted = date_time
                    .format(DATE_TIME_SECONDS)
                    .map_err(|_| std::fmt::Error)?;
                f.write_str(&formatted)
            }
        }
    }
}
