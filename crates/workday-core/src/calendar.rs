//! Date values the day-walk operations accept.
//!
//! Classification happens on the calendar date. Stepping moves exactly one
//! calendar day and keeps whatever time-of-day and offset the value carries,
//! so `next_working_day(2018-05-18 09:30)` is `2018-05-21 09:30` under a
//! weekend source.

use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime};

use crate::error::CalendarError;

pub trait CalendarDate: Copy {
    /// The calendar day used for classification.
    fn calendar_date(&self) -> Date;

    /// Moves by `days` whole calendar days.
    fn shift_days(self, days: i64) -> Result<Self, CalendarError>;
}

impl CalendarDate for Date {
    fn calendar_date(&self) -> Date {
        *self
    }

    fn shift_days(self, days: i64) -> Result<Self, CalendarError> {
        self.checked_add(Duration::days(days))
            .ok_or(CalendarError::OutOfRange { date: self })
    }
}

impl CalendarDate for PrimitiveDateTime {
    fn calendar_date(&self) -> Date {
        self.date()
    }

    fn shift_days(self, days: i64) -> Result<Self, CalendarError> {
        self.checked_add(Duration::days(days))
            .ok_or(CalendarError::OutOfRange { date: self.date() })
    }
}

impl CalendarDate for OffsetDateTime {
    fn calendar_date(&self) -> Date {
        self.date()
    }

    fn shift_days(self, days: i64) -> Result<Self, CalendarError> {
        self.checked_add(Duration::days(days))
            .ok_or(CalendarError::OutOfRange { date: self.date() })
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use super::*;

    #[test]
    fn shifting_keeps_time_of_day() {
        let start = datetime!(2018-05-18 09:30);
        assert_eq!(start.shift_days(1).unwrap(), datetime!(2018-05-19 09:30));
        assert_eq!(start.shift_days(-5).unwrap(), datetime!(2018-05-13 09:30));
        assert_eq!(start.calendar_date(), date!(2018 - 05 - 18));
    }

    #[test]
    fn offset_values_classify_by_local_date() {
        let late = datetime!(2018-05-18 23:30 +02:00);
        assert_eq!(late.calendar_date(), date!(2018 - 05 - 18));
        assert_eq!(late.shift_days(1).unwrap(), datetime!(2018-05-19 23:30 +02:00));
    }

    #[test]
    fn stepping_past_the_range_is_an_error() {
        assert_eq!(
            Date::MAX.shift_days(1),
            Err(CalendarError::OutOfRange { date: Date::MAX })
        );
    }
}
