//! Source aggregation and day-walk operations.
//!
//! # Aggregation
//!
//! | Registered sources | Date is working when |
//! |--------------------|----------------------|
//! | none | always |
//! | one or more | every source classifies it working |
//!
//! Equivalently, a single non-working vote makes the date non-working.
//!
//! # Day walks
//!
//! | Operation | Direction | Counts start day |
//! |-----------|-----------|------------------|
//! | [`next_working_day`](WorkingDayService::next_working_day) | forward | no |
//! | [`previous_working_day`](WorkingDayService::previous_working_day) | backward | no |
//! | [`add_working_days`](WorkingDayService::add_working_days) | forward | extra step if start is non-working |
//! | [`subtract_working_days`](WorkingDayService::subtract_working_days) | backward | extra step if start is non-working |
//!
//! Walks step one calendar day at a time. A configuration in which no day is
//! ever working makes them loop forever; callers are responsible for never
//! building one.

use time::Date;

use crate::calendar::CalendarDate;
use crate::error::CalendarError;
use crate::source::{DayKind, SharedSource, WorkingDaySource, WorkingDaySourceExt};

/// Aggregates sources into one classification and walks the calendar.
///
/// Immutable after construction and cheap to share behind an `Arc`. Sources
/// may refresh their own state; the service only reads through them.
#[derive(Clone, Default)]
pub struct WorkingDayService {
    sources: Vec<SharedSource>,
}

impl WorkingDayService {
    /// Use [`WorkingDayServiceBuilder`](crate::WorkingDayServiceBuilder) to
    /// collapse duplicate sources.
    pub fn new(sources: Vec<SharedSource>) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &[SharedSource] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// First day strictly after `date` that is working.
    pub fn next_working_day<D: CalendarDate>(&self, date: D) -> Result<D, CalendarError> {
        self.step_until_working(date, 1)
    }

    /// Last day strictly before `date` that is working.
    pub fn previous_working_day<D: CalendarDate>(&self, date: D) -> Result<D, CalendarError> {
        self.step_until_working(date, -1)
    }

    /// Advances `days` working days. Zero returns `date` unchanged. When
    /// `date` is itself non-working one extra advance is taken.
    pub fn add_working_days<D: CalendarDate>(
        &self,
        date: D,
        days: u32,
    ) -> Result<D, CalendarError> {
        self.walk(date, days, 1)
    }

    /// Mirror of [`add_working_days`](Self::add_working_days).
    pub fn subtract_working_days<D: CalendarDate>(
        &self,
        date: D,
        days: u32,
    ) -> Result<D, CalendarError> {
        self.walk(date, days, -1)
    }

    fn walk<D: CalendarDate>(
        &self,
        date: D,
        days: u32,
        direction: i64,
    ) -> Result<D, CalendarError> {
        if days == 0 {
            return Ok(date);
        }

        let mut steps = u64::from(days);
        if !self.is_working_day(date.calendar_date()) {
            steps += 1;
        }

        let mut current = date;
        for _ in 0..steps {
            current = self.step_until_working(current, direction)?;
        }
        Ok(current)
    }

    fn step_until_working<D: CalendarDate>(
        &self,
        date: D,
        direction: i64,
    ) -> Result<D, CalendarError> {
        let mut current = date;
        loop {
            current = current.shift_days(direction)?;
            if self.is_working_day(current.calendar_date()) {
                return Ok(current);
            }
        }
    }
}

impl WorkingDaySource for WorkingDayService {
    fn classify(&self, date: Date) -> DayKind {
        DayKind::from_non_working(
            self.sources
                .iter()
                .any(|source| source.is_non_working_day(date)),
        )
    }

    fn describe(&self) -> String {
        format!("service ({} sources)", self.sources.len())
    }
}

impl std::fmt::Debug for WorkingDayService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sources: Vec<String> = self.sources.iter().map(|source| source.describe()).collect();
        f.debug_struct("WorkingDayService")
            .field("sources", &sources)
            .finish()
    }
}
