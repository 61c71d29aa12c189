//! Classification source contract.
//!
//! A source answers one question for one calendar day: is it a working day
//! or not? Sources implement [`WorkingDaySource::classify`] only. The boolean
//! queries come from the blanket [`WorkingDaySourceExt`] impl, so
//! `is_working_day(d) == !is_non_working_day(d)` holds for every source.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::Date;

/// Classification of a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    Working,
    NonWorking,
}

impl DayKind {
    /// Maps a "is this day non-working?" answer onto a classification.
    pub const fn from_non_working(non_working: bool) -> Self {
        if non_working {
            Self::NonWorking
        } else {
            Self::Working
        }
    }

    pub const fn is_working(self) -> bool {
        matches!(self, Self::Working)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Working => "working",
            Self::NonWorking => "non_working",
        }
    }
}

impl Display for DayKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit capable of independently classifying a date.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: the service shares them across
/// threads and refresh-backed sources are read while a background task
/// replaces their state.
pub trait WorkingDaySource: Send + Sync {
    /// Classifies `date`. Must not block on I/O.
    fn classify(&self, date: Date) -> DayKind;

    /// Short human-readable label used in logs.
    fn describe(&self) -> String {
        String::from("source")
    }
}

/// Boolean queries derived from [`WorkingDaySource::classify`].
pub trait WorkingDaySourceExt {
    fn is_working_day(&self, date: Date) -> bool;
    fn is_non_working_day(&self, date: Date) -> bool;
}

impl<S: WorkingDaySource + ?Sized> WorkingDaySourceExt for S {
    fn is_working_day(&self, date: Date) -> bool {
        self.classify(date).is_working()
    }

    fn is_non_working_day(&self, date: Date) -> bool {
        !self.is_working_day(date)
    }
}

/// Shared handle to a source. Identity (pointer equality) is what the
/// builder uses to collapse duplicates.
pub type SharedSource = Arc<dyn WorkingDaySource>;

pub(crate) fn same_source(left: &SharedSource, right: &SharedSource) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(left), Arc::as_ptr(right))
}

impl<S: WorkingDaySource + ?Sized> WorkingDaySource for Arc<S> {
    fn classify(&self, date: Date) -> DayKind {
        (**self).classify(date)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    struct Fixed(DayKind);

    impl WorkingDaySource for Fixed {
        fn classify(&self, _date: Date) -> DayKind {
            self.0
        }
    }

    #[test]
    fn derived_queries_are_negations() {
        for kind in [DayKind::Working, DayKind::NonWorking] {
            let source = Fixed(kind);
            let day = date!(2018 - 05 - 14);
            assert_eq!(source.is_working_day(day), !source.is_non_working_day(day));
        }
    }

    #[test]
    fn identity_ignores_equal_contents() {
        let first: SharedSource = Arc::new(Fixed(DayKind::Working));
        let second: SharedSource = Arc::new(Fixed(DayKind::Working));
        assert!(same_source(&first, &Arc::clone(&first)));
        assert!(!same_source(&first, &second));
    }

    #[test]
    fn from_non_working_maps_flags() {
        assert_eq!(DayKind::from_non_working(true), DayKind::NonWorking);
        assert_eq!(DayKind::from_non_working(false), DayKind::Working);
        assert_eq!(DayKind::NonWorking.to_string(), "non_working");
    }
}
