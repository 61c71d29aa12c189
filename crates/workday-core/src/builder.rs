use std::sync::Arc;

use time::{Date, Weekday};

use crate::date_set::DateSetSource;
use crate::service::WorkingDayService;
use crate::source::{same_source, SharedSource};
use crate::weekday::WeekdaySource;

/// Builder for a [`WorkingDayService`].
///
/// Sources are kept as a set keyed by identity: registering the same `Arc`
/// twice keeps one entry, while two separately allocated sources with equal
/// contents are both kept. Insertion order is preserved.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use time::macros::date;
/// use workday_core::{DateSetSource, WorkingDayServiceBuilder, WorkingDaySourceExt};
///
/// let holidays = Arc::new(DateSetSource::new([date!(2018 - 05 - 28)]));
/// let service = WorkingDayServiceBuilder::new()
///     .with_weekend_source()
///     .add_source(holidays.clone())
///     .add_source(holidays)
///     .build();
///
/// assert_eq!(service.len(), 2);
/// assert!(service.is_non_working_day(date!(2018 - 05 - 28)));
/// ```
#[derive(Default)]
pub struct WorkingDayServiceBuilder {
    sources: Vec<SharedSource>,
}

impl WorkingDayServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `source` unless this exact instance is already registered.
    pub fn add_source(mut self, source: SharedSource) -> Self {
        if !self
            .sources
            .iter()
            .any(|existing| same_source(existing, &source))
        {
            self.sources.push(source);
        }
        self
    }

    pub fn add_sources(self, sources: impl IntoIterator<Item = SharedSource>) -> Self {
        sources.into_iter().fold(self, Self::add_source)
    }

    /// Replaces every registered source with `source`.
    pub fn use_source(mut self, source: SharedSource) -> Self {
        self.sources.clear();
        self.add_source(source)
    }

    /// Replaces every registered source with `sources`.
    pub fn use_sources(mut self, sources: impl IntoIterator<Item = SharedSource>) -> Self {
        self.sources.clear();
        self.add_sources(sources)
    }

    /// Saturday and Sunday are non-working.
    pub fn with_weekend_source(self) -> Self {
        self.add_source(Arc::new(WeekdaySource::weekend()))
    }

    /// Only Monday to Friday are working.
    pub fn with_monday_to_friday_source(self) -> Self {
        self.add_source(Arc::new(WeekdaySource::monday_to_friday()))
    }

    pub fn with_non_working_weekdays(self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.add_source(Arc::new(WeekdaySource::non_working(days)))
    }

    pub fn with_holidays(self, dates: impl IntoIterator<Item = Date>) -> Self {
        self.add_source(Arc::new(DateSetSource::new(dates)))
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Builds the service. An empty builder yields a service that treats
    /// every date as working.
    pub fn build(self) -> WorkingDayService {
        tracing::debug!(sources = self.sources.len(), "building working day service");
        WorkingDayService::new(self.sources)
    }
}
