//! # Workday Core
//!
//! Working-day classification composed from independent sources, plus
//! business-day calendar arithmetic on top of it.
//!
//! ## Overview
//!
//! - **Sources** decide, for one date, working or non-working
//! - **External sources** parse content from a string, a file or an HTTP
//!   endpoint and keep it fresh in the background
//! - **The service** aggregates sources (one non-working vote wins) and
//!   walks the calendar: next/previous working day, add/subtract N
//! - **The builder** collects sources, collapsing duplicate instances
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`builder`] | Service builder |
//! | [`calendar`] | Date types accepted by day walks |
//! | [`config`] | JSON/env configuration |
//! | [`date_set`] | Literal holiday sets and date list parsing |
//! | [`error`] | Error types |
//! | [`external`] | Parse/check sources over external content |
//! | [`gov_uk`] | GOV.UK bank holiday feed |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`origin`] | Content origins (literal, file, HTTP) |
//! | [`service`] | Aggregation and day walks |
//! | [`source`] | The source trait |
//! | [`state`] | Refreshable state holder |
//! | [`trigger`] | Periodic and file-change refresh triggers |
//! | [`weekday`] | Day-of-week rule |
//!
//! ## Quick Start
//!
//! ```rust
//! use time::macros::date;
//! use time::Weekday;
//! use workday_core::WorkingDayServiceBuilder;
//!
//! let service = WorkingDayServiceBuilder::new()
//!     .with_weekend_source()
//!     .with_non_working_weekdays([Weekday::Monday, Weekday::Tuesday])
//!     .build();
//!
//! // Friday -> skips Sat, Sun, Mon, Tue
//! assert_eq!(
//!     service.next_working_day(date!(2018 - 05 - 18)).unwrap(),
//!     date!(2018 - 05 - 23)
//! );
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │ Content Origin   │────▶│ Refresh Trigger  │
//! │ (str/file/http)  │     │ (timer / watch)  │
//! └────────┬─────────┘     └────────┬─────────┘
//!          │ parse                  │ refresh
//!          ▼                        ▼
//! ┌──────────────────────────────────────────┐
//! │ Refreshable State (RwLock<Arc<T>> swap)  │
//! └────────────────────┬─────────────────────┘
//!                      │ check(date, &T)
//!                      ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ Sources          │────▶│ WorkingDayService│
//! │ (weekday/dates)  │     │ (any non-working)│
//! └──────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Only construction can fail. Once a source holds a state, refresh
//! failures are logged through `tracing` and the previous state is kept:
//!
//! ```rust
//! use workday_core::{SourceError, SourceErrorKind};
//!
//! fn handle_error(error: SourceError) {
//!     match error.kind() {
//!         SourceErrorKind::InvalidConfiguration => { /* fix the path or URL */ }
//!         SourceErrorKind::Unavailable => { /* initial fetch failed */ }
//!         SourceErrorKind::Parse => { /* content is malformed */ }
//!         SourceErrorKind::Internal => {}
//!     }
//! }
//! ```

pub mod builder;
pub mod calendar;
pub mod config;
pub mod date_set;
pub mod error;
pub mod external;
pub mod gov_uk;
pub mod http_client;
pub mod origin;
pub mod service;
pub mod source;
pub mod state;
pub mod trigger;
pub mod weekday;

pub use builder::WorkingDayServiceBuilder;
pub use calendar::CalendarDate;
pub use config::{ConfigError, GovUkConfig, WorkdayConfig};
pub use date_set::{parse_date, parse_date_list, DateSetSource};
pub use error::{CalendarError, SourceError, SourceErrorKind};
pub use external::ExternalSource;
pub use gov_uk::{
    bank_holiday_source, bank_holiday_source_at, parse_bank_holidays, BankHolidayDivision,
    GOV_UK_BANK_HOLIDAYS_URL,
};
pub use http_client::{
    HttpClient, HttpError, HttpFuture, HttpRequest, HttpResponse, ReqwestHttpClient,
};
pub use origin::{ContentOrigin, FetchFuture, FileOrigin, HttpOrigin, LiteralOrigin};
pub use service::WorkingDayService;
pub use source::{DayKind, SharedSource, WorkingDaySource, WorkingDaySourceExt};
pub use state::RefreshableState;
pub use trigger::{RefreshTask, RefreshTrigger};
pub use weekday::{parse_weekday, WeekdaySource};
