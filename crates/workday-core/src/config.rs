//! JSON configuration describing which sources a service is built from.
//!
//! ```json
//! {
//!   "non_working_weekdays": ["saturday", "sunday"],
//!   "holidays": ["2018-05-28"],
//!   "holiday_files": ["/etc/workday/holidays.txt"],
//!   "gov_uk": { "division": "england-and-wales", "refresh_secs": 86400 },
//!   "http_timeout_ms": 10000
//! }
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `WORKDAY_HOLIDAYS_FILE` | Appends a watched holiday file |
//! | `WORKDAY_GOV_UK_DIVISION` | Enables the GOV.UK feed for that division |
//! | `WORKDAY_HTTP_TIMEOUT_MS` | Overrides `http_timeout_ms` |

use std::collections::BTreeSet;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Date;

use crate::builder::WorkingDayServiceBuilder;
use crate::date_set::{parse_date, parse_date_list};
use crate::error::SourceError;
use crate::external::ExternalSource;
use crate::gov_uk::{bank_holiday_source_at, BankHolidayDivision, GOV_UK_BANK_HOLIDAYS_URL};
use crate::http_client::{HttpClient, HttpFuture, HttpRequest};
use crate::weekday::parse_weekday;

const DEFAULT_REFRESH_SECS: u64 = 24 * 60 * 60;
const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for {name}: '{value}'")]
    InvalidEnv { name: &'static str, value: String },

    #[error(transparent)]
    Source(#[from] SourceError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GovUkConfig {
    pub division: String,
    pub refresh_secs: u64,
    pub url: String,
}

impl Default for GovUkConfig {
    fn default() -> Self {
        Self {
            division: BankHolidayDivision::default().as_str().to_owned(),
            refresh_secs: DEFAULT_REFRESH_SECS,
            url: GOV_UK_BANK_HOLIDAYS_URL.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkdayConfig {
    pub non_working_weekdays: Vec<String>,
    pub holidays: Vec<String>,
    pub holiday_files: Vec<PathBuf>,
    pub gov_uk: Option<GovUkConfig>,
    pub http_timeout_ms: u64,
}

impl Default for WorkdayConfig {
    fn default() -> Self {
        Self {
            non_working_weekdays: vec![String::from("saturday"), String::from("sunday")],
            holidays: Vec::new(),
            holiday_files: Vec::new(),
            gov_uk: None,
            http_timeout_ms: DEFAULT_HTTP_TIMEOUT_MS,
        }
    }
}

impl WorkdayConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Applies `WORKDAY_*` environment overrides.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|name| env::var(name).ok())
    }

    fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = lookup("WORKDAY_HOLIDAYS_FILE") {
            self.holiday_files.push(PathBuf::from(path));
        }
        if let Some(division) = lookup("WORKDAY_GOV_UK_DIVISION") {
            let gov_uk = self.gov_uk.get_or_insert_with(GovUkConfig::default);
            gov_uk.division = division;
        }
        if let Some(value) = lookup("WORKDAY_HTTP_TIMEOUT_MS") {
            self.http_timeout_ms = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: "WORKDAY_HTTP_TIMEOUT_MS",
                value,
            })?;
        }
        Ok(self)
    }

    /// Constructs every configured source. File and HTTP sources perform
    /// their initial fetch here, so a missing file or unreachable feed fails
    /// the whole call.
    pub async fn into_builder(
        self,
        client: Arc<dyn HttpClient>,
    ) -> Result<WorkingDayServiceBuilder, ConfigError> {
        let mut builder = WorkingDayServiceBuilder::new();

        if !self.non_working_weekdays.is_empty() {
            let days = self
                .non_working_weekdays
                .iter()
                .map(|day| parse_weekday(day))
                .collect::<Result<Vec<_>, _>>()?;
            builder = builder.with_non_working_weekdays(days);
        }

        if !self.holidays.is_empty() {
            let dates = self
                .holidays
                .iter()
                .map(|value| parse_date(value))
                .collect::<Result<Vec<_>, _>>()?;
            builder = builder.with_holidays(dates);
        }

        for path in &self.holiday_files {
            let source = ExternalSource::from_file(
                path,
                |content: &str| parse_date_list(content).map(BTreeSet::from_iter),
                |date, dates: &BTreeSet<Date>| dates.contains(&date),
            )
            .await?;
            builder = builder.add_source(Arc::new(source));
        }

        if let Some(gov_uk) = &self.gov_uk {
            let division = gov_uk.division.parse::<BankHolidayDivision>()?;
            if gov_uk.refresh_secs == 0 {
                return Err(SourceError::invalid_configuration(
                    "gov_uk.refresh_secs must be greater than zero",
                )
                .into());
            }
            let client = Arc::new(TimeoutClient {
                inner: client,
                timeout_ms: self.http_timeout_ms,
            });
            let source = bank_holiday_source_at(
                client,
                &gov_uk.url,
                division,
                Duration::from_secs(gov_uk.refresh_secs),
            )
            .await?;
            builder = builder.add_source(Arc::new(source));
        }

        Ok(builder)
    }
}

/// Applies the configured timeout to every request.
struct TimeoutClient {
    inner: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl HttpClient for TimeoutClient {
    fn execute<'a>(&'a self, request: HttpRequest) -> HttpFuture<'a> {
        self.inner.execute(request.with_timeout_ms(self.timeout_ms))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_to_a_weekend_only_calendar() {
        let config = WorkdayConfig::from_json_str("{}").unwrap();
        assert_eq!(config, WorkdayConfig::default());
        assert_eq!(config.non_working_weekdays, vec!["saturday", "sunday"]);
    }

    #[test]
    fn parses_full_document() {
        let config = WorkdayConfig::from_json_str(
            r#"{
                "non_working_weekdays": ["friday"],
                "holidays": ["2018-05-28"],
                "holiday_files": ["/tmp/holidays.txt"],
                "gov_uk": {"division": "scotland", "refresh_secs": 60},
                "http_timeout_ms": 500
            }"#,
        )
        .unwrap();

        assert_eq!(config.non_working_weekdays, vec!["friday"]);
        assert_eq!(config.holiday_files, vec![PathBuf::from("/tmp/holidays.txt")]);
        let gov_uk = config.gov_uk.expect("gov_uk block");
        assert_eq!(gov_uk.division, "scotland");
        assert_eq!(gov_uk.refresh_secs, 60);
        assert_eq!(gov_uk.url, GOV_UK_BANK_HOLIDAYS_URL);
        assert_eq!(config.http_timeout_ms, 500);
    }

    #[test]
    fn env_overrides_are_applied() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("WORKDAY_HOLIDAYS_FILE", "/srv/holidays.txt"),
            ("WORKDAY_GOV_UK_DIVISION", "northern-ireland"),
            ("WORKDAY_HTTP_TIMEOUT_MS", "2500"),
        ]);
        let config = WorkdayConfig::default()
            .with_overrides_from(|name| vars.get(name).map(|value| value.to_string()))
            .unwrap();

        assert_eq!(config.holiday_files, vec![PathBuf::from("/srv/holidays.txt")]);
        assert_eq!(config.gov_uk.unwrap().division, "northern-ireland");
        assert_eq!(config.http_timeout_ms, 2500);
    }

    #[test]
    fn invalid_timeout_override_is_rejected() {
        let error = WorkdayConfig::default()
            .with_overrides_from(|name| {
                (name == "WORKDAY_HTTP_TIMEOUT_MS").then(|| String::from("soon"))
            })
            .unwrap_err();
        assert!(matches!(error, ConfigError::InvalidEnv { .. }));
    }
}
