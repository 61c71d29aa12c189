//! UK bank holidays published at <https://www.gov.uk/bank-holidays.json>.

use std::collections::{BTreeSet, HashMap};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use time::Date;

use crate::date_set::parse_date;
use crate::error::SourceError;
use crate::external::ExternalSource;
use crate::http_client::{HttpClient, HttpRequest};

pub const GOV_UK_BANK_HOLIDAYS_URL: &str = "https://www.gov.uk/bank-holidays.json";

/// Holiday calendars published in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BankHolidayDivision {
    #[default]
    EnglandAndWales,
    Scotland,
    NorthernIreland,
}

impl BankHolidayDivision {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnglandAndWales => "england-and-wales",
            Self::Scotland => "scotland",
            Self::NorthernIreland => "northern-ireland",
        }
    }
}

impl Display for BankHolidayDivision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BankHolidayDivision {
    type Err = SourceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "england-and-wales" => Ok(Self::EnglandAndWales),
            "scotland" => Ok(Self::Scotland),
            "northern-ireland" => Ok(Self::NorthernIreland),
            other => Err(SourceError::invalid_configuration(format!(
                "unknown bank holiday division '{other}', expected one of \
                 england-and-wales, scotland, northern-ireland"
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DivisionPayload {
    events: Vec<EventPayload>,
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    date: String,
}

/// Extracts the holiday dates of one division from the feed payload.
pub fn parse_bank_holidays(
    json: &str,
    division: BankHolidayDivision,
) -> Result<BTreeSet<Date>, SourceError> {
    let mut payload: HashMap<String, DivisionPayload> = serde_json::from_str(json)
        .map_err(|error| SourceError::parse(format!("invalid bank holiday payload: {error}")))?;

    let events = payload
        .remove(division.as_str())
        .ok_or_else(|| {
            SourceError::parse(format!("bank holiday payload has no '{division}' division"))
        })?
        .events;

    events.iter().map(|event| parse_date(&event.date)).collect()
}

/// HTTP-backed source over the GOV.UK feed, refreshed every `refresh_every`.
pub async fn bank_holiday_source(
    client: Arc<dyn HttpClient>,
    division: BankHolidayDivision,
    refresh_every: Duration,
) -> Result<ExternalSource<BTreeSet<Date>>, SourceError> {
    bank_holiday_source_at(client, GOV_UK_BANK_HOLIDAYS_URL, division, refresh_every).await
}

/// As [`bank_holiday_source`], against a mirror of the feed.
pub async fn bank_holiday_source_at(
    client: Arc<dyn HttpClient>,
    url: &str,
    division: BankHolidayDivision,
    refresh_every: Duration,
) -> Result<ExternalSource<BTreeSet<Date>>, SourceError> {
    let request = HttpRequest::get(url).with_header("accept", "application/json");
    ExternalSource::from_http(
        client,
        request,
        move |json: &str| parse_bank_holidays(json, division),
        |date, holidays: &BTreeSet<Date>| holidays.contains(&date),
        refresh_every,
    )
    .await
}
