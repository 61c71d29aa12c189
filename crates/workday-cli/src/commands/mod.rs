mod add;
mod check;
mod next;
mod previous;
mod subtract;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use time::Weekday;
use workday_core::{
    parse_weekday, CalendarDate, GovUkConfig, HttpClient, ReqwestHttpClient, WorkdayConfig,
    WorkingDayService,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::input::CalendarInput;

/// Output of the walk commands.
#[derive(Debug, Serialize)]
pub struct WalkResult {
    pub operation: &'static str,
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    pub result: String,
    pub weekday: String,
}

impl WalkResult {
    fn new(operation: &'static str, input: CalendarInput, result: CalendarInput) -> Self {
        Self {
            operation,
            input: input.to_string(),
            days: None,
            result: result.to_string(),
            weekday: result.calendar_date().weekday().to_string(),
        }
    }

    fn with_days(mut self, days: u32) -> Self {
        self.days = Some(days);
        self
    }
}

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    let service = build_service(cli).await?;
    tracing::debug!(?service, "service ready");

    match &cli.command {
        Command::Check(args) => check::run(args, &service),
        Command::Next(args) => next::run(args, &service),
        Command::Previous(args) => previous::run(args, &service),
        Command::Add(args) => add::run(args, &service),
        Command::Subtract(args) => subtract::run(args, &service),
    }
}

async fn build_service(cli: &Cli) -> Result<WorkingDayService, CliError> {
    let config = match &cli.config {
        Some(path) => WorkdayConfig::from_path(path)?,
        None => WorkdayConfig::default(),
    }
    .with_env_overrides()?;
    let config = apply_flags(config, cli)?;

    let client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    Ok(config.into_builder(client).await?.build())
}

fn apply_flags(mut config: WorkdayConfig, cli: &Cli) -> Result<WorkdayConfig, CliError> {
    if cli.weekend {
        config
            .non_working_weekdays
            .extend([String::from("saturday"), String::from("sunday")]);
    }
    if cli.no_weekend {
        let mut kept = Vec::with_capacity(config.non_working_weekdays.len());
        for day in config.non_working_weekdays {
            if !is_weekend(parse_weekday(&day)?) {
                kept.push(day);
            }
        }
        config.non_working_weekdays = kept;
    }

    config.holidays.extend(cli.holidays.iter().cloned());

    if let Some(path) = &cli.holidays_file {
        config.holiday_files.push(path.clone());
    }

    if let Some(division) = &cli.gov_uk {
        let gov_uk = config.gov_uk.get_or_insert_with(GovUkConfig::default);
        gov_uk.division = division.clone();
    }

    Ok(config)
}

fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Saturday | Weekday::Sunday)
}
