use serde::Serialize;
use serde_json::Value;
use workday_core::{
    CalendarDate, DayKind, WorkingDayService, WorkingDaySource, WorkingDaySourceExt,
};

use crate::cli::DateArgs;
use crate::error::CliError;
use crate::input::CalendarInput;

#[derive(Debug, Serialize)]
struct CheckResponseData {
    date: String,
    weekday: String,
    kind: DayKind,
    /// Sources that classified the date as non-working.
    flagged_by: Vec<String>,
}

pub fn run(args: &DateArgs, service: &WorkingDayService) -> Result<Value, CliError> {
    let input = CalendarInput::parse(&args.date)?;
    let date = input.calendar_date();

    let flagged_by = service
        .sources()
        .iter()
        .filter(|source| source.is_non_working_day(date))
        .map(|source| source.describe())
        .collect();

    Ok(serde_json::to_value(CheckResponseData {
        date: date.to_string(),
        weekday: date.weekday().to_string(),
        kind: service.classify(date),
        flagged_by,
    })?)
}
