use serde_json::Value;
use workday_core::WorkingDayService;

use crate::cli::DateArgs;
use crate::error::CliError;
use crate::input::CalendarInput;

use super::WalkResult;

pub fn run(args: &DateArgs, service: &WorkingDayService) -> Result<Value, CliError> {
    let input = CalendarInput::parse(&args.date)?;
    let result = service.next_working_day(input)?;
    Ok(serde_json::to_value(WalkResult::new("next", input, result))?)
}
