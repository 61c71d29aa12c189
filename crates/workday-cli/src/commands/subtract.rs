use serde_json::Value;
use workday_core::WorkingDayService;

use crate::cli::ShiftArgs;
use crate::error::CliError;
use crate::input::CalendarInput;

use super::WalkResult;

pub fn run(args: &ShiftArgs, service: &WorkingDayService) -> Result<Value, CliError> {
    let input = CalendarInput::parse(&args.date)?;
    let result = service.subtract_working_days(input, args.days)?;
    Ok(serde_json::to_value(
        WalkResult::new("subtract", input, result).with_days(args.days),
    )?)
}
