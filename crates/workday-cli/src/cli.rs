//! CLI argument definitions for workday.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `check` | Classify a date as working or non-working |
//! | `next` | Next working day after a date |
//! | `previous` | Previous working day before a date |
//! | `add` | Move forward N working days |
//! | `subtract` | Move back N working days |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--config` | none | JSON configuration file |
//! | `--no-weekend` | `false` | Treat Saturday and Sunday as working |
//! | `--holiday` | none | Extra non-working date (repeatable) |
//! | `--holidays-file` | none | Watched holiday list file |
//! | `--gov-uk` | none | Include GOV.UK bank holidays for a division |
//! | `--pretty` | `false` | Pretty-print JSON output |
//!
//! # Examples
//!
//! ```bash
//! workday next 2018-05-18
//! workday add 3 2018-05-18T09:30 --gov-uk england-and-wales
//! workday check 2018-12-25 --holiday 2018-12-25 --pretty
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Working-day calendar arithmetic
#[derive(Debug, Parser)]
#[command(
    name = "workday",
    author,
    version,
    about = "Working-day classification and calendar arithmetic",
    long_about = "Classifies dates as working or non-working by combining weekday rules, \
literal holidays, watched holiday files and the GOV.UK bank holiday feed, and walks the \
calendar in working days.\n\
\n\
Use 'workday <command> --help' for command-specific help."
)]
pub struct Cli {
    /// JSON configuration file. `WORKDAY_*` environment variables and the
    /// flags below are applied on top of it.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Treat Saturday and Sunday as non-working (the default).
    #[arg(long, global = true, overrides_with = "no_weekend")]
    pub weekend: bool,

    /// Treat Saturday and Sunday as working days.
    #[arg(long, global = true, overrides_with = "weekend")]
    pub no_weekend: bool,

    /// Additional non-working date (YYYY-MM-DD). May be repeated.
    #[arg(long = "holiday", global = true, value_name = "DATE")]
    pub holidays: Vec<String>,

    /// File listing non-working dates, one per line or comma separated.
    #[arg(long, global = true, value_name = "PATH")]
    pub holidays_file: Option<PathBuf>,

    /// Include GOV.UK bank holidays for a division
    /// (england-and-wales, scotland, northern-ireland).
    #[arg(long, global = true, value_name = "DIVISION")]
    pub gov_uk: Option<String>,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a date.
    ///
    /// # Examples
    ///
    ///   workday check 2018-05-28 --gov-uk england-and-wales
    Check(DateArgs),

    /// Next working day strictly after a date.
    ///
    /// The time of day, if given, is kept.
    Next(DateArgs),

    /// Previous working day strictly before a date.
    Previous(DateArgs),

    /// Move forward a number of working days.
    ///
    /// Starting on a non-working day costs one extra step.
    ///
    /// # Examples
    ///
    ///   workday add 2 2018-05-18
    ///   workday add 1 2018-05-18T17:00 --holiday 2018-05-21
    Add(ShiftArgs),

    /// Move back a number of working days.
    Subtract(ShiftArgs),
}

/// Arguments for commands taking a single date.
#[derive(Debug, Args)]
pub struct DateArgs {
    /// Date (YYYY-MM-DD) or local date-time (YYYY-MM-DDTHH:MM[:SS]).
    pub date: String,
}

/// Arguments for the `add` and `subtract` commands.
#[derive(Debug, Args)]
pub struct ShiftArgs {
    /// Number of working days.
    pub days: u32,

    /// Date (YYYY-MM-DD) or local date-time (YYYY-MM-DDTHH:MM[:SS]).
    pub date: String,
}
