//! CLI argument definitions for basketwatch.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `compare` | Compare a basket's cost between a base year and the latest period |
//! | `history` | Basket cost for every month in the data, with a chart |
//! | `items` | List tracked items and their citations |
//! | `periods` | List available base years and the comparison date |
//! | `presets` | List built-in baskets |
//!
//! # Global Options
//!
//! | Option | Env | Default | Description |
//! |--------|-----|---------|-------------|
//! | `--data` | `BASKETWATCH_DATA` | `May2020_Full_City.csv` | Price table to read |
//! | `--reference-month` | `BASKETWATCH_REFERENCE_MONTH` | `5` | Month compared year over year |
//! | `--format` | | `table` | Output format (table, json, ndjson) |
//! | `--pretty` | | `false` | Pretty-print JSON output |
//! | `--strict` | | `false` | Treat warnings as errors |
//! | `--verbose` | | `false` | Debug logging on stderr |
//!
//! # Examples
//!
//! ```bash
//! basketwatch compare --base-year 2019 --item APU0000708111=12 --item milk=6
//! basketwatch compare --preset family-of-four --base-year 2014 --history
//! basketwatch history --preset family-of-four --format json --pretty
//! ```

use std::path::PathBuf;

use basketwatch_core::config::{
    DATA_ENV, DEFAULT_DATA_FILE, DEFAULT_REFERENCE_MONTH, REFERENCE_MONTH_ENV,
};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Personal inflation calculator.
///
/// Prices a basket of consumer goods in a base year and in the most recent
/// period of an average-price table, and reports the change.
#[derive(Debug, Parser)]
#[command(
    name = "basketwatch",
    author,
    version,
    about = "Personal inflation calculator for a basket of consumer goods"
)]
pub struct Cli {
    /// CSV price table: a Date column plus one column per item.
    #[arg(
        long,
        global = true,
        env = DATA_ENV,
        default_value_os_t = PathBuf::from(DEFAULT_DATA_FILE)
    )]
    pub data: PathBuf,

    /// Month (1-12) compared year over year.
    #[arg(
        long,
        global = true,
        env = REFERENCE_MONTH_ENV,
        default_value_t = DEFAULT_REFERENCE_MONTH,
        value_parser = clap::value_parser!(u8).range(1..=12)
    )]
    pub reference_month: u8,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    ///
    /// Items left out for missing prices count as warnings.
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Log debug detail to stderr (RUST_LOG takes precedence).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary with an ASCII chart.
    Table,
    /// Single JSON envelope.
    Json,
    /// Newline-delimited JSON events.
    Ndjson,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare a basket's cost between a base year and the latest period.
    ///
    /// # Examples
    ///
    ///   basketwatch compare --base-year 2019 --item eggs=12 --item milk=6
    ///   basketwatch compare --preset family-of-four --base 2016-05
    Compare(CompareArgs),

    /// Basket cost for every month in the data.
    History(HistoryArgs),

    /// List tracked items with labels and citations.
    Items(ItemsArgs),

    /// List base years with data and the comparison date.
    Periods(PeriodsArgs),

    /// List built-in baskets.
    Presets(PresetsArgs),
}

/// Basket selection shared by `compare` and `history`.
#[derive(Debug, Args)]
pub struct BasketArgs {
    /// Item and amount, by series id or label. Repeatable; amount defaults to 1.
    #[arg(long = "item", value_name = "ID[=QTY]")]
    pub items: Vec<String>,

    /// Start from a built-in basket (see `presets`).
    #[arg(long)]
    pub preset: Option<String>,
}

/// Arguments for the `compare` command.
#[derive(Debug, Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub basket: BasketArgs,

    /// Base year, priced in the reference month.
    #[arg(long, conflicts_with = "base")]
    pub base_year: Option<i32>,

    /// Base month as YYYY-MM.
    #[arg(long)]
    pub base: Option<String>,

    /// Comparison month as YYYY-MM, instead of the latest reference date.
    #[arg(long)]
    pub compare: Option<String>,

    /// Attach the basket's cost over time.
    #[arg(long, default_value_t = false)]
    pub history: bool,
}

/// Arguments for the `history` command.
#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub basket: BasketArgs,
}

/// Arguments for the `items` command.
#[derive(Debug, Args)]
pub struct ItemsArgs {
    /// Only items whose id or label contains this text.
    #[arg(long)]
    pub search: Option<String>,
}

/// Arguments for the `periods` command.
#[derive(Debug, Args)]
pub struct PeriodsArgs {
    /// Include years outside the default base-year window.
    #[arg(long, default_value_t = false)]
    pub all: bool,
}

/// Arguments for the `presets` command.
#[derive(Debug, Args)]
pub struct PresetsArgs {
    /// Show a single preset.
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_compare_items() {
        let cli = Cli::try_parse_from([
            "basketwatch",
            "compare",
            "--base-year",
            "2019",
            "--item",
            "eggs=12",
            "--item",
            "milk",
        ])
        .expect("valid arguments");

        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.base_year, Some(2019));
        assert_eq!(args.basket.items, vec!["eggs=12", "milk"]);
        assert_eq!(cli.reference_month, 5);
    }

    #[test]
    fn rejects_out_of_range_reference_month() {
        let err = Cli::try_parse_from(["basketwatch", "--reference-month", "13", "items"]);
        assert!(err.is_err());
    }
}
