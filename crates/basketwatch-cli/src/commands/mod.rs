mod compare;
mod history;
mod items;
mod periods;
mod presets;

use basketwatch_core::config::SCHEMA_VERSION;
use basketwatch_core::{
    catalog, Basket, Envelope, EnvelopeMeta, IngestReport, ItemSpec, Preset,
    SeriesId, Session, Settings, ValidationError,
};
use serde_json::Value;
use uuid::Uuid;

use crate::cli::{BasketArgs, Cli, Command};
use crate::error::CliError;

/// What a command produced, before it is wrapped in an envelope.
#[derive(Debug)]
pub struct CommandResult {
    pub data: Value,
    /// Human-readable rendering used by the table format.
    pub text: Option<String>,
    pub warnings: Vec<String>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            text: None,
            warnings: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: String) -> Self {
        self.text = Some(text);
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

/// Envelope plus the table rendering that goes with it.
pub struct Response {
    pub envelope: Envelope<Value>,
    pub text: Option<String>,
}

pub fn run(cli: &Cli) -> Result<Response, CliError> {
    let settings = Settings::new(cli.data.clone(), cli.reference_month)?;

    let command_result = match &cli.command {
        Command::Compare(args) => with_session(settings, |session| compare::run(args, session))?,
        Command::History(args) => with_session(settings, |session| history::run(args, session))?,
        Command::Items(args) => with_session(settings, |session| items::run(args, session))?,
        Command::Periods(args) => with_session(settings, |session| periods::run(args, session))?,
        Command::Presets(args) => presets::run(args)?,
    };

    let CommandResult {
        data,
        text,
        warnings,
    } = command_result;

    let mut meta = EnvelopeMeta::new(
        Uuid::new_v4().to_string(),
        SCHEMA_VERSION,
        cli.data.display().to_string(),
    )?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    let envelope = Envelope::success(meta, data);
    Ok(Response { envelope, text })
}

fn with_session(
    settings: Settings,
    command: impl FnOnce(&Session) -> Result<CommandResult, CliError>,
) -> Result<CommandResult, CliError> {
    let session = Session::open(settings)?;
    let result = command(&session)?;
    Ok(result.with_warnings(ingest_warnings(session.report())))
}

fn ingest_warnings(report: &IngestReport) -> Vec<String> {
    let mut warnings = Vec::new();
    if report.undated_rows > 0 {
        warnings.push(format!(
            "{} of {} rows had an unreadable date and were ignored",
            report.undated_rows, report.rows_read
        ));
    }
    if !report.dropped_columns.is_empty() {
        warnings.push(format!(
            "non-numeric columns ignored: {}",
            report.dropped_columns.join(", ")
        ));
    }
    warnings
}

/// Build the basket from a preset and/or `--item` specs.
///
/// Preset items are kept even when the loaded table lacks them; they then
/// show up as unavailable instead of failing the request.
fn resolve_basket(args: &BasketArgs, session: &Session) -> Result<Basket, CliError> {
    let mut basket = match &args.preset {
        Some(name) => name.parse::<Preset>()?.basket()?,
        None => Basket::new(),
    };

    if !args.items.is_empty() {
        let specs = args
            .items
            .iter()
            .map(|spec| spec.parse::<ItemSpec>())
            .collect::<Result<Vec<_>, _>>()?;
        for entry in session.resolve_basket(&specs)?.entries() {
            basket.add(entry.item.clone(), entry.quantity);
        }
    }

    if basket.is_empty() {
        return Err(ValidationError::EmptyBasket.into());
    }
    Ok(basket)
}

/// Display label for an item: the table header's label, else the catalog's.
fn item_label(session: &Session, item: &SeriesId) -> String {
    if session.series().item(item).is_some() {
        return session.series().label(item).to_owned();
    }
    catalog::lookup(item)
        .map(|entry| entry.label.to_owned())
        .unwrap_or_else(|| item.to_string())
}
