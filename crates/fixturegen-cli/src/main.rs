mod logging;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use fixturegen_core::{
    Constraint, ConstraintSet, Error as CoreError, Percentage, ShapeCatalog, ShapeDocument,
};
use fixturegen_generate::providers::AbstractionProvider;
use fixturegen_generate::{Engine, GenerationError, GenerationSettings, ProviderRegistry};
use logging::{LogFormat, init_logging};
use schemars::schema_for;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "fixturegen", version, about = "Shape-driven test fixture generator")]
struct Cli {
    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate values for a shape expression.
    Generate(GenerateArgs),
    /// List default providers in priority order.
    Providers,
    /// Print the JSON schema of shape documents.
    Schema,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Shape document (TOML, or JSON with a .json extension).
    #[arg(long)]
    document: Option<PathBuf>,
    /// Shape expression, e.g. `map<string, list<i32?>>` or a document name.
    #[arg(long)]
    shape: String,
    /// Number of values to print.
    #[arg(long, default_value_t = 1)]
    count: usize,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Generation settings file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Global null chance: an integer percentage (`25`) or a ratio (`0.25`).
    #[arg(long, value_parser = parse_percentage)]
    null_chance: Option<Percentage>,
    /// Never produce null for the top-level value.
    #[arg(long, default_value_t = false)]
    required: bool,
    /// Minimum length of the top-level string or container.
    #[arg(long)]
    min_length: Option<i64>,
    /// Exclusive maximum length of the top-level string or container.
    #[arg(long)]
    max_length: Option<i64>,
    /// Pretty-print each value.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.log_format)?;

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Providers => run_providers(),
        Command::Schema => run_schema(),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let start = Instant::now();
    let run_id = Uuid::new_v4();

    let mut settings = match &args.config {
        Some(path) => GenerationSettings::load(path)?,
        None => GenerationSettings::default(),
    };
    if let Some(chance) = args.null_chance {
        settings.null_chance = chance;
    }

    let catalog = match &args.document {
        Some(path) => load_document(path)?.resolve()?,
        None => ShapeCatalog::default(),
    };
    let shape = catalog.shape(&args.shape)?;
    let constraints = build_constraints(&args)?;

    let mut engine = match args.seed {
        Some(seed) => Engine::seeded(settings, seed),
        None => Engine::with_defaults(settings),
    };
    install_mappings(engine.registry_mut(), &catalog)?;

    info!(
        run_id = %run_id,
        shape = %shape,
        count = args.count,
        seed = ?args.seed,
        "generation started"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for value in engine.generate_many(&shape, &constraints, args.count) {
        let value = value?;
        let line = if args.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        writeln!(out, "{line}")?;
    }
    out.flush()?;

    info!(
        run_id = %run_id,
        duration_ms = start.elapsed().as_millis() as u64,
        "generation finished"
    );
    Ok(())
}

fn run_providers() -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for id in ProviderRegistry::with_defaults().ids() {
        writeln!(out, "{id}")?;
    }
    Ok(())
}

fn run_schema() -> Result<(), CliError> {
    let schema = schema_for!(ShapeDocument);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn load_document(path: &Path) -> Result<ShapeDocument, CliError> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let document = if is_json {
        ShapeDocument::from_json_str(&content)?
    } else {
        ShapeDocument::from_toml_str(&content)?
    };
    Ok(document)
}

/// Explicit mappings go ahead of the generic interface provider so they can
/// override it.
fn install_mappings(
    registry: &mut ProviderRegistry,
    catalog: &ShapeCatalog,
) -> Result<(), CliError> {
    if catalog.mappings().is_empty() {
        return Ok(());
    }
    let mut provider = AbstractionProvider::new();
    for (abstraction, concrete) in catalog.mappings() {
        provider.map(abstraction.clone(), concrete.clone())?;
    }
    let index = registry.position("abstraction.generic").unwrap_or(0);
    registry.insert(index, Box::new(provider))?;
    Ok(())
}

fn build_constraints(args: &GenerateArgs) -> Result<ConstraintSet, CliError> {
    let mut constraints = ConstraintSet::new();
    if args.required {
        constraints.push(Constraint::Required);
    }
    if let Some(length) = args.min_length {
        constraints.push(Constraint::min_length(length)?);
    }
    if let Some(length) = args.max_length {
        constraints.push(Constraint::max_length(length)?);
    }
    Ok(constraints)
}

fn parse_percentage(input: &str) -> Result<Percentage, String> {
    let parsed = match input.parse::<i32>() {
        Ok(value) => Percentage::from_int(value),
        Err(_) => {
            let value = input
                .parse::<f64>()
                .map_err(|_| format!("'{input}' is not a number"))?;
            Percentage::from_ratio(value)
        }
    };
    parsed.map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_percentages_as_int_or_ratio() {
        assert_eq!(parse_percentage("25").unwrap().to_string(), "25%");
        assert_eq!(parse_percentage("0.25").unwrap().to_string(), "25%");
        assert!(parse_percentage("150").is_err());
        assert!(parse_percentage("often").is_err());
    }

    #[test]
    fn cli_parses_generate_flags() {
        let cli = Cli::try_parse_from([
            "fixturegen",
            "--log-format",
            "json",
            "generate",
            "--shape",
            "list<i32>",
            "--count",
            "3",
            "--seed",
            "7",
            "--null-chance",
            "10",
            "--max-length",
            "4",
        ])
        .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.count, 3);
        assert_eq!(args.seed, Some(7));
        let constraints = build_constraints(&args).unwrap();
        assert_eq!(constraints.max_length(), Some(4));
        assert!(!constraints.is_required());
    }

    #[test]
    fn mappings_are_installed_before_generic_abstractions() {
        let document = ShapeDocument::from_toml_str(
            r#"
[[abstractions]]
name = "IShape"

[[objects]]
name = "Square"

[[mappings]]
from = "IShape"
to = "Square"
"#,
        )
        .unwrap();
        let catalog = document.resolve().unwrap();
        let mut registry = ProviderRegistry::with_defaults();
        let generic = registry.position("abstraction.generic").unwrap();
        install_mappings(&mut registry, &catalog).unwrap();
        assert_eq!(registry.position("abstraction.explicit"), Some(generic));
        assert_eq!(registry.position("abstraction.generic"), Some(generic + 1));
    }
}
