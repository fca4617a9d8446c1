//! CLI tool for xlcolumns - generates table column code from a sheet header
//!
//! Usage:
//!   xlcolumns_cli report.xlsx --table 'Sheet1!A1:M3'             # module to stdout
//!   xlcolumns_cli report.xlsx --table 'Sheet1!A1:M3' -f array     # column array only
//!   xlcolumns_cli data.csv --config tables.json -f json -o out.json

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use xlcolumns::codegen::{render_module, serialize_with, CodegenOptions};
use xlcolumns::csv::Delimiter;
use xlcolumns::{outcomes_json, GeneratorConfig, PaletteMode, Session, TableConfig, TitleMode};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// Complete hook module
    Module,
    /// Column array literal only
    Array,
    /// Parsed tables (columns and data rows) as JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(version, about = "Generate table column definitions from spreadsheet headers.")]
struct Args {
    /// Input workbook (.xlsx) or delimited text (.csv, .tsv).
    input: PathBuf,

    /// Header range as `Sheet!A1:C2` (repeatable).
    #[arg(short, long = "table", value_name = "SHEET!RANGE")]
    tables: Vec<String>,

    /// JSON generator config; `--table` entries are appended to its tables.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Emit titles as translation calls.
    #[arg(long)]
    localize: bool,

    /// Assign the default color rotation to top-level columns.
    #[arg(long)]
    palette: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Module)]
    format: OutputFormat,

    /// Write output to a file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Log debug details to stderr (RUST_LOG overrides).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(message) => {
            error!("{message}");
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Returns `Ok(false)` when at least one table failed.
fn run(args: &Args) -> Result<bool, String> {
    let config = build_config(args)?;
    if config.tables.is_empty() {
        return Err("no tables given; use --table Sheet!A1:C2 or --config".to_string());
    }

    let data = fs::read(&args.input)
        .map_err(|e| format!("reading {}: {e}", args.input.display()))?;

    let mut session = Session::with_config(config);
    let delimiter = args
        .input
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(Delimiter::from_extension);
    match delimiter {
        Some(delimiter) => session.load_csv(&data, delimiter),
        None => session.load_bytes(&data),
    }
    .map_err(|e| format!("loading {}: {e}", args.input.display()))?;

    let outcomes = session.process_configured().map_err(|e| e.to_string())?;
    let mut all_ok = true;
    for (table, outcome) in session.config().tables.iter().zip(&outcomes) {
        match outcome {
            Ok(parsed) => info!(
                sheet = %table.sheet,
                columns = parsed.columns.node_count(),
                rows = parsed.data.len(),
                "table parsed"
            ),
            Err(e) => {
                all_ok = false;
                eprintln!(
                    "{}!{}:{}: {e}",
                    table.sheet, table.start_cell, table.end_cell
                );
            }
        }
    }

    let rendered = render(args.format, &session, &outcomes)?;
    match &args.output {
        Some(path) => {
            fs::write(path, rendered).map_err(|e| format!("writing {}: {e}", path.display()))?;
            eprintln!("Written: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| format!("writing stdout: {e}"))?;
        }
    }
    Ok(all_ok)
}

fn build_config(args: &Args) -> Result<GeneratorConfig, String> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("reading {}: {e}", path.display()))?;
            GeneratorConfig::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))?
        }
        None => GeneratorConfig::default(),
    };
    for shorthand in &args.tables {
        config
            .tables
            .push(TableConfig::parse_shorthand(shorthand).map_err(|e| e.to_string())?);
    }
    if args.localize {
        config.titles = TitleMode::Localized;
    }
    if args.palette {
        config.palette = PaletteMode::Default;
    }
    Ok(config)
}

fn render(
    format: OutputFormat,
    session: &Session,
    outcomes: &[xlcolumns::error::Result<xlcolumns::ParsedTable>],
) -> Result<String, String> {
    let config = session.config();
    let text = match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&outcomes_json(outcomes))
                .map_err(|e| format!("serializing JSON: {e}"))?;
            json.push('\n');
            json
        }
        OutputFormat::Module => match session.tables().first() {
            Some(table) => render_module(&table.columns, &config.module_options()),
            None => return Err("no table could be parsed".to_string()),
        },
        OutputFormat::Array => {
            let mut out = String::new();
            for table in session.tables() {
                out.push_str(&serialize_with(
                    &table.columns,
                    &CodegenOptions {
                        indent: config.indent,
                        base_level: 0,
                    },
                ));
                out.push('\n');
            }
            if out.is_empty() {
                return Err("no table could be parsed".to_string());
            }
            out
        }
    };
    Ok(text)
}
