mod error_formatter;
mod formatter;
mod interactive;
mod server;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use formatter::Formatter;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use unitcanon::{serializers, Engine, LookupTables, Vocabulary};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "unitcanon")]
#[command(about = "Canonical names, codes and cross-references for unit expressions.")]
#[command(
    long_about = "unitcanon parses UCUM / SI style unit expressions such as m.s-1 or kg/m/s2 and derives a canonical code, SI code, English label and definition,\nplus the identifiers that QUDT, OM, UO and other vocabularies use for the same unit."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Canonicalize unit expressions and write Turtle or JSON
    ///
    /// Expressions come from the arguments or from the first column of a CSV
    /// file. Expressions that fail to parse are skipped with a warning.
    Run {
        /// Unit expressions (e.g. m.s-1 kg/m/s2 /g)
        #[arg(value_name = "UNITS")]
        expressions: Vec<String>,
        /// CSV file whose first column holds unit expressions (no header row)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// File to write to instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Turtle)]
        format: OutputFormat,
        #[command(flatten)]
        tables: TableArgs,
    },
    /// Show how one expression is broken down
    ///
    /// Prints the canonical strings, the factor table and the matched
    /// identifiers of each vocabulary.
    Show {
        /// Unit expression to inspect
        unit: String,
        #[command(flatten)]
        tables: TableArgs,
    },
    /// Canonicalize expressions typed at a prompt
    Interactive {
        #[command(flatten)]
        tables: TableArgs,
    },
    /// Start HTTP server (default: localhost:3000)
    ///
    /// API: GET /units/{code} (Turtle), GET /?code=..., POST /canonicalize with {units}
    Server {
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port number to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
        #[command(flatten)]
        tables: TableArgs,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Turtle,
    Json,
}

/// Lookup table sources; the built-in tables are used when none are given
#[derive(Args, Debug, Default)]
struct TableArgs {
    /// Units table (UCUM_symbol, SI_symbol, label_en, definition_en)
    #[arg(long, requires_all = ["prefixes", "exponents"])]
    units: Option<PathBuf>,
    /// Prefix table (symbol, label_en, prefix_num, SI_symbol)
    #[arg(long, requires_all = ["units", "exponents"])]
    prefixes: Option<PathBuf>,
    /// Exponent table (power, label_en)
    #[arg(long, requires_all = ["units", "prefixes"])]
    exponents: Option<PathBuf>,
    /// Directory of vocabulary mapping CSVs (IRI, UCUM1, UCUM2, ...)
    #[arg(short, long)]
    mappings: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "unitcanon=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Run {
            expressions,
            input,
            output,
            format,
            tables,
        } => run_command(
            expressions,
            input.as_deref(),
            output.as_deref(),
            *format,
            tables,
        ),
        Commands::Show { unit, tables } => show_command(unit, tables),
        Commands::Interactive { tables } => interactive_command(tables),
        Commands::Server { host, port, tables } => server_command(host, *port, tables),
    };

    if let Err(e) = result {
        // Check if it's a CanonError and format it nicely, otherwise use default
        if let Some(canon_err) = e.downcast_ref::<unitcanon::CanonError>() {
            eprintln!("{}", error_formatter::format_error(canon_err));
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run_command(
    arguments: &[String],
    input: Option<&Path>,
    output: Option<&Path>,
    format: OutputFormat,
    tables: &TableArgs,
) -> Result<()> {
    let engine = load_engine(tables)?;

    let mut expressions = arguments.to_vec();
    if let Some(path) = input {
        expressions.extend(read_expressions(path)?);
    }
    if expressions.is_empty() {
        eprintln!("Error: No unit expressions given\n");
        eprintln!("Usage: unitcanon run [UNITS]... [--input FILE] [OPTIONS]\n");
        eprintln!("Examples:");
        eprintln!("  unitcanon run m.s-1 kg/m/s2            - Canonicalize two expressions");
        eprintln!("  unitcanon run -i units.csv -o out.ttl  - Canonicalize a CSV column to a file");
        eprintln!("  unitcanon run m/s --format json        - Write JSON instead of Turtle\n");
        eprintln!("For more information:");
        eprintln!("  unitcanon run --help");
        std::process::exit(1);
    }

    let outcome = engine.process_batch(&expressions);
    let rendered = match format {
        OutputFormat::Turtle => serializers::to_turtle(&outcome.records),
        OutputFormat::Json => serializers::to_json(&outcome.records)?,
    };

    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            let formatter = Formatter::default();
            print!("{}", formatter.format_batch_summary(&outcome));
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn show_command(unit: &str, tables: &TableArgs) -> Result<()> {
    let engine = load_engine(tables)?;
    let record = engine.canonicalize(unit)?;

    let formatter = Formatter::default();
    print!("{}", formatter.format_record(&record));

    Ok(())
}

fn interactive_command(tables: &TableArgs) -> Result<()> {
    let engine = load_engine(tables)?;
    interactive::run_interactive(&engine)
}

fn server_command(host: &str, port: u16, tables: &TableArgs) -> Result<()> {
    #[cfg(feature = "server")]
    {
        use tokio::runtime::Runtime;
        let rt = Runtime::new()?;
        rt.block_on(async {
            let engine = load_engine(tables)?;

            println!(
                "Starting HTTP server with {} vocabulary(ies) loaded",
                engine.vocabulary_names().len()
            );
            server::http::start_server(engine, host, port).await
        })?;
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = (host, port, tables);
        eprintln!("Error: Server feature not enabled");
        eprintln!("Recompile with: cargo build --features server");
        std::process::exit(1);
    }

    Ok(())
}

fn load_engine(args: &TableArgs) -> Result<Engine> {
    let tables = match (&args.units, &args.prefixes, &args.exponents) {
        (Some(units), Some(prefixes), Some(exponents)) => {
            LookupTables::from_paths(units, prefixes, exponents)?
        }
        _ => LookupTables::builtin()?,
    };

    let vocabularies = match &args.mappings {
        Some(dir) => load_vocabularies(dir)?,
        None => Vocabulary::builtin()?,
    };

    info!(
        units = tables.unit_count(),
        prefixes = tables.prefix_count(),
        vocabularies = vocabularies.len(),
        "loaded lookup tables"
    );
    Ok(Engine::new(tables, &vocabularies))
}

/// Every `*.csv` below `dir`, in file name order
fn load_vocabularies(dir: &Path) -> Result<Vec<Vocabulary>> {
    let mut vocabularies = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if entry.path().extension().and_then(|s| s.to_str()) == Some("csv") {
            vocabularies.push(Vocabulary::from_path(entry.path())?);
        }
    }
    if vocabularies.is_empty() {
        anyhow::bail!("No mapping CSV files found in {}", dir.display());
    }
    Ok(vocabularies)
}

/// First column of every row, header-less, blank cells skipped
fn read_expressions(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut expressions = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(unit) = record.get(0).filter(|s| !s.is_empty()) {
            expressions.push(unit.to_string());
        }
    }
    Ok(expressions)
}
