//! ctable CLI - render comparison tables from a store file

#[cfg(feature = "cli")]
use anyhow::{bail, Context, Result};
#[cfg(feature = "cli")]
use clap::{ArgAction, Parser, Subcommand};
#[cfg(feature = "cli")]
use comparison_table::{
    comparison_table_schema,
    config::Config,
    shortcode_hint_html,
    store::{load_raw_document, MemoryFieldStore, StoreDocument},
    validate_record, AttachmentLibrary, ComparisonTableRenderer, RenderWarning,
};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "ctable")]
#[command(version)]
#[command(about = "Render product comparison tables as HTML", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to $CTABLE_CONFIG, then ./ctable.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Store file with table records (JSON, TOML or YAML)
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// More log output on stderr (repeat for trace level)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode: only errors on stderr
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Strict mode: exit with error if any render warnings occur
    #[arg(long, global = true)]
    strict: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Render one table
    Render {
        /// Table identifier
        #[arg(long)]
        id: String,
    },

    /// Expand table shortcodes in content
    Expand {
        /// Content file (reads from stdin if not provided)
        input: Option<PathBuf>,
    },

    /// Print the shortcode hint shown on the table edit screen
    Hint {
        /// Table identifier
        #[arg(long)]
        id: String,
    },

    /// Print the field schema as JSON
    Schema,

    /// Check every table record in the store against the field schema
    Validate,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = Config::discover(cli.config.as_deref()).context("failed to load configuration")?;
    let store_path = cli.store.clone().or_else(|| config.store.path.clone());

    let output = match cli.command {
        Commands::Render { ref id } => {
            let (store, library) = open_store(store_path.as_deref())?;
            let renderer =
                ComparisonTableRenderer::with_options(&store, &library, config.render.clone());
            let result = renderer.render_with_diagnostics(id);
            report_warnings(&result.warnings, cli.quiet, cli.strict)?;
            result.html
        }
        Commands::Expand { ref input } => {
            let content = read_input(input.as_deref())?;
            let (store, library) = open_store(store_path.as_deref())?;
            let renderer =
                ComparisonTableRenderer::with_options(&store, &library, config.render.clone());
            let result = renderer.expand_shortcodes_with_diagnostics(&content);
            report_warnings(&result.warnings, cli.quiet, cli.strict)?;
            result.html
        }
        Commands::Hint { ref id } => shortcode_hint_html(&config.render.shortcode_tag, id),
        Commands::Schema => serde_json::to_string_pretty(&comparison_table_schema())?,
        Commands::Validate => {
            let path = require_store_path(store_path.as_deref())?;
            let issues = validate_store(path)?;
            if !issues.is_empty() {
                for issue in &issues {
                    eprintln!("{}", issue);
                }
                eprintln!("Error: {} validation issue(s) in {}", issues.len(), path.display());
                std::process::exit(1);
            }
            format!("✓ {} is valid", path.display())
        }
    };

    write_output(cli.output.as_deref(), &output)
}

/// Install the stderr log subscriber; `RUST_LOG` wins over the flags
#[cfg(feature = "cli")]
fn init_logging(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("comparison_table={}", default_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn require_store_path(path: Option<&Path>) -> Result<&Path> {
    match path {
        Some(path) => Ok(path),
        None => bail!("no store file: pass --store or set [store] path in the configuration"),
    }
}

/// Load the store document once, splitting it into records and attachments
#[cfg(feature = "cli")]
fn open_store(path: Option<&Path>) -> Result<(MemoryFieldStore, AttachmentLibrary)> {
    let path = require_store_path(path)?;
    let mut document = StoreDocument::load(path)
        .with_context(|| format!("failed to load store {}", path.display()))?;
    let library = AttachmentLibrary::new(std::mem::take(&mut document.attachments));
    let store = document
        .into_store()
        .with_context(|| format!("invalid store {}", path.display()))?;
    Ok((store, library))
}

#[cfg(feature = "cli")]
fn validate_store(path: &Path) -> Result<Vec<String>> {
    let raw = load_raw_document(path)
        .with_context(|| format!("failed to load store {}", path.display()))?;
    let schema = comparison_table_schema();
    let tables = raw
        .get("tables")
        .and_then(|tables| tables.as_array())
        .cloned()
        .unwrap_or_default();

    let mut issues = Vec::new();
    for (index, table) in tables.iter().enumerate() {
        let label = match table.get("id").or_else(|| table.get("ID")) {
            Some(id) => format!("table {}", id),
            None => format!("tables[{}]", index),
        };
        for issue in validate_record(&schema, table) {
            issues.push(format!("{}: {}", label, issue));
        }
    }
    Ok(issues)
}

#[cfg(feature = "cli")]
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// Print render warnings to stderr, failing in strict mode
#[cfg(feature = "cli")]
fn report_warnings(warnings: &[RenderWarning], quiet: bool, strict: bool) -> Result<()> {
    if !quiet {
        for warning in warnings {
            eprintln!("⚠ {}", warning);
        }
    }
    if strict && !warnings.is_empty() {
        bail!("{} render warning(s) in strict mode", warnings.len());
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn write_output(path: Option<&Path>, output: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, format!("{}\n", output))
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("✓ Output written to: {}", path.display());
        }
        None => println!("{}", output),
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  ctable [OPTIONS] <COMMAND>");
}
