//! Binary entry point for tabsync.
//!
//! This binary imports and exports document collections against a
//! JSON-file-backed store.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::too_many_arguments)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tabsync::formats::FormatRegistry;
use tabsync::repository::JsonFileRepository;
use tabsync::services::{Exporter, Importer};
use tabsync::{ProcessorOptions, Repository};
use tracing_subscriber::EnvFilter;

/// Tabsync - bulk tabular import/export for document collections.
#[derive(Parser)]
#[command(name = "tabsync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the JSON store file.
    #[arg(short, long, global = true, env = "TABSYNC_STORE", default_value = "tabsync.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Import a file into a collection.
    Import {
        /// The file to import. The format is inferred from its extension.
        file: PathBuf,

        /// Target collection.
        #[arg(short, long)]
        collection: String,

        /// Locale to tag imported documents with.
        #[arg(short, long)]
        locale: Option<String>,

        /// Field used to match existing documents for update.
        #[arg(short, long)]
        id_field: Option<String>,
    },

    /// Export a collection to a file.
    Export {
        /// Source collection.
        #[arg(short, long)]
        collection: String,

        /// Output format (extension or MIME type).
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Restrict the export to one locale.
        #[arg(short, long)]
        locale: Option<String>,

        /// Fields to omit from the output (comma-separated).
        #[arg(short, long)]
        exclude: Option<String>,

        /// Output file. Defaults to a timestamped name in the current
        /// directory.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("tabsync=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tabsync=warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

fn run_command(cli: Cli) -> anyhow::Result<()> {
    let repository: Arc<dyn Repository> = Arc::new(JsonFileRepository::open(&cli.store)?);
    let registry = FormatRegistry::with_defaults();

    match cli.command {
        Commands::Import {
            file,
            collection,
            locale,
            id_field,
        } => cmd_import(&repository, &registry, &file, collection, locale, id_field),
        Commands::Export {
            collection,
            format,
            locale,
            exclude,
            output,
        } => cmd_export(
            &repository,
            &registry,
            collection,
            &format,
            locale,
            exclude,
            output,
        ),
    }
}

fn cmd_import(
    repository: &Arc<dyn Repository>,
    registry: &FormatRegistry,
    file: &Path,
    collection: String,
    locale: Option<String>,
    id_field: Option<String>,
) -> anyhow::Result<()> {
    let token = file
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| anyhow::anyhow!("cannot infer format from '{}'", file.display()))?;
    let format = registry
        .resolve_import(token)
        .ok_or_else(|| tabsync::Error::UnknownFormat(token.to_string()))?;
    let input = std::fs::read(file)?;

    let mut options = ProcessorOptions::new(collection);
    if let Some(locale) = locale {
        options = options.with_locale(locale);
    }
    if let Some(id_field) = id_field {
        options = options.with_id_field(id_field);
    }

    let importer = Importer::new(repository.clone());
    let result = importer.import(&input, format.as_ref(), &options);

    println!(
        "created: {}, updated: {}, skipped: {}, failed: {}",
        result.created, result.updated, result.skipped, result.failed
    );
    for error in &result.errors {
        if error.row < 0 {
            eprintln!("input error: {}", error.message);
        } else {
            eprintln!("row {}: {}", error.row, error.message);
        }
    }
    if result.is_success() {
        Ok(())
    } else {
        Err(anyhow::anyhow!("{} row(s) failed", result.failed))
    }
}

fn cmd_export(
    repository: &Arc<dyn Repository>,
    registry: &FormatRegistry,
    collection: String,
    format: &str,
    locale: Option<String>,
    exclude: Option<String>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let format = registry
        .resolve_export(format)
        .ok_or_else(|| tabsync::Error::UnknownFormat(format.to_string()))?;

    let mut options = ProcessorOptions::new(collection);
    if let Some(locale) = locale {
        options = options.with_locale(locale);
    }
    if let Some(exclude) = exclude {
        options = options.with_exclude_fields(exclude.split(',').map(str::trim));
    }

    let exporter = Exporter::new(repository.clone());
    let result = exporter.export(format.as_ref(), &options)?;

    let path = output.unwrap_or_else(|| PathBuf::from(&result.file_name));
    std::fs::write(&path, &result.payload)?;
    println!("wrote {} ({})", path.display(), result.mime_type);
    Ok(())
}
