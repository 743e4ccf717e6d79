//! CLI for `onlineornot-docs`.
//!
//! Run from the provider repository root after `tfplugindocs` has generated
//! `docs/`.
//!
//! # Subcommands
//!
//! ```text
//! # Fetch the published schema and annotate docs/ in place
//! enrich-docs enrich
//!
//! # Fail (exit 1) if any page is missing annotations, without writing
//! enrich-docs enrich --check
//!
//! # Use a local schema and a non-default docs root
//! enrich-docs enrich --spec-file openapi.json --docs-dir website/docs
//!
//! # Print the enum fields found for every resource and data source
//! enrich-docs extract
//! ```

#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{ArgAction, Args, Parser, Subcommand};
use onlineornot_docs::{
    build_enum_table, enrich_docs, ProjectConfig, ResourceEnumTable, SpecSource,
};
use tracing_subscriber::EnvFilter;

/// Annotate OnlineOrNot Terraform provider docs with `OpenAPI` enum values.
#[derive(Parser)]
#[command(name = "enrich-docs", version, about)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the schema and rewrite `resources/` and `data-sources/` pages.
    Enrich(EnrichArgs),

    /// Print the enum fields extracted for every resource and data source.
    Extract(ExtractArgs),
}

/// Where the schema and config come from.
#[derive(Args)]
struct SourceArgs {
    /// Schema URL. Overrides `openapi_url` from the config file.
    #[arg(long, conflicts_with = "spec_file")]
    url: Option<String>,

    /// Read the schema from a local JSON file instead of downloading it.
    #[arg(long)]
    spec_file: Option<PathBuf>,

    /// Path to a project config YAML file.
    ///
    /// Provides the schema URL, docs root and extra resource paths.
    /// CLI flags override values from the config file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct EnrichArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Docs root containing `resources/` and `data-sources/`.
    /// Overrides `docs_dir` from the config file.
    #[arg(short, long)]
    docs_dir: Option<PathBuf>,

    /// Report pages that need annotations without writing them; exit 1 if any.
    #[arg(long)]
    check: bool,
}

#[derive(Args)]
struct ExtractArgs {
    #[command(flatten)]
    source: SourceArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Enrich(args) => run_enrich(&args),
        Command::Extract(args) => run_extract(&args),
    }
}

/// Filter used when `RUST_LOG` is unset.
///
/// Progress already goes to stdout, so library `info!` output starts at `-v`.
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "warn,onlineornot_docs=info",
        2 => "info,onlineornot_docs=debug",
        _ => "debug,onlineornot_docs=trace",
    }
}

/// Log to stderr; stdout is reserved for the run summary.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn load_config(args: &SourceArgs) -> anyhow::Result<ProjectConfig> {
    match &args.config {
        Some(path) => ProjectConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(ProjectConfig::default()),
    }
}

/// Resolve the schema source: `--spec-file`, then `--url`, then config.
fn spec_source(args: &SourceArgs, config: &ProjectConfig) -> SpecSource {
    match (&args.spec_file, &args.url) {
        (Some(path), _) => SpecSource::File(path.clone()),
        (None, Some(url)) => SpecSource::Url(url.clone()),
        (None, None) => config.spec_source(),
    }
}

fn load_enum_table(args: &SourceArgs) -> anyhow::Result<(ProjectConfig, ResourceEnumTable)> {
    let config = load_config(args)?;
    let source = spec_source(args, &config);

    println!("Fetching OpenAPI spec...");
    let spec = source.load().context("Failed to load OpenAPI spec")?;

    println!("Extracting enum fields per resource...");
    let table = build_enum_table(&spec, &config.resource_paths());
    Ok((config, table))
}

fn run_enrich(args: &EnrichArgs) -> anyhow::Result<()> {
    let (config, table) = load_enum_table(&args.source)?;
    for (name, enums) in table.iter() {
        println!("  {name}: {} enum fields", enums.len());
    }

    let mut options = config.enrich_options();
    if let Some(dir) = &args.docs_dir {
        options.docs_dir.clone_from(dir);
    }
    options.check = args.check;

    println!();
    println!("Enriching documentation in {}...", options.docs_dir.display());
    let report = enrich_docs(&table, &options).context("Failed to enrich docs")?;

    let verb = if options.check { "Out of date" } else { "Updated" };
    for path in &report.updated {
        println!("  {verb}: {}", path.display());
    }
    println!(
        "Scanned {} pages, {} {}",
        report.scanned,
        report.updated.len(),
        if options.check { "out of date" } else { "updated" },
    );

    if options.check && !report.is_clean() {
        bail!(
            "{} doc page(s) are missing enum annotations; run `enrich-docs enrich`",
            report.updated.len()
        );
    }
    Ok(())
}

fn run_extract(args: &ExtractArgs) -> anyhow::Result<()> {
    let (_, table) = load_enum_table(&args.source)?;

    println!();
    println!("=== Enum fields ===");
    for (name, enums) in table.iter() {
        println!();
        println!("{name}: {} enum fields", enums.len());
        for (field, info) in enums {
            println!("  {field}: {}", info.values().join(", "));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn spec_file_takes_precedence() {
        let cli = Cli::parse_from(["enrich-docs", "extract", "--spec-file", "openapi.json"]);
        let Command::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(
            spec_source(&args.source, &ProjectConfig::default()),
            SpecSource::File(PathBuf::from("openapi.json"))
        );
    }

    #[test]
    fn url_overrides_config() {
        let cli = Cli::parse_from(["enrich-docs", "enrich", "--url", "http://localhost/spec.json"]);
        let Command::Enrich(args) = cli.command else {
            panic!("expected enrich");
        };
        assert_eq!(
            spec_source(&args.source, &ProjectConfig::default()),
            SpecSource::Url("http://localhost/spec.json".to_string())
        );
        assert!(!args.check);
    }

    #[test]
    fn url_and_spec_file_conflict() {
        let result = Cli::try_parse_from([
            "enrich-docs",
            "enrich",
            "--url",
            "http://localhost/spec.json",
            "--spec-file",
            "openapi.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::parse_from(["enrich-docs", "-vv", "enrich", "--check"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn verbosity_raises_default_filter() {
        assert_eq!(default_filter(0), "warn");
        assert_eq!(default_filter(1), "warn,onlineornot_docs=info");
        assert_eq!(default_filter(2), "info,onlineornot_docs=debug");
        assert_eq!(default_filter(7), "debug,onlineornot_docs=trace");
    }
}
