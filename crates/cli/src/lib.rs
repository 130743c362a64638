use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use directory_engine::{ContactRecord, DirectoryEngine, DirectoryFilter, FavoriteSet};
use directory_ingest::load_records;
use directory_protocol::{
    serialize_json, serialize_json_pretty, CommandResponse, Hint, HintKind, ResponseMeta,
};
use serde_json::json;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use crate::config::{DirectoryConfig, FilterControl};
use crate::errors::{classify_error, CliError};
use crate::render::{render_cards, Card};

mod config;
mod errors;
mod render;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "client-directory")]
#[command(about = "Searchable directory of business contacts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: ./client-directory.toml when present)
    #[arg(long, global = true, env = "CLIENT_DIRECTORY_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Output a JSON response on stdout (implies --quiet)
    #[arg(long, global = true)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter, sort and print the directory
    List(ListArgs),

    /// Print region filter candidates
    Regions(TableArgs),

    /// Print initial-consonant bucket labels
    Buckets,

    /// Print the classification label of each name
    Classify(ClassifyArgs),
}

#[derive(Args)]
struct TableArgs {
    /// Exported sheet (.json or .toml); overrides `table` from the config
    #[arg(long, short = 't')]
    table: Option<PathBuf>,
}

#[derive(Args)]
struct ListArgs {
    #[command(flatten)]
    table: TableArgs,

    /// Substring to look for in company names and addresses
    #[arg(long, short = 'q')]
    query: Option<String>,

    /// Bucket label, e.g. ㄱ, A-Z or 전체
    #[arg(long, short = 'b')]
    bucket: Option<String>,

    /// Region label (first address token), or 전체
    #[arg(long, short = 'r')]
    region: Option<String>,

    /// Only show favorites
    #[arg(long)]
    favorites_only: bool,

    /// Mark a company name as favorite for this run (repeatable)
    #[arg(long = "favorite", value_name = "NAME")]
    favorites: Vec<String>,

    /// Reference date for visit freshness (default: today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,

    /// Include per-bucket counts
    #[arg(long)]
    counts: bool,
}

#[derive(Args)]
struct ClassifyArgs {
    /// Company names
    #[arg(required = true)]
    names: Vec<String>,
}

struct Output {
    json: bool,
    pretty: bool,
}

impl Output {
    fn emit(&self, response: CommandResponse, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            let body = if self.pretty {
                serialize_json_pretty(&response)?
            } else {
                serialize_json(&response)?
            };
            print_stdout(&body)
        } else {
            print_stdout(text().trim_end())
        }
    }
}

pub fn main_entry() -> Result<ExitCode> {
    let mut cli = Cli::parse();
    if cli.json {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let output = Output {
        json: cli.json,
        pretty: cli.pretty,
    };

    match run(cli, &output) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) if output.json => {
            log::debug!("command failed: {err:#}");
            output.emit(CommandResponse::error(classify_error(&err)), String::new)?;
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err),
    }
}

fn run(cli: Cli, output: &Output) -> Result<()> {
    let (config, config_path) = DirectoryConfig::load(cli.config.as_deref())?;
    let meta = ResponseMeta {
        config_path: config_path.map(|path| path.display().to_string()),
        ..Default::default()
    };

    match cli.command {
        Commands::List(args) => run_list(args, &config, meta, output),
        Commands::Regions(args) => run_regions(args, &config, meta, output),
        Commands::Buckets => run_buckets(&config, meta, output),
        Commands::Classify(args) => run_classify(args, &config, meta, output),
    }
}

fn build_engine(config: &DirectoryConfig) -> Result<DirectoryEngine> {
    DirectoryEngine::new(config.engine.clone())
        .map_err(|err| CliError::InvalidConfig(err.to_string()).into())
}

/// Read the table fresh; every invocation sees the sheet as it is now.
fn load_table(
    config: &DirectoryConfig,
    table: Option<PathBuf>,
) -> Result<(PathBuf, Vec<ContactRecord>)> {
    let path = config.resolve_table(table)?;
    let records = load_records(&path, config.column_aliases(), config.engine.clone())
        .with_context(|| format!("Failed to read table {}", path.display()))?;
    Ok((path, records))
}

fn run_list(
    args: ListArgs,
    config: &DirectoryConfig,
    mut meta: ResponseMeta,
    output: &Output,
) -> Result<()> {
    let started = Instant::now();
    let engine = build_engine(config)?;

    if args.query.as_deref().is_some_and(|q| !q.is_empty()) {
        config.require(FilterControl::Search)?;
    }
    if args.region.is_some() {
        config.require(FilterControl::Region)?;
    }
    if args.bucket.is_some() {
        config.require(FilterControl::Bucket)?;
    }
    if args.favorites_only {
        config.require(FilterControl::Favorites)?;
    }

    let bucket = engine.select_bucket(args.bucket.as_deref().unwrap_or_default())?;
    let (path, records) = load_table(config, args.table.table)?;
    let region = engine.select_region(&records, args.region.as_deref().unwrap_or_default())?;

    let filter = DirectoryFilter::default()
        .query(args.query.unwrap_or_default())
        .bucket(bucket)
        .region(region)
        .favorites_only(args.favorites_only);
    let favorites: FavoriteSet = args.favorites.into_iter().collect();

    let entries = engine.apply(&records, &filter, &favorites);
    let today = args
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let cards: Vec<Card<'_>> = entries
        .iter()
        .map(|entry| Card::new(entry, today, engine.config()))
        .collect();
    log::info!("{} of {} records shown", cards.len(), records.len());

    meta.table_path = Some(path.display().to_string());
    meta.total_records = Some(records.len());
    meta.returned = Some(cards.len());
    meta.duration_ms = Some(u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX));

    let counts = args
        .counts
        .then(|| engine.bucket_counts(&records, &filter, &favorites));

    let mut data = json!({
        "title": config.title,
        "columns": config.columns,
        "entries": cards,
    });
    if let Some(counts) = &counts {
        data["bucket_counts"] = json!(counts
            .iter()
            .map(|(label, count)| json!({ "label": label, "count": count }))
            .collect::<Vec<_>>());
    }

    let mut response = CommandResponse::ok(data).with_meta(meta);
    if cards.is_empty() {
        response = response.with_hint(Hint::new(HintKind::Info, "No records match the filters."));
    }

    output.emit(response, || {
        let mut text = render_cards(&config.title, &cards, config.columns, engine.config());
        if let Some(counts) = &counts {
            let line: Vec<String> = counts
                .iter()
                .map(|(label, count)| format!("{label}:{count}"))
                .collect();
            text.push_str(&line.join("  "));
        }
        text
    })
}

fn run_regions(
    args: TableArgs,
    config: &DirectoryConfig,
    mut meta: ResponseMeta,
    output: &Output,
) -> Result<()> {
    let engine = build_engine(config)?;
    let (path, records) = load_table(config, args.table)?;
    let regions = engine.region_candidates(&records);

    meta.table_path = Some(path.display().to_string());
    meta.total_records = Some(records.len());
    meta.returned = Some(regions.len());

    let response = CommandResponse::ok(json!({ "regions": regions })).with_meta(meta);
    output.emit(response, || regions.join("\n"))
}

fn run_buckets(config: &DirectoryConfig, meta: ResponseMeta, output: &Output) -> Result<()> {
    let engine = build_engine(config)?;
    let buckets = engine.bucket_labels();
    let response = CommandResponse::ok(json!({ "buckets": buckets })).with_meta(meta);
    output.emit(response, || buckets.join(" "))
}

fn run_classify(
    args: ClassifyArgs,
    config: &DirectoryConfig,
    meta: ResponseMeta,
    output: &Output,
) -> Result<()> {
    let engine = build_engine(config)?;
    let labels: Vec<(String, String)> = args
        .names
        .into_iter()
        .map(|name| {
            let label = engine.classify(&name);
            (name, label)
        })
        .collect();

    let data = json!({
        "labels": labels
            .iter()
            .map(|(name, label)| json!({ "name": name, "label": label }))
            .collect::<Vec<_>>()
    });
    let response = CommandResponse::ok(data).with_meta(meta);
    output.emit(response, || {
        labels
            .iter()
            .map(|(name, label)| format!("{name}\t{label}"))
            .collect::<Vec<_>>()
            .join("\n")
    })
}
