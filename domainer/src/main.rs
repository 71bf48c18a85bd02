//! Domainer CLI Application
//!
//! A command-line interface for fetching, sorting, and date-filtering domain
//! availability feeds, with optional dispatch to a text-generation API.
//! This CLI application provides a user-friendly interface to the
//! domainer-lib library.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use domainer_lib::{
    filter_by_date, load_env_config, load_sorted, parse_filter_date, parse_timeout_string,
    save_sorted, ConfigManager, DomainPipeline, DomainRecord, FeedSource, FileConfig,
    PipelineConfig,
};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for domainer
#[derive(Parser, Debug)]
#[command(name = "domainer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch, sort, and date-filter domain availability feeds")]
#[command(
    long_about = "Fetch a domain availability feed, sort and deduplicate it, optionally filter \
to domains available on or before a date, and optionally send the result to a text-generation \
API for analysis."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Filter to domains available on or before this date (YYYY-MM-DD)
    #[arg(short = 'd', long = "date", value_name = "DATE", help_heading = "Filtering")]
    pub date: Option<String>,

    /// Send the (filtered) list to ChatGPT and print its analysis
    #[arg(short = 'c', long = "chatgpt", help_heading = "Analysis")]
    pub chatgpt: bool,

    /// Model to request for analysis
    #[arg(long = "model", value_name = "NAME", help_heading = "Analysis")]
    pub model: Option<String>,

    /// Fetch the feed from this URL instead of the default
    #[arg(short = 'u', long = "url", value_name = "URL", help_heading = "Feed Source")]
    pub url: Option<String>,

    /// Read the feed from a local file
    #[arg(short = 'f', long = "file", value_name = "FILE", help_heading = "Feed Source")]
    pub file: Option<PathBuf>,

    /// Load the sorted list from FILE if it exists; otherwise fetch and write it
    #[arg(long = "cache", value_name = "FILE", help_heading = "Feed Source")]
    pub cache: Option<PathBuf>,

    /// Also save the final list to FILE
    #[arg(short = 'o', long = "output", value_name = "FILE", help_heading = "Output")]
    pub output: Option<PathBuf>,

    /// Print the list as JSON
    #[arg(long = "json", help_heading = "Output")]
    pub json: bool,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_logging(args.verbose);

    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Set up the tracing subscriber; `-v` lowers the default filter to debug.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "domainer=debug,domainer_lib=debug"
    } else {
        "domainer=info,domainer_lib=info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Validate command line arguments.
fn validate_args(args: &Args) -> Result<(), String> {
    if args.url.is_some() && args.file.is_some() {
        return Err("Cannot specify both --url and --file feed sources".to_string());
    }

    if args.json && args.chatgpt {
        return Err("Cannot combine --json with --chatgpt (the analysis is plain text)".to_string());
    }

    Ok(())
}

/// Main pipeline logic.
async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Parse the filter date up front so a bad -d fails before any I/O
    let filter_date = args
        .date
        .as_deref()
        .map(parse_filter_date)
        .transpose()?;

    let (config, cache_path) = build_config(&args)?;
    let pipeline = DomainPipeline::with_config(config)?;

    // Obtain the sorted collection, via the cache file when requested
    let records = match &cache_path {
        Some(cache_path) if cache_path.exists() => {
            tracing::debug!("loading sorted list from cache {}", cache_path.display());
            load_sorted(cache_path)?
        }
        Some(cache_path) => {
            let records = pipeline.sorted_records().await?;
            save_sorted(cache_path, &records)?;
            records
        }
        None => pipeline.sorted_records().await?,
    };

    // Date filter is optional-terminal: without -d the full list flows on
    let (final_records, filtered) = match filter_date {
        Some(date) => (filter_by_date(&records, date), true),
        None => (records, false),
    };

    if let Some(output_path) = &args.output {
        // An empty filter result is a valid outcome, not a save failure
        if final_records.is_empty() {
            tracing::debug!("nothing to save to {}", output_path.display());
        } else {
            save_sorted(output_path, &final_records)?;
            tracing::debug!("saved {} records to {}", final_records.len(), output_path.display());
        }
    }

    print_records(&final_records, &args, filter_date)?;

    if args.chatgpt {
        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        let client = pipeline.analyzer(api_key)?;
        let analysis = client.analyze(&final_records).await?;
        ui::print_analysis(&final_records, &analysis);
    } else if !args.json && (!filtered || !final_records.is_empty()) {
        ui::print_summary(final_records.len(), filter_date);
    }

    Ok(())
}

/// Print the domain list in the selected format.
fn print_records(
    records: &[DomainRecord],
    args: &Args,
    filter_date: Option<chrono::NaiveDate>,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }

    if records.is_empty() {
        if let Some(date) = filter_date {
            ui::print_no_matches(date);
        }
        return Ok(());
    }

    if let Some(date) = filter_date {
        ui::print_filter_header(date);
    }
    ui::print_records(records);

    Ok(())
}

/// Build PipelineConfig (plus the resolved cache path) from CLI args with
/// config file integration.
///
/// Precedence order (highest to lowest):
/// 1. CLI arguments (explicit user input)
/// 2. Environment variables (DOMAINER_*)
/// 3. Local config file (./domainer.toml)
/// 4. Global config file (~/.domainer.toml)
/// 5. XDG config file (~/.config/domainer/config.toml)
/// 6. Built-in defaults
fn build_config(args: &Args) -> Result<(PipelineConfig, Option<PathBuf>), Box<dyn std::error::Error>> {
    let mut config = PipelineConfig::default();

    let config_manager = ConfigManager::new();
    let env_config = load_env_config();

    // Step 1: Load config files (explicit path beats discovery)
    let file_config = if let Some(explicit_path) = args.config.as_ref().or(env_config.config.as_ref())
    {
        tracing::debug!("using explicit config file: {}", explicit_path);
        config_manager
            .load_file(explicit_path)
            .map_err(|e| format!("Failed to load config file '{}': {}", explicit_path, e))?
    } else {
        config_manager.discover_and_load().unwrap_or_default()
    };

    config = merge_file_config(config, &file_config);

    // Step 2: Apply environment variables
    if let Some(url) = &env_config.url {
        config.source = FeedSource::Url(url.clone());
    }
    if let Some(file) = &env_config.file {
        config.source = FeedSource::File(PathBuf::from(file));
    }
    if let Some(timeout_str) = &env_config.timeout {
        if let Some(secs) = parse_timeout_string(timeout_str) {
            config.fetch_timeout = Duration::from_secs(secs);
        }
    }
    if let Some(model) = &env_config.model {
        config.model = model.clone();
    }

    // Step 3: Apply CLI arguments (highest precedence)
    if let Some(url) = &args.url {
        config.source = FeedSource::Url(url.clone());
    }
    if let Some(file) = &args.file {
        config.source = FeedSource::File(file.clone());
    }
    if let Some(model) = &args.model {
        config.model = model.clone();
    }

    // Cache path: CLI flag beats the config default
    let cache_path = args.cache.clone().or_else(|| {
        file_config
            .defaults
            .as_ref()
            .and_then(|d| d.cache.as_ref())
            .map(PathBuf::from)
    });

    Ok((config, cache_path))
}

/// Merge FileConfig values into PipelineConfig.
fn merge_file_config(mut config: PipelineConfig, file_config: &FileConfig) -> PipelineConfig {
    if let Some(defaults) = &file_config.defaults {
        if let Some(url) = &defaults.url {
            config.source = FeedSource::Url(url.clone());
        }
        if let Some(file) = &defaults.file {
            config.source = FeedSource::File(PathBuf::from(file));
        }
        if let Some(timeout_str) = &defaults.timeout {
            if let Some(secs) = parse_timeout_string(timeout_str) {
                config.fetch_timeout = Duration::from_secs(secs);
            }
        }
    }

    if let Some(analysis) = &file_config.analysis {
        if let Some(model) = &analysis.model {
            config.model = model.clone();
        }
        if let Some(max_tokens) = analysis.max_tokens {
            config.max_tokens = max_tokens;
        }
        if let Some(temperature) = analysis.temperature {
            config.temperature = temperature;
        }
        if let Some(api_base) = &analysis.api_base {
            config.api_base = api_base.clone();
        }
        if let Some(timeout_str) = &analysis.timeout {
            if let Some(secs) = parse_timeout_string(timeout_str) {
                config.analysis_timeout = Duration::from_secs(secs);
            }
        }
    }

    config
}
