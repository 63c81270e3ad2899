//! CLI command definitions, routing, and tracing setup.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use cmdref_client::{ClientConfig, RefClient, search};
use cmdref_shared::{AppConfig, init_config, load_config};
use cmdref_store::DiskStore;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// cmdref — look up command references from the terminal.
#[derive(Parser)]
#[command(
    name = "cmdref",
    version,
    about = "Search and read command reference documents, cached locally.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// List every command in the catalog.
    List,

    /// Search the catalog by keyword (matches name or description).
    Search {
        /// Keyword to look for.
        keyword: String,
    },

    /// Show one command's reference document.
    Show {
        /// Command name, e.g. `tar`.
        name: String,

        /// Print only the example snippets.
        #[arg(long)]
        examples: bool,
    },

    /// Cache maintenance.
    Cache {
        /// Cache subcommand.
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Cache subcommands.
#[derive(Subcommand)]
pub(crate) enum CacheAction {
    /// Remove all cached catalog and detail data.
    Clear,
    /// Print the cache directory path.
    Dir,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "cmdref=info",
        1 => "cmdref=debug",
        _ => "cmdref=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::List => cmd_list().await,
        Command::Search { keyword } => cmd_search(&keyword).await,
        Command::Show { name, examples } => cmd_show(&name, examples).await,
        Command::Cache { action } => match action {
            CacheAction::Clear => cmd_cache_clear(),
            CacheAction::Dir => cmd_cache_dir(),
        },
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

/// Build the lookup client over the configured disk cache.
fn build_client(config: &AppConfig) -> Result<RefClient> {
    let cache_dir = config.cache.resolved_dir()?;
    let store = Arc::new(DiskStore::open(cache_dir)?);
    Ok(RefClient::new(ClientConfig::from(config), store)?)
}

/// Spinner shown while a network fetch may be in flight.
fn fetch_spinner(msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner.set_message(msg.to_string());
    spinner
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_list() -> Result<()> {
    let config = load_config()?;
    let client = build_client(&config)?;

    let spinner = fetch_spinner("Fetching catalog");
    let entries = client.fetch_catalog().await;
    spinner.finish_and_clear();
    let entries = entries?;

    info!(count = entries.len(), "catalog loaded");

    for entry in &entries {
        println!("{:<18} {}", entry.name, entry.description);
    }
    println!();
    println!("  {} commands", entries.len());

    Ok(())
}

async fn cmd_search(keyword: &str) -> Result<()> {
    if keyword.trim().is_empty() {
        println!("Empty keyword matches everything; use `cmdref list` to see the full catalog.");
        return Ok(());
    }

    let config = load_config()?;
    let client = build_client(&config)?;

    let spinner = fetch_spinner("Fetching catalog");
    let entries = client.fetch_catalog().await;
    spinner.finish_and_clear();
    let entries = entries?;

    let hits = search(&entries, keyword);
    info!(keyword, hits = hits.len(), "search complete");

    if hits.is_empty() {
        println!("No commands match '{keyword}'.");
        return Ok(());
    }

    for entry in &hits {
        println!("{:<18} {}", entry.name, entry.description);
    }
    println!();
    println!("  {} of {} commands match", hits.len(), entries.len());

    Ok(())
}

async fn cmd_show(name: &str, examples_only: bool) -> Result<()> {
    let config = load_config()?;
    let client = build_client(&config)?;

    let spinner = fetch_spinner(&format!("Fetching {name}"));
    let detail = client.fetch_detail(name).await;
    spinner.finish_and_clear();
    let detail = detail?;

    if examples_only {
        if detail.examples.is_empty() {
            println!("No examples recorded for '{}'.", detail.name);
            return Ok(());
        }
        for (i, example) in detail.examples.iter().enumerate() {
            println!("# Example {}", i + 1);
            println!("{example}");
            println!();
        }
        return Ok(());
    }

    println!("{}", detail.name);
    if !detail.description.is_empty() {
        println!("  {}", detail.description);
    }
    println!();
    println!("{}", detail.content);

    Ok(())
}

fn cmd_cache_clear() -> Result<()> {
    let config = load_config()?;
    let client = build_client(&config)?;

    client.clear_cache()?;
    println!("Cache cleared.");

    Ok(())
}

fn cmd_cache_dir() -> Result<()> {
    let config = load_config()?;
    println!("{}", config.cache.resolved_dir()?.display());
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
