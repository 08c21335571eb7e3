// ABOUTME: rsspager binary: parse RSS 2.0 feeds to JSON, or browse them page by page on a terminal.
// ABOUTME: Targets come from URLs, files, or stdin; logging goes to stderr via RUST_LOG.

mod config;
mod fetch;
mod terminal;

use std::io;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use rsspager_feed::parse_document;
use rsspager_menu::Session;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::fetch::{HttpFetcher, Target};
use crate::terminal::PlainTextRenderer;

/// Parse RSS 2.0 feeds and browse them a page at a time.
#[derive(Parser, Debug)]
#[command(name = "rsspager", version)]
#[command(about = "Parse RSS 2.0 feeds and browse them a page at a time", long_about = None)]
struct Cli {
    /// TOML config file with [menu], [validation], and [fetch] tables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Entries per page (overrides the config file).
    #[arg(long, global = true)]
    page_size: Option<usize>,

    /// Reject items that have neither a title nor a description.
    #[arg(long, global = true, default_value_t = false)]
    require_item_text: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse feeds and print them as JSON.
    Parse {
        /// Feed URL(s) (http/https) or local file paths. Use "-" to read one feed from stdin.
        #[arg(required = true)]
        targets: Vec<String>,

        /// Origin URL used for self-link synthesis (only valid with a single target).
        #[arg(long)]
        feed_url: Option<String>,

        /// Output compact JSON instead of pretty.
        #[arg(long, default_value_t = false)]
        compact: bool,
    },
    /// Load feeds, then read selection tokens and commands from stdin.
    Browse {
        /// Feeds to load before reading commands.
        targets: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = effective_config(&cli)?;

    match cli.command {
        Command::Parse {
            targets,
            feed_url,
            compact,
        } => parse(&config, &targets, feed_url.as_deref(), compact),
        Command::Browse { targets } => browse(&config, &targets),
    }
}

/// Config file values with command-line overrides applied.
fn effective_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(page_size) = cli.page_size {
        config.menu.page_size = page_size;
    }
    if cli.require_item_text {
        config.validation.require_item_text = true;
    }
    Ok(config)
}

fn parse(
    config: &Config,
    targets: &[String],
    feed_url: Option<&str>,
    compact: bool,
) -> Result<()> {
    if targets.len() > 1 && feed_url.is_some() {
        bail!("--feed-url is only valid when parsing a single target");
    }

    let fetcher = HttpFetcher::new(&config.fetch)?;
    let mut results = Vec::new();

    for target in targets {
        let parsed = Target::classify(target).and_then(|t| {
            let bytes = t.load(&fetcher)?;
            let origin = feed_url.or(t.origin());
            Ok(parse_document(&bytes, origin, &config.validation)?)
        });

        match parsed {
            Ok(doc) => results.push(json!({
                "target": target,
                "ok": true,
                "document": doc,
                "error": null
            })),
            Err(err) => {
                tracing::warn!(feed = %target, error = %err, "failed to parse feed");
                results.push(json!({
                    "target": target,
                    "ok": false,
                    "document": null,
                    "error": err.to_string()
                }))
            }
        }
    }

    let parsed = results
        .iter()
        .filter(|r| r.get("ok").and_then(|v| v.as_bool()) == Some(true))
        .count();
    let failed = results.len() - parsed;

    // A single successful target prints the bare document.
    let output = match results.as_slice() {
        [only] if failed == 0 => only.get("document").cloned().unwrap_or_else(|| json!({})),
        _ => json!({
            "feeds": results,
            "total_feeds": results.len(),
            "parsed": parsed,
            "failed": failed
        }),
    };

    if compact {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    if failed > 0 {
        bail!("{failed} of {} feed(s) failed to parse", targets.len());
    }
    Ok(())
}

fn browse(config: &Config, targets: &[String]) -> Result<()> {
    let fetcher = HttpFetcher::new(&config.fetch)?;
    let mut session = Session::new(
        fetcher.clone(),
        PlainTextRenderer,
        config.menu,
        config.validation,
    );

    for target in targets {
        if let Err(err) = preload(&mut session, &fetcher, target) {
            tracing::warn!(feed = %target, error = %err, "failed to load feed");
            eprintln!("failed to load {target}: {err}");
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    terminal::run(&mut session, stdin.lock(), &mut stdout)?;
    Ok(())
}

fn preload(
    session: &mut Session<HttpFetcher, PlainTextRenderer>,
    fetcher: &HttpFetcher,
    target: &str,
) -> Result<usize> {
    match Target::classify(target)? {
        Target::Url(url) => Ok(session.add_feed(url.as_str())?),
        Target::Stdin => Err(anyhow!("stdin is reserved for commands while browsing")),
        local => {
            let bytes = local.load(fetcher)?;
            Ok(session.add_feed_bytes(&bytes, None)?)
        }
    }
}
