use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::commands::{self, CommandReport, FilterOptions};
use crate::logging;
use crate::vault::config::load_config;
use crate::vault::paths::resolve_paths;

const VIEWER_LOG_LEVEL: &str = "error";

#[derive(Debug, Parser)]
#[command(name = "message-vault", version, about = "Browse the MessageVault message archive")]
pub struct Cli {
    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List archived messages, newest first.
    List(FilterArgs),
    /// Show one message from the filtered listing in full.
    Show {
        /// Row index as printed by `list` with the same filters.
        index: usize,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Print resolved paths, configuration and archive counts.
    Status,
}

#[derive(Debug, Clone, Args)]
pub struct FilterArgs {
    /// First day to include (YYYY-MM-DD). Defaults to the oldest message.
    #[arg(long)]
    pub from: Option<String>,
    /// Last day to include (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub to: Option<String>,
    /// Case-insensitive text the message body must contain.
    #[arg(long)]
    pub keyword: Option<String>,
    /// all, sent, or received.
    #[arg(long = "type", value_name = "CATEGORY")]
    pub category: Option<String>,
}

impl From<FilterArgs> for FilterOptions {
    fn from(args: FilterArgs) -> Self {
        Self {
            from: args.from,
            to: args.to,
            keyword: args.keyword,
            category: args.category,
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn finish(report: &CommandReport, json: bool) -> Result<()> {
    finish_with(report, report, json)
}

/// Like `finish`, but `--json` prints `body` instead of the bare report.
fn finish_with(report: &CommandReport, body: &impl Serialize, json: bool) -> Result<()> {
    if json {
        print_json(body)?;
    } else {
        for line in &report.details {
            println!("{line}");
        }
        for issue in &report.issues {
            eprintln!("issue: {issue}");
        }
    }

    if !report.ok {
        bail!("{} failed with {} issue(s)", report.command, report.issues.len());
    }
    Ok(())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_stderr_logging(VIEWER_LOG_LEVEL)?;

    let paths = resolve_paths()?;
    let cfg = load_config()?;

    match cli.command {
        Command::List(filters) => {
            let out = commands::list::run(&paths, &cfg, &filters.into())?;
            finish_with(&out.report, &out, cli.json)
        }
        Command::Show { index, filters } => {
            let report = commands::show::run(&paths, &cfg, &filters.into(), index)?;
            finish(&report, cli.json)
        }
        Command::Status => {
            let report = commands::status::run(&paths, &cfg)?;
            finish(&report, cli.json)
        }
    }
}
