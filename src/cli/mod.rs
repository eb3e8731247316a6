//! CLI subcommand definitions and handlers.
//!
//! Uses clap derive to define the subcommands:
//! - `get <ID>` -- fetch a poll and print its results
//! - `create <TITLE> <OPTION>...` -- create a poll
//! - `open <ID>` -- open a poll page in the browser
//! - `version` -- print build/version info

use clap::{Args, Parser, Subcommand};

/// Command-line client for StrawPoll.
#[derive(Parser, Debug)]
#[command(
    name = "strawpoll",
    version = env!("CARGO_PKG_VERSION"),
    about = "Create, fetch and open StrawPoll polls"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every subcommand; they override config file and env.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// API root (default: from config or https://strawpoll.me/api/v2/polls).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Log filter directive, e.g. "debug" or "strawpoll=trace".
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format.
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch a poll and print its results.
    Get {
        /// Poll id.
        id: String,

        /// Include each option's share of the vote.
        #[arg(short, long)]
        percent: bool,

        /// Print the poll as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Create a poll.
    Create {
        /// Poll question.
        title: String,

        /// Answer choices, in display order.
        #[arg(required = true)]
        options: Vec<String>,

        /// Allow only one selection per voter.
        #[arg(long)]
        single: bool,

        /// Turn off permissive mode.
        #[arg(long)]
        strict: bool,

        /// Require a CAPTCHA to vote.
        #[arg(long)]
        captcha: bool,

        /// Duplicate-vote check mode (e.g. normal, permissive, disabled).
        #[arg(long, default_value = "normal")]
        dupcheck: String,

        /// Print the created poll as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Open a poll page in the default browser.
    Open {
        /// Poll id.
        id: String,

        /// Open the results page instead of the voting page.
        #[arg(short, long)]
        results: bool,
    },

    /// Print version and git commit information.
    Version,
}

// ---------------------------------------------------------------------------
// Subcommand handlers
// ---------------------------------------------------------------------------

use crate::browser::UrlOpener;
use crate::config::{self, Config, ConfigError};
use crate::logging::LogFormat;
use crate::polls::{page_url, CreatePoll, Poll, PollClient};

/// Load config from file and env, then apply command-line overrides.
pub fn resolve_config(global: &GlobalArgs) -> Result<Config, ConfigError> {
    let mut cfg = config::load_config()?;
    apply_overrides(&mut cfg, global);
    cfg.validate()?;
    Ok(cfg)
}

fn apply_overrides(cfg: &mut Config, global: &GlobalArgs) {
    if let Some(url) = &global.api_url {
        cfg.client.api_url = url.clone();
    }
    if let Some(timeout) = global.timeout {
        cfg.client.timeout_secs = timeout;
    }
    if let Some(level) = &global.log_level {
        cfg.logging.level = level.clone();
    }
    if let Some(format) = global.log_format {
        cfg.logging.format = format;
    }
}

/// Run the `get` subcommand.
pub async fn handle_get(
    client: &PollClient,
    id: &str,
    percent: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let poll = client.get_poll(id).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&poll)?);
    } else {
        print!("{}", render_results(&poll, percent));
    }
    Ok(())
}

/// Run the `create` subcommand.
pub async fn handle_create(
    client: &PollClient,
    request: &CreatePoll,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let poll = client.create_poll(request).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&poll)?);
    } else {
        println!("{poll}");
        println!("  Vote:    {}", poll.url());
        println!("  Results: {}", poll.results_url());
    }
    Ok(())
}

/// Run the `open` subcommand.
///
/// The page URL only depends on the id, so no request is made.
pub fn handle_open(
    opener: &dyn UrlOpener,
    id: &str,
    results: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    opener.open_url(&page_url(id, results))?;
    Ok(())
}

/// Run the `version` subcommand.
pub fn handle_version() {
    print!("{}", version_info());
}

fn version_info() -> String {
    format!(
        "strawpoll {}\n  Git commit: {}\n  Platform:   {} ({})\n",
        env!("CARGO_PKG_VERSION"),
        env!("STRAWPOLL_GIT_HASH"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Build the `create` request from its command-line flags.
pub fn create_request(
    title: String,
    options: Vec<String>,
    single: bool,
    strict: bool,
    captcha: bool,
    dupcheck: String,
) -> CreatePoll {
    CreatePoll::new(title, options)
        .multi(!single)
        .permissive(!strict)
        .captcha(captcha)
        .dupcheck(dupcheck)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Render a poll as a results table.
fn render_results(poll: &Poll, percent: bool) -> String {
    let width = poll
        .options()
        .iter()
        .map(|o| o.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = format!("{poll}\n");
    if percent {
        for (option, votes, pct) in poll.results_with_percent() {
            out.push_str(&format!("  {option:<width$}  {votes:>6}  {pct:>3}%\n"));
        }
    } else {
        for (option, votes) in poll.results() {
            out.push_str(&format!("  {option:<width$}  {votes:>6}\n"));
        }
    }
    out.push_str(&format!("  Total votes: {}\n", poll.total_votes()));
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
