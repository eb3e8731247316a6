//! strawpoll client library
//!
//! Async client for the StrawPoll API: create polls, fetch them, and read
//! their results with vote percentages.
//!
//! ```no_run
//! # async fn run() -> strawpoll::Result<()> {
//! let mut poll = strawpoll::create_poll("Is Rust the best?", ["Yes", "No"]).await?;
//! println!("{} -> {}", poll, poll.url());
//!
//! let client = strawpoll::PollClient::new()?;
//! poll.refresh(&client).await?;
//! # Ok(())
//! # }
//! ```

pub mod browser;
pub mod cli;
pub mod config;
pub mod logging;
pub mod polls;

pub use browser::{BrowserError, SystemOpener, UrlOpener};
pub use config::{ClientConfig, Config, ConfigError};
pub use polls::{
    create_poll, get_poll, CreatePoll, Dupcheck, ErrorKind, Poll, PollClient, PollError, Result,
};
