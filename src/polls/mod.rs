//! Polls Module
//!
//! Create and fetch StrawPoll polls.

pub mod client;
pub mod error;
pub mod poll;
pub mod request;

pub use client::{PollClient, DEFAULT_API_URL};
pub use error::{classify_status, ErrorKind, PollError, Result};
pub use poll::{page_url, Poll, WEB_BASE_URL};
pub use request::{CreatePoll, Dupcheck};

/// Fetch a poll with a default client.
///
/// ```no_run
/// # async fn run() -> strawpoll::Result<()> {
/// let poll = strawpoll::get_poll("11682852").await?;
/// for (option, votes, percent) in poll.results_with_percent() {
///     println!("{option}: {votes} ({percent}%)");
/// }
/// # Ok(())
/// # }
/// ```
pub async fn get_poll(poll_id: &str) -> Result<Poll> {
    PollClient::new()?.get_poll(poll_id).await
}

/// Create a poll with a default client and the service defaults.
///
/// Use [`CreatePoll`] with [`PollClient::create_poll`] to change `multi`,
/// `permissive`, `captcha` or `dupcheck`.
pub async fn create_poll<I, S>(title: impl Into<String>, options: I) -> Result<Poll>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    PollClient::new()?
        .create_poll(&CreatePoll::new(title, options))
        .await
}
