//! StrawPoll API client
//!
//! Thin wrapper over `reqwest` for the two poll endpoints:
//!
//! - `GET {api_url}/{id}` fetches a poll
//! - `POST {api_url}` creates one
//!
//! Both responses go through [`check_response`] before the body is parsed.

use super::error::{check_response, PollError, Result};
use super::poll::Poll;
use super::request::CreatePoll;
use crate::config::ClientConfig;
use std::time::Duration;
use tracing::{debug, info};

/// Default API root.
pub const DEFAULT_API_URL: &str = "https://strawpoll.me/api/v2/polls";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the poll API. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct PollClient {
    client: reqwest::Client,
    api_url: url::Url,
}

impl PollClient {
    /// Create a client with default settings.
    pub fn new() -> Result<Self> {
        Self::from_config(&ClientConfig::default())
    }

    /// Create a client from resolved configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Self::with_http_client(client)?.with_api_url(&config.api_url)
    }

    /// Wrap an existing HTTP client, pointed at [`DEFAULT_API_URL`].
    pub fn with_http_client(client: reqwest::Client) -> Result<Self> {
        Ok(Self {
            client,
            api_url: parse_api_url(DEFAULT_API_URL)?,
        })
    }

    /// Point the client at a different API root.
    ///
    /// Accepts `http` and `https` URLs; a trailing slash is dropped.
    pub fn with_api_url(mut self, url: &str) -> Result<Self> {
        self.api_url = parse_api_url(url)?;
        Ok(self)
    }

    /// Returns the configured API root.
    pub fn api_url(&self) -> &str {
        self.api_url.as_str()
    }

    /// `{api_url}/{poll_id}`, with the id encoded as a single path segment.
    pub fn poll_url(&self, poll_id: &str) -> Result<url::Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                PollError::InvalidRequest(format!("API URL \"{}\" cannot take a path", self.api_url))
            })?
            .pop_if_empty()
            .push(poll_id);
        Ok(url)
    }

    /// Fetch a poll by id.
    pub async fn get_poll(&self, poll_id: &str) -> Result<Poll> {
        let url = self.poll_url(poll_id)?;
        debug!(method = "GET", %url, "poll request");

        let response = self.client.get(url).send().await?;
        let poll = read_poll(response).await?;

        info!(poll_id = poll.id(), votes = poll.total_votes(), "fetched poll");
        Ok(poll)
    }

    /// Create a poll.
    pub async fn create_poll(&self, request: &CreatePoll) -> Result<Poll> {
        request.validate()?;
        debug!(
            method = "POST",
            url = %self.api_url,
            options = request.options.len(),
            "poll request"
        );

        let response = self
            .client
            .post(self.api_url.clone())
            .json(request)
            .send()
            .await?;
        let poll = read_poll(response).await?;

        info!(poll_id = poll.id(), url = poll.url(), "created poll");
        Ok(poll)
    }
}

fn parse_api_url(url: &str) -> Result<url::Url> {
    let parsed = url::Url::parse(url.trim_end_matches('/'))
        .map_err(|e| PollError::InvalidRequest(format!("invalid API URL \"{url}\": {e}")))?;
    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(PollError::InvalidRequest(format!(
            "API URL must use http or https scheme, got \"{scheme}\""
        )));
    }
    Ok(parsed)
}

async fn read_poll(response: reqwest::Response) -> Result<Poll> {
    let response = check_response(response)?;
    let body = response.bytes().await?;
    Poll::from_slice(&body)
}
