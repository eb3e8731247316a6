//! Poll Request Errors
//!
//! Maps non-success API responses onto a small set of named conditions and
//! wraps transport and decoding failures.

use reqwest::header::HeaderMap;
use reqwest::{Response, StatusCode};
use std::fmt;
use tracing::debug;

/// Result type for poll operations
pub type Result<T> = std::result::Result<T, PollError>;

/// Classification of a failed poll request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 401 from the API
    Unauthorized,
    /// 403 from the API
    Forbidden,
    /// 404 from the API
    NotFound,
    /// Any other non-success HTTP status
    Http(StatusCode),
    /// Connection, DNS or timeout failure
    Transport,
    /// Body was not a valid poll payload
    Parse,
    /// Request rejected before it was sent
    InvalidRequest,
}

impl ErrorKind {
    /// Stable label for this classification.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Http(_) => "HTTP Error",
            ErrorKind::Transport => "Transport Error",
            ErrorKind::Parse => "Parse Error",
            ErrorKind::InvalidRequest => "Invalid Request",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Http(status) => write!(f, "HTTP {}", status.as_u16()),
            other => f.write_str(other.label()),
        }
    }
}

/// Errors that can occur when talking to the poll API
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    /// The API answered with one of the named failure statuses.
    #[error("{kind}")]
    Status {
        kind: ErrorKind,
        status: StatusCode,
        headers: HeaderMap,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed poll response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl PollError {
    /// Classification of this error.
    ///
    /// Transport errors that carry a response status (from
    /// `error_for_status`) are reported as [`ErrorKind::Http`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            PollError::Status { kind, .. } => *kind,
            PollError::Transport(err) => err.status().map_or(ErrorKind::Transport, ErrorKind::Http),
            PollError::Parse(_) => ErrorKind::Parse,
            PollError::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    /// Classification label, e.g. `"Not Found"`.
    pub fn label(&self) -> &'static str {
        self.kind().label()
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            PollError::Status { status, .. } => Some(*status),
            PollError::Transport(err) => err.status(),
            PollError::Parse(_) | PollError::InvalidRequest(_) => None,
        }
    }

    /// Response headers of a named status failure.
    pub fn headers(&self) -> Option<&HeaderMap> {
        match self {
            PollError::Status { headers, .. } => Some(headers),
            _ => None,
        }
    }
}

impl PartialEq for PollError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                PollError::Status {
                    kind: a_kind,
                    status: a_status,
                    headers: a_headers,
                },
                PollError::Status {
                    kind: b_kind,
                    status: b_status,
                    headers: b_headers,
                },
            ) => a_kind == b_kind && a_status == b_status && a_headers == b_headers,
            (PollError::Transport(a), PollError::Transport(b)) => {
                a.status() == b.status() && a.to_string() == b.to_string()
            }
            (PollError::Parse(a), PollError::Parse(b)) => a.to_string() == b.to_string(),
            (PollError::InvalidRequest(a), PollError::InvalidRequest(b)) => a == b,
            _ => false,
        }
    }
}

/// Label-only comparison.
impl PartialEq<str> for PollError {
    fn eq(&self, other: &str) -> bool {
        self.label() == other
    }
}

impl PartialEq<&str> for PollError {
    fn eq(&self, other: &&str) -> bool {
        self.label() == *other
    }
}

/// Named classification for a status code, if it has one.
pub fn classify_status(status: StatusCode) -> Option<ErrorKind> {
    match status {
        StatusCode::UNAUTHORIZED => Some(ErrorKind::Unauthorized),
        StatusCode::FORBIDDEN => Some(ErrorKind::Forbidden),
        StatusCode::NOT_FOUND => Some(ErrorKind::NotFound),
        _ => None,
    }
}

/// Check a response before its body is decoded.
///
/// 200 passes, 401/403/404 become named errors, and every other status goes
/// through reqwest's `error_for_status`.
pub fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(response);
    }

    if let Some(kind) = classify_status(status) {
        debug!(status = status.as_u16(), %kind, "poll request rejected");
        return Err(PollError::Status {
            kind,
            status,
            headers: response.headers().clone(),
        });
    }

    debug!(status = status.as_u16(), "unclassified poll response status");
    Ok(response.error_for_status()?)
}
