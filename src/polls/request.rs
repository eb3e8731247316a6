//! Poll Creation Request
//!
//! The JSON body sent when creating a poll, with the service's defaults.

use super::error::{PollError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Duplicate-vote prevention mode.
///
/// Values are defined by the service and passed through unchecked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dupcheck(String);

impl Dupcheck {
    pub fn new(mode: impl Into<String>) -> Self {
        Self(mode.into())
    }

    /// One vote per IP address.
    pub fn normal() -> Self {
        Self::new("normal")
    }

    /// Browser-cookie based duplicate check.
    pub fn permissive() -> Self {
        Self::new("permissive")
    }

    /// No duplicate checking.
    pub fn disabled() -> Self {
        Self::new("disabled")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Dupcheck {
    fn default() -> Self {
        Self::normal()
    }
}

impl fmt::Display for Dupcheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Dupcheck {
    fn from(mode: &str) -> Self {
        Self::new(mode)
    }
}

impl From<String> for Dupcheck {
    fn from(mode: String) -> Self {
        Self(mode)
    }
}

/// Body of `POST /polls`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePoll {
    /// Poll question
    pub title: String,
    /// Answer choices, in display order
    pub options: Vec<String>,
    /// Allow selecting more than one option
    pub multi: bool,
    /// Service-defined permissive mode
    pub permissive: bool,
    /// Require a CAPTCHA to vote
    pub captcha: bool,
    pub dupcheck: Dupcheck,
}

impl CreatePoll {
    /// Create a request with the service defaults: multiple choice,
    /// permissive, no CAPTCHA, `normal` duplicate checking.
    pub fn new<I, S>(title: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            options: options.into_iter().map(Into::into).collect(),
            multi: true,
            permissive: true,
            captcha: false,
            dupcheck: Dupcheck::default(),
        }
    }

    pub fn multi(mut self, multi: bool) -> Self {
        self.multi = multi;
        self
    }

    pub fn permissive(mut self, permissive: bool) -> Self {
        self.permissive = permissive;
        self
    }

    pub fn captcha(mut self, captcha: bool) -> Self {
        self.captcha = captcha;
        self
    }

    pub fn dupcheck(mut self, dupcheck: impl Into<Dupcheck>) -> Self {
        self.dupcheck = dupcheck.into();
        self
    }

    /// Local shape check. The option-count minimum is left to the service.
    pub fn validate(&self) -> Result<()> {
        if self.options.is_empty() {
            return Err(PollError::InvalidRequest(
                "a poll needs at least one option".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_in_body() {
        let request = CreatePoll::new("Is Rust the best?", ["Yes", "No"]);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "title": "Is Rust the best?",
                "options": ["Yes", "No"],
                "multi": true,
                "permissive": true,
                "captcha": false,
                "dupcheck": "normal"
            })
        );
    }

    #[test]
    fn test_builder_overrides() {
        let request = CreatePoll::new("Lunch?", vec!["Pizza".to_string(), "Tacos".to_string()])
            .multi(false)
            .permissive(false)
            .captcha(true)
            .dupcheck(Dupcheck::disabled());
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["multi"], false);
        assert_eq!(body["permissive"], false);
        assert_eq!(body["captcha"], true);
        assert_eq!(body["dupcheck"], "disabled");
    }

    #[test]
    fn test_unknown_dupcheck_passes_through() {
        let request = CreatePoll::new("t", ["a", "b"]).dupcheck("per-account");
        assert_eq!(request.dupcheck.as_str(), "per-account");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_single_option_is_left_to_service() {
        assert!(CreatePoll::new("t", ["only"]).validate().is_ok());
    }

    #[test]
    fn test_empty_options_rejected() {
        let err = CreatePoll::new("t", Vec::<String>::new())
            .validate()
            .unwrap_err();
        assert!(matches!(err, PollError::InvalidRequest(_)));
    }
}
