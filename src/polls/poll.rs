//! Poll Snapshot
//!
//! A parsed poll payload plus the views derived from it.

use super::client::PollClient;
use super::error::Result;
use crate::browser::{BrowserError, SystemOpener, UrlOpener};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Public site root; poll pages live at `{WEB_BASE_URL}/{id}`.
pub const WEB_BASE_URL: &str = "https://www.strawpoll.me";

/// Poll ids come back as numbers from the v2 API, but strings are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl From<RawId> for String {
    fn from(id: RawId) -> Self {
        match id {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

/// Wire shape of a poll. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct PollPayload {
    id: RawId,
    title: String,
    options: Vec<String>,
    votes: Vec<u64>,
    captcha: bool,
    dupcheck: String,
    #[serde(default)]
    multi: Option<bool>,
}

/// One snapshot of a remote poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Poll {
    id: String,
    title: String,
    options: Vec<String>,
    votes: Vec<u64>,
    captcha: bool,
    dupcheck: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    multi: Option<bool>,
    url: String,
    results_url: String,
    #[serde(skip)]
    raw: Value,
}

impl Poll {
    /// Parse a poll from a raw response body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    /// Parse a poll from an already-decoded JSON document.
    ///
    /// Fails when a required field is missing. `options` and `votes` are
    /// paired by position; if their lengths differ the derived views stop at
    /// the shorter one.
    pub fn from_value(raw: Value) -> Result<Self> {
        let payload = PollPayload::deserialize(&raw)?;

        let id = String::from(payload.id);
        let url = page_url(&id, false);
        let results_url = page_url(&id, true);

        Ok(Self {
            id,
            title: payload.title,
            options: payload.options,
            votes: payload.votes,
            captcha: payload.captcha,
            dupcheck: payload.dupcheck,
            multi: payload.multi,
            url,
            results_url,
            raw,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn votes(&self) -> &[u64] {
        &self.votes
    }

    /// Whether voting requires a CAPTCHA.
    pub fn captcha(&self) -> bool {
        self.captcha
    }

    /// Duplicate-vote prevention mode reported by the service.
    pub fn dupcheck(&self) -> &str {
        &self.dupcheck
    }

    /// Multiple-selection flag, when the service reports it.
    pub fn multi(&self) -> Option<bool> {
        self.multi
    }

    /// Public voting page.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Public results page.
    pub fn results_url(&self) -> &str {
        &self.results_url
    }

    /// The full JSON payload this poll was parsed from.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Sum of all vote counts.
    pub fn total_votes(&self) -> u64 {
        self.votes.iter().fold(0u64, |acc, v| acc.saturating_add(*v))
    }

    /// `(option, votes)` pairs in option order.
    pub fn results(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.options
            .iter()
            .map(String::as_str)
            .zip(self.votes.iter().copied())
    }

    /// `(option, votes, percent)` triples in option order.
    ///
    /// Percentages are floored integers; every option gets 0 when no votes
    /// have been cast.
    pub fn results_with_percent(&self) -> impl Iterator<Item = (&str, u64, u8)> + '_ {
        let total = self.total_votes();
        self.results()
            .map(move |(option, votes)| (option, votes, percent(votes, total)))
    }

    /// Re-fetch this poll and replace every field with the fresh snapshot.
    ///
    /// On failure `self` is left exactly as it was.
    pub async fn refresh(&mut self, client: &PollClient) -> Result<()> {
        let fresh = client.get_poll(&self.id).await?;
        *self = fresh;
        Ok(())
    }

    /// Open the poll page (or its results page) with the system URL handler.
    pub fn open(&self, results: bool) -> std::result::Result<(), BrowserError> {
        self.open_with(&SystemOpener, results)
    }

    /// Open the poll page (or its results page) with the given opener.
    pub fn open_with(
        &self,
        opener: &dyn UrlOpener,
        results: bool,
    ) -> std::result::Result<(), BrowserError> {
        let target = if results { &self.results_url } else { &self.url };
        opener.open_url(target)
    }
}

impl fmt::Display for Poll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StrawPoll \"{}\" [{}]", self.title, self.id)
    }
}

/// Public page for a poll id: the voting page, or the results page.
pub fn page_url(id: &str, results: bool) -> String {
    if results {
        format!("{WEB_BASE_URL}/{id}/r")
    } else {
        format!("{WEB_BASE_URL}/{id}")
    }
}

fn percent(votes: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    // votes <= total, so the quotient is at most 100
    (u128::from(votes) * 100 / u128::from(total)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polls::error::{ErrorKind, PollError};
    use serde_json::json;
    use std::cell::RefCell;

    fn sample(options: &[&str], votes: &[u64]) -> Poll {
        Poll::from_value(json!({
            "id": 11682852,
            "title": "Is Rust the best?",
            "options": options,
            "votes": votes,
            "captcha": false,
            "dupcheck": "normal",
            "multi": true
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_fields() {
        let poll = sample(&["Yes", "No"], &[3, 1]);
        assert_eq!(poll.id(), "11682852");
        assert_eq!(poll.title(), "Is Rust the best?");
        assert_eq!(poll.options(), ["Yes", "No"]);
        assert_eq!(poll.votes(), [3, 1]);
        assert!(!poll.captcha());
        assert_eq!(poll.dupcheck(), "normal");
        assert_eq!(poll.multi(), Some(true));
        assert_eq!(poll.raw()["title"], "Is Rust the best?");
    }

    #[test]
    fn test_urls_derived_from_id() {
        let poll = sample(&["Yes", "No"], &[0, 0]);
        assert_eq!(poll.url(), "https://www.strawpoll.me/11682852");
        assert_eq!(poll.results_url(), "https://www.strawpoll.me/11682852/r");
    }

    #[test]
    fn test_string_id_accepted() {
        let poll = Poll::from_slice(
            br#"{"id":"abc123","title":"t","options":["a"],"votes":[1],"captcha":true,"dupcheck":"disabled"}"#,
        )
        .unwrap();
        assert_eq!(poll.id(), "abc123");
        assert_eq!(poll.url(), "https://www.strawpoll.me/abc123");
        assert!(poll.captcha());
        assert_eq!(poll.multi(), None);
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let err = Poll::from_value(json!({
            "id": 1,
            "title": "t",
            "options": ["a", "b"],
            "captcha": false,
            "dupcheck": "normal"
        }))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("votes"));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = Poll::from_slice(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, PollError::Parse(_)));
    }

    #[test]
    fn test_mismatched_lengths_truncate_results() {
        let poll = Poll::from_value(json!({
            "id": 1,
            "title": "t",
            "options": ["a", "b", "c"],
            "votes": [1, 2],
            "captcha": false,
            "dupcheck": "normal"
        }))
        .unwrap();
        assert_eq!(poll.options().len(), 3);
        assert_eq!(poll.votes().len(), 2);

        let results: Vec<_> = poll.results().collect();
        assert_eq!(results, vec![("a", 1), ("b", 2)]);
        let with_percent: Vec<_> = poll.results_with_percent().collect();
        assert_eq!(with_percent, vec![("a", 1, 33), ("b", 2, 66)]);
    }

    #[test]
    fn test_extra_votes_truncate_results() {
        let poll = Poll::from_value(json!({
            "id": 1,
            "title": "t",
            "options": ["a"],
            "votes": [4, 9],
            "captcha": false,
            "dupcheck": "normal"
        }))
        .unwrap();
        assert_eq!(poll.results().count(), 1);
        assert_eq!(poll.results().next(), Some(("a", 4)));
    }

    #[test]
    fn test_page_url() {
        assert_eq!(page_url("42", false), "https://www.strawpoll.me/42");
        assert_eq!(page_url("42", true), "https://www.strawpoll.me/42/r");
        let poll = sample(&["Yes"], &[1]);
        assert_eq!(poll.url(), page_url(poll.id(), false));
        assert_eq!(poll.results_url(), page_url(poll.id(), true));
    }

    #[test]
    fn test_results_pairs_in_order() {
        let poll = sample(&["Red", "Green", "Blue"], &[5, 0, 2]);
        let results: Vec<_> = poll.results().collect();
        assert_eq!(results, vec![("Red", 5), ("Green", 0), ("Blue", 2)]);
        assert_eq!(results.len(), poll.options().len());
    }

    #[test]
    fn test_results_with_percent() {
        let poll = sample(&["Yes", "No"], &[3, 1]);
        let results: Vec<_> = poll.results_with_percent().collect();
        assert_eq!(results, vec![("Yes", 3, 75), ("No", 1, 25)]);
    }

    #[test]
    fn test_results_with_percent_no_votes() {
        let poll = sample(&["A", "B"], &[0, 0]);
        let results: Vec<_> = poll.results_with_percent().collect();
        assert_eq!(results, vec![("A", 0, 0), ("B", 0, 0)]);
    }

    #[test]
    fn test_percentages_floor_and_bound() {
        let poll = sample(&["A", "B", "C"], &[1, 1, 1]);
        let percents: Vec<u8> = poll.results_with_percent().map(|(_, _, p)| p).collect();
        assert_eq!(percents, vec![33, 33, 33]);

        let poll = sample(&["A", "B", "C", "D"], &[7, 13, 0, 29]);
        let sum: u32 = poll
            .results_with_percent()
            .map(|(_, _, p)| {
                assert!(p <= 100);
                u32::from(p)
            })
            .sum();
        assert!(sum <= 100);
    }

    #[test]
    fn test_percent_large_counts() {
        assert_eq!(percent(u64::MAX, u64::MAX), 100);
        assert_eq!(percent(u64::MAX / 2, u64::MAX), 49);
    }

    #[test]
    fn test_display() {
        let poll = sample(&["Yes"], &[1]);
        assert_eq!(poll.to_string(), "StrawPoll \"Is Rust the best?\" [11682852]");
    }

    #[test]
    fn test_serialize_skips_raw() {
        let poll = sample(&["Yes"], &[1]);
        let value = serde_json::to_value(&poll).unwrap();
        assert_eq!(value["url"], "https://www.strawpoll.me/11682852");
        assert!(value.get("raw").is_none());
    }

    struct RecordingOpener {
        opened: RefCell<Vec<String>>,
    }

    impl UrlOpener for RecordingOpener {
        fn open_url(&self, url: &str) -> std::result::Result<(), BrowserError> {
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_open_chooses_url() {
        let poll = sample(&["Yes"], &[1]);
        let opener = RecordingOpener {
            opened: RefCell::new(Vec::new()),
        };
        poll.open_with(&opener, false).unwrap();
        poll.open_with(&opener, true).unwrap();
        assert_eq!(
            *opener.opened.borrow(),
            vec![
                "https://www.strawpoll.me/11682852".to_string(),
                "https://www.strawpoll.me/11682852/r".to_string(),
            ]
        );
    }
}
