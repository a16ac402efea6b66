use std::{fmt::Display, path::PathBuf, time::Duration};

use thiserror::Error;

const REQUEST_ERR_PREFIX: &str = "while talking to game server:\n";

/// Anything that can go wrong between sending a request
/// and having a usable response.
///
/// The UI treats every variant the same way (log it, keep the
/// display), the split only exists for the log message.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("{REQUEST_ERR_PREFIX}invalid server url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("{REQUEST_ERR_PREFIX}{0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("{REQUEST_ERR_PREFIX}timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    #[error("{REQUEST_ERR_PREFIX}couldn't parse response of {url} (HTTP {code}): {source}\nbody: {body}")]
    Json {
        url: String,
        code: reqwest::StatusCode,
        body: String,
        source: serde_json::Error,
    },
    #[error("{REQUEST_ERR_PREFIX}response from {url} is missing field `{field}`")]
    MissingField { url: String, field: &'static str },
}

/// Cuts a response body down to something that fits in a log line.
#[must_use]
pub fn body_excerpt(body: &str) -> String {
    const MAX: usize = 200;
    let body = body.trim();
    match body.char_indices().nth(MAX) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_owned(),
    }
}

#[derive(Debug, Error)]
#[error("at path {path:?}: {error}")]
pub struct IoError {
    pub path: PathBuf,
    pub error: std::io::Error,
}

pub trait IntoIoError<T> {
    #[allow(clippy::missing_errors_doc)]
    fn path(self, p: impl Into<PathBuf>) -> Result<T, IoError>;
}

impl<T> IntoIoError<T> for std::io::Result<T> {
    fn path(self, p: impl Into<PathBuf>) -> Result<T, IoError> {
        self.map_err(|error| IoError {
            path: p.into(),
            error,
        })
    }
}

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("couldn't parse json: {error}\n{}", body_excerpt(.json))]
    From {
        error: serde_json::Error,
        json: String,
    },
    #[error("couldn't serialize json: {0}")]
    To(serde_json::Error),
}

pub trait IntoJsonError<T> {
    /// Attaches the text that failed to parse.
    #[allow(clippy::missing_errors_doc)]
    fn json(self, json: String) -> Result<T, JsonError>;
    #[allow(clippy::missing_errors_doc)]
    fn json_to(self) -> Result<T, JsonError>;
}

impl<T> IntoJsonError<T> for serde_json::Result<T> {
    fn json(self, json: String) -> Result<T, JsonError> {
        self.map_err(|error| JsonError::From { error, json })
    }

    fn json_to(self) -> Result<T, JsonError> {
        self.map_err(JsonError::To)
    }
}

#[derive(Debug, Error)]
pub enum JsonFileError {
    #[error(transparent)]
    Json(#[from] JsonError),
    #[error(transparent)]
    Io(#[from] IoError),
}

impl RequestError {
    pub(crate) fn invalid_url(url: &str, reason: impl Display) -> Self {
        Self::InvalidUrl {
            url: url.to_owned(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_keeps_short_bodies() {
        assert_eq!(body_excerpt("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn excerpt_cuts_on_char_boundary() {
        let long = "💎".repeat(300);
        let cut = body_excerpt(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.trim_end_matches("...").chars().count(), 200);
    }

    #[test]
    fn timeout_message_has_millis() {
        let err = RequestError::Timeout(Duration::from_millis(1500));
        assert!(err.to_string().contains("1500ms"));
    }
}
