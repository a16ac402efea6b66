//! Talking to the game server.

use std::{fmt::Display, str::FromStr, time::Duration};

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    body_excerpt,
    json::{AttackResponse, ConsoleResponse, SpinResponse},
    RequestError, CLIENT, DEFAULT_BASE_URL,
};

/// Name of the boolean query parameter sent with spin/attack.
///
/// Older servers call it `use_quantum`, newer ones `entangled`.
/// Both mean the same toggle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagParam {
    #[serde(rename = "use_quantum")]
    #[default]
    UseQuantum,
    #[serde(rename = "entangled")]
    Entangled,
}

impl FlagParam {
    pub const ALL: &[Self] = &[Self::UseQuantum, Self::Entangled];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FlagParam::UseQuantum => "use_quantum",
            FlagParam::Entangled => "entangled",
        }
    }

    /// Label for the toggle in the UI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            FlagParam::UseQuantum => "Use quantum RNG",
            FlagParam::Entangled => "Entangled qubits",
        }
    }
}

impl Display for FlagParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FlagParam {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| format!("unknown flag parameter {s:?} (expected use_quantum or entangled)"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Spin,
    Attack,
    Console,
}

impl Endpoint {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Endpoint::Spin => "/api/spin",
            Endpoint::Attack => "/api/attack",
            Endpoint::Console => "/api/console",
        }
    }
}

/// The three things the client can ask the server.
///
/// [`HttpGameApi`] is the real thing, tests plug in their own.
#[async_trait]
pub trait GameApi: Send + Sync {
    async fn spin(&self, flag: bool) -> Result<SpinResponse, RequestError>;
    async fn attack(&self, flag: bool) -> Result<AttackResponse, RequestError>;
    async fn console(&self) -> Result<ConsoleResponse, RequestError>;
}

/// JSON-over-HTTP [`GameApi`].
///
/// Every call is a single GET with `Accept: application/json`.
/// There are no retries. Unless [`HttpGameApi::with_timeout`] is used,
/// requests may take as long as the server likes.
#[derive(Debug, Clone)]
pub struct HttpGameApi {
    base_url: String,
    flag_param: FlagParam,
    timeout: Option<Duration>,
}

impl Default for HttpGameApi {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            flag_param: FlagParam::default(),
            timeout: None,
        }
    }
}

impl HttpGameApi {
    /// # Errors
    /// If `base_url` isn't an absolute `http(s)` URL.
    pub fn new(base_url: &str, flag_param: FlagParam) -> Result<Self, RequestError> {
        let parsed = Url::parse(base_url).map_err(|n| RequestError::invalid_url(base_url, n))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RequestError::invalid_url(
                base_url,
                format!("unsupported scheme {:?}", parsed.scheme()),
            ));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            flag_param,
            timeout: None,
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn flag_param(&self) -> FlagParam {
        self.flag_param
    }

    /// Full URL of an endpoint, with the flag
    /// as query parameter if one is given.
    ///
    /// # Errors
    /// Only if the base URL somehow stopped being a URL.
    pub fn endpoint_url(&self, endpoint: Endpoint, flag: Option<bool>) -> Result<Url, RequestError> {
        let raw = format!("{}{}", self.base_url, endpoint.path());
        let mut url = Url::parse(&raw).map_err(|n| RequestError::invalid_url(&raw, n))?;
        if let Some(flag) = flag {
            url.query_pairs_mut()
                .append_pair(self.flag_param.as_str(), if flag { "true" } else { "false" });
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, RequestError> {
        let mut request = CLIENT.get(url.clone()).header(ACCEPT, "application/json");
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await.map_err(|n| self.map_send_error(n))?;

        // Status isn't checked, an error page with a valid body counts.
        let code = response.status();
        let text = response.text().await.map_err(|n| self.map_send_error(n))?;
        serde_json::from_str(&text).map_err(|source| RequestError::Json {
            url: url.to_string(),
            code,
            body: body_excerpt(&text),
            source,
        })
    }

    fn map_send_error(&self, err: reqwest::Error) -> RequestError {
        match self.timeout {
            Some(timeout) if err.is_timeout() => RequestError::Timeout(timeout),
            _ => err.into(),
        }
    }
}

#[async_trait]
impl GameApi for HttpGameApi {
    async fn spin(&self, flag: bool) -> Result<SpinResponse, RequestError> {
        let url = self.endpoint_url(Endpoint::Spin, Some(flag))?;
        self.get_json(url).await
    }

    async fn attack(&self, flag: bool) -> Result<AttackResponse, RequestError> {
        let url = self.endpoint_url(Endpoint::Attack, Some(flag))?;
        self.get_json(url).await
    }

    async fn console(&self) -> Result<ConsoleResponse, RequestError> {
        let url = self.endpoint_url(Endpoint::Console, None)?;
        self.get_json(url).await
    }
}
