use qs_core::{
    api::FlagParam, err, poller::DEFAULT_POLL_INTERVAL, IntoIoError, IntoJsonError,
    JsonFileError, DEFAULT_BASE_URL, SLOTS_DIR, VERSION_NAME,
};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Client configuration stored in
/// `QuantumSlots/config.json` (inside the platform config dir).
///
/// # Why `Option`?
///
/// Every field is an `Option` so that old or hand-written
/// files keep loading. `serde` turns missing fields into `None`,
/// which is treated as the default value (see the `c_` accessors).
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SlotsConfig {
    /// Where the game server lives, e.g. `http://127.0.0.1:8000`.
    pub base_url: Option<String>,
    /// Which name the server expects for the toggle,
    /// `use_quantum` or `entangled`.
    pub flag_param: Option<FlagParam>,
    /// State of the toggle when the client starts.
    pub flag_default: Option<bool>,
    /// Milliseconds between two console polls.
    pub poll_interval_ms: Option<u64>,
    /// Give up on a request after this many milliseconds.
    /// Unset means no limit.
    pub request_timeout_ms: Option<u64>,
    /// The client version that last wrote this file.
    pub version: Option<String>,
}

impl SlotsConfig {
    /// Default location of the config file,
    /// `None` if the platform has no config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        SLOTS_DIR.as_ref().map(|n| n.join("config.json"))
    }

    /// Load the configuration from `path`.
    ///
    /// # Errors
    /// - if the directory can't be created or the file can't be read/written
    ///
    /// This function is designed to *not* fail fast,
    /// resetting the config if it's nonexistent or corrupted
    /// (with an error log message).
    pub fn load_s(path: &Path) -> Result<Self, JsonFileError> {
        if !path.exists() {
            return Self::create(path);
        }

        let config = std::fs::read_to_string(path).path(path)?;
        match serde_json::from_str(&config) {
            Ok(config) => Ok(config),
            Err(error) => {
                err!("Invalid config at {path:?}, resetting it (old one kept as .bak)\nError: {error}");
                _ = std::fs::copy(path, path.with_extension("json.bak"));
                Self::create(path)
            }
        }
    }

    pub async fn save(&self, path: &Path) -> Result<(), JsonFileError> {
        let mut config = self.clone();
        config.version = Some(VERSION_NAME.to_owned());
        let text = serde_json::to_string_pretty(&config).json_to()?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.path(parent)?;
        }
        tokio::fs::write(path, text.as_bytes()).await.path(path)?;
        Ok(())
    }

    fn create(path: &Path) -> Result<Self, JsonFileError> {
        let config = SlotsConfig {
            version: Some(VERSION_NAME.to_owned()),
            ..Default::default()
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).path(parent)?;
        }
        let text = serde_json::to_string_pretty(&config).json_to()?;
        std::fs::write(path, text.as_bytes()).path(path)?;
        Ok(config)
    }

    pub fn c_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn c_flag_param(&self) -> FlagParam {
        self.flag_param.unwrap_or_default()
    }

    pub fn c_flag_default(&self) -> bool {
        self.flag_default.unwrap_or(false)
    }

    pub fn c_poll_interval(&self) -> Duration {
        self.poll_interval_ms
            .filter(|n| *n > 0)
            .map_or(DEFAULT_POLL_INTERVAL, Duration::from_millis)
    }

    pub fn c_request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms
            .filter(|n| *n > 0)
            .map(Duration::from_millis)
    }
}
