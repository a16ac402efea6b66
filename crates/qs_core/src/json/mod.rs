//! Response bodies of the game server.
//!
//! Only the fields the client reads are declared,
//! anything else the server sends is ignored.

use serde::{Deserialize, Serialize};

/// `GET /api/spin`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SpinResponse {
    /// The reel symbols, left to right.
    pub result: Vec<String>,
    /// Echo of the entanglement mode. Only sent by
    /// servers using the `entangled` parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entangled: Option<bool>,
}

/// `GET /api/attack`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AttackResponse {
    pub status: AttackStatus,
    /// Present on success. Failed attacks may carry a normal
    /// spin here too, but the client doesn't show it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<String>>,
    pub message: String,
}

/// `GET /api/console`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ConsoleResponse {
    pub logs: Vec<String>,
}

/// Outcome of an attack.
///
/// Only the exact string `"success"` counts as success.
/// Servers in the wild send `"fail"`, `"failure"`, ...
/// so anything else is kept verbatim as a failure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum AttackStatus {
    Success,
    Failure(String),
}

impl AttackStatus {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, AttackStatus::Success)
    }
}

impl From<String> for AttackStatus {
    fn from(value: String) -> Self {
        if value == "success" {
            AttackStatus::Success
        } else {
            AttackStatus::Failure(value)
        }
    }
}

impl From<AttackStatus> for String {
    fn from(value: AttackStatus) -> Self {
        match value {
            AttackStatus::Success => "success".to_owned(),
            AttackStatus::Failure(n) => n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_ignores_unknown_fields() {
        let spin: SpinResponse =
            serde_json::from_str(r#"{"result":["🍒","🍋","⭐"],"entangled":true,"extra":1}"#)
                .unwrap();
        assert_eq!(spin.result, vec!["🍒", "🍋", "⭐"]);
        assert_eq!(spin.entangled, Some(true));
    }

    #[test]
    fn attack_status_variants() {
        let ok: AttackResponse = serde_json::from_str(
            r#"{"status":"success","result":["7","7","7"],"message":"Jackpot!"}"#,
        )
        .unwrap();
        assert!(ok.status.is_success());
        assert_eq!(ok.result.as_deref().map(<[String]>::len), Some(3));

        let fail: AttackResponse =
            serde_json::from_str(r#"{"status":"fail","message":"Attack failed!"}"#).unwrap();
        assert_eq!(fail.status, AttackStatus::Failure("fail".to_owned()));
        assert_eq!(fail.result, None);

        // Case matters.
        let shouting: AttackResponse =
            serde_json::from_str(r#"{"status":"SUCCESS","message":""}"#).unwrap();
        assert!(!shouting.status.is_success());
    }

    #[test]
    fn attack_needs_message() {
        assert!(serde_json::from_str::<AttackResponse>(r#"{"status":"success"}"#).is_err());
    }

    #[test]
    fn console_logs() {
        let console: ConsoleResponse = serde_json::from_str(r#"{"logs":["a","b"]}"#).unwrap();
        assert_eq!(console.logs, vec!["a", "b"]);
        assert!(serde_json::from_str::<ConsoleResponse>("{}").is_err());
    }
}
