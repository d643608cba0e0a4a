//! Messenger protocol types.
//!
//! Defines the JSON protocol used for communication between klassenbote
//! and messenger binaries over stdin/stdout. The protocol is
//! language-agnostic: any executable that speaks it can deliver messages.
//! Session lifecycle (login, QR pairing, reconnect) is entirely the
//! messenger's business.

use serde::{Deserialize, Serialize};

/// Commands that messengers must implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Send,
}

/// Request sent from klassenbote to the messenger.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Parameters of the `send` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendParams {
    /// Chat identifier, e.g. a group id like "4912...-1234@g.us".
    pub target: String,
    pub text: String,
}

/// Delivery confirmation returned by the messenger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendReceipt {
    #[serde(default)]
    pub message_id: Option<String>,
}

/// Response sent from the messenger to klassenbote.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data }).unwrap()
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        serde_json::to_string(&Response::<()>::Error {
            error: msg.to_string(),
        })
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let request = Request {
            command: Command::Send,
            params: serde_json::to_value(SendParams {
                target: "123@g.us".to_string(),
                text: "Guten Morgen".to_string(),
            })
            .unwrap(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"command\":\"send\""));
        assert!(json.contains("\"target\":\"123@g.us\""));
    }

    #[test]
    fn test_response_round_trip() {
        let ok = Response::success(SendReceipt {
            message_id: Some("abc".to_string()),
        });
        let parsed: Response<SendReceipt> = serde_json::from_str(&ok).unwrap();
        let Response::Success { data } = parsed else {
            panic!("expected success");
        };
        assert_eq!(data.message_id.as_deref(), Some("abc"));

        let err = Response::error("session expired");
        let parsed: Response<SendReceipt> = serde_json::from_str(&err).unwrap();
        assert!(matches!(parsed, Response::Error { .. }));
    }
}
