//! Messenger subprocess client.
//!
//! Delivers rendered messages through an external messenger binary
//! (e.g. `klassenbote-messenger-whatsapp`) that speaks the JSON protocol
//! over stdin/stdout. The binary owns the session lifecycle; klassenbote
//! only hands it a target and a text. Failures surface to the caller and
//! are never retried here: the snapshot is already persisted, so a retry
//! re-renders and resends without recomputing.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

use crate::error::{BoteError, BoteResult};
use crate::protocol::{Command, Request, Response, SendParams, SendReceipt};

/// Sending may involve a slow session restore on the messenger side.
const SEND_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Messenger(String);

impl Messenger {
    pub fn from_name(name: &str) -> Self {
        Messenger(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    fn binary_path(&self) -> BoteResult<std::path::PathBuf> {
        let binary_name = format!("klassenbote-messenger-{}", self.0);
        which::which(&binary_name)
            .map_err(|_| BoteError::MessengerNotInstalled(binary_name))
    }

    /// Deliver one message to the target chat.
    pub async fn send(&self, target: &str, text: &str) -> BoteResult<SendReceipt> {
        let params = SendParams {
            target: target.to_string(),
            text: text.to_string(),
        };
        timeout(SEND_TIMEOUT, self.call_raw(Command::Send, params))
            .await
            .map_err(|_| BoteError::MessengerTimeout(SEND_TIMEOUT.as_secs()))?
    }

    /// Send a command with params and deserialize the response.
    async fn call_raw<P: Serialize, R: serde::de::DeserializeOwned>(
        &self,
        command: Command,
        params: P,
    ) -> BoteResult<R> {
        let params = serde_json::to_value(params)
            .map_err(|e| BoteError::Serialization(e.to_string()))?;
        let request = Request { command, params };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| BoteError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;

        let mut child = TokioCommand::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .spawn()
            .map_err(|e| {
                BoteError::Messenger(format!("Failed to spawn {}: {e}", binary_path.display()))
            })?;

        // Write request to stdin (unwrap safe: we piped stdin above)
        let mut stdin = child.stdin.take().unwrap();
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(BoteError::Messenger(format!(
                "Messenger exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.trim().is_empty() {
            return Err(BoteError::Messenger(
                "Messenger returned no response".into(),
            ));
        }

        let response: Response<R> = serde_json::from_str(&response_str)
            .map_err(|e| BoteError::Messenger(format!("Failed to parse response: {e}")))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(BoteError::Send(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_messenger_is_reported() {
        let messenger = Messenger::from_name("definitely-not-installed");
        let err = messenger.binary_path().unwrap_err();
        assert!(matches!(err, BoteError::MessengerNotInstalled(name)
            if name == "klassenbote-messenger-definitely-not-installed"));
    }
}
