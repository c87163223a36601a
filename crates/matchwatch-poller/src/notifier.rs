//! Outbound notifications over Discord webhooks

use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Discord rejects message content above this many characters
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("webhook answered with status {status}")]
    Status { status: u16 },

    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Delivers one message to the channel named by `routing_key`.
/// Callers log failures and never retry.
pub trait Notifier: Send + Sync {
    fn send(
        &self,
        routing_key: &str,
        content: &str,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Posts `{"content": ...}` to the webhook URL used as routing key
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    limit: usize,
}

impl WebhookNotifier {
    pub fn new(timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            limit: DISCORD_MESSAGE_LIMIT,
        })
    }
}

impl Notifier for WebhookNotifier {
    async fn send(&self, routing_key: &str, content: &str) -> Result<(), NotifyError> {
        for chunk in split_message(content, self.limit) {
            let response = self
                .client
                .post(routing_key)
                .json(&serde_json::json!({ "content": chunk }))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(NotifyError::Status {
                    status: status.as_u16(),
                });
            }
            debug!(chars = chunk.chars().count(), "Webhook message posted");
        }
        Ok(())
    }
}

/// Split on line boundaries into chunks of at most `limit` characters.
/// A single line longer than `limit` is cut hard.
pub fn split_message(content: &str, limit: usize) -> Vec<String> {
    if limit == 0 || content.chars().count() <= limit {
        return vec![content.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in content.split('\n') {
        let line_len = line.chars().count();
        let joined_len = if current.is_empty() {
            line_len
        } else {
            current_len + 1 + line_len
        };

        if joined_len <= limit {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
            current_len = joined_len;
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len <= limit {
            current.push_str(line);
            current_len = line_len;
            continue;
        }

        let chars: Vec<char> = line.chars().collect();
        for piece in chars.chunks(limit) {
            if piece.len() == limit {
                chunks.push(piece.iter().collect());
            } else {
                current = piece.iter().collect();
                current_len = piece.len();
            }
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
