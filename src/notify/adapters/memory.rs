//! In-memory notifier that records every dispatched message.

use crate::notify::ports::{Notifier, NotifierError, NotifierResult};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

/// A message captured by the recording notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMessage {
    /// Message body as dispatched.
    pub body: String,
    /// Destination addresses.
    pub recipients: BTreeSet<String>,
}

/// Thread-safe notifier that stores messages instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<RwLock<Vec<RecordedMessage>>>,
}

impl RecordingNotifier {
    /// Creates an empty recording notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every message recorded so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> Vec<RecordedMessage> {
        self.sent
            .read()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, body: &str, recipients: &BTreeSet<String>) -> NotifierResult<()> {
        let mut sent = self
            .sent
            .write()
            .map_err(|err| NotifierError::transport(std::io::Error::other(err.to_string())))?;
        sent.push(RecordedMessage {
            body: body.to_owned(),
            recipients: recipients.clone(),
        });
        Ok(())
    }
}
