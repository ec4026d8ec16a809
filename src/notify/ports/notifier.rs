//! Notifier port for best-effort outbound delivery.

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notifier operations.
pub type NotifierResult<T> = Result<T, NotifierError>;

/// Outbound delivery contract.
///
/// Delivery is asynchronous and best-effort: callers dispatch after the
/// triggering transition has committed, bound the call with a deadline, and
/// swallow failures. A notifier must never be handed a transition that can
/// still roll back.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends a message body to the given recipient addresses.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::Transport`] when delivery fails; the caller
    /// logs and swallows it.
    async fn send(&self, body: &str, recipients: &BTreeSet<String>) -> NotifierResult<()>;
}

/// Errors returned by notifier implementations.
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    /// The underlying transport failed.
    #[error("notification transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotifierError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
