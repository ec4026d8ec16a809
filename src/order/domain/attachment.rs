//! Attachment entity referencing an externally stored file.

use super::AttachmentId;
use serde::{Deserialize, Serialize};

/// A reference to a stored file belonging to one order.
///
/// The bytes live behind the file-store port; the order only records the
/// display name and the opaque stored location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    id: AttachmentId,
    file_name: String,
    location: String,
}

impl Attachment {
    /// Creates a new attachment reference.
    #[must_use]
    pub fn new(file_name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: AttachmentId::new(),
            file_name: file_name.into(),
            location: location.into(),
        }
    }

    /// Reconstructs an attachment from persisted storage.
    #[must_use]
    pub fn from_persisted(id: AttachmentId, file_name: String, location: String) -> Self {
        Self {
            id,
            file_name,
            location,
        }
    }

    /// Returns the attachment identifier.
    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    /// Returns the display file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the opaque stored location.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }
}
