use serde::{Deserialize, Serialize};

/// Metadata for one file in an upload.
///
/// Captured when the upload starts and immutable for its duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// File name, also the key used for per-file progress tracking.
    pub name: String,
    /// Declared MIME type. Normalized at the transport layer; see
    /// [`upload`](crate::upload) for the `blob`/`pdf` aliases.
    pub content_type: String,
    /// Content length in bytes.
    pub size: u64,
}
