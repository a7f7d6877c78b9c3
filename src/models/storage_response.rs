use serde::{Deserialize, Serialize};

/// Response body returned by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageResponse {
    /// Opaque identifier assigned by the storage backend.
    #[serde(rename = "storageId")]
    pub storage_id: String,
}
