use crate::models::{FileDescriptor, StorageResponse};
use serde::{Deserialize, Serialize};

/// The result of one completed file upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFileResponse {
    /// Descriptor of the uploaded file.
    #[serde(flatten)]
    pub descriptor: FileDescriptor,
    /// Storage identifier assigned by the server.
    pub response: StorageResponse,
}
