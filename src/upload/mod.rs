//! File upload helpers.
//!
//! Three layers, lowest first:
//!
//! - [`upload_file`] / [`upload_files`]: raw POST primitives with byte-level
//!   progress reporting.
//! - [`FileUploader`]: single-file flow with a reactive in-progress flag and
//!   lifecycle hooks.
//! - [`BatchUploader`]: concurrent multi-file flow with aggregated, quantized
//!   progress notifications.

pub mod batch;
pub mod callbacks;
mod progress;
pub mod single;
pub mod target;
pub mod transport;

pub use batch::{BatchUploader, BatchUploaderBuilder};
pub use callbacks::{
    BatchUploadFuture, FileUploadFuture, OnBatchUpload, OnFileProgress, OnFileUpload,
    OnProgressChange, SingleUploadCallbacks, UploadCallbacks,
};
pub use single::{FileUploader, FileUploaderBuilder};
pub use target::UploadTarget;
pub use transport::{upload_file, upload_files, UploadProgressCallback};

use crate::error::{Result, StrataLinkError};

/// Collapse a spawned upload task's join result into the upload result.
pub(crate) fn flatten_join<T>(
    result: std::result::Result<Result<T>, tokio::task::JoinError>,
) -> Result<T> {
    match result {
        Ok(inner) => inner,
        Err(err) => Err(StrataLinkError::InternalError(format!(
            "upload task failed: {err}"
        ))),
    }
}
