//! Upload lifecycle hooks.
//!
//! All hooks are optional; the builder pattern registers only what the
//! caller needs. Batch and per-file hooks receive *shared* futures so a
//! caller can observe an upload that has not settled yet without blocking
//! the batch — cloning and awaiting the future elsewhere is cheap.

use crate::error::StrataLinkError;
use crate::models::{FileDescriptor, ProgressUpdate, UploadFileResponse};
use futures::future::{BoxFuture, Shared};
use std::fmt;
use std::sync::Arc;

/// Shared handle to one file's in-flight upload result.
pub type FileUploadFuture =
    Shared<BoxFuture<'static, Result<UploadFileResponse, StrataLinkError>>>;

/// Shared handle to a whole batch's in-flight result.
pub type BatchUploadFuture =
    Shared<BoxFuture<'static, Result<Vec<UploadFileResponse>, StrataLinkError>>>;

/// Callback for batch progress notifications.
pub type OnProgressChange = Arc<dyn Fn(ProgressUpdate) + Send + Sync>;

/// Callback invoked once per batch, before the batch settles.
pub type OnBatchUpload = Arc<dyn Fn(BatchUploadFuture, &[FileDescriptor]) + Send + Sync>;

/// Callback invoked once per file, before that file's upload settles.
pub type OnFileUpload = Arc<dyn Fn(FileUploadFuture, &FileDescriptor) + Send + Sync>;

/// Callback for single-file progress: raw percent plus descriptor.
pub type OnFileProgress = Arc<dyn Fn(f64, &FileDescriptor) + Send + Sync>;

/// Hook registry for [`BatchUploader`](crate::upload::BatchUploader).
///
/// # Example
/// ```rust
/// use strata_link::upload::UploadCallbacks;
///
/// let callbacks = UploadCallbacks::new()
///     .on_progress_change(|update| println!("progress: {:?}", update))
///     .on_batch_upload(|_upload, files| println!("batch of {} started", files.len()));
/// ```
#[derive(Clone, Default)]
pub struct UploadCallbacks {
    pub(crate) on_progress_change: Option<OnProgressChange>,
    pub(crate) on_batch_upload: Option<OnBatchUpload>,
    pub(crate) on_file_upload: Option<OnFileUpload>,
}

impl UploadCallbacks {
    /// An empty registry (no callbacks).
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the progress subscriber. Without one, no progress is
    /// tracked at all.
    pub fn on_progress_change(mut self, f: impl Fn(ProgressUpdate) + Send + Sync + 'static) -> Self {
        self.on_progress_change = Some(Arc::new(f));
        self
    }

    /// Register the whole-batch hook: called once, synchronously, with the
    /// not-yet-settled batch future and the file descriptors.
    pub fn on_batch_upload(
        mut self,
        f: impl Fn(BatchUploadFuture, &[FileDescriptor]) + Send + Sync + 'static,
    ) -> Self {
        self.on_batch_upload = Some(Arc::new(f));
        self
    }

    /// Register the per-file hook: called once per file with that file's
    /// not-yet-settled future and descriptor.
    pub fn on_file_upload(
        mut self,
        f: impl Fn(FileUploadFuture, &FileDescriptor) + Send + Sync + 'static,
    ) -> Self {
        self.on_file_upload = Some(Arc::new(f));
        self
    }

    pub(crate) fn emit_batch_upload(&self, upload: BatchUploadFuture, files: &[FileDescriptor]) {
        if let Some(cb) = &self.on_batch_upload {
            cb(upload, files);
        }
    }

    pub(crate) fn emit_file_upload(&self, upload: FileUploadFuture, file: &FileDescriptor) {
        if let Some(cb) = &self.on_file_upload {
            cb(upload, file);
        }
    }
}

impl fmt::Debug for UploadCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadCallbacks")
            .field("on_progress_change", &self.on_progress_change.is_some())
            .field("on_batch_upload", &self.on_batch_upload.is_some())
            .field("on_file_upload", &self.on_file_upload.is_some())
            .finish()
    }
}

/// Hook registry for [`FileUploader`](crate::upload::FileUploader).
#[derive(Clone, Default)]
pub struct SingleUploadCallbacks {
    pub(crate) on_progress_change: Option<OnFileProgress>,
    pub(crate) on_upload: Option<OnFileUpload>,
}

impl SingleUploadCallbacks {
    /// An empty registry (no callbacks).
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the progress subscriber: raw percent, no quantization.
    pub fn on_progress_change(
        mut self,
        f: impl Fn(f64, &FileDescriptor) + Send + Sync + 'static,
    ) -> Self {
        self.on_progress_change = Some(Arc::new(f));
        self
    }

    /// Register the upload hook: called once, before the upload settles.
    pub fn on_upload(
        mut self,
        f: impl Fn(FileUploadFuture, &FileDescriptor) + Send + Sync + 'static,
    ) -> Self {
        self.on_upload = Some(Arc::new(f));
        self
    }

    pub(crate) fn emit_upload(&self, upload: FileUploadFuture, file: &FileDescriptor) {
        if let Some(cb) = &self.on_upload {
            cb(upload, file);
        }
    }
}

impl fmt::Debug for SingleUploadCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleUploadCallbacks")
            .field("on_progress_change", &self.on_progress_change.is_some())
            .field("on_upload", &self.on_upload.is_some())
            .finish()
    }
}
