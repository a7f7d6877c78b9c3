//! Single-file upload flow.

use crate::error::Result;
use crate::models::{UploadFile, UploadFileResponse};
use crate::signal::{Signal, SignalSetter};
use crate::upload::callbacks::{FileUploadFuture, SingleUploadCallbacks};
use crate::upload::flatten_join;
use crate::upload::target::UploadTarget;
use crate::upload::transport::{self, UploadProgressCallback};
use futures::FutureExt;
use log::debug;
use std::sync::Arc;

/// Uploads one file at a time to a target URL.
///
/// The degenerate case of the batch flow: no aggregation — the progress
/// subscriber receives the raw percent for the file directly.
///
/// # Examples
///
/// ```rust,no_run
/// use strata_link::upload::{FileUploader, SingleUploadCallbacks};
/// use strata_link::UploadFile;
///
/// # async fn example() -> strata_link::Result<()> {
/// let uploader = FileUploader::builder("https://uploads.example.com/store")
///     .callbacks(SingleUploadCallbacks::new().on_progress_change(|percent, file| {
///         println!("{}: {:.1}%", file.name, percent);
///     }))
///     .build()?;
///
/// let result = uploader
///     .upload(UploadFile::new("report.pdf", "pdf", b"%PDF-1.7".as_slice()))
///     .await?;
/// println!("stored as {}", result.response.storage_id);
/// # Ok(())
/// # }
/// ```
pub struct FileUploader {
    target: UploadTarget,
    http_client: reqwest::Client,
    callbacks: SingleUploadCallbacks,
    uploading_tx: SignalSetter<bool>,
    uploading: Signal<bool>,
}

impl FileUploader {
    /// Create a builder targeting a URL or URL provider.
    pub fn builder(target: impl Into<UploadTarget>) -> FileUploaderBuilder {
        FileUploaderBuilder::new(target.into())
    }

    /// `true` while an upload started by this uploader is in flight.
    pub fn is_uploading(&self) -> bool {
        self.uploading.get()
    }

    /// The in-progress flag as an observable signal.
    pub fn uploading(&self) -> Signal<bool> {
        self.uploading.clone()
    }

    /// Upload one file. The in-progress flag is cleared when the upload
    /// settles, on success and failure alike.
    pub async fn upload(&self, file: UploadFile) -> Result<UploadFileResponse> {
        self.uploading_tx.set(true);
        let _reset = UploadingReset {
            uploading: self.uploading_tx.clone(),
        };

        let descriptor = file.descriptor().clone();
        debug!("[UPLOAD_SINGLE] Starting: name=\"{}\"", descriptor.name);

        let on_progress: Option<UploadProgressCallback> =
            self.callbacks.on_progress_change.clone().map(|cb| {
                let forward: UploadProgressCallback =
                    Arc::new(move |file, percent| cb(percent, file));
                forward
            });
        let target = self.target.clone();
        let http_client = self.http_client.clone();

        let task = tokio::spawn(async move {
            let url = target.resolve().await?;
            transport::upload_file(&http_client, &url, file, on_progress).await
        });

        let upload: FileUploadFuture = task.map(flatten_join).boxed().shared();
        self.callbacks.emit_upload(upload.clone(), &descriptor);
        upload.await
    }
}

impl std::fmt::Debug for FileUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUploader")
            .field("target", &self.target)
            .field("callbacks", &self.callbacks)
            .finish()
    }
}

struct UploadingReset {
    uploading: SignalSetter<bool>,
}

impl Drop for UploadingReset {
    fn drop(&mut self) {
        self.uploading.set(false);
    }
}

/// Builder for [`FileUploader`].
pub struct FileUploaderBuilder {
    target: UploadTarget,
    http_client: Option<reqwest::Client>,
    callbacks: SingleUploadCallbacks,
}

impl FileUploaderBuilder {
    fn new(target: UploadTarget) -> Self {
        Self {
            target,
            http_client: None,
            callbacks: SingleUploadCallbacks::new(),
        }
    }

    /// Use a shared HTTP client instead of building a fresh one.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Register lifecycle hooks.
    pub fn callbacks(mut self, callbacks: SingleUploadCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Build the uploader.
    pub fn build(self) -> Result<FileUploader> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .build()
                .map_err(|e| crate::error::StrataLinkError::ConfigurationError(e.to_string()))?,
        };
        let (uploading_tx, uploading) = Signal::channel(false);
        Ok(FileUploader {
            target: self.target,
            http_client,
            callbacks: self.callbacks,
            uploading_tx,
            uploading,
        })
    }
}
