//! Concurrent multi-file upload with aggregated progress.

use crate::error::Result;
use crate::models::{FileDescriptor, ProgressTracking, UploadFile, UploadFileResponse};
use crate::signal::{Signal, SignalSetter};
use crate::upload::callbacks::{BatchUploadFuture, FileUploadFuture, UploadCallbacks};
use crate::upload::flatten_join;
use crate::upload::progress::ProgressAggregator;
use crate::upload::target::UploadTarget;
use crate::upload::transport::{self, UploadProgressCallback};
use futures::future::try_join_all;
use futures::FutureExt;
use log::debug;
use std::sync::{Arc, Mutex};

/// Uploads batches of files concurrently to a target URL.
///
/// Every file starts immediately; completion order is unconstrained but the
/// resolved result preserves input order. The first failing file rejects the
/// batch; files still in flight are not cancelled and run to completion
/// unobserved.
///
/// # Examples
///
/// ```rust,no_run
/// use strata_link::upload::{BatchUploader, UploadCallbacks};
/// use strata_link::{ProgressTracking, UploadFile};
///
/// # async fn example() -> strata_link::Result<()> {
/// let uploader = BatchUploader::builder("https://uploads.example.com/store")
///     .progress_tracking(ProgressTracking::Average)
///     .callbacks(UploadCallbacks::new().on_progress_change(|update| {
///         println!("batch progress: {:?}", update.average());
///     }))
///     .build()?;
///
/// let results = uploader
///     .upload(vec![
///         UploadFile::new("a.png", "image/png", vec![0u8; 1024]),
///         UploadFile::new("b.bin", "blob", vec![0u8; 2048]),
///     ])
///     .await?;
/// assert_eq!(results.len(), 2);
/// # Ok(())
/// # }
/// ```
pub struct BatchUploader {
    target: UploadTarget,
    http_client: reqwest::Client,
    tracking: ProgressTracking,
    callbacks: UploadCallbacks,
    uploading_tx: SignalSetter<bool>,
    uploading: Signal<bool>,
}

impl BatchUploader {
    /// Create a builder targeting a URL or URL provider.
    pub fn builder(target: impl Into<UploadTarget>) -> BatchUploaderBuilder {
        BatchUploaderBuilder::new(target.into())
    }

    /// `true` while a batch started by this uploader is in flight.
    pub fn is_uploading(&self) -> bool {
        self.uploading.get()
    }

    /// The in-progress flag as an observable signal.
    pub fn uploading(&self) -> Signal<bool> {
        self.uploading.clone()
    }

    /// Upload every file concurrently and resolve with one result per file,
    /// in input order.
    ///
    /// An empty batch is a legal no-op resolving to an empty vector. The
    /// in-progress flag and progress state are cleared when the batch
    /// settles, on success and failure alike.
    pub async fn upload(&self, files: Vec<UploadFile>) -> Result<Vec<UploadFileResponse>> {
        self.uploading_tx.set(true);
        let aggregator = Arc::new(Mutex::new(ProgressAggregator::new(self.tracking)));
        let _reset = BatchReset {
            aggregator: aggregator.clone(),
            uploading: self.uploading_tx.clone(),
        };

        let descriptors: Vec<FileDescriptor> =
            files.iter().map(|file| file.descriptor().clone()).collect();
        debug!("[UPLOAD_BATCH] Starting: files={}", files.len());

        let on_progress = self.progress_callback(aggregator);
        let target = self.target.clone();
        let http_client = self.http_client.clone();
        let callbacks = self.callbacks.clone();

        let task = tokio::spawn(async move {
            let url = target.resolve().await?;
            let mut uploads: Vec<FileUploadFuture> = Vec::with_capacity(files.len());
            for file in files {
                let descriptor = file.descriptor().clone();
                let http_client = http_client.clone();
                let url = url.clone();
                let on_progress = on_progress.clone();
                let task = tokio::spawn(async move {
                    transport::upload_file(&http_client, &url, file, on_progress).await
                });
                let upload: FileUploadFuture = task.map(flatten_join).boxed().shared();
                callbacks.emit_file_upload(upload.clone(), &descriptor);
                uploads.push(upload);
            }
            try_join_all(uploads).await
        });

        let batch: BatchUploadFuture = task.map(flatten_join).boxed().shared();
        self.callbacks.emit_batch_upload(batch.clone(), &descriptors);

        let result = batch.await;
        debug!(
            "[UPLOAD_BATCH] Settled: files={} ok={}",
            descriptors.len(),
            result.is_ok()
        );
        result
    }

    /// Build the per-event callback routing transport progress through the
    /// batch aggregator. `None` when no subscriber is registered: progress
    /// is then not tracked at all.
    fn progress_callback(
        &self,
        aggregator: Arc<Mutex<ProgressAggregator>>,
    ) -> Option<UploadProgressCallback> {
        let on_progress_change = self.callbacks.on_progress_change.clone()?;
        Some(Arc::new(move |file: &FileDescriptor, percent: f64| {
            let update = {
                let Ok(mut aggregator) = aggregator.lock() else {
                    return;
                };
                aggregator.record(&file.name, percent)
            };
            if let Some(update) = update {
                on_progress_change(update);
            }
        }))
    }
}

impl std::fmt::Debug for BatchUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchUploader")
            .field("target", &self.target)
            .field("tracking", &self.tracking)
            .field("callbacks", &self.callbacks)
            .finish()
    }
}

/// Clears per-batch progress state and the in-progress flag when the batch
/// settles, including when the caller's future is dropped mid-flight.
struct BatchReset {
    aggregator: Arc<Mutex<ProgressAggregator>>,
    uploading: SignalSetter<bool>,
}

impl Drop for BatchReset {
    fn drop(&mut self) {
        if let Ok(mut aggregator) = self.aggregator.lock() {
            aggregator.reset();
        }
        self.uploading.set(false);
    }
}

/// Builder for [`BatchUploader`].
pub struct BatchUploaderBuilder {
    target: UploadTarget,
    http_client: Option<reqwest::Client>,
    tracking: ProgressTracking,
    callbacks: UploadCallbacks,
}

impl BatchUploaderBuilder {
    fn new(target: UploadTarget) -> Self {
        Self {
            target,
            http_client: None,
            tracking: ProgressTracking::default(),
            callbacks: UploadCallbacks::new(),
        }
    }

    /// Use a shared HTTP client instead of building a fresh one.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Select the progress granularity delivered to the subscriber.
    pub fn progress_tracking(mut self, tracking: ProgressTracking) -> Self {
        self.tracking = tracking;
        self
    }

    /// Register lifecycle hooks.
    pub fn callbacks(mut self, callbacks: UploadCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Build the uploader.
    pub fn build(self) -> Result<BatchUploader> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .build()
                .map_err(|e| crate::error::StrataLinkError::ConfigurationError(e.to_string()))?,
        };
        let (uploading_tx, uploading) = Signal::channel(false);
        Ok(BatchUploader {
            target: self.target,
            http_client,
            tracking: self.tracking,
            callbacks: self.callbacks,
            uploading_tx,
            uploading,
        })
    }
}
