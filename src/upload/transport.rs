//! Raw HTTP upload primitive with byte-level progress reporting.
//!
//! One POST per file to a pre-authorized URL, body streamed in fixed-size
//! chunks so progress can be observed, response parsed as JSON. No retry at
//! this layer; any transport failure surfaces to the caller.

use crate::error::{Result, StrataLinkError};
use crate::models::{FileDescriptor, StorageResponse, UploadFile, UploadFileResponse};
use bytes::Bytes;
use futures::future::try_join_all;
use futures::stream;
use log::{debug, warn};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Byte-level progress callback: receives the file's descriptor and the
/// percent transferred so far, `loaded / total * 100` as a raw float.
/// Quantization happens in the batch aggregator, never here.
pub type UploadProgressCallback = Arc<dyn Fn(&FileDescriptor, f64) + Send + Sync>;

/// Body chunk size; one progress event fires per chunk handed to the
/// transport.
const BODY_CHUNK_SIZE: usize = 64 * 1024;

/// Map declared file types to standard MIME strings.
///
/// Two bare tags are aliased; everything else passes through unchanged.
pub(crate) fn normalize_mime(declared: &str) -> &str {
    match declared {
        "blob" => "application/octet-stream",
        "pdf" => "application/pdf",
        other => other,
    }
}

/// Percent transferred. An empty body counts as fully transferred.
pub(crate) fn transfer_percent(loaded: u64, total: u64) -> f64 {
    if total == 0 {
        100.0
    } else {
        loaded as f64 / total as f64 * 100.0
    }
}

fn chunk_bytes(body: &Bytes) -> Vec<Bytes> {
    let mut chunks = Vec::with_capacity(body.len().div_ceil(BODY_CHUNK_SIZE));
    let mut offset = 0;
    while offset < body.len() {
        let end = usize::min(offset + BODY_CHUNK_SIZE, body.len());
        chunks.push(body.slice(offset..end));
        offset = end;
    }
    chunks
}

/// Options for [`fetch_with_progress`]. The default is a bare GET, so the
/// helper stays reusable beyond uploads; [`upload_file`] always sets POST.
pub(crate) struct RequestOptions {
    pub method: Method,
    pub content_type: Option<String>,
    pub body: Option<Bytes>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            content_type: None,
            body: None,
        }
    }
}

/// Send one HTTP request, streaming the body chunk-by-chunk through the
/// progress callback, and parse the JSON response.
///
/// `on_progress` receives `(bytes_sent, bytes_total)` per chunk. Non-success
/// statuses become [`StrataLinkError::ServerError`] with the body text as
/// message.
pub(crate) async fn fetch_with_progress<T, F>(
    client: &reqwest::Client,
    url: &str,
    opts: RequestOptions,
    on_progress: Option<F>,
) -> Result<T>
where
    T: DeserializeOwned,
    F: Fn(u64, u64) + Send + Sync + 'static,
{
    let mut request = client.request(opts.method, url);
    if let Some(content_type) = &opts.content_type {
        request = request.header(reqwest::header::CONTENT_TYPE, content_type);
    }
    if let Some(body) = opts.body {
        let total = body.len() as u64;
        match on_progress {
            Some(on_progress) => {
                let mut sent = 0u64;
                let chunks = stream::iter(chunk_bytes(&body).into_iter().map(move |chunk| {
                    sent += chunk.len() as u64;
                    on_progress(sent, total);
                    Ok::<Bytes, std::io::Error>(chunk)
                }));
                request = request.body(reqwest::Body::wrap_stream(chunks));
            },
            None => {
                request = request.body(body);
            },
        }
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        warn!(
            "[UPLOAD_HTTP] Server error: status={} message=\"{}\"",
            status, message
        );
        return Err(StrataLinkError::ServerError {
            status_code: status.as_u16(),
            message,
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Upload one file to `url` via POST.
///
/// The `Content-Type` header is the file's declared type after
/// [`normalize_mime`] aliasing. Progress is forwarded as a raw percent.
pub async fn upload_file(
    client: &reqwest::Client,
    url: &str,
    file: UploadFile,
    on_progress: Option<UploadProgressCallback>,
) -> Result<UploadFileResponse> {
    let (descriptor, contents) = file.into_parts();
    debug!(
        "[UPLOAD] Starting: name=\"{}\" type={} size={}",
        descriptor.name, descriptor.content_type, descriptor.size
    );

    let progress = on_progress.map(|on_progress| {
        let descriptor = descriptor.clone();
        move |sent: u64, total: u64| on_progress(&descriptor, transfer_percent(sent, total))
    });
    let opts = RequestOptions {
        method: Method::POST,
        content_type: Some(normalize_mime(&descriptor.content_type).to_string()),
        body: Some(contents),
    };
    let response: StorageResponse = fetch_with_progress(client, url, opts, progress).await?;

    debug!(
        "[UPLOAD] Completed: name=\"{}\" storage_id={}",
        descriptor.name, response.storage_id
    );
    Ok(UploadFileResponse {
        descriptor,
        response,
    })
}

/// Upload several files concurrently against an already-resolved URL.
///
/// Plain fan-out: results come back in input order, the first failure wins,
/// no aggregation or hooks. The batch uploader builds on top of this flow
/// with spawned tasks; this free function is the minimal variant.
pub async fn upload_files(
    client: &reqwest::Client,
    url: &str,
    files: Vec<UploadFile>,
    on_progress: Option<UploadProgressCallback>,
) -> Result<Vec<UploadFileResponse>> {
    try_join_all(
        files
            .into_iter()
            .map(|file| upload_file(client, url, file, on_progress.clone())),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_aliases() {
        assert_eq!(normalize_mime("blob"), "application/octet-stream");
        assert_eq!(normalize_mime("pdf"), "application/pdf");
        assert_eq!(normalize_mime("image/png"), "image/png");
        assert_eq!(normalize_mime("application/pdf"), "application/pdf");
    }

    #[test]
    fn test_transfer_percent_is_unquantized() {
        assert_eq!(transfer_percent(50, 200), 25.0);
        assert_eq!(transfer_percent(1, 3), 100.0 / 3.0);
        assert_eq!(transfer_percent(200, 200), 100.0);
    }

    #[test]
    fn test_transfer_percent_of_empty_body() {
        assert_eq!(transfer_percent(0, 0), 100.0);
    }

    #[test]
    fn test_chunking_covers_body_exactly() {
        let body = Bytes::from(vec![7u8; BODY_CHUNK_SIZE * 2 + 100]);
        let chunks = chunk_bytes(&body);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), BODY_CHUNK_SIZE);
        assert_eq!(chunks[2].len(), 100);
        assert_eq!(
            chunks.iter().map(Bytes::len).sum::<usize>(),
            body.len()
        );
    }

    #[test]
    fn test_empty_body_has_no_chunks() {
        assert!(chunk_bytes(&Bytes::new()).is_empty());
    }

    #[test]
    fn test_default_request_is_a_bare_get() {
        let opts = RequestOptions::default();
        assert_eq!(opts.method, Method::GET);
        assert!(opts.content_type.is_none());
        assert!(opts.body.is_none());
    }
}
