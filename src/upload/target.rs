//! Upload destination resolution.

use crate::error::Result;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Where uploads go: a fixed URL, or an async provider called once per
/// batch — the usual shape when each batch needs a freshly minted
/// pre-authorized URL.
///
/// ```rust
/// use strata_link::upload::UploadTarget;
///
/// let fixed: UploadTarget = "https://uploads.example.com/store".into();
/// let minted = UploadTarget::provider(|| async {
///     Ok("https://uploads.example.com/store?token=fresh".to_string())
/// });
/// ```
#[derive(Clone)]
pub enum UploadTarget {
    /// A fixed upload URL.
    Url(String),
    /// Provider invoked once per batch to produce the URL.
    Provider(Arc<dyn Fn() -> BoxFuture<'static, Result<String>> + Send + Sync>),
}

impl UploadTarget {
    /// Target a fixed URL.
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    /// Target a URL produced by an async provider, invoked once per batch.
    pub fn provider<F, Fut>(provider: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String>> + Send + 'static,
    {
        Self::Provider(Arc::new(move || Box::pin(provider())))
    }

    /// Resolve to a concrete URL, calling the provider if present.
    pub(crate) async fn resolve(&self) -> Result<String> {
        match self {
            Self::Url(url) => Ok(url.clone()),
            Self::Provider(provider) => provider().await,
        }
    }
}

impl From<&str> for UploadTarget {
    fn from(url: &str) -> Self {
        Self::Url(url.to_string())
    }
}

impl From<String> for UploadTarget {
    fn from(url: String) -> Self {
        Self::Url(url)
    }
}

impl fmt::Debug for UploadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "UploadTarget::Url({:?})", url),
            Self::Provider(_) => write!(f, "UploadTarget::Provider(<fn>)"),
        }
    }
}
