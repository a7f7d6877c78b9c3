//! Client bindings for Strata backends.
//!
//! Two independent pieces:
//!
//! - A **reactive binding layer**: [`LinkContext`] wraps an injected
//!   [`StrataBackend`] handle and produces live query signals
//!   ([`QuerySignal`]) and callable [`Mutation`]/[`Action`] bindings. The
//!   layer only translates shapes — subscriptions, caching, retries, and
//!   optimistic-update reconciliation stay inside the backend client.
//! - **Upload helpers**: [`upload::FileUploader`] and
//!   [`upload::BatchUploader`] POST file content to a pre-authorized URL
//!   with byte-level progress reporting; batches aggregate per-file progress
//!   into quantized average notifications.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use strata_link::{FunctionReference, LinkContext, StrataBackend};
//!
//! # fn connect() -> Arc<dyn StrataBackend> { unimplemented!() }
//! # async fn example() -> strata_link::Result<()> {
//! let context = LinkContext::new(connect());
//!
//! // Live query: the signal tracks every result change and unsubscribes
//! // when its last clone is dropped.
//! let mut messages = context.create_query(FunctionReference::query("messages:list"), ())?;
//! while let Some(result) = messages.next().await {
//!     println!("messages: {:?}", result);
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod bindings;
pub mod error;
pub mod models;
pub mod signal;
pub mod upload;

pub use backend::{
    OptimisticLocalStore, OptimisticUpdate, StrataBackend, SubscriptionHandle, UpdateCallback,
};
pub use bindings::{Action, LinkContext, Mutation, QuerySignal};
pub use error::{Result, StrataLinkError};
pub use models::{
    FileDescriptor, FunctionArgs, FunctionKind, FunctionReference, ProgressTracking,
    ProgressUpdate, StorageResponse, UploadFile, UploadFileResponse,
};
pub use signal::{Signal, SignalSetter};
