//! Backend client contract consumed by the binding layer.
//!
//! The binding layer never speaks a wire protocol itself; it delegates every
//! operation to an implementation of [`StrataBackend`] supplied by the host
//! application. Subscription lifetime is expressed through
//! [`SubscriptionHandle`], which unsubscribes on drop.

use crate::error::Result;
use crate::models::{FunctionArgs, FunctionReference};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Callback invoked with every new result of a subscribed query.
pub type UpdateCallback = Arc<dyn Fn(Value) + Send + Sync>;

/// Local cache view handed to an optimistic update.
///
/// Implemented by the backend client; reconciliation and rollback once the
/// authoritative result arrives are entirely its responsibility.
pub trait OptimisticLocalStore {
    /// Current locally-cached result for a query, if any.
    fn query_result(&self, query: &FunctionReference, args: &FunctionArgs) -> Option<Value>;

    /// Speculatively overwrite the locally-cached result for a query.
    /// `None` marks the query as unloaded.
    fn set_query(&mut self, query: &FunctionReference, args: &FunctionArgs, value: Option<Value>);
}

/// Caller-supplied function that speculatively updates local cached state
/// before a mutation's backend confirmation arrives.
pub type OptimisticUpdate =
    Arc<dyn Fn(&mut dyn OptimisticLocalStore, &FunctionArgs) + Send + Sync>;

/// The backend service connector the binding layer delegates to.
///
/// Implementations own the persistent connection, result caching,
/// authentication, and optimistic-update reconciliation. This crate only
/// translates between this contract and caller-facing shapes.
#[async_trait]
pub trait StrataBackend: Send + Sync {
    /// Register a live subscription for a query.
    ///
    /// `on_update` fires on every result change, starting with the first
    /// loaded result. Dropping the returned handle unsubscribes.
    fn subscribe(
        &self,
        query: &FunctionReference,
        args: FunctionArgs,
        on_update: UpdateCallback,
    ) -> Result<SubscriptionHandle>;

    /// Execute a mutation, with an optional optimistic update applied to the
    /// local store until the result is confirmed.
    async fn mutation(
        &self,
        mutation: &FunctionReference,
        args: FunctionArgs,
        update: Option<OptimisticUpdate>,
    ) -> Result<Value>;

    /// Execute an action.
    async fn action(&self, action: &FunctionReference, args: FunctionArgs) -> Result<Value>;

    /// `true` while the client refuses new work (e.g. after shutdown).
    fn is_disabled(&self) -> bool {
        false
    }
}

/// Guard for one live query subscription.
///
/// Runs its unsubscribe function exactly once, when dropped. Backends build
/// one from whatever teardown their transport needs.
pub struct SubscriptionHandle {
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl SubscriptionHandle {
    /// Wrap an unsubscribe function.
    pub fn new(unsubscribe: impl FnOnce() + Send + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// A handle with no teardown, for subscriptions that need none.
    pub fn detached() -> Self {
        Self { unsubscribe: None }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
