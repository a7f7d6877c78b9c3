//! Reactive query, mutation, and action bindings.
//!
//! [`LinkContext`] carries the client handle explicitly; every binding
//! constructor fails with [`StrataLinkError::MissingContext`] when no client
//! was injected, before any network activity. The layer does not buffer,
//! dedupe, or retry — all of that belongs to the backend client.

use crate::backend::{OptimisticUpdate, StrataBackend, UpdateCallback};
use crate::error::{Result, StrataLinkError};
use crate::models::{FunctionArgs, FunctionReference};
use crate::signal::Signal;
use log::debug;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A live query result as an observable value.
///
/// `None` is the unloaded state, distinct from any result the query could
/// produce (a query returning JSON `null` yields `Some(Value::Null)`).
pub type QuerySignal = Signal<Option<Value>>;

/// Holds the backend client handle the bindings are constructed against.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use strata_link::{FunctionReference, LinkContext, StrataBackend};
///
/// # fn connect() -> Arc<dyn StrataBackend> { unimplemented!() }
/// # async fn example() -> strata_link::Result<()> {
/// let context = LinkContext::new(connect());
///
/// let messages = context.create_query(FunctionReference::query("messages:list"), ())?;
/// let send = context.create_mutation(FunctionReference::mutation("messages:send"), None)?;
///
/// send.call(strata_link::FunctionArgs::new().insert("body", "hello")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct LinkContext {
    client: Option<Arc<dyn StrataBackend>>,
}

impl LinkContext {
    /// A context bound to a client.
    pub fn new(client: Arc<dyn StrataBackend>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// A context with no client; every binding constructor will fail.
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` when a client handle is present.
    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// The injected client handle.
    pub fn client(&self) -> Result<Arc<dyn StrataBackend>> {
        self.client.clone().ok_or(StrataLinkError::MissingContext)
    }

    /// Subscribe to a query and expose its live result as a signal.
    ///
    /// The signal starts unloaded (`None`) and is updated on every result
    /// change. The backend subscription is released when the last clone of
    /// the signal is dropped.
    pub fn create_query(
        &self,
        query: FunctionReference,
        args: impl Into<FunctionArgs>,
    ) -> Result<QuerySignal> {
        let client = self.client()?;
        let args = args.into();
        debug!("[LINK_QUERY] Subscribing: {}", query);
        Signal::from_subscription(None, move |setter| {
            let on_update: UpdateCallback = Arc::new(move |value| setter.set(Some(value)));
            client.subscribe(&query, args, on_update)
        })
    }

    /// Construct a callable [`Mutation`], optionally with an optimistic
    /// update the backend applies until the result is confirmed.
    pub fn create_mutation(
        &self,
        mutation: FunctionReference,
        update: Option<OptimisticUpdate>,
    ) -> Result<Mutation> {
        let client = self.client()?;
        Ok(Mutation {
            client,
            mutation,
            update,
        })
    }

    /// Construct a callable [`Action`].
    pub fn create_action(&self, action: FunctionReference) -> Result<Action> {
        let client = self.client()?;
        Ok(Action { client, action })
    }
}

impl fmt::Debug for LinkContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkContext")
            .field("has_client", &self.client.is_some())
            .finish()
    }
}

/// A bound mutation, callable any number of times.
#[derive(Clone)]
pub struct Mutation {
    client: Arc<dyn StrataBackend>,
    mutation: FunctionReference,
    update: Option<OptimisticUpdate>,
}

impl Mutation {
    /// Execute the mutation and return the backend's result unmodified.
    ///
    /// Fails with [`StrataLinkError::ClientDisabled`] before any network
    /// call when the client reports itself disabled.
    pub async fn call(&self, args: impl Into<FunctionArgs>) -> Result<Value> {
        if self.client.is_disabled() {
            return Err(StrataLinkError::ClientDisabled);
        }
        let args = args.into();
        debug!("[LINK_MUTATION] Calling: {}", self.mutation);
        self.client
            .mutation(&self.mutation, args, self.update.clone())
            .await
    }

    /// The function this mutation is bound to.
    pub fn reference(&self) -> &FunctionReference {
        &self.mutation
    }
}

impl fmt::Debug for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutation")
            .field("mutation", &self.mutation)
            .field("optimistic_update", &self.update.is_some())
            .finish()
    }
}

/// A bound action, callable any number of times.
#[derive(Clone)]
pub struct Action {
    client: Arc<dyn StrataBackend>,
    action: FunctionReference,
}

impl Action {
    /// Execute the action and return the backend's result unmodified.
    pub async fn call(&self, args: impl Into<FunctionArgs>) -> Result<Value> {
        let args = args.into();
        debug!("[LINK_ACTION] Calling: {}", self.action);
        self.client.action(&self.action, args).await
    }

    /// The function this action is bound to.
    pub fn reference(&self) -> &FunctionReference {
        &self.action
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("action", &self.action).finish()
    }
}
