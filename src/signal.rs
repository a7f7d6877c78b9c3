//! Push-to-pull reactive bridge.
//!
//! [`Signal`] turns a callback-based external source into an observable
//! value: the source pushes through a [`SignalSetter`], consumers read the
//! latest value or await changes. When a signal was created from a
//! subscription, the subscription is torn down automatically once the last
//! signal clone is dropped — lifetime is scoped to the consumer, never
//! managed manually.

use crate::backend::SubscriptionHandle;
use crate::error::Result;
use std::sync::Arc;
use tokio::sync::watch;

/// Write half of a signal, handed to the pushing side.
pub struct SignalSetter<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for SignalSetter<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> SignalSetter<T> {
    /// Publish a new value. Silently ignored when every reader is gone.
    pub fn set(&self, value: T) {
        let _ = self.tx.send(value);
    }
}

/// Read half: an observable cell holding the latest pushed value.
pub struct Signal<T> {
    rx: watch::Receiver<T>,
    subscription: Option<Arc<SubscriptionHandle>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
            subscription: self.subscription.clone(),
        }
    }
}

impl<T> Signal<T> {
    /// Create a plain reactive cell with no backing subscription.
    pub fn channel(initial: T) -> (SignalSetter<T>, Signal<T>) {
        let (tx, rx) = watch::channel(initial);
        (
            SignalSetter { tx: Arc::new(tx) },
            Signal {
                rx,
                subscription: None,
            },
        )
    }

    /// Bridge an external subscription into a signal.
    ///
    /// `setup` receives the setter to push values through and returns the
    /// subscription's teardown handle; errors from setup propagate eagerly.
    /// The handle is dropped — unsubscribing — when the last clone of the
    /// returned signal is dropped.
    pub fn from_subscription<F>(initial: T, setup: F) -> Result<Signal<T>>
    where
        F: FnOnce(SignalSetter<T>) -> Result<SubscriptionHandle>,
    {
        let (tx, rx) = watch::channel(initial);
        let setter = SignalSetter { tx: Arc::new(tx) };
        let handle = setup(setter)?;
        Ok(Signal {
            rx,
            subscription: Some(Arc::new(handle)),
        })
    }
}

impl<T: Clone> Signal<T> {
    /// The current value.
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Wait for the next change and return the new value.
    ///
    /// Returns `None` once the pushing side is gone and no further change
    /// can arrive.
    pub async fn next(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_channel_reads_latest_value() {
        let (setter, signal) = Signal::channel(0u32);
        assert_eq!(signal.get(), 0);
        setter.set(7);
        assert_eq!(signal.get(), 7);
    }

    #[tokio::test]
    async fn test_next_yields_pushed_values() {
        let (setter, mut signal) = Signal::channel(0u32);
        setter.set(1);
        assert_eq!(signal.next().await, Some(1));

        let pusher = tokio::spawn(async move {
            setter.set(2);
        });
        assert_eq!(signal.next().await, Some(2));
        pusher.await.unwrap();
    }

    #[tokio::test]
    async fn test_next_ends_when_setter_dropped() {
        let (setter, mut signal) = Signal::channel(0u32);
        drop(setter);
        assert_eq!(signal.next().await, None);
    }

    #[tokio::test]
    async fn test_subscription_dropped_with_last_clone() {
        let unsubscribed = Arc::new(AtomicBool::new(false));
        let flag = unsubscribed.clone();
        let signal = Signal::from_subscription(0u32, move |setter| {
            setter.set(1);
            Ok(SubscriptionHandle::new(move || {
                flag.store(true, Ordering::SeqCst);
            }))
        })
        .unwrap();

        assert_eq!(signal.get(), 1);
        let second = signal.clone();
        drop(signal);
        assert!(!unsubscribed.load(Ordering::SeqCst));
        drop(second);
        assert!(unsubscribed.load(Ordering::SeqCst));
    }
}
