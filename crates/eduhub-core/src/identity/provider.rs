//! Identity provider trait.
//!
//! Defines the interface to the external authentication backend, decoupling
//! the session core from a specific backend (hosted service, local accounts,
//! test doubles).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::model::{Identity, Persistence};
use crate::error::Result;

/// Handle returned by [`IdentityProvider::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

impl SubscriptionToken {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A live subscription to identity changes.
///
/// The receiver yields the current identity right away, then one item per
/// change. `None` means signed out.
#[derive(Debug)]
pub struct IdentitySubscription {
    pub token: SubscriptionToken,
    pub events: mpsc::UnboundedReceiver<Option<Identity>>,
}

/// An abstract authentication backend.
///
/// # Implementation Notes
///
/// Implementations should:
/// - deliver the current identity to every new subscriber immediately
/// - notify all subscribers after each successful `sign_in`, `register`
///   and `sign_out`
/// - stop delivering to a token once it is unsubscribed
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Subscribes to identity changes.
    fn subscribe(&self) -> IdentitySubscription;

    /// Cancels a subscription. Unknown tokens are ignored.
    fn unsubscribe(&self, token: SubscriptionToken);

    /// The identity currently signed in, if any.
    fn current(&self) -> Option<Identity>;

    /// Signs in with email and password.
    ///
    /// # Returns
    ///
    /// - `Ok(Identity)`: Signed in; subscribers have been notified
    /// - `Err(EduhubError::InvalidCredentials)`: Unknown email or wrong password
    async fn sign_in(&self, email: &str, password: &str, persistence: Persistence)
    -> Result<Identity>;

    /// Creates an account and signs it in.
    ///
    /// # Returns
    ///
    /// - `Ok(Identity)`: Account created and signed in
    /// - `Err(EduhubError::EmailInUse)`: An account with this email exists
    async fn register(&self, email: &str, password: &str) -> Result<Identity>;

    /// Signs the current identity out. Succeeds when nobody is signed in.
    async fn sign_out(&self) -> Result<()>;
}

/// Fan-out of identity notifications to subscribers.
///
/// Providers embed one of these to implement `subscribe`/`unsubscribe`.
/// Closed receivers are pruned on the next broadcast.
#[derive(Debug, Default)]
pub struct SubscriberSet {
    next_id: AtomicU64,
    senders: Mutex<HashMap<SubscriptionToken, mpsc::UnboundedSender<Option<Identity>>>>,
}

impl SubscriberSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber and sends it `current` straight away.
    pub fn subscribe(&self, current: Option<Identity>) -> IdentitySubscription {
        let token = SubscriptionToken(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::unbounded_channel();
        // Receiver is alive, send cannot fail here.
        let _ = tx.send(current);

        self.senders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token, tx);

        IdentitySubscription { token, events: rx }
    }

    pub fn unsubscribe(&self, token: SubscriptionToken) {
        self.senders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&token);
    }

    /// Sends `identity` to every subscriber.
    pub fn broadcast(&self, identity: Option<Identity>) {
        let mut senders = self.senders.lock().unwrap_or_else(PoisonError::into_inner);
        senders.retain(|token, tx| {
            let delivered = tx.send(identity.clone()).is_ok();
            if !delivered {
                tracing::debug!(target: "identity", "Dropping closed subscriber {}", token.id());
            }
            delivered
        });
    }

    pub fn len(&self) -> usize {
        self.senders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
