use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use super::event::{DemoEndReason, SessionEvent};
use super::state::{DemoState, SessionState};
use crate::config::SessionSettings;
use crate::error::{EduhubError, Result};
use crate::identity::{Identity, IdentityProvider, SubscriptionToken};
use crate::profile::ProfileStore;
use crate::user::{UserProfile, UserRole};

const EVENT_CAPACITY: usize = 1024;

/// Single source of truth for who is using the app.
///
/// `SessionManager` is responsible for:
/// - Resolving the provider's identity notifications into a loaded profile
/// - Writing profile edits through to the profile store
/// - Running the time-boxed demo session and its countdown
/// - Publishing state snapshots and events to the presentation layer
///
/// The handle is cheap to clone; all clones share one session. The session is
/// torn down by [`SessionManager::shutdown`] or when the last clone is dropped.
///
/// Must be created and driven from within a Tokio runtime.
#[derive(Clone)]
pub struct SessionManager {
    shared: Arc<Shared>,
}

struct Shared {
    identity_provider: Arc<dyn IdentityProvider>,
    profile_store: Arc<dyn ProfileStore>,
    settings: SessionSettings,
    state: watch::Sender<SessionState>,
    events: broadcast::Sender<SessionEvent>,
    /// Incremented for every identity notification and profile write.
    /// Only read and written inside `state.send_modify` closures, which serializes it.
    resolution_seq: AtomicU64,
    demo: Mutex<DemoControl>,
    listener: Mutex<Option<Listener>>,
    /// Cancelled on teardown; wakes every pending `wait_for`.
    closed: CancellationToken,
}

#[derive(Default)]
struct DemoControl {
    /// Incremented on every start and end, so an old countdown cannot touch a newer demo.
    epoch: u64,
    timer: Option<Countdown>,
}

struct Countdown {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

struct Listener {
    token: SubscriptionToken,
    handle: JoinHandle<()>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionManager {
    /// Creates the session and subscribes to the identity provider.
    ///
    /// The returned manager starts with `loading = true`; the provider's first
    /// notification (sent on subscribe) resolves it.
    ///
    /// # Arguments
    ///
    /// * `identity_provider` - Authentication backend to follow
    /// * `profile_store` - Store holding profile records keyed by uid
    /// * `settings` - Demo budget and countdown period
    ///
    /// # Errors
    ///
    /// Returns `EduhubError::Config` if `settings` has a zero budget or tick period.
    pub fn start(
        identity_provider: Arc<dyn IdentityProvider>,
        profile_store: Arc<dyn ProfileStore>,
        settings: SessionSettings,
    ) -> Result<Self> {
        settings.validate()?;

        let (state, _) = watch::channel(SessionState::initial(settings.demo_duration_secs));
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let shared = Arc::new(Shared {
            identity_provider,
            profile_store,
            settings,
            state,
            events,
            resolution_seq: AtomicU64::new(0),
            demo: Mutex::new(DemoControl::default()),
            listener: Mutex::new(None),
            closed: CancellationToken::new(),
        });

        let subscription = shared.identity_provider.subscribe();
        let handle = tokio::spawn(listen(Arc::downgrade(&shared), subscription.events));
        *lock(&shared.listener) = Some(Listener {
            token: subscription.token,
            handle,
        });

        tracing::info!(target: "session", "Session manager started");
        Ok(Self { shared })
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.shared.state.borrow().clone()
    }

    /// Returns a receiver that observes every state change.
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.shared.state.subscribe()
    }

    /// Returns a receiver for session events published from now on.
    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.shared.events.subscribe()
    }

    /// Waits until `predicate` holds for the state, then returns that state.
    ///
    /// # Errors
    ///
    /// Returns `EduhubError::Internal` if the manager is shut down first; no
    /// identity change can arrive after that.
    pub async fn wait_for<F>(&self, mut predicate: F) -> Result<SessionState>
    where
        F: FnMut(&SessionState) -> bool,
    {
        let mut rx = self.watch();
        let closed = self.shared.closed.clone();
        tokio::select! {
            biased;
            result = rx.wait_for(|state| predicate(state)) => match result {
                Ok(state) => Ok(state.clone()),
                Err(_) => Err(EduhubError::internal("session manager is shut down")),
            },
            _ = closed.cancelled() => Err(EduhubError::internal("session manager is shut down")),
        }
    }

    /// Waits for the first identity resolution to complete.
    pub async fn wait_until_loaded(&self) -> Result<SessionState> {
        self.wait_for(|state| !state.loading).await
    }

    /// Persists `profile` for the current identity, then makes it the session profile.
    ///
    /// The in-memory profile only changes after the store write succeeded.
    ///
    /// # Errors
    ///
    /// - `EduhubError::Unauthenticated` if nobody is signed in
    /// - the store's error if the write fails; the session is left unchanged
    pub async fn set_profile(&self, profile: UserProfile) -> Result<()> {
        let identity = self
            .shared
            .state
            .borrow()
            .identity
            .clone()
            .ok_or(EduhubError::Unauthenticated)?;

        if let Err(e) = self.shared.profile_store.put(&identity.uid, &profile).await {
            tracing::error!(target: "session", "Failed to save profile for {}: {}", identity.uid, e);
            return Err(e);
        }

        let shared = &self.shared;
        let applied = shared.state.send_if_modified(|state| {
            if state.identity.as_ref() != Some(&identity) {
                return false;
            }
            // Any fetch still in flight read an older record.
            shared.resolution_seq.fetch_add(1, Ordering::SeqCst);
            state.profile = Some(profile);
            state.loading = false;
            state.resolving = false;
            true
        });

        if applied {
            shared.publish(SessionEvent::ProfileUpdated { uid: identity.uid });
        } else {
            tracing::warn!(
                target: "session",
                "Identity changed while saving profile for {}; session left unchanged",
                identity.uid
            );
        }
        Ok(())
    }

    /// Starts (or restarts) a demo session with a placeholder profile for `role`.
    ///
    /// Replaces any current profile and resets the countdown to the full budget.
    /// Makes no external calls.
    pub fn start_demo(&self, role: UserRole) {
        let shared = &self.shared;
        let budget = shared.settings.demo_duration_secs;

        let mut demo = lock(&shared.demo);
        if let Some(countdown) = demo.timer.take() {
            countdown.cancel.cancel();
        }
        demo.epoch += 1;
        let epoch = demo.epoch;

        shared.state.send_modify(|state| {
            state.profile = Some(UserProfile::demo(role));
            state.demo = DemoState::Active { remaining: budget };
        });

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_countdown(
            Arc::downgrade(shared),
            epoch,
            cancel.clone(),
            shared.settings.tick_period(),
        ));
        demo.timer = Some(Countdown { cancel, handle });
        drop(demo);

        tracing::info!(target: "session", "Demo started as {} ({}s)", role, budget);
        shared.publish(SessionEvent::DemoStarted { role });
    }

    /// Ends the demo session: stops the countdown and clears the demo profile.
    ///
    /// Returns `false` (and changes nothing) when no demo is running.
    pub fn end_demo(&self) -> bool {
        let shared = &self.shared;
        let mut demo = lock(&shared.demo);
        shared.finish_demo(&mut demo, DemoEndReason::Ended)
    }

    /// Unsubscribes from the provider and stops every background task.
    ///
    /// A running demo is ended. Safe to call more than once.
    pub fn shutdown(&self) {
        self.shared.teardown();
        tracing::info!(target: "session", "Session manager shut down");
    }
}

impl Shared {
    fn publish(&self, event: SessionEvent) {
        // No receivers is normal.
        let _ = self.events.send(event);
    }

    fn on_identity_changed(self: &Arc<Self>, identity: Option<Identity>) {
        let mut seq = 0;
        self.state.send_modify(|state| {
            seq = self.resolution_seq.fetch_add(1, Ordering::SeqCst) + 1;
            state.identity = identity.clone();
            if let Some(identity) = &identity {
                // Never pair the new identity with the previous user's record.
                let other_user = state.profile.as_ref().is_some_and(|p| p.uid != identity.uid);
                if other_user && !state.is_demo_active() {
                    state.profile = None;
                }
                state.resolving = true;
            } else {
                // The demo owns its placeholder profile.
                if !state.is_demo_active() {
                    state.profile = None;
                }
                state.resolving = false;
                state.loading = false;
            }
        });

        let Some(identity) = identity else {
            tracing::debug!(target: "session", "Identity cleared");
            self.publish(SessionEvent::SignedOut);
            return;
        };

        tracing::debug!(target: "session", "Resolving profile for {} (seq {})", identity.uid, seq);
        let weak = Arc::downgrade(self);
        let store = self.profile_store.clone();
        tokio::spawn(async move {
            let profile = match store.get(&identity.uid).await {
                Ok(profile) => profile,
                Err(e) => {
                    tracing::error!(target: "session", "Error fetching profile for {}: {}", identity.uid, e);
                    None
                }
            };
            if let Some(shared) = weak.upgrade() {
                shared.finish_resolution(seq, identity.uid, profile);
            }
        });
    }

    fn finish_resolution(&self, seq: u64, uid: String, profile: Option<UserProfile>) {
        let found = profile.is_some();
        let applied = self.state.send_if_modified(|state| {
            if self.resolution_seq.load(Ordering::SeqCst) != seq {
                return false;
            }
            if !state.is_demo_active() {
                state.profile = profile;
            }
            state.resolving = false;
            state.loading = false;
            true
        });

        if applied {
            tracing::info!(target: "session", "Identity {} resolved (profile found: {})", uid, found);
            self.publish(SessionEvent::IdentityResolved {
                uid,
                profile_found: found,
            });
        } else {
            tracing::debug!(target: "session", "Discarding stale profile fetch for {} (seq {})", uid, seq);
        }
    }

    /// Applies one countdown tick. Returns false when the countdown should stop.
    fn tick_demo(&self, epoch: u64) -> bool {
        let mut demo = lock(&self.demo);
        if demo.epoch != epoch {
            return false;
        }

        let mut remaining_after = None;
        self.state.send_if_modified(|state| match state.demo {
            DemoState::Active { remaining } if remaining > 1 => {
                state.demo = DemoState::Active {
                    remaining: remaining - 1,
                };
                remaining_after = Some(remaining - 1);
                true
            }
            _ => false,
        });

        match remaining_after {
            Some(remaining) => {
                drop(demo);
                self.publish(SessionEvent::DemoTick { remaining });
                true
            }
            None => {
                tracing::info!(target: "session", "Demo time is up");
                self.finish_demo(&mut demo, DemoEndReason::Expired);
                false
            }
        }
    }

    /// Ends the running demo. The caller holds the demo lock.
    fn finish_demo(&self, demo: &mut DemoControl, reason: DemoEndReason) -> bool {
        if let Some(countdown) = demo.timer.take() {
            countdown.cancel.cancel();
        }

        let mut ended = false;
        self.state.send_if_modified(|state| {
            if !state.is_demo_active() {
                return false;
            }
            state.profile = None;
            state.demo = DemoState::Inactive;
            ended = true;
            true
        });

        if ended {
            demo.epoch += 1;
            tracing::info!(target: "session", "Demo ended ({:?})", reason);
            self.publish(SessionEvent::DemoEnded { reason });
        }
        ended
    }

    fn teardown(&self) {
        self.closed.cancel();
        if let Some(listener) = lock(&self.listener).take() {
            self.identity_provider.unsubscribe(listener.token);
            listener.handle.abort();
        }

        let mut demo = lock(&self.demo);
        self.finish_demo(&mut demo, DemoEndReason::Ended);
        if let Some(countdown) = demo.timer.take() {
            countdown.cancel.cancel();
            countdown.handle.abort();
        }
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        self.teardown();
    }
}

async fn listen(shared: Weak<Shared>, mut events: mpsc::UnboundedReceiver<Option<Identity>>) {
    while let Some(identity) = events.recv().await {
        let Some(shared) = shared.upgrade() else {
            break;
        };
        shared.on_identity_changed(identity);
    }
    tracing::debug!(target: "session", "Identity subscription closed");
}

async fn run_countdown(
    shared: Weak<Shared>,
    epoch: u64,
    cancel: CancellationToken,
    period: Duration,
) {
    let mut ticker = time::interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let Some(shared) = shared.upgrade() else {
            break;
        };
        if !shared.tick_demo(epoch) {
            break;
        }
    }
}
