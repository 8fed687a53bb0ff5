//! In-process identity provider backed by local account files.
//!
//! Stands in for a hosted authentication backend: accounts live in
//! `accounts.toml`, and a "remember me" sign-in is kept in `session.toml` so
//! the next process starts signed in.

use async_trait::async_trait;
use eduhub_core::error::{EduhubError, Result};
use eduhub_core::identity::{
    Identity, IdentityProvider, IdentitySubscription, Persistence, SubscriberSet, SubscriptionToken,
};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use crate::dto::{AccountRecord, AccountsDocument, StoredSession, account_key};
use crate::paths::EduhubPaths;
use crate::storage::{AtomicTomlFile, run_blocking};

enum AccountBook {
    File {
        accounts: AtomicTomlFile<AccountsDocument>,
        session: AtomicTomlFile<StoredSession>,
    },
    Memory(Mutex<AccountsDocument>),
}

/// Email/password identity provider.
///
/// Passwords are stored as salted SHA-256 digests. Every successful
/// `register`, `sign_in` and `sign_out` is broadcast to subscribers.
pub struct LocalIdentityProvider {
    book: AccountBook,
    current: Mutex<Option<Identity>>,
    subscribers: SubscriberSet,
}

impl LocalIdentityProvider {
    /// Opens the account files and restores a remembered sign-in.
    ///
    /// A remembered uid that no longer has an account is discarded.
    /// Blocks on file I/O; call it during startup.
    ///
    /// # Arguments
    ///
    /// * `accounts_file` - Path of `accounts.toml`
    /// * `session_file` - Path of `session.toml`
    pub fn open(accounts_file: PathBuf, session_file: PathBuf) -> Result<Self> {
        let accounts = AtomicTomlFile::<AccountsDocument>::new(accounts_file);
        let session = AtomicTomlFile::<StoredSession>::new(session_file);

        let restored = match session.load()? {
            Some(stored) => {
                let known = accounts
                    .load()?
                    .is_some_and(|doc| doc.contains_uid(&stored.uid));
                if known {
                    tracing::info!(
                        target: "identity",
                        "Restored sign-in for {} (since {})",
                        stored.uid,
                        stored.signed_in_at
                    );
                    Some(stored.identity())
                } else {
                    tracing::warn!(target: "identity", "Discarding remembered sign-in for unknown uid {}", stored.uid);
                    session.remove()?;
                    None
                }
            }
            None => None,
        };

        Ok(Self {
            book: AccountBook::File { accounts, session },
            current: Mutex::new(restored),
            subscribers: SubscriberSet::new(),
        })
    }

    /// Opens the provider at the standard locations under the data directory.
    pub fn open_at(paths: &EduhubPaths) -> Result<Self> {
        Self::open(paths.accounts_file(), paths.session_file())
    }

    /// A provider that keeps accounts in memory and never remembers sign-ins.
    pub fn in_memory() -> Self {
        Self {
            book: AccountBook::Memory(Mutex::new(AccountsDocument::default())),
            current: Mutex::new(None),
            subscribers: SubscriberSet::new(),
        }
    }

    async fn find_account(&self, key: String) -> Result<Option<AccountRecord>> {
        match &self.book {
            AccountBook::File { accounts, .. } => {
                let accounts = accounts.clone();
                run_blocking(move || {
                    Ok(accounts
                        .load()?
                        .and_then(|mut doc| doc.accounts.remove(&key)))
                })
                .await
            }
            AccountBook::Memory(doc) => Ok(lock(doc).accounts.get(&key).cloned()),
        }
    }

    async fn insert_account(&self, key: String, record: AccountRecord) -> Result<()> {
        match &self.book {
            AccountBook::File { accounts, .. } => {
                let accounts = accounts.clone();
                run_blocking(move || {
                    accounts.update(AccountsDocument::default(), |doc| {
                        insert_new(doc, key, record)
                    })
                })
                .await
            }
            AccountBook::Memory(doc) => insert_new(&mut lock(doc), key, record),
        }
    }

    async fn remember(&self, identity: Option<Identity>) -> Result<()> {
        let AccountBook::File { session, .. } = &self.book else {
            return Ok(());
        };
        let session = session.clone();
        run_blocking(move || match identity {
            Some(identity) => session.replace(&StoredSession::for_identity(&identity)),
            None => session.remove().map(|_| ()),
        })
        .await
    }

    fn set_current(&self, identity: Option<Identity>) {
        let mut current = lock(&self.current);
        *current = identity.clone();
        self.subscribers.broadcast(identity);
    }
}

fn insert_new(doc: &mut AccountsDocument, key: String, record: AccountRecord) -> Result<()> {
    if doc.accounts.contains_key(&key) {
        return Err(EduhubError::EmailInUse(record.email));
    }
    doc.accounts.insert(key, record);
    Ok(())
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    fn subscribe(&self) -> IdentitySubscription {
        // Held across registration so a concurrent change is not missed.
        let current = lock(&self.current);
        self.subscribers.subscribe(current.clone())
    }

    fn unsubscribe(&self, token: SubscriptionToken) {
        self.subscribers.unsubscribe(token);
    }

    fn current(&self) -> Option<Identity> {
        lock(&self.current).clone()
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
        persistence: Persistence,
    ) -> Result<Identity> {
        let account = self
            .find_account(account_key(email))
            .await?
            .filter(|account| account.verify(password))
            .ok_or(EduhubError::InvalidCredentials)?;

        let identity = account.identity();
        let remembered = match persistence {
            Persistence::Local => Some(identity.clone()),
            Persistence::Session => None,
        };
        self.remember(remembered).await?;

        tracing::info!(target: "identity", "Signed in {} ({})", identity.uid, persistence);
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    async fn register(&self, email: &str, password: &str) -> Result<Identity> {
        let record = AccountRecord::create(email, password);
        let identity = record.identity();
        self.insert_account(account_key(email), record).await?;
        // A fresh registration is not remembered.
        self.remember(None).await?;

        tracing::info!(target: "identity", "Registered account {}", identity.uid);
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<()> {
        self.remember(None).await?;

        if self.current().is_none() {
            return Ok(());
        }
        tracing::info!(target: "identity", "Signed out");
        self.set_current(None);
        Ok(())
    }
}
