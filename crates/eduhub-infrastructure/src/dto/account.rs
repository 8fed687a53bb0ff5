//! Local accounts (`accounts.toml`).

use chrono::{DateTime, Utc};
use eduhub_core::identity::Identity;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use uuid::Uuid;

/// All local accounts, keyed by lower-cased email.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct AccountsDocument {
    #[serde(default)]
    pub accounts: BTreeMap<String, AccountRecord>,
}

impl AccountsDocument {
    pub fn contains_uid(&self, uid: &str) -> bool {
        self.accounts.values().any(|account| account.uid == uid)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct AccountRecord {
    pub uid: String,
    /// Email as entered at registration.
    pub email: String,
    pub salt: String,
    /// Hex SHA-256 of salt followed by password.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl AccountRecord {
    /// New account with a fresh uid and salt.
    pub fn create(email: &str, password: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        Self {
            uid: Uuid::new_v4().to_string(),
            email: email.trim().to_string(),
            password_hash: digest(&salt, password),
            salt,
            created_at: Utc::now(),
        }
    }

    pub fn verify(&self, password: &str) -> bool {
        digest(&self.salt, password) == self.password_hash
    }

    pub fn identity(&self) -> Identity {
        Identity::new(self.uid.clone(), Some(self.email.clone()))
    }
}

/// Accounts are looked up case-insensitively.
pub(crate) fn account_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_salted_and_verified() {
        let a = AccountRecord::create("ann@example.com", "secret1");
        let b = AccountRecord::create("bob@example.com", "secret1");

        assert!(a.verify("secret1"));
        assert!(!a.verify("secret2"));
        assert_ne!(a.password_hash, b.password_hash);
        assert!(!a.password_hash.contains("secret1"));
        assert_eq!(a.password_hash.len(), 64);
    }

    #[test]
    fn test_account_key_ignores_case_and_whitespace() {
        assert_eq!(account_key(" Ann@Example.COM "), "ann@example.com");
    }
}
