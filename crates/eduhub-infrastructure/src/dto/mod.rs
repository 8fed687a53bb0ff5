//! Data Transfer Objects (DTOs) for persistence.
//!
//! These are the on-disk shapes of the TOML documents. They are private to
//! the infrastructure layer; the domain only sees `UserProfile` and `Identity`.

mod account;
mod profile;
mod session;

pub(crate) use account::{AccountRecord, AccountsDocument, account_key};
pub(crate) use profile::ProfileDocument;
pub(crate) use session::StoredSession;
