//! Token store: the single source of truth for the current credential.

use std::{fmt, sync::Arc};

use jiff::{SignedDuration, Timestamp};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::session::{Clock, CredentialStorage};

/// Storage key the credential lives under.
pub const TOKEN_KEY: &str = "token";

/// Lifetime of a stored credential, measured from the moment it is set.
pub const TOKEN_TTL: SignedDuration = SignedDuration::from_hours(7 * 24);

/// Opaque bearer token issued by the backend at login.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(Zeroizing<String>);

impl Credential {
    /// Wrap a raw token value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// The raw token value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the backend issued an empty token.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Authorization` header value for this credential.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.expose())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(**redacted**)")
    }
}

/// Shared handle over the persisted credential.
///
/// Cloning is cheap; clones observe the same storage. Storage failures never
/// escape: reads degrade to "absent" and writes are logged.
#[derive(Debug, Clone)]
pub struct TokenStore {
    storage: Arc<dyn CredentialStorage>,
    clock: Arc<dyn Clock>,
}

impl TokenStore {
    /// Token store over `storage`, stamping expiry with `clock`.
    #[must_use]
    pub fn new(storage: Arc<dyn CredentialStorage>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Store `value` for [`TOKEN_TTL`], replacing any previous credential.
    pub fn set_token(&self, value: impl Into<String>) {
        let value = Zeroizing::new(value.into());
        let expires_at = self.expires_at();

        match self.storage.write(TOKEN_KEY, &value, expires_at) {
            Ok(()) => debug!(%expires_at, "credential stored"),
            Err(error) => warn!("failed to store credential: {error}"),
        }
    }

    /// Current credential, or `None` when missing, expired or unreadable.
    #[must_use]
    pub fn get_token(&self) -> Option<Credential> {
        match self.storage.read(TOKEN_KEY) {
            Ok(value) => value.map(Credential::new),
            Err(error) => {
                warn!("failed to read credential, treating as absent: {error}");

                None
            }
        }
    }

    /// Remove the credential regardless of its remaining lifetime.
    pub fn clear_token(&self) {
        match self.storage.remove(TOKEN_KEY) {
            Ok(()) => debug!("credential cleared"),
            Err(error) => warn!("failed to clear credential: {error}"),
        }
    }

    /// Presence check only; expiry is whatever the storage already enforces.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some_and(|token| !token.is_empty())
    }

    fn expires_at(&self) -> Timestamp {
        self.clock
            .now()
            .checked_add(TOKEN_TTL)
            .unwrap_or(Timestamp::MAX)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use testresult::TestResult;

    use crate::session::{FileStorage, ManualClock, MemoryStorage, StorageError};

    use super::*;

    fn memory_store() -> (TokenStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Timestamp::UNIX_EPOCH));
        let storage = Arc::new(MemoryStorage::new(clock.clone()));

        (TokenStore::new(storage, clock.clone()), clock)
    }

    #[derive(Debug)]
    struct BrokenStorage;

    impl CredentialStorage for BrokenStorage {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Poisoned)
        }

        fn write(&self, _key: &str, _value: &str, _at: Timestamp) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
    }

    #[test]
    fn set_then_get_returns_value() {
        let (store, _clock) = memory_store();

        store.set_token("abc123");

        assert_eq!(store.get_token().map(|t| t.expose().to_string()), Some("abc123".into()));
        assert!(store.is_authenticated());
    }

    #[test]
    fn set_replaces_previous_token() {
        let (store, _clock) = memory_store();

        store.set_token("first");
        store.set_token("second");

        assert_eq!(store.get_token(), Some(Credential::new("second")));
    }

    #[test]
    fn clear_removes_token_regardless_of_state() {
        let (store, _clock) = memory_store();

        store.clear_token();

        assert_eq!(store.get_token(), None);
        assert!(!store.is_authenticated());

        store.set_token("abc123");
        store.clear_token();

        assert_eq!(store.get_token(), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn token_survives_until_just_before_seven_days() {
        let (store, clock) = memory_store();

        store.set_token("abc123");
        clock.advance(TOKEN_TTL - SignedDuration::from_secs(1));

        assert!(store.is_authenticated(), "token should still be live");

        clock.advance(SignedDuration::from_secs(1));

        assert!(!store.is_authenticated(), "token should expire after seven days");
        assert_eq!(store.get_token(), None);
    }

    #[test]
    fn empty_token_is_not_authenticated() {
        let (store, _clock) = memory_store();

        store.set_token("");

        assert!(store.get_token().is_some(), "empty value is still stored");
        assert!(!store.is_authenticated());
    }

    #[test]
    fn storage_failures_are_treated_as_absent() {
        let clock = Arc::new(ManualClock::new(Timestamp::UNIX_EPOCH));
        let store = TokenStore::new(Arc::new(BrokenStorage), clock);

        store.set_token("abc123");
        store.clear_token();

        assert_eq!(store.get_token(), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn clones_share_the_same_credential() {
        let (store, _clock) = memory_store();
        let other = store.clone();

        store.set_token("shared");

        assert!(other.is_authenticated());

        other.clear_token();

        assert!(!store.is_authenticated());
    }

    #[test]
    fn corrupt_file_reads_as_absent() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("session.json");
        fs::write(&path, "{ nope")?;

        let clock = Arc::new(ManualClock::new(Timestamp::UNIX_EPOCH));
        let store = TokenStore::new(Arc::new(FileStorage::new(&path, clock.clone())), clock);

        assert!(!store.is_authenticated());

        store.set_token("abc123");

        assert!(store.is_authenticated(), "a new login overwrites the corrupt file");

        Ok(())
    }

    #[test]
    fn debug_output_redacts_credential() {
        let credential = Credential::new("secret-value");

        assert!(!format!("{credential:?}").contains("secret-value"));
        assert_eq!(credential.bearer(), "Bearer secret-value");
    }
}
