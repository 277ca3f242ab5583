//! Credential pair persistence.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{trace, warn};

use crate::auth::{AccessToken, CredentialPair, RefreshToken};

use super::{KeyValueStore, MemoryStore};

/// Storage key of the access token.
pub const ACCESS_TOKEN_KEY: &str = "ingeniia.access_token";

/// Storage key of the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "ingeniia.refresh_token";

/// Persists the [`CredentialPair`] in a [`KeyValueStore`].
///
/// Reads never fail: a storage fault is logged and treated as "no token".
/// Writes always cover both slots in a single batch so that a stale
/// refresh token cannot outlive its access token.
///
/// `TokenStore` is cheap to clone; clones share the backend and the change
/// channel.
#[derive(Clone)]
pub struct TokenStore {
    backend: Arc<dyn KeyValueStore>,
    changes: Arc<watch::Sender<bool>>,
}

impl TokenStore {
    /// Create a token store over the given backend.
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        let has_access = read_slot(backend.as_ref(), ACCESS_TOKEN_KEY).is_some();
        let (changes, _) = watch::channel(has_access);
        Self {
            backend,
            changes: Arc::new(changes),
        }
    }

    /// Create a token store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Returns the stored access token, if any.
    pub fn access_token(&self) -> Option<AccessToken> {
        read_slot(self.backend.as_ref(), ACCESS_TOKEN_KEY).map(AccessToken::new)
    }

    /// Returns the stored refresh token, if any.
    pub fn refresh_token(&self) -> Option<RefreshToken> {
        read_slot(self.backend.as_ref(), REFRESH_TOKEN_KEY).map(RefreshToken::new)
    }

    /// Returns both stored tokens.
    pub fn credentials(&self) -> CredentialPair {
        CredentialPair {
            access: self.access_token(),
            refresh: self.refresh_token(),
        }
    }

    /// Overwrite both slots. `None` deletes the slot.
    pub fn set(&self, access: Option<&AccessToken>, refresh: Option<&RefreshToken>) {
        let batch = [
            (ACCESS_TOKEN_KEY, access.map(AccessToken::as_str)),
            (REFRESH_TOKEN_KEY, refresh.map(RefreshToken::as_str)),
        ];

        if let Err(e) = self.backend.write_batch(&batch) {
            warn!(error = %e, "Failed to write credentials");
        }

        trace!(
            access = access.is_some(),
            refresh = refresh.is_some(),
            "Credentials written"
        );
        self.notify();
    }

    /// Overwrite both slots from a pair.
    pub fn set_pair(&self, pair: &CredentialPair) {
        self.set(pair.access.as_ref(), pair.refresh.as_ref());
    }

    /// Delete both tokens.
    pub fn clear(&self) {
        self.set(None, None);
    }

    /// Watch whether an access token is present. The value is republished
    /// after every write, including writes that did not change it.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.changes.subscribe()
    }

    fn notify(&self) {
        let has_access = read_slot(self.backend.as_ref(), ACCESS_TOKEN_KEY).is_some();
        self.changes.send_replace(has_access);
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("has_access", &*self.changes.borrow())
            .finish()
    }
}

fn read_slot(backend: &dyn KeyValueStore, key: &str) -> Option<String> {
    match backend.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, key, "Failed to read credential, treating as absent");
            None
        }
    }
}
