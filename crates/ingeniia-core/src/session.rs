//! Process-wide authentication state.
//!
//! [`SessionController`] owns the current user, the cached
//! "authenticated" flag and the auth modal flag. It is the only thing that
//! mutates that state; UI consumers read snapshots with
//! [`SessionController::state`] or follow changes through
//! [`SessionController::subscribe`].
//!
//! The authenticated flag mirrors "an access token is stored" and is
//! recomputed at exactly four points: [`init`](SessionController::init),
//! login ([`set_session`](SessionController::set_session)), refresh
//! failure (observed through the token store) and
//! [`logout`](SessionController::logout).
//!
//! Every session-mutating operation takes a new generation. Results that
//! arrive for an older generation are discarded, so a slow login response
//! cannot resurrect a session the user has since logged out of.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::auth::{AccessToken, CredentialPair, Credentials, RefreshToken, UserProfile};
use crate::error::{AuthError, Error};
use crate::store::TokenStore;
use crate::traits::AuthApi;

/// Snapshot of the session as seen by UI consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Profile of the signed-in user, once hydrated.
    pub user: Option<UserProfile>,
    /// True while an access token is stored.
    pub is_authenticated: bool,
    /// Whether the auth modal is showing. Never persisted.
    pub is_modal_open: bool,
}

/// Owner of the authentication state.
///
/// Cheap to clone; clones share the same state.
pub struct SessionController<A: AuthApi> {
    inner: Arc<Inner<A>>,
}

struct Inner<A: AuthApi> {
    api: A,
    tokens: TokenStore,
    state: watch::Sender<SessionState>,
    generation: AtomicU64,
    watcher: Mutex<Option<JoinHandle<()>>>,
}

impl<A: AuthApi> Clone for SessionController<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: AuthApi + 'static> SessionController<A> {
    /// Create a controller. The session is unauthenticated until
    /// [`init`](Self::init) runs.
    ///
    /// Inside a tokio runtime the token watcher starts here. Otherwise it
    /// starts with the first session operation.
    pub fn new(api: A) -> Self {
        let tokens = api.tokens().clone();
        let (state, _) = watch::channel(SessionState::default());
        let controller = Self {
            inner: Arc::new(Inner {
                api,
                tokens,
                state,
                generation: AtomicU64::new(0),
                watcher: Mutex::new(None),
            }),
        };
        controller.watch_tokens();
        controller
    }

    /// Returns the auth service this controller drives.
    pub fn api(&self) -> &A {
        &self.inner.api
    }

    /// Returns the current state.
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Follow state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Returns the hydrated user, if any.
    pub fn user(&self) -> Option<UserProfile> {
        self.inner.state.borrow().user.clone()
    }

    /// Returns the cached authenticated flag.
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated
    }

    /// Startup: restore the session from the token store.
    ///
    /// If an access token is stored the user profile is fetched. A failed
    /// fetch (expired or revoked token) clears the tokens and leaves the
    /// session unauthenticated; it is not reported as an error.
    #[instrument(skip(self))]
    pub async fn init(&self) -> SessionState {
        let generation = self.begin();

        if self.inner.tokens.access_token().is_none() {
            debug!("No stored credentials");
            self.publish(generation, None);
            return self.state();
        }

        match self.inner.api.me().await {
            Ok(user) => {
                info!(user = %user.id, "Restored session");
                self.publish(generation, Some(user));
            }
            Err(e) => {
                warn!(error = %e, "Stored credentials rejected, signing out");
                if self.is_current(generation) {
                    self.inner.tokens.clear();
                    self.publish(generation, None);
                }
            }
        }

        self.state()
    }

    /// Persist a credential pair and hydrate the user profile.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionHydration`] when the profile cannot be
    /// loaded; the tokens are cleared and the session stays
    /// unauthenticated. Returns [`AuthError::Superseded`] when another
    /// session operation started while this one was in flight.
    #[instrument(skip_all)]
    pub async fn set_session(
        &self,
        access: AccessToken,
        refresh: RefreshToken,
    ) -> Result<UserProfile> {
        let generation = self.begin();
        self.establish(generation, CredentialPair::new(access, refresh)).await
    }

    /// Log in with email and password, then hydrate the session.
    /// Closes the auth modal on success.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<UserProfile> {
        let generation = self.begin();
        let response = self.inner.api.login(credentials).await?;
        self.ensure_current(generation)?;

        let user = self.establish(generation, response.into_pair()).await?;
        self.close_auth_modal();
        Ok(user)
    }

    /// Verify an email with the token sent by the auth service, then
    /// hydrate the session. Closes the auth modal on success.
    #[instrument(skip_all)]
    pub async fn verify_email(&self, token: &str) -> Result<UserProfile> {
        let generation = self.begin();
        let response = self.inner.api.verify_email(token).await?;
        self.ensure_current(generation)?;

        let user = self.establish(generation, response.into_pair()).await?;
        self.close_auth_modal();
        Ok(user)
    }

    /// Sign out. Always succeeds locally.
    ///
    /// The remote logout call is best effort: its failure is logged and
    /// ignored, then the tokens and user are cleared unconditionally.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        let generation = self.begin();
        self.best_effort_remote_logout().await;

        self.inner.tokens.clear();
        self.inner.state.send_modify(|state| {
            state.user = None;
            state.is_authenticated = false;
        });
        debug!(generation, "Signed out");
    }

    /// Show the auth modal.
    pub fn open_auth_modal(&self) {
        self.inner
            .state
            .send_if_modified(|state| !std::mem::replace(&mut state.is_modal_open, true));
    }

    /// Hide the auth modal.
    pub fn close_auth_modal(&self) {
        self.inner
            .state
            .send_if_modified(|state| std::mem::replace(&mut state.is_modal_open, false));
    }

    async fn establish(&self, generation: u64, pair: CredentialPair) -> Result<UserProfile> {
        self.inner.tokens.set_pair(&pair);

        match self.inner.api.me().await {
            Ok(user) => {
                self.ensure_current(generation)?;
                info!(user = %user.id, "Session established");
                self.publish(generation, Some(user.clone()));
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "Could not load profile for new session");
                if self.is_current(generation) {
                    self.inner.tokens.clear();
                    self.publish(generation, None);
                }
                Err(AuthError::SessionHydration {
                    source: Box::new(e),
                }
                .into())
            }
        }
    }

    async fn best_effort_remote_logout(&self) {
        if let Err(e) = self.inner.api.logout().await {
            debug!(error = %e, "Remote logout failed, continuing locally");
        }
    }

    /// Recompute the cached flags from the token store, unless a newer
    /// operation owns the state.
    fn publish(&self, generation: u64, user: Option<UserProfile>) {
        if !self.is_current(generation) {
            debug!(generation, "Discarding stale session update");
            return;
        }

        let is_authenticated = self.inner.tokens.access_token().is_some();
        let user = user.filter(|_| is_authenticated);
        self.inner.state.send_modify(|state| {
            state.user = user;
            state.is_authenticated = is_authenticated;
        });
    }

    fn begin(&self) -> u64 {
        self.watch_tokens();
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.inner.generation.load(Ordering::SeqCst) == generation
    }

    fn ensure_current(&self, generation: u64) -> Result<()> {
        if self.is_current(generation) {
            Ok(())
        } else {
            Err(Error::Auth(AuthError::Superseded))
        }
    }

    /// Drop the session when the tokens disappear underneath it, which is
    /// how a failed refresh in the transport shows up here.
    fn watch_tokens(&self) {
        let Ok(runtime) = Handle::try_current() else {
            debug!("No runtime yet, token watcher deferred");
            return;
        };
        let Ok(mut watcher) = self.inner.watcher.lock() else {
            warn!("Session watcher lock poisoned");
            return;
        };
        if watcher.is_some() {
            return;
        }

        let mut rx = self.inner.tokens.subscribe();
        let weak: Weak<Inner<A>> = Arc::downgrade(&self.inner);
        *watcher = Some(runtime.spawn(async move {
            while rx.changed().await.is_ok() {
                let has_access = *rx.borrow_and_update();
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                if !has_access {
                    let dropped = inner.state.send_if_modified(|state| {
                        let was_signed_in = state.is_authenticated || state.user.is_some();
                        state.user = None;
                        state.is_authenticated = false;
                        was_signed_in
                    });
                    if dropped {
                        info!("Credentials cleared, session ended");
                    }
                }
            }
        }));
    }
}

impl<A: AuthApi> Drop for Inner<A> {
    fn drop(&mut self) {
        if let Ok(mut watcher) = self.watcher.lock()
            && let Some(handle) = watcher.take()
        {
            handle.abort();
        }
    }
}

impl<A: AuthApi> fmt::Debug for SessionController<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("SessionController")
            .field("user", &state.user.as_ref().map(|u| &u.id))
            .field("is_authenticated", &state.is_authenticated)
            .field("is_modal_open", &state.is_modal_open)
            .field("generation", &self.inner.generation.load(Ordering::SeqCst))
            .finish()
    }
}
