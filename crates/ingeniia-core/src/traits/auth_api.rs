//! Auth service trait.

use async_trait::async_trait;

use crate::Result;
use crate::auth::{Credentials, MessageResponse, RegisterResponse, TokenResponse, UserProfile};
use crate::store::TokenStore;

/// Typed operations of the remote auth service.
///
/// Implementations only shape request bodies and response types;
/// headers, refresh and error normalization belong to the transport
/// underneath.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Returns the token store the transport reads credentials from.
    fn tokens(&self) -> &TokenStore;

    /// Create an account. It stays unauthenticated until the email is verified.
    async fn register(
        &self,
        email: &str,
        password: &str,
        username: Option<&str>,
    ) -> Result<RegisterResponse>;

    /// Exchange an email verification token for a fresh credential pair.
    async fn verify_email(&self, token: &str) -> Result<TokenResponse>;

    /// Exchange credentials for a fresh credential pair.
    async fn login(&self, credentials: &Credentials) -> Result<TokenResponse>;

    /// Fetch the profile of the signed-in user.
    async fn me(&self) -> Result<UserProfile>;

    /// Invalidate the session on the server.
    async fn logout(&self) -> Result<MessageResponse>;
}
