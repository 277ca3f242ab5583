//! Wire shapes returned by the auth service.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::tokens::{AccessToken, CredentialPair, RefreshToken};

/// A plain `{ "message": ... }` confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response from `POST /register`. The account stays unauthenticated until
/// the email is verified.
pub type RegisterResponse = MessageResponse;

/// Response from `POST /login` and `POST /verify-email`.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl TokenResponse {
    /// Converts the response into the pair the token store persists.
    pub fn into_pair(self) -> CredentialPair {
        CredentialPair::new(
            AccessToken::new(self.access_token),
            RefreshToken::new(self.refresh_token),
        )
    }
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Response from `POST /refresh`. Refresh tokens are not rotated, so only
/// a new access token comes back.
#[derive(Clone, Deserialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl fmt::Debug for RefreshTokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshTokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// The signed-in user, as returned by `GET /me`.
///
/// Never constructed locally; owned by the session once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

impl UserProfile {
    /// Name to greet the user with: the username if set, the email otherwise.
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.email)
    }
}
