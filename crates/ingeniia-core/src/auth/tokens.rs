//! Token types.
//!
//! Both tokens are opaque strings issued by the auth service. The client
//! never parses or inspects them.

use std::fmt;

/// An access token sent as `Authorization: Bearer <token>`.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value.
    ///
    /// # Security
    ///
    /// Use only when constructing authorization headers or persisting.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// A refresh token exchanged for a new access token.
///
/// Refresh tokens are not rotated: a successful refresh keeps the
/// existing one.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Create a new refresh token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

/// The stored (access, refresh) tuple.
///
/// Always written and cleared as a whole, never merged field by field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CredentialPair {
    pub access: Option<AccessToken>,
    pub refresh: Option<RefreshToken>,
}

impl CredentialPair {
    /// Create a pair with both tokens present.
    pub fn new(access: AccessToken, refresh: RefreshToken) -> Self {
        Self {
            access: Some(access),
            refresh: Some(refresh),
        }
    }

    /// An empty pair, as left behind by logout or a failed refresh.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when an access token is present.
    pub fn has_access(&self) -> bool {
        self.access.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_hides_value_in_debug() {
        let token = AccessToken::new("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("eyJ"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn pair_debug_hides_both_tokens() {
        let pair = CredentialPair::new(AccessToken::new("acc-123"), RefreshToken::new("ref-456"));
        let debug = format!("{:?}", pair);
        assert!(!debug.contains("acc-123"));
        assert!(!debug.contains("ref-456"));
    }

    #[test]
    fn empty_pair_has_no_access() {
        assert!(!CredentialPair::empty().has_access());
    }
}
