//! Authentication primitives.
//!
//! Login credentials, the opaque token types, the stored
//! [`CredentialPair`] and the wire shapes returned by the auth service.

mod credentials;
mod responses;
mod tokens;

pub use credentials::Credentials;
pub use responses::{
    MessageResponse, RefreshTokenResponse, RegisterResponse, TokenResponse, UserProfile,
};
pub use tokens::{AccessToken, CredentialPair, RefreshToken};
