//! ingeniia-core - Core types, token storage and session state.
//!
//! Everything that does not touch the network lives here: the credential
//! types, the error taxonomy, the [`TokenStore`] and the
//! [`SessionController`] that UI consumers observe. HTTP-backed
//! implementations of [`AuthApi`] live in `ingeniia-http`.

pub mod auth;
pub mod content;
pub mod error;
pub mod session;
pub mod store;
pub mod traits;
pub mod types;

pub use auth::{
    AccessToken, CredentialPair, Credentials, MessageResponse, RefreshToken, RegisterResponse,
    TokenResponse, UserProfile,
};
pub use error::Error;
pub use session::{SessionController, SessionState};
pub use store::{KeyValueStore, MemoryStore, TokenStore};
pub use traits::AuthApi;
pub use types::{BaseUrl, Topic};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
