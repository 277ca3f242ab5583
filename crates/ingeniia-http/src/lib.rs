//! ingeniia-http - HTTP clients for the ingeniia services.
//!
//! [`ApiClient`] is the single choke point for outbound requests: it
//! attaches credentials from the token store, normalizes errors and
//! refreshes the access token once when a request comes back 401. The
//! services in this crate are thin typed surfaces on top of it.
//!
//! # Example
//!
//! ```no_run
//! use ingeniia_core::{BaseUrl, Credentials, SessionController, TokenStore};
//! use ingeniia_http::{ApiClient, AuthService};
//!
//! # async fn example() -> Result<(), ingeniia_core::Error> {
//! let auth_url = BaseUrl::new("https://api.ingeniia.dev/auth")?;
//! let client = ApiClient::new(TokenStore::in_memory(), auth_url)?;
//! let session = SessionController::new(AuthService::new(client)?);
//!
//! session.init().await;
//! let user = session
//!     .login(&Credentials::new("ada@example.com", "app-password"))
//!     .await?;
//! println!("Signed in as {}", user.display_name());
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod content;
mod endpoints;
mod scoring;

pub use auth::{AuthService, DEV_CAPTCHA_TOKEN};
pub use client::{ApiClient, ApiClientBuilder, RequestBody, RequestOptions};
pub use content::ContentService;
pub use scoring::CreditScoringService;
