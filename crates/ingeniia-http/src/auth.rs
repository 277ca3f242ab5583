//! Auth service facade.

use async_trait::async_trait;
use tracing::{debug, instrument};

use ingeniia_core::error::InvalidInputError;
use ingeniia_core::{
    AuthApi, BaseUrl, Credentials, MessageResponse, RegisterResponse, Result, TokenResponse,
    TokenStore, UserProfile,
};

use crate::client::{ApiClient, RequestOptions};
use crate::endpoints::*;

/// Captcha token accepted by development deployments of the auth service.
pub const DEV_CAPTCHA_TOKEN: &str = "dev";

/// Typed operations of the auth service.
///
/// Only shapes request bodies and response types; credentials, refresh and
/// error handling come from the [`ApiClient`].
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
    base: BaseUrl,
    captcha_token: String,
}

impl AuthService {
    /// Create the facade over a client. Requests go to the client's auth
    /// base URL.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::MissingAuthBase`] if the client was
    /// built without one.
    pub fn new(client: ApiClient) -> Result<Self> {
        let base = client
            .auth_base()
            .cloned()
            .ok_or(InvalidInputError::MissingAuthBase)?;
        Ok(Self {
            client,
            base,
            captcha_token: DEV_CAPTCHA_TOKEN.to_string(),
        })
    }

    /// Send this captcha token with `register` and `login`.
    pub fn with_captcha_token(mut self, token: impl Into<String>) -> Self {
        self.captcha_token = token.into();
        self
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

/// Username used when none is given: the local part of the email.
fn default_username(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(InvalidInputError::Empty { field }.into());
    }
    Ok(())
}

#[async_trait]
impl AuthApi for AuthService {
    fn tokens(&self) -> &TokenStore {
        self.client.tokens()
    }

    #[instrument(skip(self, password), fields(auth = %self.base))]
    async fn register(
        &self,
        email: &str,
        password: &str,
        username: Option<&str>,
    ) -> Result<RegisterResponse> {
        require("email", email)?;
        require("password", password)?;

        let username = username
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| default_username(email));
        debug!(username, "Registering account");

        let request = RegisterRequest {
            email,
            password,
            username,
            captcha_token: &self.captcha_token,
        };
        self.client
            .post(&self.base.endpoint(REGISTER), &request)
            .await
    }

    #[instrument(skip_all, fields(auth = %self.base))]
    async fn verify_email(&self, token: &str) -> Result<TokenResponse> {
        require("token", token)?;

        self.client
            .post(
                &self.base.endpoint(VERIFY_EMAIL),
                &VerifyEmailRequest { token },
            )
            .await
    }

    #[instrument(skip(self, credentials), fields(auth = %self.base, email = %credentials.email()))]
    async fn login(&self, credentials: &Credentials) -> Result<TokenResponse> {
        credentials.validate()?;

        let request = LoginRequest {
            email: credentials.email(),
            password: credentials.password(),
            captcha_token: &self.captcha_token,
        };
        self.client.post(&self.base.endpoint(LOGIN), &request).await
    }

    #[instrument(skip(self), fields(auth = %self.base))]
    async fn me(&self) -> Result<UserProfile> {
        self.client.get(&self.base.endpoint(ME)).await
    }

    #[instrument(skip(self), fields(auth = %self.base))]
    async fn logout(&self) -> Result<MessageResponse> {
        let response: Option<MessageResponse> = self
            .client
            .request(&self.base.endpoint(LOGOUT), RequestOptions::post())
            .await?;

        Ok(response.unwrap_or_else(|| MessageResponse {
            message: "logged out".to_string(),
        }))
    }
}
