//! Service locations and token storage, from flags or the environment.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use directories::ProjectDirs;
use tracing::debug;

use ingeniia_core::{BaseUrl, SessionController, TokenStore};
use ingeniia_http::{
    ApiClient, ApiClientBuilder, AuthService, ContentService, CreditScoringService,
    DEV_CAPTCHA_TOKEN,
};
use ingeniia_store::FileStore;

/// File name of the token store inside the data directory.
const TOKEN_FILE: &str = "tokens.json";

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Auth service base URL
    #[arg(long, env = "INGENIIA_AUTH_URL", global = true)]
    pub auth_url: Option<String>,

    /// API gateway base URL; the auth service defaults to `<gateway>/auth`
    #[arg(long, env = "INGENIIA_GATEWAY_URL", global = true)]
    pub gateway_url: Option<String>,

    /// Content service base URL
    #[arg(long, env = "INGENIIA_CONTENT_URL", global = true)]
    pub content_url: Option<String>,

    /// Credit-scoring service base URL
    #[arg(long, env = "INGENIIA_SCORING_URL", global = true)]
    pub scoring_url: Option<String>,

    /// Token file [default: tokens.json in the platform data directory]
    #[arg(long, env = "INGENIIA_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Captcha token sent with register and login
    #[arg(long, env = "INGENIIA_CAPTCHA_TOKEN", default_value = DEV_CAPTCHA_TOKEN, global = true)]
    pub captcha_token: String,

    /// Request timeout in seconds [default: none]
    #[arg(long, env = "INGENIIA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl ConfigArgs {
    /// Auth service URL: `--auth-url`, else `<gateway>/auth`.
    pub fn auth_base(&self) -> Result<BaseUrl> {
        if let Some(url) = &self.auth_url {
            return BaseUrl::new(url).context("Invalid auth service URL");
        }

        let gateway = self.gateway_url.as_deref().context(
            "No auth service configured. Pass --auth-url or --gateway-url \
             (or set INGENIIA_AUTH_URL / INGENIIA_GATEWAY_URL).",
        )?;
        BaseUrl::new(gateway)
            .and_then(|gateway| gateway.nested("auth"))
            .context("Invalid gateway URL")
    }

    pub fn content_base(&self) -> Result<BaseUrl> {
        let url = self.content_url.as_deref().context(
            "No content service configured. Pass --content-url (or set INGENIIA_CONTENT_URL).",
        )?;
        BaseUrl::new(url).context("Invalid content service URL")
    }

    pub fn scoring_base(&self) -> Result<BaseUrl> {
        let url = self.scoring_url.as_deref().context(
            "No credit-scoring service configured. Pass --scoring-url (or set INGENIIA_SCORING_URL).",
        )?;
        BaseUrl::new(url).context("Invalid credit-scoring service URL")
    }

    /// Location of the token file.
    pub fn store_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.store {
            return Ok(path.clone());
        }

        let dirs = ProjectDirs::from("", "", "ingeniia")
            .context("Could not determine data directory")?;
        Ok(dirs.data_dir().join(TOKEN_FILE))
    }

    pub fn token_store(&self) -> Result<TokenStore> {
        let path = self.store_path()?;
        debug!(path = %path.display(), "Using token file");
        Ok(TokenStore::new(Arc::new(FileStore::new(path))))
    }

    fn has_auth(&self) -> bool {
        self.auth_url.is_some() || self.gateway_url.is_some()
    }

    fn client_builder(&self) -> Result<ApiClientBuilder> {
        let mut builder = ApiClientBuilder::new(self.token_store()?);
        if let Some(secs) = self.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder)
    }

    /// Client that refreshes against the auth service, which must be
    /// configured.
    pub fn api_client(&self) -> Result<ApiClient> {
        self.client_builder()?
            .auth(self.auth_base()?)
            .build()
            .context("Failed to build HTTP client")
    }

    /// Client for public endpoints. Refreshes only when an auth service is
    /// configured.
    pub fn public_api_client(&self) -> Result<ApiClient> {
        if self.has_auth() {
            return self.api_client();
        }
        self.client_builder()?
            .build()
            .context("Failed to build HTTP client")
    }

    pub fn auth_service(&self) -> Result<AuthService> {
        let auth = AuthService::new(self.api_client()?)?;
        Ok(auth.with_captcha_token(&self.captcha_token))
    }

    pub fn session(&self) -> Result<SessionController<AuthService>> {
        Ok(SessionController::new(self.auth_service()?))
    }

    pub fn content_service(&self) -> Result<ContentService> {
        Ok(ContentService::new(self.public_api_client()?, self.content_base()?))
    }

    pub fn scoring_service(&self) -> Result<CreditScoringService> {
        Ok(CreditScoringService::new(self.public_api_client()?, self.scoring_base()?))
    }
}
