//! HTTP client with credential injection and refresh-on-401.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, info, instrument, trace, warn};

use ingeniia_core::auth::RefreshTokenResponse;
use ingeniia_core::error::{ApiError, Error, InvalidInputError, TransportError};
use ingeniia_core::{AccessToken, BaseUrl, Result, TokenStore};

use crate::endpoints::{REFRESH, RefreshRequest};

/// Body of an outbound request.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Serialized to JSON before sending.
    Json(Value),
    /// Sent verbatim.
    Text(String),
}

impl RequestBody {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            RequestBody::Json(value) => serde_json::to_vec(value).map_err(|e| {
                InvalidInputError::Other {
                    message: format!("request body is not serializable: {}", e),
                }
                .into()
            }),
            RequestBody::Text(text) => Ok(text.clone().into_bytes()),
        }
    }
}

/// Per-call request description: method, extra headers and body.
///
/// Built fresh for every call and never persisted.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    /// Attach a body that will be serialized as JSON.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| InvalidInputError::Other {
            message: format!("request body is not serializable: {}", e),
        })?;
        self.body = Some(RequestBody::Json(value));
        Ok(self)
    }

    /// Attach a body that is sent as-is.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self
    }

    /// Add a header. Caller headers override the client defaults.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let invalid = || InvalidInputError::Header {
            name: name.to_string(),
        };
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        self.headers.append(name, value);
        Ok(self)
    }
}

/// Builder for [`ApiClient`].
#[derive(Debug)]
pub struct ApiClientBuilder {
    tokens: TokenStore,
    auth: Option<BaseUrl>,
    timeout: Option<Duration>,
    user_agent: String,
}

impl ApiClientBuilder {
    /// Start a client over `tokens`. Without an [`auth`](Self::auth) base
    /// the client never refreshes.
    pub fn new(tokens: TokenStore) -> Self {
        Self {
            tokens,
            auth: None,
            timeout: None,
            user_agent: concat!("ingeniia/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Refresh tokens against this auth service.
    pub fn auth(mut self, auth: BaseUrl) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Abort requests that take longer than `timeout`. Unset by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(transport_error)?;

        Ok(ApiClient {
            http,
            refresh_url: self.auth.as_ref().map(|auth| auth.endpoint(REFRESH)),
            auth: self.auth,
            tokens: self.tokens,
        })
    }
}

/// The single choke point for outbound requests.
///
/// Only this type attaches credentials or triggers a refresh. A call that
/// comes back 401 is retried at most once, after exchanging the stored
/// refresh token for a new access token; the attempt counter is local to
/// the call.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    tokens: TokenStore,
    auth: Option<BaseUrl>,
    refresh_url: Option<String>,
}

impl ApiClient {
    /// Create a client that refreshes tokens against `auth`.
    pub fn new(tokens: TokenStore, auth: BaseUrl) -> Result<Self> {
        Self::builder(tokens, auth).build()
    }

    pub fn builder(tokens: TokenStore, auth: BaseUrl) -> ApiClientBuilder {
        ApiClientBuilder::new(tokens).auth(auth)
    }

    /// Returns the token store credentials are read from.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Returns the auth service base URL, if the client has one.
    pub fn auth_base(&self) -> Option<&BaseUrl> {
        self.auth.as_ref()
    }

    /// `GET` an endpoint and decode the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.request(endpoint, RequestOptions::get()).await
    }

    /// `POST` a JSON body and decode the JSON response.
    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(endpoint, RequestOptions::post().json(body)?).await
    }

    /// Send a request and decode the JSON response.
    ///
    /// A 204 response decodes `T` from JSON `null` without reading the
    /// body, so use `Option<_>`, `()` or [`Value`] for endpoints that may
    /// answer with no content.
    ///
    /// # Errors
    ///
    /// - [`Error::Api`] for any non-2xx status, carrying the status and the
    ///   parsed error payload
    /// - [`Error::Transport`] when the server could not be reached or the
    ///   response body was malformed
    #[instrument(skip(self, options), fields(method = %options.method))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let result = self.execute(endpoint, &options).await;
        if let Err(e) = &result {
            warn!(endpoint, error = %e, "API request failed");
        }
        result
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<T> {
        let body = options
            .body
            .as_ref()
            .map(RequestBody::to_bytes)
            .transpose()?;

        let mut attempt = 0u8;
        loop {
            let response = self.send(endpoint, options, body.clone()).await?;

            if response.status() == StatusCode::UNAUTHORIZED && attempt == 0 {
                debug!("Access token rejected, attempting refresh");
                if self.refresh_access_token().await?.is_some() {
                    attempt += 1;
                    continue;
                }
            }

            return handle_response(response).await;
        }
    }

    async fn send(
        &self,
        endpoint: &str,
        options: &RequestOptions,
        body: Option<Vec<u8>>,
    ) -> Result<reqwest::Response> {
        let headers = self.build_headers(&options.headers)?;
        debug!(endpoint, "Sending request");

        let mut request = self
            .http
            .request(options.method.clone(), endpoint)
            .headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        request.send().await.map_err(transport_error)
    }

    /// Default content type, bearer token when one is stored, then the
    /// caller's headers on top.
    fn build_headers(&self, custom: &HeaderMap) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.tokens.access_token() {
            headers.insert(AUTHORIZATION, bearer(&token)?);
        }

        for name in custom.keys() {
            headers.remove(name);
        }
        for (name, value) in custom {
            headers.append(name.clone(), value.clone());
        }

        Ok(headers)
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Returns `Ok(None)` when there is no refresh token or the auth
    /// service rejects it; the stored credentials are cleared in both
    /// cases. The refresh token itself is kept on success.
    ///
    /// A client built without an auth base returns `Ok(None)` and leaves
    /// the stored credentials alone.
    #[instrument(skip(self))]
    pub async fn refresh_access_token(&self) -> Result<Option<AccessToken>> {
        let Some(refresh_url) = &self.refresh_url else {
            debug!("No auth service configured, not refreshing");
            return Ok(None);
        };
        let Some(refresh) = self.tokens.refresh_token() else {
            debug!("No refresh token stored, clearing credentials");
            self.tokens.clear();
            return Ok(None);
        };

        let response = self
            .http
            .post(refresh_url)
            .header(CONTENT_TYPE, "application/json")
            .json(&RefreshRequest {
                refresh_token: refresh.as_str(),
            })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            info!(%status, "Refresh rejected, clearing credentials");
            self.tokens.clear();
            return Ok(None);
        }

        let refreshed = response
            .json::<RefreshTokenResponse>()
            .await
            .ok()
            .filter(|r| !r.access_token.is_empty());

        match refreshed {
            Some(refreshed) => {
                let access = AccessToken::new(refreshed.access_token);
                self.tokens.set(Some(&access), Some(&refresh));
                debug!(expires_in = ?refreshed.expires_in, "Access token refreshed");
                Ok(Some(access))
            }
            None => {
                warn!("Refresh response carried no access token, clearing credentials");
                self.tokens.clear();
                Ok(None)
            }
        }
    }
}

fn bearer(token: &AccessToken) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str())).map_err(|_| {
        InvalidInputError::Header {
            name: AUTHORIZATION.to_string(),
        }
    })?;
    value.set_sensitive(true);
    Ok(value)
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    trace!(%status, "API response");

    if !status.is_success() {
        return Err(parse_error_response(response).await.into());
    }

    if status == StatusCode::NO_CONTENT {
        return serde_json::from_value(Value::Null).map_err(|e| {
            TransportError::Decode {
                message: format!("no content for a non-optional result: {}", e),
            }
            .into()
        });
    }

    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|e| {
        TransportError::Decode {
            message: e.to_string(),
        }
        .into()
    })
}

/// Parse an error payload, falling back to the status text when the body
/// is not JSON.
async fn parse_error_response(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let status_text = status.canonical_reason().unwrap_or_default();

    match response.bytes().await {
        Ok(bytes) => match serde_json::from_slice::<Value>(&bytes) {
            Ok(data) => ApiError::new(status.as_u16(), data),
            Err(_) => ApiError::from_status_text(status.as_u16(), status_text),
        },
        Err(_) => ApiError::from_status_text(status.as_u16(), status_text),
    }
}

pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else if err.is_decode() {
        TransportError::Decode {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}
