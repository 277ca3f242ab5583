//! Error types for the ingeniia client toolkit.
//!
//! This module provides a unified error type with explicit variants for
//! transport, server-side (API), authentication, input validation and
//! storage errors. "The server said no" ([`ApiError`]) and "we could not
//! reach the server" ([`TransportError`]) are always distinct variants.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Message used when an error payload carries no `detail` string.
const GENERIC_API_MESSAGE: &str = "the request failed";

/// The unified error type for ingeniia operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, connection, malformed response).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server responded with a non-2xx status.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Authentication errors raised locally (no session, failed hydration).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Input validation errors (bad URL, empty credential, out of range field).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Durable key-value store faults.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl Error {
    /// Returns the API error if the server rejected the request.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the HTTP status if the server rejected the request.
    pub fn status(&self) -> Option<u16> {
        self.as_api().map(|err| err.status)
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// The response body could not be decoded.
    #[error("malformed response: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-2xx response from a remote service.
///
/// `data` holds the parsed JSON error payload, or `{"detail": <status text>}`
/// when the body was not JSON.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Human-readable message derived from the payload.
    pub message: String,
    /// Parsed error payload.
    pub data: Value,
}

impl ApiError {
    /// Create a new API error from a status and its parsed payload.
    pub fn new(status: u16, data: Value) -> Self {
        let detail = data
            .get("detail")
            .and_then(Value::as_str)
            .filter(|d| !d.is_empty())
            .unwrap_or(GENERIC_API_MESSAGE);
        let message = format!("Error {}: {}", status, detail);
        Self {
            status,
            message,
            data,
        }
    }

    /// Create an API error for a body that was not JSON.
    pub fn from_status_text(status: u16, status_text: &str) -> Self {
        Self::new(status, serde_json::json!({ "detail": status_text }))
    }

    /// Check if this is an authorization failure.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

/// Authentication-related errors raised on the client side.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No access token is stored.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Tokens were accepted but the user profile could not be loaded.
    #[error("could not load the user profile for the new session")]
    SessionHydration {
        #[source]
        source: Box<Error>,
    },

    /// The session changed while the operation was in flight.
    #[error("session changed while the operation was in flight")]
    Superseded,
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid service base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// A required field was empty.
    #[error("'{field}' must not be empty")]
    Empty { field: &'static str },

    /// A field was outside its permitted range.
    #[error("'{field}' out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },

    /// A header name or value could not be encoded.
    #[error("invalid header '{name}'")]
    Header { name: String },

    /// Unknown topic name.
    #[error("unknown topic '{value}'")]
    Topic { value: String },

    /// An auth operation on a client built without an auth base URL.
    #[error("no auth service base URL configured")]
    MissingAuthBase,

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

/// Key-value store faults.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document could not be read or written as JSON.
    #[error("corrupt store: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A lock guarding the store was poisoned.
    #[error("store lock poisoned")]
    Poisoned,
}
