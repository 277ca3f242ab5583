//! Endpoint paths and request bodies.

use serde::Serialize;

// ============================================================================
// Auth service
// ============================================================================

pub const REGISTER: &str = "register";
pub const VERIFY_EMAIL: &str = "verify-email";
pub const LOGIN: &str = "login";
pub const ME: &str = "me";
pub const LOGOUT: &str = "logout";
pub const REFRESH: &str = "refresh";

// ============================================================================
// Content and scoring services
// ============================================================================

pub const VIDEOS_BY_TOPIC: &str = "videos/topic";
pub const SNIPPETS_BY_TOPIC: &str = "snippets/topic";
pub const PREDICT: &str = "v1/predict";

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub username: &'a str,
    pub captcha_token: &'a str,
}

#[derive(Debug, Serialize)]
pub struct VerifyEmailRequest<'a> {
    pub token: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub captcha_token: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}
