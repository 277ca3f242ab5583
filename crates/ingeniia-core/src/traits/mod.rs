//! Core traits for the auth service boundary.

mod auth_api;

pub use auth_api::AuthApi;
