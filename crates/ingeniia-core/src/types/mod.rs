//! Validated configuration and request types.
//!
//! These types enforce their invariants at construction time, so an
//! invalid base URL or topic never reaches the HTTP layer.

mod base_url;
mod topic;

pub use base_url::BaseUrl;
pub use topic::Topic;
