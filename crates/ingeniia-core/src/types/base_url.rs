//! Service base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated base URL for one of the remote services (auth, content,
/// credit scoring).
///
/// Only `http` and `https` are accepted. Trailing slashes are dropped so
/// that [`BaseUrl::endpoint`] can always join with a single `/`.
///
/// # Example
///
/// ```
/// use ingeniia_core::BaseUrl;
///
/// let auth = BaseUrl::new("https://api.ingeniia.dev/auth/").unwrap();
/// assert_eq!(auth.endpoint("login"), "https://api.ingeniia.dev/auth/login");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl {
    url: Url,
    normalized: String,
}

impl BaseUrl {
    /// Create a new base URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse, is not http(s), or has
    /// no host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref().trim();
        let url = Url::parse(s).map_err(|e| InvalidInputError::BaseUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::BaseUrl {
                value: s.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }

        let normalized = url.as_str().trim_end_matches('/').to_string();
        Ok(Self { url, normalized })
    }

    /// Returns the full URL of an endpoint below this base.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.normalized, path.trim_start_matches('/'))
    }

    /// Returns a new base URL nested below this one (e.g. `{gateway}/auth`).
    pub fn nested(&self, segment: &str) -> Result<Self, Error> {
        Self::new(self.endpoint(segment))
    }

    /// Returns the base URL as a string, without a trailing slash.
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        if scheme != "https" && scheme != "http" {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: format!("unsupported scheme '{}'", scheme),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

impl FromStr for BaseUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.normalized)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BaseUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let base = BaseUrl::new("https://api.ingeniia.dev").unwrap();
        assert_eq!(base.host(), Some("api.ingeniia.dev"));
        assert_eq!(base.as_str(), "https://api.ingeniia.dev");
    }

    #[test]
    fn valid_http_url() {
        let base = BaseUrl::new("http://auth-service:8000").unwrap();
        assert_eq!(base.host(), Some("auth-service"));
    }

    #[test]
    fn endpoint_joins_with_single_slash() {
        let base = BaseUrl::new("https://api.ingeniia.dev/").unwrap();
        assert_eq!(base.endpoint("/me"), "https://api.ingeniia.dev/me");
        assert_eq!(base.endpoint("me"), "https://api.ingeniia.dev/me");
    }

    #[test]
    fn nested_keeps_path_prefix() {
        let gateway = BaseUrl::new("https://gw.ingeniia.dev/api").unwrap();
        let auth = gateway.nested("auth").unwrap();
        assert_eq!(auth.as_str(), "https://gw.ingeniia.dev/api/auth");
        assert_eq!(
            auth.endpoint("refresh"),
            "https://gw.ingeniia.dev/api/auth/refresh"
        );
    }

    #[test]
    fn invalid_scheme() {
        assert!(BaseUrl::new("ftp://files.ingeniia.dev").is_err());
        assert!(BaseUrl::new("file:///tmp/store").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(BaseUrl::new("/auth").is_err());
    }

    #[test]
    fn invalid_with_query() {
        assert!(BaseUrl::new("https://api.ingeniia.dev/?x=1").is_err());
    }
}
