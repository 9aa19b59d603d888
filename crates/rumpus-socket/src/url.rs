//! Service base URL handling.

use std::fmt;

use rumpus_core::error::Error;

/// A validated service base URL.
///
/// Accepts `http://` and `https://` bases; trailing slashes are
/// normalized away so path joins stay predictable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUrl(String);

impl ServiceUrl {
    /// Create a service URL, validating the scheme.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        if !s.starts_with("https://") && !s.starts_with("http://") {
            return Err(Error::InvalidInput {
                message: format!("service URL must be http(s): {}", s),
            });
        }
        Ok(Self(s.trim_end_matches('/').to_string()))
    }

    /// The base URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join an absolute API path onto the base.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }

    /// The websocket endpoint for the event stream.
    pub fn socket_url(&self, token: Option<&str>) -> String {
        let ws_base = self
            .0
            .replace("https://", "wss://")
            .replace("http://", "ws://");

        let mut url = format!("{}/socket.io/?EIO=3&transport=websocket", ws_base);
        if let Some(token) = token {
            url.push_str(&format!("&token={}", token));
        }
        url
    }
}

impl fmt::Display for ServiceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
