//! HTTP API client for session bootstrap.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use rumpus_core::Result;
use rumpus_core::error::{Error, ProtocolError, TransportError};
use rumpus_core::hydrate::{FieldPath, from_value};
use rumpus_core::model::Session;

use crate::url::ServiceUrl;

/// Endpoint serving the socket session token.
const SESSION_ENDPOINT: &str = "/api/user/session";

/// Error body shape returned by the HTTP API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the service API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: ServiceUrl,
}

impl ApiClient {
    /// Create a new API client for the given service base URL.
    pub fn new(base: ServiceUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("rumpus/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, base }
    }

    /// Returns the base URL this client is configured for.
    pub fn base(&self) -> &ServiceUrl {
        &self.base
    }

    /// Fetch a session token (and the caller's user record, if any).
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn fetch_session(&self) -> Result<Session> {
        let url = self.base.api_url(SESSION_ENDPOINT);
        debug!(%url, "fetching session");

        let response = self.client.get(&url).send().await.map_err(map_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let error = parse_error_response(response).await;
            return Err(Error::Protocol(error));
        }

        let payload: Value = response.json().await.map_err(map_reqwest)?;
        let session = from_value::<Session>(payload, FieldPath::root("session"))?;
        Ok(session)
    }
}

fn map_reqwest(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout { duration_ms: 0 }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

async fn parse_error_response(response: reqwest::Response) -> ProtocolError {
    let status = response.status().as_u16();

    match response.json::<ApiErrorBody>().await {
        Ok(body) => ProtocolError::Api {
            status,
            message: body.message.or(body.error),
        },
        Err(_) => ProtocolError::Api {
            status,
            message: None,
        },
    }
}
