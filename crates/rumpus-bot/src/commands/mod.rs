//! Subcommand implementations.

pub mod run;
pub mod watch;

use anyhow::{Context, Result};
use tracing::warn;

use rumpus_socket::{ApiClient, JoinRequest, RoomClient, RoomSocket, ServiceUrl, connect};

/// Fetch a session token and open the room socket.
///
/// A failed session fetch downgrades to an anonymous connection rather
/// than aborting; the service accepts guests.
pub async fn open_room(
    url: &str,
    room: &str,
    handle: Option<String>,
    anonymous: bool,
) -> Result<(RoomClient, RoomSocket)> {
    let url = ServiceUrl::new(url).context("invalid service URL")?;

    let token = if anonymous {
        None
    } else {
        let api = ApiClient::new(url.clone());
        match api.fetch_session().await {
            Ok(session) => Some(session.token),
            Err(e) => {
                warn!(error = %e, "session fetch failed, connecting anonymously");
                None
            }
        }
    };

    let join = JoinRequest {
        room: room.to_string(),
        handle,
    };

    connect(&url, token.as_deref(), join)
        .await
        .context("failed to open room socket")
}
