//! rumpus-socket - Websocket transport for the rumpus chat toolkit.
//!
//! Turns the service's socket.io-style frames into typed
//! [`RoomEvent`](rumpus_core::RoomEvent)s and provides the outbound
//! client plus the HTTP session bootstrap.

pub mod api;
pub mod socket;
pub mod url;
pub mod wire;

pub use api::ApiClient;
pub use socket::{JoinRequest, RoomClient, RoomSocket, connect};
pub use url::ServiceUrl;
