//! Outbound message trait.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::Result;

/// The sending half of a room connection.
///
/// Implemented by the socket client; the command layer depends on this
/// seam so replies can be captured in tests.
#[async_trait]
pub trait Outbound: Send + Sync {
    /// Emit a raw wire event.
    async fn send_event(&self, name: &str, payload: Value) -> Result<()>;

    /// Say something in the room.
    async fn send_message(&self, room: &str, text: &str) -> Result<()> {
        self.send_event("room::message", json!({ "message": text, "room": room }))
            .await
    }

    /// Change the client's handle.
    async fn change_handle(&self, handle: &str) -> Result<()> {
        self.send_event("room::handleChange", json!({ "handle": handle }))
            .await
    }
}

#[async_trait]
impl<T: Outbound + ?Sized> Outbound for std::sync::Arc<T> {
    async fn send_event(&self, name: &str, payload: Value) -> Result<()> {
        (**self).send_event(name, payload).await
    }
}
