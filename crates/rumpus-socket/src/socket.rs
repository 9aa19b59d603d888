//! The room websocket: event stream and outbound client.

use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures_util::{SinkExt, Stream, StreamExt};
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};
use tracing::{debug, error, info, trace, warn};

use rumpus_core::error::{Error, TransportError};
use rumpus_core::traits::Outbound;
use rumpus_core::{Result, RoomEvent};

use crate::url::ServiceUrl;
use crate::wire::{self, Packet};

/// What to join once the namespace connect is acknowledged.
#[derive(Debug, Clone)]
pub struct JoinRequest {
    pub room: String,
    pub handle: Option<String>,
}

/// The sending half of a room connection.
///
/// Cheap to clone; all clones feed the same writer task.
#[derive(Debug, Clone)]
pub struct RoomClient {
    tx: mpsc::Sender<String>,
}

impl RoomClient {
    async fn send_frame(&self, frame: String) -> Result<()> {
        self.tx
            .send(frame)
            .await
            .map_err(|_| Error::Transport(TransportError::Closed))
    }
}

#[async_trait]
impl Outbound for RoomClient {
    async fn send_event(&self, name: &str, payload: Value) -> Result<()> {
        trace!(name, "sending event");
        self.send_frame(wire::encode_event(name, &payload)).await
    }
}

/// The receiving half of a room connection: a stream of typed events.
///
/// Schema mismatches are yielded as `Err` items and the stream keeps
/// going; one malformed payload never tears the connection down.
pub struct RoomSocket {
    inner: Pin<Box<dyn Stream<Item = Result<RoomEvent>> + Send>>,
}

impl RoomSocket {
    fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<RoomEvent>> + Send + 'static,
    {
        Self {
            inner: Box::pin(stream),
        }
    }
}

impl Stream for RoomSocket {
    type Item = Result<RoomEvent>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

/// Connect to the service and join a room.
///
/// Returns the outbound client and the event stream. A writer task owns
/// the websocket sink; the stream half answers pings and performs the
/// join handshake when the namespace connect is acknowledged.
pub async fn connect(
    url: &ServiceUrl,
    token: Option<&str>,
    join: JoinRequest,
) -> Result<(RoomClient, RoomSocket)> {
    let ws_url = url.socket_url(token);
    info!(url = %ws_url, room = %join.room, "connecting to room socket");

    let (ws_stream, _) = connect_async(&ws_url).await.map_err(|e| {
        Error::Transport(TransportError::Connection {
            message: e.to_string(),
        })
    })?;

    debug!("websocket connected, awaiting handshake");

    let (mut write, mut read) = ws_stream.split();

    let (tx, mut rx) = mpsc::channel::<String>(64);
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if let Err(e) = write.send(WsMessage::text(frame)).await {
                warn!(error = %e, "failed to write frame, stopping writer");
                break;
            }
        }
    });

    let client = RoomClient { tx };
    let pump = client.clone();

    let stream = async_stream::stream! {
        while let Some(msg) = read.next().await {
            match msg {
                Ok(WsMessage::Text(text)) => {
                    match wire::decode(&text) {
                        Ok(Packet::Event { name, payload }) => {
                            match RoomEvent::from_wire(&name, payload) {
                                Ok(event) => yield Ok(event),
                                Err(mismatch) => yield Err(Error::Schema(mismatch)),
                            }
                        }
                        Ok(Packet::Ping) => {
                            trace!("ping");
                            if pump.send_frame("3".to_string()).await.is_err() {
                                break;
                            }
                        }
                        Ok(Packet::Open(handshake)) => {
                            debug!(?handshake, "handshake received");
                        }
                        Ok(Packet::ConnectAck) => {
                            debug!(room = %join.room, "namespace connected, joining room");
                            let mut payload = json!({ "room": join.room });
                            if let Some(ref handle) = join.handle {
                                payload["handle"] = json!(handle);
                            }
                            if pump.send_event("room::join", payload).await.is_err() {
                                break;
                            }
                        }
                        Ok(Packet::Close) => {
                            info!("close packet from server");
                            break;
                        }
                        Ok(Packet::Pong) | Ok(Packet::Noop) => {}
                        Err(e) => {
                            // Framing noise is survivable; report and move on.
                            yield Err(Error::Protocol(e));
                        }
                    }
                }
                Ok(WsMessage::Ping(_)) => {
                    // tungstenite queues the pong on the next write.
                    trace!("websocket ping");
                }
                Ok(WsMessage::Close(frame)) => {
                    info!(?frame, "websocket closed by server");
                    break;
                }
                Ok(_) => {
                    trace!("ignoring non-text frame");
                }
                Err(e) => {
                    error!(error = %e, "websocket error");
                    yield Err(Error::Transport(TransportError::Connection {
                        message: e.to_string(),
                    }));
                    break;
                }
            }
        }
    };

    Ok((client, RoomSocket::new(stream)))
}
