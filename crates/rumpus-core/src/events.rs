//! Typed room events and the event-name router.

use serde_json::Value;

use crate::error::SchemaMismatch;
use crate::hydrate::{FieldPath, from_list, from_value};
use crate::model::{
    Banlist, HandleChange, Join, Message, PlayVideo, PlaylistItem, RoomError, Status,
    UpdateUserList, UserList,
};

/// A typed event from the room stream.
#[derive(Debug, Clone)]
pub enum RoomEvent {
    /// A chat message.
    Message(Message),

    /// A status notice.
    Status(Status),

    /// A participant joined.
    Join(Join),

    /// The full room snapshot.
    UserList(UserList),

    /// A single-participant roster update.
    UpdateUserList(UpdateUserList),

    /// A participant changed handle.
    HandleChange(HandleChange),

    /// The room's ban list.
    Banlist(Banlist),

    /// The media playlist changed.
    PlaylistUpdate(Vec<PlaylistItem>),

    /// Media started playing.
    PlayVideo(PlayVideo),

    /// An error notice from the service.
    Error(RoomError),

    /// An event name this catalog does not know.
    Unknown { kind: String },
}

impl RoomEvent {
    /// Route a wire event to its record type and hydrate the payload.
    ///
    /// Unrecognized event names yield [`RoomEvent::Unknown`] — new
    /// server events must not break existing clients. A payload that
    /// fails hydration yields the mismatch; callers skip the event and
    /// keep their loop alive.
    pub fn from_wire(name: &str, payload: Value) -> Result<Self, SchemaMismatch> {
        let event = match name {
            "room::message" => Self::Message(from_value(payload, FieldPath::root("message"))?),
            "room::status" => Self::Status(from_value(payload, FieldPath::root("status"))?),
            "room::join" => Self::Join(from_value(payload, FieldPath::root("join"))?),
            "room::userList" => Self::UserList(from_value(payload, FieldPath::root("room"))?),
            "room::updateUserList" => {
                Self::UpdateUserList(from_value(payload, FieldPath::root("updateUserList"))?)
            }
            "room::handleChange" => {
                Self::HandleChange(from_value(payload, FieldPath::root("handleChange"))?)
            }
            "room::banlist" => Self::Banlist(from_value(payload, FieldPath::root("banlist"))?),
            "youtube::playlistUpdate" => {
                Self::PlaylistUpdate(from_list(payload, &FieldPath::root("playlistUpdate"))?)
            }
            "youtube::play" => Self::PlayVideo(from_value(payload, FieldPath::root("play"))?),
            "room::error" => Self::Error(from_value(payload, FieldPath::root("error"))?),
            other => Self::Unknown {
                kind: other.to_string(),
            },
        };

        Ok(event)
    }

    /// A short label for logs and the watch output.
    pub fn kind(&self) -> &str {
        match self {
            RoomEvent::Message(_) => "message",
            RoomEvent::Status(_) => "status",
            RoomEvent::Join(_) => "join",
            RoomEvent::UserList(_) => "userList",
            RoomEvent::UpdateUserList(_) => "updateUserList",
            RoomEvent::HandleChange(_) => "handleChange",
            RoomEvent::Banlist(_) => "banlist",
            RoomEvent::PlaylistUpdate(_) => "playlistUpdate",
            RoomEvent::PlayVideo(_) => "playVideo",
            RoomEvent::Error(_) => "error",
            RoomEvent::Unknown { kind } => kind,
        }
    }
}
