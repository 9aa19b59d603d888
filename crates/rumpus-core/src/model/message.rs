//! Chat traffic records: messages, notices, joins, handle changes.

use serde::Serialize;

use crate::error::SchemaMismatch;
use crate::hydrate::{Fields, Hydrate};
use crate::model::user::User;

/// A chat message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
}

impl Hydrate for Message {
    const NAME: &'static str = "Message";

    fn hydrate(f: &mut Fields) -> Result<Self, SchemaMismatch> {
        Ok(Self {
            message: f.required_str("message")?,
            handle: f.opt_str("handle")?,
            color: f.opt_str("color")?,
            user_id: f.opt_str("userId")?,
            timestamp: f.opt_str("timestamp")?,
            id: f.opt_str("id")?,
            sender: f.record("sender")?,
        })
    }
}

/// A service status notice shown in the chat column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_type: Option<String>,
}

impl Hydrate for Status {
    const NAME: &'static str = "Status";

    fn hydrate(f: &mut Fields) -> Result<Self, SchemaMismatch> {
        Ok(Self {
            message: f.required_str("message")?,
            timestamp: f.opt_str("timestamp")?,
            id: f.opt_str("id")?,
            notification_type: f.opt_str("notification_type")?,
        })
    }
}

/// A participant joined the room.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Join {
    pub user: User,
    pub room: String,
}

impl Hydrate for Join {
    const NAME: &'static str = "Join";

    fn hydrate(f: &mut Fields) -> Result<Self, SchemaMismatch> {
        Ok(Self {
            user: f.required_record("user")?,
            room: f.str_or("room", "")?,
        })
    }
}

/// A participant changed their handle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandleChange {
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub handle: String,
}

impl Hydrate for HandleChange {
    const NAME: &'static str = "HandleChange";

    fn hydrate(f: &mut Fields) -> Result<Self, SchemaMismatch> {
        Ok(Self {
            user_id: f.opt_str("userId")?,
            handle: f.required_str("handle")?,
        })
    }
}

/// A single-user roster update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateUserList {
    pub user: User,
}

impl Hydrate for UpdateUserList {
    const NAME: &'static str = "UpdateUserList";

    fn hydrate(f: &mut Fields) -> Result<Self, SchemaMismatch> {
        Ok(Self {
            user: f.required_record("user")?,
        })
    }
}

/// An error notice pushed by the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomError {
    pub context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Hydrate for RoomError {
    const NAME: &'static str = "RoomError";

    fn hydrate(f: &mut Fields) -> Result<Self, SchemaMismatch> {
        Ok(Self {
            context: f.required_str("context")?,
            message: f.opt_str("message")?,
            timestamp: f.opt_str("timestamp")?,
            modal: f.opt_str("modal")?,
            id: f.opt_str("id")?,
            error: f.opt_str("error")?,
        })
    }
}
