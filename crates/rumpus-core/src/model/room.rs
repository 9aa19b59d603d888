//! Room-level records: settings, topic, attributes, rosters, bans.

use serde::Serialize;

use crate::error::SchemaMismatch;
use crate::hydrate::{Fields, Hydrate};
use crate::model::user::User;

/// Room configuration.
///
/// Shares the wire key `settings` with [`UserSettings`]
/// (crate::model::UserSettings) but is a different schema; the enclosing
/// record decides which one hydrates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomSettings {
    pub public: bool,
    #[serde(rename = "modOnlyPlayMedia")]
    pub mod_only_play_media: bool,
    #[serde(rename = "forcePtt")]
    pub force_ptt: bool,
    #[serde(rename = "forceUser")]
    pub force_user: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(rename = "requiresPassword")]
    pub requires_password: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,
}

impl Hydrate for RoomSettings {
    const NAME: &'static str = "RoomSettings";

    fn hydrate(f: &mut Fields) -> Result<Self, SchemaMismatch> {
        Ok(Self {
            public: f.flag("public")?,
            mod_only_play_media: f.flag("modOnlyPlayMedia")?,
            force_ptt: f.flag("forcePtt")?,
            force_user: f.flag("forceUser")?,
            description: f.opt_str("description")?,
            display: f.opt_str("display")?,
            requires_password: f.flag("requiresPassword")?,
            topic: f.record("topic")?,
        })
    }
}

/// The room topic line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topic {
    pub text: String,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(rename = "updatedBy", skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<UpdatedBy>,
}

impl Hydrate for Topic {
    const NAME: &'static str = "Topic";

    fn hydrate(f: &mut Fields) -> Result<Self, SchemaMismatch> {
        Ok(Self {
            text: f.required_str("text")?,
            updated_at: f.opt_str("updatedAt")?,
            updated_by: f.record("updatedBy")?,
        })
    }
}

/// Who last changed the topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatedBy {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
}

impl Hydrate for UpdatedBy {
    const NAME: &'static str = "UpdatedBy";

    fn hydrate(f: &mut Fields) -> Result<Self, SchemaMismatch> {
        Ok(Self {
            id: f.required_str("_id")?,
            username: f.required_str("username")?,
        })
    }
}

/// Service-side room attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attrs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub janus_id: Option<i64>,
    pub fresh: bool,
    #[serde(rename = "ageRestricted")]
    pub age_restricted: bool,
}

impl Hydrate for Attrs {
    const NAME: &'static str = "Attrs";

    fn hydrate(f: &mut Fields) -> Result<Self, SchemaMismatch> {
        Ok(Self {
            owner: f.opt_str("owner")?,
            janus_id: f.opt_i64("janus_id")?,
            fresh: f.flag("fresh")?,
            age_restricted: f.flag("ageRestricted")?,
        })
    }
}

/// One entry in the room's ban list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BanListItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub handle: String,
    pub timestamp: String,
}

impl Hydrate for BanListItem {
    const NAME: &'static str = "BanListItem";

    fn hydrate(f: &mut Fields) -> Result<Self, SchemaMismatch> {
        Ok(Self {
            id: f.required_str("_id")?,
            handle: f.required_str("handle")?,
            timestamp: f.required_str("timestamp")?,
        })
    }
}

/// The room's ban list, in chronological order as sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banlist {
    pub list: Vec<BanListItem>,
}

impl Hydrate for Banlist {
    const NAME: &'static str = "Banlist";

    fn hydrate(f: &mut Fields) -> Result<Self, SchemaMismatch> {
        Ok(Self {
            list: f.list("list")?,
        })
    }
}

/// The room snapshot: identity, attributes, settings, and participants
/// in join order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserList {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<RoomSettings>,
    pub users: Vec<User>,
}

impl UserList {
    /// Look up a participant by handle.
    pub fn find(&self, handle: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|user| user.handle.as_deref() == Some(handle))
    }

    /// Insert or replace a participant, matching by `_id` first and
    /// handle second. New participants append, preserving join order.
    pub fn upsert(&mut self, user: User) {
        let slot = self.users.iter().position(|existing| {
            (user.id.is_some() && existing.id == user.id)
                || (user.handle.is_some() && existing.handle == user.handle)
        });
        match slot {
            Some(i) => self.users[i] = user,
            None => self.users.push(user),
        }
    }
}

impl Hydrate for UserList {
    const NAME: &'static str = "UserList";

    fn hydrate(f: &mut Fields) -> Result<Self, SchemaMismatch> {
        Ok(Self {
            id: f.opt_str("_id")?,
            name: f.opt_str("name")?,
            attrs: f.record("attrs")?,
            settings: f.record("settings")?,
            users: f.list_or_empty("users")?,
        })
    }
}
