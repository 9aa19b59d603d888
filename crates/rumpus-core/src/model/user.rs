//! User records and role resolution.

use serde::Serialize;
use serde_json::Value;

use crate::error::SchemaMismatch;
use crate::hydrate::{Fields, Hydrate};
use crate::model::media::VideoQuality;
use crate::role::Role;

/// A room participant as sent by the service.
///
/// Booleans default to `false` when absent from the payload, so role
/// resolution never has to reason about missing flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator_id: Option<String>,
    #[serde(rename = "assignedBy", skip_serializing_if = "Option::is_none")]
    pub assigned_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<UserSettings>,
    #[serde(rename = "videoQuality", skip_serializing_if = "Option::is_none")]
    pub video_quality: Option<VideoQuality>,
    /// Left untyped; the service sends several shapes here.
    #[serde(rename = "userIcon", skip_serializing_if = "Option::is_none")]
    pub user_icon: Option<Value>,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    #[serde(rename = "isSiteMod")]
    pub is_site_mod: bool,
    #[serde(rename = "isSupporter")]
    pub is_supporter: bool,
    #[serde(rename = "isBroadcasting")]
    pub is_broadcasting: bool,
    #[serde(rename = "isGold")]
    pub is_gold: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl User {
    /// A room moderator: holds an operator id that nobody assigned.
    pub fn is_moderator(&self) -> bool {
        self.operator_id.is_some() && self.assigned_by.is_none()
    }

    /// A room operator: holds an operator id assigned by someone.
    pub fn is_operator(&self) -> bool {
        self.operator_id.is_some() && self.assigned_by.is_some()
    }

    /// Resolve the user's effective [`Role`].
    ///
    /// Fixed cascade; later checks override earlier ones, so the
    /// supporter check wins over everything, including admin.
    pub fn role(&self) -> Role {
        let mut role = Role::Guest;

        if self.is_admin {
            role = Role::SiteOwner;
        }

        if self.is_site_mod {
            role = Role::SiteMod;
        }

        if self.is_moderator() {
            role = Role::Mod;
        }

        if self.is_operator() {
            role = Role::Op;
        }

        if self.is_supporter || self.is_gold {
            role = Role::Supporter;
        }

        role
    }
}

impl Hydrate for User {
    const NAME: &'static str = "User";

    fn hydrate(f: &mut Fields) -> Result<Self, SchemaMismatch> {
        Ok(Self {
            operator_id: f.opt_str("operator_id")?,
            assigned_by: f.opt_str("assignedBy")?,
            handle: f.opt_str("handle")?,
            user_id: f.opt_str("user_id")?,
            username: f.opt_str("username")?,
            id: f.opt_str("_id")?,
            color: f.opt_str("color")?,
            settings: f.record("settings")?,
            video_quality: f.record("videoQuality")?,
            user_icon: f.raw("userIcon"),
            is_admin: f.flag("isAdmin")?,
            is_site_mod: f.flag("isSiteMod")?,
            is_supporter: f.flag("isSupporter")?,
            is_broadcasting: f.flag("isBroadcasting")?,
            is_gold: f.flag("isGold")?,
            timestamp: f.opt_str("timestamp")?,
        })
    }
}

/// Per-account settings attached to a [`User`].
///
/// Structurally distinct from room settings, even though both travel
/// under the wire key `settings`; the enclosing schema routes them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSettings {
    #[serde(rename = "playYtVideos")]
    pub play_yt_videos: bool,
    #[serde(rename = "allowPrivateMessages")]
    pub allow_private_messages: bool,
    #[serde(rename = "pushNotificationsEnabled")]
    pub push_notifications_enabled: bool,
    #[serde(rename = "receiveUpdates")]
    pub receive_updates: bool,
    #[serde(rename = "receiveMessageNotifications")]
    pub receive_message_notifications: bool,
    #[serde(rename = "darkTheme")]
    pub dark_theme: bool,
    #[serde(rename = "videoQuality", skip_serializing_if = "Option::is_none")]
    pub video_quality: Option<String>,
    /// Left untyped.
    #[serde(rename = "userIcon", skip_serializing_if = "Option::is_none")]
    pub user_icon: Option<Value>,
    /// Left untyped; an id-keyed map the bot never inspects.
    #[serde(rename = "ignoreList", skip_serializing_if = "Option::is_none")]
    pub ignore_list: Option<Value>,
}

impl Hydrate for UserSettings {
    const NAME: &'static str = "UserSettings";

    fn hydrate(f: &mut Fields) -> Result<Self, SchemaMismatch> {
        Ok(Self {
            play_yt_videos: f.flag("playYtVideos")?,
            allow_private_messages: f.flag("allowPrivateMessages")?,
            push_notifications_enabled: f.flag("pushNotificationsEnabled")?,
            receive_updates: f.flag("receiveUpdates")?,
            receive_message_notifications: f.flag("receiveMessageNotifications")?,
            dark_theme: f.flag("darkTheme")?,
            video_quality: f.opt_str("videoQuality")?,
            user_icon: f.raw("userIcon"),
            ignore_list: f.raw("ignoreList"),
        })
    }
}

/// An authenticated session returned by the HTTP API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Hydrate for Session {
    const NAME: &'static str = "Session";

    fn hydrate(f: &mut Fields) -> Result<Self, SchemaMismatch> {
        Ok(Self {
            token: f.required_str("token")?,
            user: f.record("user")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hydrate::{FieldPath, from_value};
    use serde_json::json;

    fn user_with(flags: impl FnOnce(&mut User)) -> User {
        let mut user = from_value::<User>(json!({}), FieldPath::root("user")).unwrap();
        flags(&mut user);
        user
    }

    #[test]
    fn defaults_resolve_to_guest() {
        assert_eq!(user_with(|_| {}).role(), Role::Guest);
    }

    #[test]
    fn admin_resolves_to_site_owner() {
        let user = user_with(|u| u.is_admin = true);
        assert_eq!(user.role(), Role::SiteOwner);
    }

    #[test]
    fn site_mod_overrides_admin() {
        let user = user_with(|u| {
            u.is_admin = true;
            u.is_site_mod = true;
        });
        assert_eq!(user.role(), Role::SiteMod);
    }

    #[test]
    fn unassigned_operator_id_means_mod() {
        let user = user_with(|u| u.operator_id = Some("abc".into()));
        assert_eq!(user.role(), Role::Mod);
    }

    #[test]
    fn assigned_operator_id_means_op() {
        let user = user_with(|u| {
            u.operator_id = Some("abc".into());
            u.assigned_by = Some("xyz".into());
        });
        assert_eq!(user.role(), Role::Op);
    }

    #[test]
    fn gold_admin_resolves_to_supporter() {
        // The last cascade step wins, even over admin.
        let user = user_with(|u| {
            u.is_admin = true;
            u.is_gold = true;
        });
        assert_eq!(user.role(), Role::Supporter);
    }

    #[test]
    fn resolution_is_total_and_deterministic() {
        // Sweep every combination of the six predicates feeding the
        // cascade; each must resolve, twice, to the same single role.
        for bits in 0u8..64 {
            let user = user_with(|u| {
                u.is_admin = bits & 1 != 0;
                u.is_site_mod = bits & 2 != 0;
                u.operator_id = (bits & 4 != 0).then(|| "op".into());
                u.assigned_by = (bits & 8 != 0).then(|| "assigner".into());
                u.is_supporter = bits & 16 != 0;
                u.is_gold = bits & 32 != 0;
            });
            assert_eq!(user.role(), user.role());
        }
    }

    #[test]
    fn missing_flags_default_false_at_construction() {
        let user: User = from_value(
            json!({ "handle": "kimiko", "isGold": null }),
            FieldPath::root("user"),
        )
        .unwrap();
        assert!(!user.is_admin);
        assert!(!user.is_gold);
        assert_eq!(user.role(), Role::Guest);
    }

    #[test]
    fn user_settings_route_under_user() {
        let user: User = from_value(
            json!({
                "handle": "kimiko",
                "settings": {
                    "playYtVideos": true,
                    "allowPrivateMessages": false,
                    "pushNotificationsEnabled": false,
                    "receiveUpdates": false,
                    "receiveMessageNotifications": true,
                    "darkTheme": true,
                    "videoQuality": "720p",
                    "ignoreList": { "abc": "2021-01-01" },
                },
            }),
            FieldPath::root("user"),
        )
        .unwrap();

        let settings = user.settings.unwrap();
        assert!(settings.play_yt_videos);
        assert!(settings.dark_theme);
        assert_eq!(settings.video_quality.as_deref(), Some("720p"));
        assert_eq!(settings.ignore_list, Some(json!({ "abc": "2021-01-01" })));
    }

    #[test]
    fn serialized_user_rehydrates_to_itself() {
        let user = user_with(|u| {
            u.handle = Some("kimiko".into());
            u.operator_id = Some("abc".into());
            u.is_gold = true;
        });

        let wire = serde_json::to_value(&user).unwrap();
        let again: User = from_value(wire, FieldPath::root("user")).unwrap();
        assert_eq!(again, user);
    }
}
