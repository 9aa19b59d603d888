//! Video quality and playlist records.

use serde::Serialize;
use serde_json::Value;

use crate::error::SchemaMismatch;
use crate::hydrate::{Fields, Hydrate};

/// Pixel dimensions of a broadcast quality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Hydrate for Dimensions {
    const NAME: &'static str = "Dimensions";

    fn hydrate(f: &mut Fields) -> Result<Self, SchemaMismatch> {
        Ok(Self {
            width: f.required_u32("width")?,
            height: f.required_u32("height")?,
        })
    }
}

/// A selectable broadcast quality preset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoQuality {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "frameRate", skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<u32>,
    #[serde(rename = "bitRate", skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<u32>,
}

impl Hydrate for VideoQuality {
    const NAME: &'static str = "VideoQuality";

    fn hydrate(f: &mut Fields) -> Result<Self, SchemaMismatch> {
        Ok(Self {
            dimensions: f.record("dimensions")?,
            id: f.opt_str("id")?,
            label: f.opt_str("label")?,
            frame_rate: f.opt_u32("frameRate")?,
            bit_rate: f.opt_u32("bitRate")?,
        })
    }
}

/// One entry of a playlist update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistItem {
    #[serde(rename = "startTime", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(rename = "endTime", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "channelId", skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(rename = "pausedAt", skip_serializing_if = "Option::is_none")]
    pub paused_at: Option<String>,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "mediaId", skip_serializing_if = "Option::is_none")]
    pub media_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    #[serde(rename = "mediaType", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(rename = "startedBy", skip_serializing_if = "Option::is_none")]
    pub started_by: Option<String>,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Hydrate for PlaylistItem {
    const NAME: &'static str = "PlaylistItem";

    fn hydrate(f: &mut Fields) -> Result<Self, SchemaMismatch> {
        Ok(Self {
            start_time: f.opt_str("startTime")?,
            end_time: f.opt_str("endTime")?,
            description: f.opt_str("description")?,
            channel_id: f.opt_str("channelId")?,
            paused_at: f.opt_str("pausedAt")?,
            id: f.opt_str("_id")?,
            media_id: f.opt_str("mediaId")?,
            title: f.opt_str("title")?,
            link: f.opt_str("link")?,
            duration: f.opt_str("duration")?,
            thumb: f.opt_str("thumb")?,
            media_type: f.opt_str("mediaType")?,
            started_by: f.opt_str("startedBy")?,
            created_at: f.opt_str("createdAt")?,
        })
    }
}

/// A "now playing" announcement.
///
/// Same scalar fields as [`PlaylistItem`], except `startedBy` carries a
/// nested user payload here and is intentionally left unrouted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayVideo {
    #[serde(rename = "startTime", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(rename = "endTime", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "channelId", skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(rename = "pausedAt", skip_serializing_if = "Option::is_none")]
    pub paused_at: Option<String>,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "mediaId", skip_serializing_if = "Option::is_none")]
    pub media_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    #[serde(rename = "mediaType", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(rename = "startedBy", skip_serializing_if = "Option::is_none")]
    pub started_by: Option<Value>,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Hydrate for PlayVideo {
    const NAME: &'static str = "PlayVideo";

    fn hydrate(f: &mut Fields) -> Result<Self, SchemaMismatch> {
        Ok(Self {
            start_time: f.opt_str("startTime")?,
            end_time: f.opt_str("endTime")?,
            description: f.opt_str("description")?,
            channel_id: f.opt_str("channelId")?,
            paused_at: f.opt_str("pausedAt")?,
            id: f.opt_str("_id")?,
            media_id: f.opt_str("mediaId")?,
            title: f.opt_str("title")?,
            link: f.opt_str("link")?,
            duration: f.opt_str("duration")?,
            thumb: f.opt_str("thumb")?,
            media_type: f.opt_str("mediaType")?,
            started_by: f.raw("startedBy"),
            created_at: f.opt_str("createdAt")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hydrate::{FieldPath, Shape, from_value};
    use serde_json::json;

    #[test]
    fn video_quality_hydrates_dimensions() {
        let quality: VideoQuality = from_value(
            json!({
                "dimensions": { "width": 640, "height": 480 },
                "id": "480p",
                "label": "480p",
                "frameRate": 25,
                "bitRate": 700,
            }),
            FieldPath::root("videoQuality"),
        )
        .unwrap();

        assert_eq!(
            quality.dimensions,
            Some(Dimensions {
                width: 640,
                height: 480
            })
        );
        assert_eq!(quality.frame_rate, Some(25));
    }

    #[test]
    fn dimensions_require_both_axes() {
        let err =
            from_value::<Dimensions>(json!({ "width": 640 }), FieldPath::root("dimensions"))
                .unwrap_err();
        assert_eq!(err.path().as_str(), "dimensions.height");
    }

    #[test]
    fn non_integral_dimension_is_a_shape_error() {
        let err = from_value::<Dimensions>(
            json!({ "width": "wide", "height": 480 }),
            FieldPath::root("dimensions"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SchemaMismatch::Shape {
                path: FieldPath::root("dimensions").child("width"),
                expected: Shape::Integer,
                received: Shape::Text,
            }
        );
    }

    #[test]
    fn play_video_keeps_started_by_raw() {
        let starter = json!({ "handle": "dj", "user_id": "u1" });
        let play: PlayVideo = from_value(
            json!({ "title": "tune", "startedBy": starter.clone() }),
            FieldPath::root("play"),
        )
        .unwrap();
        assert_eq!(play.started_by, Some(starter));
    }
}
