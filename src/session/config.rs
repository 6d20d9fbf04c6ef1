use crate::payload::require_object;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configuration for one meeting session, produced from a join payload
///
/// Built only through [`JoinConfigParser`]; a value of this type is always
/// complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Meeting identifier assigned by the conferencing service
    pub meeting_id: String,

    /// Caller-supplied meeting identifier, if any
    pub external_meeting_id: Option<String>,

    /// Media region hosting the meeting (e.g., "ap-northeast-2")
    pub media_region: String,

    pub audio_host_url: String,
    pub audio_fallback_url: Option<String>,
    pub signaling_url: String,
    pub turn_control_url: Option<String>,

    /// Attendee identity for this client
    pub attendee_id: String,
    pub external_user_id: Option<String>,
    pub join_token: String,
}

/// External parser turning a join-configuration blob into a [`SessionConfig`]
pub trait JoinConfigParser: Send + Sync {
    fn parse(&self, blob: &[u8]) -> Result<SessionConfig>;
}

/// Parser for the JSON join payload returned by the meeting service
///
/// Accepts `{ "Meeting": {...}, "Attendee": {...} }`, optionally wrapped in
/// a top-level `"JoinInfo"` object.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonJoinConfigParser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct JoinInfo {
    meeting: MeetingInfo,
    attendee: AttendeeInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MeetingInfo {
    meeting_id: String,
    external_meeting_id: Option<String>,
    media_region: String,
    media_placement: MediaPlacement,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MediaPlacement {
    audio_host_url: String,
    audio_fallback_url: Option<String>,
    signaling_url: String,
    turn_control_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AttendeeInfo {
    attendee_id: String,
    external_user_id: Option<String>,
    join_token: String,
}

impl JoinConfigParser for JsonJoinConfigParser {
    fn parse(&self, blob: &[u8]) -> Result<SessionConfig> {
        let root: Value = serde_json::from_slice(blob).context("Join payload is not valid JSON")?;
        require_object(&root, "join payload")?;

        let info = match root.get("JoinInfo") {
            Some(wrapped) => wrapped.clone(),
            None => root,
        };

        // Derived structs would also take arrays in these positions
        require_object(&info, "JoinInfo")?;
        require_object(&info["Meeting"], "Meeting")?;
        require_object(&info["Meeting"]["MediaPlacement"], "MediaPlacement")?;
        require_object(&info["Attendee"], "Attendee")?;

        let info: JoinInfo =
            serde_json::from_value(info).context("Join payload is not a valid meeting/attendee object")?;

        let required = [
            ("MeetingId", &info.meeting.meeting_id),
            ("MediaRegion", &info.meeting.media_region),
            ("AudioHostUrl", &info.meeting.media_placement.audio_host_url),
            ("SignalingUrl", &info.meeting.media_placement.signaling_url),
            ("AttendeeId", &info.attendee.attendee_id),
            ("JoinToken", &info.attendee.join_token),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                bail!("Join payload field {} is empty", field);
            }
        }

        Ok(SessionConfig {
            meeting_id: info.meeting.meeting_id,
            external_meeting_id: info.meeting.external_meeting_id,
            media_region: info.meeting.media_region,
            audio_host_url: info.meeting.media_placement.audio_host_url,
            audio_fallback_url: info.meeting.media_placement.audio_fallback_url,
            signaling_url: info.meeting.media_placement.signaling_url,
            turn_control_url: info.meeting.media_placement.turn_control_url,
            attendee_id: info.attendee.attendee_id,
            external_user_id: info.attendee.external_user_id,
            join_token: info.attendee.join_token,
        })
    }
}
