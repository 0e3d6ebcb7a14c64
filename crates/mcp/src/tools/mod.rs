//! The tool surface this server exposes.
//!
//! Four Zoom operations, modeled as a closed enum rather than a
//! runtime-keyed registry: dispatch is an exhaustive `match`, so a
//! tool added here without a handler is a compile error, not a
//! runtime surprise.

pub mod repair;
pub mod schema;

pub use repair::{ArgShapeRepair, BacktickKeyRepair};

use crate::protocol::{ListToolsResult, ToolSchema};
use schema::{json_schema_integer, json_schema_object, json_schema_string};

/// The four Zoom operations exposed as tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomTool {
    RefreshToken,
    ListRecordings,
    RecordingDetails,
    MeetingTranscript,
}

impl ZoomTool {
    pub const ALL: [ZoomTool; 4] = [
        ZoomTool::RefreshToken,
        ZoomTool::ListRecordings,
        ZoomTool::RecordingDetails,
        ZoomTool::MeetingTranscript,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ZoomTool::RefreshToken => "zoom_refresh_token",
            ZoomTool::ListRecordings => "zoom_list_recordings",
            ZoomTool::RecordingDetails => "zoom_get_recording_details",
            ZoomTool::MeetingTranscript => "zoom_get_meeting_transcript",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    /// Arguments that must be present before the tool executes.
    pub fn required_args(self) -> &'static [&'static str] {
        match self {
            ZoomTool::RefreshToken => {
                &["zoom_refresh_token", "zoom_client_id", "zoom_client_secret"]
            }
            ZoomTool::ListRecordings => &["zoom_access_token"],
            ZoomTool::RecordingDetails | ZoomTool::MeetingTranscript => {
                &["zoom_access_token", "meeting_id"]
            }
        }
    }

    pub fn schema(self) -> ToolSchema {
        match self {
            ZoomTool::RefreshToken => ToolSchema {
                name: self.name().to_string(),
                description: "Refresh the Zoom OAuth2 access token using the refresh token \
                              and client credentials for API access"
                    .to_string(),
                input_schema: json_schema_object(
                    serde_json::json!({
                        "zoom_access_token": json_schema_string(
                            "Zoom OAuth2 access token (optional if expired)"),
                        "zoom_refresh_token": json_schema_string(
                            "Zoom OAuth2 refresh token"),
                        "zoom_client_id": json_schema_string(
                            "Zoom OAuth2 client ID for token refresh"),
                        "zoom_client_secret": json_schema_string(
                            "Zoom OAuth2 client secret for token refresh"),
                    }),
                    self.required_args().to_vec(),
                ),
            },
            ZoomTool::ListRecordings => ToolSchema {
                name: self.name().to_string(),
                description: "List Zoom cloud recordings from a user's Zoom account with \
                              pagination support"
                    .to_string(),
                input_schema: json_schema_object(
                    serde_json::json!({
                        "zoom_access_token": json_schema_string("Zoom OAuth2 access token"),
                        "from_date": json_schema_string(
                            "Start date for Zoom recording search in 'YYYY-MM-DD' format"),
                        "to_date": json_schema_string(
                            "End date for Zoom recording search in 'YYYY-MM-DD' format"),
                        "page_size": json_schema_integer(
                            "Number of Zoom recordings to return per page (default: 30, max: 300)"),
                        "page_number": json_schema_integer(
                            "Page number of Zoom recordings to return (default: 1)"),
                    }),
                    self.required_args().to_vec(),
                ),
            },
            ZoomTool::RecordingDetails => ToolSchema {
                name: self.name().to_string(),
                description: "Get detailed information about a specific Zoom meeting \
                              recording including recording files and metadata"
                    .to_string(),
                input_schema: json_schema_object(
                    serde_json::json!({
                        "zoom_access_token": json_schema_string("Zoom OAuth2 access token"),
                        "meeting_id": json_schema_string(
                            "The Zoom meeting ID to retrieve recording details for"),
                    }),
                    self.required_args().to_vec(),
                ),
            },
            ZoomTool::MeetingTranscript => ToolSchema {
                name: self.name().to_string(),
                description: "Get transcript files and content from a specific Zoom meeting \
                              recording if available"
                    .to_string(),
                input_schema: json_schema_object(
                    serde_json::json!({
                        "zoom_access_token": json_schema_string("Zoom OAuth2 access token"),
                        "meeting_id": json_schema_string(
                            "The Zoom meeting ID to retrieve transcript for"),
                    }),
                    self.required_args().to_vec(),
                ),
            },
        }
    }

    /// Schemas for all tools, in declaration order.
    pub fn list_schemas() -> ListToolsResult {
        ListToolsResult {
            tools: Self::ALL.into_iter().map(ZoomTool::schema).collect(),
        }
    }
}
