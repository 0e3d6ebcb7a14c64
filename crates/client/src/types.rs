//! Typed slices of Zoom API payloads.
//!
//! Only the fields the facade actually inspects are modeled; the rest
//! of each payload stays `serde_json::Value` and flows through
//! untouched. Fields default when absent so a lenient upstream never
//! turns into a decode failure.

use serde::{Deserialize, Serialize};

/// Response from the OAuth2 token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// One artifact attached to a cloud recording (video, audio,
/// transcript, chat, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingFile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub recording_start: String,
    #[serde(default)]
    pub recording_end: String,
}

impl RecordingFile {
    pub fn is_transcript(&self) -> bool {
        self.file_type == "TRANSCRIPT"
    }
}

/// Per-meeting recording metadata, as returned by
/// `meetings/{id}/recordings`.
#[derive(Debug, Clone, Deserialize)]
pub struct MeetingRecording {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub recording_files: Vec<RecordingFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_meeting_decode() {
        let meeting: MeetingRecording = serde_json::from_str("{}").unwrap();

        assert_eq!(meeting.topic, "");
        assert_eq!(meeting.duration, 0);
        assert!(meeting.recording_files.is_empty());
    }

    #[test]
    fn test_transcript_detection() {
        let json = r#"{
            "id": "f1",
            "file_type": "TRANSCRIPT",
            "file_name": "audio_transcript.vtt",
            "download_url": "https://zoom.us/rec/download/f1"
        }"#;
        let file: RecordingFile = serde_json::from_str(json).unwrap();

        assert!(file.is_transcript());
        assert_eq!(file.download_url.as_deref(), Some("https://zoom.us/rec/download/f1"));
    }

    #[test]
    fn test_mp4_is_not_transcript() {
        let file: RecordingFile =
            serde_json::from_str(r#"{"file_type": "MP4"}"#).unwrap();

        assert!(!file.is_transcript());
    }
}
