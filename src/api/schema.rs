use serde::{Deserialize, Serialize};

/// Request body for POST /ask.
#[derive(Debug, Clone, Serialize)]
pub struct AskRequest {
    pub question: String,
    pub k: u8,
}

/// Response from POST /ask.
#[derive(Debug, Clone, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<SourceSnippet>,
}

/// One retrieved snippet backing an answer. `score` is a distance in
/// [0, 1]; lower means more relevant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSnippet {
    pub snippet: String,
    pub source: String,
    pub score: f64,
}

impl SourceSnippet {
    pub fn relevance(&self) -> Relevance {
        Relevance::of_score(self.score)
    }
}

/// Relevance band for a snippet score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relevance {
    High,
    Medium,
    Low,
}

impl Relevance {
    pub fn of_score(score: f64) -> Self {
        if score <= 0.3 {
            Self::High
        } else if score <= 0.5 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Response from GET /status. The backend also reports `status` and
/// `uploaded_files`; both are tolerated but optional.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub documents_indexed: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub uploaded_files: Vec<String>,
}

/// Response from GET /health.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Response from GET /files.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesResponse {
    pub files: Vec<String>,
}

/// Ack from POST /upload. The body shape is backend-defined; only the
/// human-readable message is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadAck {
    #[serde(default)]
    pub message: Option<String>,
}

/// Response from POST /fresh-start.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub instructions: String,
}

/// Push event on /ws/files. Every payload is a full snapshot of the
/// current file list, never a delta. Unrecognized tags deserialize to
/// `Unknown` and are ignored by the sync task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileEvent {
    FileUpdated { files: Vec<String> },
    FilesCleared,
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_updated_event_parses() {
        let event: FileEvent =
            serde_json::from_str(r#"{"type":"file_updated","files":["a.pdf","b.txt"]}"#).unwrap();
        assert_eq!(
            event,
            FileEvent::FileUpdated {
                files: vec!["a.pdf".into(), "b.txt".into()]
            }
        );
    }

    #[test]
    fn files_cleared_event_parses() {
        let event: FileEvent = serde_json::from_str(r#"{"type":"files_cleared"}"#).unwrap();
        assert_eq!(event, FileEvent::FilesCleared);
    }

    #[test]
    fn unrecognized_event_tag_maps_to_unknown() {
        let event: FileEvent =
            serde_json::from_str(r#"{"type":"reindex_started","detail":42}"#).unwrap();
        assert_eq!(event, FileEvent::Unknown);
    }

    #[test]
    fn relevance_bands() {
        assert_eq!(Relevance::of_score(0.0), Relevance::High);
        assert_eq!(Relevance::of_score(0.2), Relevance::High);
        assert_eq!(Relevance::of_score(0.3), Relevance::High);
        assert_eq!(Relevance::of_score(0.31), Relevance::Medium);
        assert_eq!(Relevance::of_score(0.5), Relevance::Medium);
        assert_eq!(Relevance::of_score(0.6), Relevance::Low);
        assert_eq!(Relevance::of_score(1.0), Relevance::Low);
    }

    #[test]
    fn status_tolerates_extra_and_missing_fields() {
        let status: StatusResponse =
            serde_json::from_str(r#"{"documents_indexed":7}"#).unwrap();
        assert_eq!(status.documents_indexed, 7);
        assert!(status.uploaded_files.is_empty());

        let status: StatusResponse = serde_json::from_str(
            r#"{"status":"ready","documents_indexed":3,"uploaded_files":["a.md"]}"#,
        )
        .unwrap();
        assert_eq!(status.status.as_deref(), Some("ready"));
        assert_eq!(status.uploaded_files, vec!["a.md"]);
    }
}
