use chrono::{DateTime, Utc};
use uuid::Uuid;

use curricle_core::editor::DraftId;
use curricle_core::media::MediaClass;

/// Unique identifier of a tracked upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadId(pub Uuid);

impl UploadId {
    /// Generate a new random upload ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UploadId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UploadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of an upload.
///
/// Every upload starts out pending and ends in exactly one of the
/// three terminal states. Terminal uploads are no longer tracked by
/// the registry; their final state travels with the emitted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Pending,
    Succeeded,
    Failed,
    Cancelled,
}

impl UploadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadState::Pending => "pending",
            UploadState::Succeeded => "succeeded",
            UploadState::Failed => "failed",
            UploadState::Cancelled => "cancelled",
        }
    }

    /// Whether this state ends the upload's lifecycle.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, UploadState::Pending)
    }
}

impl std::fmt::Display for UploadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A media transfer tracked by the registry.
#[derive(Debug, Clone)]
pub struct UploadTask {
    /// Registry identifier of this transfer.
    pub id: UploadId,
    /// Edit session the media is destined for.
    pub draft: DraftId,
    /// Original file name, echoed back on completion.
    pub file_name: String,
    /// Media class the file was admitted as.
    pub class: MediaClass,
    /// Payload size at admission time.
    pub size_bytes: u64,
    /// Current lifecycle state.
    pub state: UploadState,
    /// When the transfer was admitted.
    pub started_at: DateTime<Utc>,
}

impl UploadTask {
    pub(crate) fn new(
        draft: DraftId,
        file_name: String,
        class: MediaClass,
        size_bytes: u64,
    ) -> Self {
        Self {
            id: UploadId::new(),
            draft,
            file_name,
            class,
            size_bytes,
            state: UploadState::Pending,
            started_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_id_unique() {
        assert_ne!(UploadId::new(), UploadId::new());
    }

    #[test]
    fn test_upload_state_labels() {
        assert_eq!(UploadState::Pending.as_str(), "pending");
        assert_eq!(UploadState::Succeeded.as_str(), "succeeded");
        assert_eq!(UploadState::Failed.as_str(), "failed");
        assert_eq!(UploadState::Cancelled.as_str(), "cancelled");
    }

    #[test]
    fn test_only_pending_is_not_terminal() {
        assert!(!UploadState::Pending.is_terminal());
        assert!(UploadState::Succeeded.is_terminal());
        assert!(UploadState::Failed.is_terminal());
        assert!(UploadState::Cancelled.is_terminal());
    }

    #[test]
    fn test_new_task_starts_pending() {
        let task =
            UploadTask::new(DraftId::new(), "intro.mp4".to_string(), MediaClass::Video, 1024);
        assert_eq!(task.state, UploadState::Pending);
        assert_eq!(task.file_name, "intro.mp4");
    }
}
