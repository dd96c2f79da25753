use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex, RwLock};
use tokio_util::sync::CancellationToken;

use curricle_core::config::UploadConfig;
use curricle_core::editor::{DraftId, LessonDraft};
use curricle_core::error::{CurricleError, Result};
use curricle_core::media::{MediaClass, MediaFile, UploadedMedia};
use curricle_core::transport::MediaTransport;
use curricle_core::LessonKind;

use super::limits;
use super::task::{UploadId, UploadState, UploadTask};

/// Outcome of a finished transfer, delivered on the event channel.
///
/// Cancelled transfers emit nothing; the registry entry simply
/// disappears.
#[derive(Debug, Clone)]
pub enum UploadEvent {
    /// The transfer finished and the media is ready to attach.
    Completed { task: UploadTask, media: UploadedMedia },
    /// The transfer failed after admission.
    Failed { task: UploadTask, error: String },
}

impl UploadEvent {
    /// The task this event reports on.
    pub fn task(&self) -> &UploadTask {
        match self {
            UploadEvent::Completed { task, .. } => task,
            UploadEvent::Failed { task, .. } => task,
        }
    }
}

struct TaskEntry {
    task: UploadTask,
    token: CancellationToken,
}

/// Tracks in-flight media transfers for lesson drafts.
///
/// Files are validated against their draft's media class and the
/// configured size ceilings before any transfer starts. One transfer
/// per draft may be in flight at a time. Finished transfers leave the
/// registry and report through the event channel; cancelled ones
/// leave silently.
pub struct UploadRegistry {
    transport: Arc<dyn MediaTransport>,
    limits: UploadConfig,
    tasks: Arc<RwLock<HashMap<UploadId, TaskEntry>>>,
    events_tx: mpsc::UnboundedSender<UploadEvent>,
    events_rx: Mutex<Option<mpsc::UnboundedReceiver<UploadEvent>>>,
}

impl UploadRegistry {
    /// Create a registry backed by the given transport.
    pub fn new(transport: Arc<dyn MediaTransport>, limits: UploadConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            transport,
            limits,
            tasks: Arc::new(RwLock::new(HashMap::new())),
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
        }
    }

    /// Take the event receiver. Yields `Some` exactly once.
    pub async fn take_events(&self) -> Option<mpsc::UnboundedReceiver<UploadEvent>> {
        self.events_rx.lock().await.take()
    }

    /// Admit a file for the given draft and start the transfer.
    ///
    /// The file must match the media class the draft's lesson type
    /// accepts and fit under the configured size ceiling, and the
    /// draft must not already have a transfer in flight. Nothing is
    /// sent when admission fails.
    pub async fn start(&self, draft: &LessonDraft, file: MediaFile) -> Result<UploadId> {
        let required = match draft.kind() {
            LessonKind::Video => MediaClass::Video,
            LessonKind::Assignment | LessonKind::File => MediaClass::Document,
            LessonKind::Quiz => {
                return Err(CurricleError::UploadRejected(
                    "Quiz lessons have no media slot".to_string(),
                ));
            }
        };
        limits::check_file(&file, required, &self.limits)?;

        let mut tasks = self.tasks.write().await;
        if tasks.values().any(|entry| entry.task.draft == draft.id()) {
            return Err(CurricleError::UploadInFlight(draft.id()));
        }

        let task = UploadTask::new(draft.id(), file.file_name.clone(), required, file.size_bytes());
        let id = task.id;
        let token = CancellationToken::new();
        tasks.insert(
            id,
            TaskEntry {
                task: task.clone(),
                token: token.clone(),
            },
        );
        drop(tasks);

        tracing::info!(
            upload_id = %id,
            draft_id = %draft.id(),
            file = %task.file_name,
            size_bytes = task.size_bytes,
            "Upload admitted"
        );

        self.spawn_driver(task, token, file);
        Ok(id)
    }

    fn spawn_driver(&self, task: UploadTask, token: CancellationToken, file: MediaFile) {
        let transport = self.transport.clone();
        let tasks = self.tasks.clone();
        let events = self.events_tx.clone();
        let duration = file.duration;

        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => None,
                result = transport.upload(file) => Some(result),
            };

            // Our entry is gone when cancel() got there first; in that
            // case the result is dropped and no event goes out.
            let still_tracked = tasks.write().await.remove(&task.id).is_some();

            match outcome {
                None => {
                    tracing::info!(upload_id = %task.id, "Upload stopped before completion");
                }
                Some(_) if !still_tracked => {
                    tracing::info!(
                        upload_id = %task.id,
                        "Upload finished after cancellation, result dropped"
                    );
                }
                Some(Ok(receipt)) => {
                    let mut done = task;
                    done.state = UploadState::Succeeded;
                    tracing::info!(upload_id = %done.id, url = %receipt.url, "Upload completed");
                    let media = UploadedMedia {
                        url: receipt.url,
                        file_name: done.file_name.clone(),
                        duration,
                    };
                    let _ = events.send(UploadEvent::Completed { task: done, media });
                }
                Some(Err(e)) => {
                    let mut done = task;
                    done.state = UploadState::Failed;
                    tracing::warn!(upload_id = %done.id, error = %e, "Upload failed");
                    let _ = events.send(UploadEvent::Failed {
                        task: done,
                        error: e.to_string(),
                    });
                }
            }
        });
    }

    /// Abort a pending transfer. Returns `false` when the ID is
    /// unknown or the transfer already finished; neither case is an
    /// error.
    pub async fn cancel(&self, id: UploadId) -> bool {
        let entry = self.tasks.write().await.remove(&id);
        match entry {
            Some(entry) => {
                entry.token.cancel();
                tracing::info!(upload_id = %id, draft_id = %entry.task.draft, "Upload cancelled");
                true
            }
            None => false,
        }
    }

    /// Look up a pending transfer.
    pub async fn task(&self, id: UploadId) -> Option<UploadTask> {
        self.tasks.read().await.get(&id).map(|entry| entry.task.clone())
    }

    /// Whether a draft has a transfer in flight.
    pub async fn is_pending(&self, draft: DraftId) -> bool {
        self.tasks
            .read()
            .await
            .values()
            .any(|entry| entry.task.draft == draft)
    }

    /// Number of transfers currently in flight.
    pub async fn pending_count(&self) -> usize {
        self.tasks.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curricle_core::content::{Course, Pricing};
    use curricle_core::editor::CourseEditor;
    use curricle_core::testing::MockMediaHost;
    use std::time::Duration;

    fn editor_with_module() -> CourseEditor {
        let course = Course::new("Rust 101", "About", "engineering", Pricing::Free);
        let mut editor = CourseEditor::new(course);
        editor.add_module();
        editor
    }

    fn video_draft(editor: &mut CourseEditor) -> LessonDraft {
        editor.add_lesson(1, LessonKind::Video).unwrap()
    }

    fn registry_with(host: &MockMediaHost) -> UploadRegistry {
        UploadRegistry::new(Arc::new(host.clone()), UploadConfig::default())
    }

    #[tokio::test]
    async fn test_completed_upload_emits_media_for_draft() {
        let host = MockMediaHost::instant();
        let registry = registry_with(&host);
        let mut editor = editor_with_module();
        let mut draft = video_draft(&mut editor);

        let mut events = registry.take_events().await.unwrap();
        let file = MediaFile::new("intro.mp4", "video/mp4", vec![0u8; 64]);
        let id = registry.start(&draft, file).await.unwrap();

        let event = events.recv().await.unwrap();
        match event {
            UploadEvent::Completed { task, media } => {
                assert_eq!(task.id, id);
                assert_eq!(task.draft, draft.id());
                assert_eq!(task.state, UploadState::Succeeded);
                draft.apply_media(&media).unwrap();
            }
            other => panic!("expected completion, got {:?}", other),
        }

        assert_eq!(
            draft.video().unwrap().media_url.as_deref(),
            Some("https://media.invalid/intro.mp4")
        );
        assert_eq!(registry.pending_count().await, 0);
        host.assert_uploaded("intro.mp4");
    }

    #[tokio::test]
    async fn test_events_receiver_taken_once() {
        let host = MockMediaHost::instant();
        let registry = registry_with(&host);

        assert!(registry.take_events().await.is_some());
        assert!(registry.take_events().await.is_none());
    }

    #[tokio::test]
    async fn test_quiz_draft_has_no_media_slot() {
        let host = MockMediaHost::instant();
        let registry = registry_with(&host);
        let mut editor = editor_with_module();
        let draft = editor.add_lesson(1, LessonKind::Quiz).unwrap();

        let file = MediaFile::new("notes.pdf", "application/pdf", vec![0u8; 64]);
        let err = registry.start(&draft, file).await.unwrap_err();

        assert!(matches!(err, CurricleError::UploadRejected(_)));
        assert_eq!(registry.pending_count().await, 0);
        host.assert_no_uploads();
    }

    #[tokio::test]
    async fn test_oversized_video_never_reaches_transport() {
        let host = MockMediaHost::instant();
        let limits = UploadConfig {
            max_video_bytes: 16,
            ..UploadConfig::default()
        };
        let registry = UploadRegistry::new(Arc::new(host.clone()), limits);
        let mut editor = editor_with_module();
        let draft = video_draft(&mut editor);

        let file = MediaFile::new("intro.mp4", "video/mp4", vec![0u8; 17]);
        let err = registry.start(&draft, file).await.unwrap_err();

        assert!(matches!(err, CurricleError::UploadRejected(_)));
        host.assert_no_uploads();
    }

    #[tokio::test]
    async fn test_document_class_for_file_lessons() {
        let host = MockMediaHost::instant();
        let registry = registry_with(&host);
        let mut editor = editor_with_module();
        let draft = editor.add_lesson(1, LessonKind::File).unwrap();

        // A video file on a file lesson is a class mismatch.
        let video = MediaFile::new("intro.mp4", "video/mp4", vec![0u8; 16]);
        assert!(registry.start(&draft, video).await.is_err());

        let pdf = MediaFile::new("handout.pdf", "application/pdf", vec![0u8; 16]);
        assert!(registry.start(&draft, pdf).await.is_ok());
    }

    #[tokio::test]
    async fn test_second_upload_for_same_draft_rejected() {
        let host = MockMediaHost::held();
        let registry = registry_with(&host);
        let mut editor = editor_with_module();
        let draft = video_draft(&mut editor);

        let first = MediaFile::new("take-one.mp4", "video/mp4", vec![0u8; 16]);
        registry.start(&draft, first).await.unwrap();

        let second = MediaFile::new("take-two.mp4", "video/mp4", vec![0u8; 16]);
        let err = registry.start(&draft, second).await.unwrap_err();

        match err {
            CurricleError::UploadInFlight(id) => assert_eq!(id, draft.id()),
            other => panic!("expected in-flight rejection, got {:?}", other),
        }
        assert_eq!(registry.pending_count().await, 1);
    }

    #[tokio::test]
    async fn test_cancel_suppresses_event_and_leaves_draft_unset() {
        let host = MockMediaHost::held();
        let registry = registry_with(&host);
        let mut editor = editor_with_module();
        let draft = video_draft(&mut editor);

        let mut events = registry.take_events().await.unwrap();
        let file = MediaFile::new("intro.mp4", "video/mp4", vec![0u8; 16]);
        let id = registry.start(&draft, file).await.unwrap();

        assert!(registry.is_pending(draft.id()).await);
        assert!(registry.cancel(id).await);
        assert_eq!(registry.pending_count().await, 0);

        // Even if the transfer would have finished, nothing arrives.
        host.release_all();
        let quiet = tokio::time::timeout(Duration::from_millis(50), events.recv()).await;
        assert!(quiet.is_err(), "cancelled upload produced an event");
        assert!(draft.video().unwrap().media_url.is_none());

        // The draft is free for a fresh attempt.
        let retry = MediaFile::new("intro.mp4", "video/mp4", vec![0u8; 16]);
        assert!(registry.start(&draft, retry).await.is_ok());
    }

    #[tokio::test]
    async fn test_cancel_unknown_id_is_not_an_error() {
        let host = MockMediaHost::instant();
        let registry = registry_with(&host);
        assert!(!registry.cancel(UploadId::new()).await);
    }

    #[tokio::test]
    async fn test_failed_upload_emits_failure_and_clears_entry() {
        let host = MockMediaHost::failing("socket reset");
        let registry = registry_with(&host);
        let mut editor = editor_with_module();
        let draft = video_draft(&mut editor);

        let mut events = registry.take_events().await.unwrap();
        let file = MediaFile::new("intro.mp4", "video/mp4", vec![0u8; 16]);
        registry.start(&draft, file).await.unwrap();

        let event = events.recv().await.unwrap();
        match event {
            UploadEvent::Failed { task, error } => {
                assert_eq!(task.state, UploadState::Failed);
                assert!(error.contains("socket reset"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(registry.pending_count().await, 0);
    }

    #[tokio::test]
    async fn test_task_lookup_while_pending() {
        let host = MockMediaHost::held();
        let registry = registry_with(&host);
        let mut editor = editor_with_module();
        let draft = video_draft(&mut editor);

        let file = MediaFile::new("intro.mp4", "video/mp4", vec![0u8; 16]);
        let id = registry.start(&draft, file).await.unwrap();

        let task = registry.task(id).await.unwrap();
        assert_eq!(task.state, UploadState::Pending);
        assert_eq!(task.class, MediaClass::Video);
        assert_eq!(task.size_bytes, 16);

        registry.cancel(id).await;
        assert!(registry.task(id).await.is_none());
    }
}
