//! Course authoring runtime.
//!
//! Ties the pieces together behind one entry point:
//! - editing sessions over course trees
//! - tracked media uploads with cancellation
//! - thumbnail uploads
//! - course submission as draft or published

use std::sync::Arc;

use tokio::sync::mpsc;

use curricle_core::config::CurricleConfig;
use curricle_core::content::Course;
use curricle_core::editor::CourseEditor;
use curricle_core::error::{CurricleError, Result};
use curricle_core::identity::Instructor;
use curricle_core::media::{MediaClass, MediaFile};
use curricle_core::transport::{CourseApi, MediaTransport};

use crate::client::{HttpCourseApi, HttpMediaGateway};
use crate::submit::{CourseSubmitter, SubmitAction, SubmitReceipt};
use crate::uploads::{check_file, UploadEvent, UploadRegistry};

/// Prelude module for common imports.
pub mod prelude {
    pub use curricle_core::config::CurricleConfig;
    pub use curricle_core::content::{
        Course, CourseStatus, Lesson, LessonContent, LessonKind, Module, Pricing, QuizMode,
    };
    pub use curricle_core::editor::{CourseEditor, DraftId, LessonDraft};
    pub use curricle_core::error::{CurricleError, Result};
    pub use curricle_core::identity::Instructor;
    pub use curricle_core::media::{MediaDuration, MediaFile, UploadedMedia};

    pub use crate::submit::{CourseSubmitter, SubmitAction, SubmitReceipt};
    pub use crate::uploads::{UploadEvent, UploadId, UploadRegistry, UploadState};
    pub use crate::{Studio, StudioBuilder};
}

/// The course authoring runtime.
pub struct Studio {
    config: CurricleConfig,
    instructor: Instructor,
    media: Arc<dyn MediaTransport>,
    uploads: Arc<UploadRegistry>,
    submitter: CourseSubmitter,
}

impl Studio {
    /// Create a new builder for configuring the studio.
    pub fn builder() -> StudioBuilder {
        StudioBuilder::new()
    }

    /// Get the configuration.
    pub fn config(&self) -> &CurricleConfig {
        &self.config
    }

    /// Get the instructor this studio authors for.
    pub fn instructor(&self) -> &Instructor {
        &self.instructor
    }

    /// Start an editing session over a course, with the configured
    /// quiz cap applied.
    pub fn editor(&self, course: Course) -> CourseEditor {
        CourseEditor::new(course).with_correct_limit(self.config.quiz.max_correct_answers)
    }

    /// Get the upload registry.
    pub fn uploads(&self) -> &UploadRegistry {
        &self.uploads
    }

    /// Take the upload event receiver. Yields `Some` exactly once.
    pub async fn take_upload_events(&self) -> Option<mpsc::UnboundedReceiver<UploadEvent>> {
        self.uploads.take_events().await
    }

    /// Upload a course thumbnail and return its URL.
    ///
    /// Thumbnails skip the registry: the transfer is short and has no
    /// draft to attach to, so it runs inline.
    pub async fn upload_thumbnail(&self, file: MediaFile) -> Result<String> {
        check_file(&file, MediaClass::Image, &self.config.uploads)?;
        let receipt = self.media.upload(file).await?;
        tracing::info!(url = %receipt.url, "Thumbnail uploaded");
        Ok(receipt.url)
    }

    /// Validate and submit a course with the requested action.
    pub async fn submit(&self, course: &Course, action: SubmitAction) -> Result<SubmitReceipt> {
        self.submitter.submit(course, action).await
    }
}

/// Builder for configuring the studio.
pub struct StudioBuilder {
    config: Option<CurricleConfig>,
    instructor: Option<Instructor>,
    media: Option<Arc<dyn MediaTransport>>,
    api: Option<Arc<dyn CourseApi>>,
}

impl StudioBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            instructor: None,
            media: None,
            api: None,
        }
    }

    /// Set the configuration.
    pub fn config(mut self, config: CurricleConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the instructor account courses are authored under.
    pub fn instructor(mut self, instructor: Instructor) -> Self {
        self.instructor = Some(instructor);
        self
    }

    /// Replace the media transport. Defaults to the HTTP gateway.
    pub fn media_transport(mut self, transport: Arc<dyn MediaTransport>) -> Self {
        self.media = Some(transport);
        self
    }

    /// Replace the course endpoint client. Defaults to the HTTP client.
    pub fn course_api(mut self, api: Arc<dyn CourseApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Build the studio.
    pub fn build(self) -> Result<Studio> {
        let config = self
            .config
            .ok_or_else(|| CurricleError::Config("Configuration is required".to_string()))?;
        let instructor = self
            .instructor
            .ok_or_else(|| CurricleError::Config("Instructor is required".to_string()))?;

        let media: Arc<dyn MediaTransport> = match self.media {
            Some(transport) => transport,
            None => Arc::new(HttpMediaGateway::new(&config.api)?),
        };
        let api: Arc<dyn CourseApi> = match self.api {
            Some(api) => api,
            None => Arc::new(HttpCourseApi::new(&config.api)?),
        };

        let uploads = Arc::new(UploadRegistry::new(media.clone(), config.uploads.clone()));
        let submitter = CourseSubmitter::new(api, instructor.clone())
            .with_correct_limit(config.quiz.max_correct_answers);

        tracing::info!(
            base_url = %config.api.base_url,
            instructor = %instructor.id,
            "Studio initialized"
        );

        Ok(Studio {
            config,
            instructor,
            media,
            uploads,
            submitter,
        })
    }
}

impl Default for StudioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curricle_core::config::QuizConfig;
    use curricle_core::content::Pricing;
    use curricle_core::testing::{MockCourseApi, MockMediaHost};
    use curricle_core::LessonKind;

    fn studio_with_mocks(config: CurricleConfig) -> (Studio, MockMediaHost, MockCourseApi) {
        let host = MockMediaHost::instant();
        let api = MockCourseApi::accepting();
        let studio = Studio::builder()
            .config(config)
            .instructor(Instructor::new("teacher-1", "Ada"))
            .media_transport(Arc::new(host.clone()))
            .course_api(Arc::new(api.clone()))
            .build()
            .unwrap();
        (studio, host, api)
    }

    #[test]
    fn test_studio_builder_new() {
        let builder = StudioBuilder::new();
        assert!(builder.config.is_none());
    }

    #[test]
    fn test_studio_builder_requires_config() {
        let result = StudioBuilder::new().build();
        assert!(result.is_err());
    }

    #[test]
    fn test_studio_builder_requires_instructor() {
        let config = CurricleConfig::default_with_base_url("https://api.example.com");
        let result = StudioBuilder::new().config(config).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_studio_builder_with_config() {
        let config = CurricleConfig::default_with_base_url("https://api.example.com");
        let result = StudioBuilder::new()
            .config(config)
            .instructor(Instructor::new("teacher-1", "Ada"))
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_editor_carries_configured_quiz_cap() {
        let mut config = CurricleConfig::default_with_base_url("https://api.example.com");
        config.quiz = QuizConfig {
            max_correct_answers: Some(2),
        };
        let (studio, _, _) = studio_with_mocks(config);

        let course = Course::new("Rust 101", "About", "engineering", Pricing::Free);
        let mut editor = studio.editor(course);
        editor.add_module();
        let mut draft = editor.add_lesson(1, LessonKind::Quiz).unwrap();

        let quiz = draft.quiz_mut().unwrap();
        quiz.set_mode(curricle_core::QuizMode::MultiCorrect);
        let q = quiz.add_question();
        quiz.add_answer(q).unwrap();
        quiz.add_answer(q).unwrap();
        quiz.add_answer(q).unwrap();
        quiz.toggle_correct(q, 0).unwrap();
        quiz.toggle_correct(q, 1).unwrap();

        let err = quiz.toggle_correct(q, 2).unwrap_err();
        assert!(matches!(err, CurricleError::CorrectAnswerLimit(2)));
    }

    #[tokio::test]
    async fn test_upload_thumbnail_returns_url() {
        let config = CurricleConfig::default_with_base_url("https://api.example.com");
        let (studio, host, _) = studio_with_mocks(config);

        let file = MediaFile::new("cover.png", "image/png", vec![0u8; 64]);
        let url = studio.upload_thumbnail(file).await.unwrap();

        assert_eq!(url, "https://media.invalid/cover.png");
        host.assert_uploaded("cover.png");
    }

    #[tokio::test]
    async fn test_upload_thumbnail_rejects_non_image() {
        let config = CurricleConfig::default_with_base_url("https://api.example.com");
        let (studio, host, _) = studio_with_mocks(config);

        let file = MediaFile::new("intro.mp4", "video/mp4", vec![0u8; 64]);
        let err = studio.upload_thumbnail(file).await.unwrap_err();

        assert!(matches!(err, CurricleError::UploadRejected(_)));
        host.assert_no_uploads();
    }

    #[tokio::test]
    async fn test_submit_through_studio() {
        let config = CurricleConfig::default_with_base_url("https://api.example.com");
        let (studio, _, api) = studio_with_mocks(config);

        let course = Course::new("Rust 101", "Systems programming", "engineering", Pricing::Free);
        let mut editor = studio.editor(course);
        editor.set_thumbnail_url("https://media.invalid/cover.png");
        editor.add_module();
        let mut draft = editor.add_lesson(1, LessonKind::Video).unwrap();
        draft.title = "Getting started".to_string();
        let video = draft.video_mut().unwrap();
        video.media_url = Some("https://media.invalid/intro.mp4".to_string());
        editor.commit_lesson(&draft).unwrap();
        let course = editor.into_course();

        let receipt = studio.submit(&course, SubmitAction::Publish).await.unwrap();

        assert_eq!(receipt.course_id.as_deref(), Some("course-1"));
        api.assert_called_times(1);
        assert_eq!(api.last_payload().unwrap().modules.len(), 1);
    }
}
