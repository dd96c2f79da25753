pub mod config;
pub mod content;
pub mod editor;
pub mod error;
pub mod identity;
pub mod media;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod transport;
pub mod validate;
pub mod wire;

pub use config::{ApiConfig, CurricleConfig, QuizConfig, UploadConfig};
pub use content::{
    Answer, AssignmentContent, ContentTree, Course, CourseStatus, FileAttachment, Lesson,
    LessonContent, LessonKind, Module, ModuleSummary, Node, Pricing, Question, QuizMode, Walk,
};
pub use editor::{CourseEditor, DraftBody, DraftId, LessonDraft, QuizDraft};
pub use error::{CurricleError, Result, ValidationIssue, ValidationReport};
pub use identity::Instructor;
pub use media::{MediaClass, MediaDuration, MediaFile, UploadedMedia};
pub use transport::{CourseApi, MediaTransport, UploadReceipt};
pub use validate::{quiz_violations, validate_course, validate_draft, QuizViolation};
pub use wire::{course_to_payload, CoursePayload, CreateCourseResponse, UploadResponse};
