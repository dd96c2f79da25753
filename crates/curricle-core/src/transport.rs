use std::future::Future;
use std::pin::Pin;

use crate::error::Result;
use crate::media::MediaFile;
use crate::wire::{CoursePayload, CreateCourseResponse};

/// What a successful media transfer reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    /// URL where the platform serves the uploaded file.
    pub url: String,

    /// Optional endpoint message.
    pub message: Option<String>,
}

/// Boundary to the media upload endpoint.
///
/// Implementations own the actual transfer; callers treat a returned
/// error as a transport or endpoint failure and never retry on their
/// own.
pub trait MediaTransport: Send + Sync + 'static {
    /// Transfer one staged file, yielding the hosted URL.
    fn upload(
        &self,
        file: MediaFile,
    ) -> Pin<Box<dyn Future<Output = Result<UploadReceipt>> + Send + '_>>;
}

/// Boundary to the course-creation endpoint.
pub trait CourseApi: Send + Sync + 'static {
    /// Create a course from its wire payload.
    fn create_course(
        &self,
        payload: CoursePayload,
    ) -> Pin<Box<dyn Future<Output = Result<CreateCourseResponse>> + Send + '_>>;
}
