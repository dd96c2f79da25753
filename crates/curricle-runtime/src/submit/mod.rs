use std::sync::Arc;

use curricle_core::content::{Course, CourseStatus};
use curricle_core::error::{CurricleError, Result};
use curricle_core::identity::Instructor;
use curricle_core::transport::CourseApi;
use curricle_core::validate::validate_course;
use curricle_core::wire::course_to_payload;

/// What a submission should do with the course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    /// Save privately, not visible to students.
    Draft,
    /// Publish for enrollment.
    Publish,
}

impl SubmitAction {
    /// The status the course is sent with.
    pub fn status(self) -> CourseStatus {
        match self {
            SubmitAction::Draft => CourseStatus::Draft,
            SubmitAction::Publish => CourseStatus::Active,
        }
    }
}

/// Outcome of an accepted submission.
#[derive(Debug, Clone)]
pub struct SubmitReceipt {
    /// Identifier assigned by the endpoint, when it reports one.
    pub course_id: Option<String>,
    /// Status the course was accepted with.
    pub status: CourseStatus,
}

/// Sends a finished course to the creation endpoint.
///
/// The whole tree is validated up front; an invalid course never
/// produces a request. Transport and endpoint failures surface as
/// errors without touching the course, so the same tree can be
/// resubmitted as-is.
pub struct CourseSubmitter {
    api: Arc<dyn CourseApi>,
    instructor: Instructor,
    correct_limit: Option<usize>,
}

impl CourseSubmitter {
    /// Create a submitter for the given instructor account.
    pub fn new(api: Arc<dyn CourseApi>, instructor: Instructor) -> Self {
        Self {
            api,
            instructor,
            correct_limit: None,
        }
    }

    /// Cap enforced on correct answers in multi-correct quizzes.
    pub fn with_correct_limit(mut self, limit: Option<usize>) -> Self {
        self.correct_limit = limit;
        self
    }

    /// Validate the course and send it with the requested status.
    pub async fn submit(&self, course: &Course, action: SubmitAction) -> Result<SubmitReceipt> {
        validate_course(course, self.correct_limit).into_result()?;

        let status = action.status();
        let payload = course_to_payload(course, status, &self.instructor);

        tracing::info!(
            course = %course.title,
            status = %status,
            modules = course.modules.len(),
            lessons = course.lesson_count(),
            "Submitting course"
        );

        let response = self.api.create_course(payload).await?;
        if !response.success {
            let reason = response.failure_text();
            tracing::warn!(course = %course.title, reason = %reason, "Submission rejected");
            return Err(CurricleError::Api(reason));
        }

        tracing::info!(
            course = %course.title,
            course_id = ?response.course_id,
            "Course accepted"
        );
        Ok(SubmitReceipt {
            course_id: response.course_id,
            status,
        })
    }
}
