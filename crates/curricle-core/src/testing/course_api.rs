//! In-memory course endpoint for submission tests.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

use crate::error::{CurricleError, Result};
use crate::transport::CourseApi;
use crate::wire::{CoursePayload, CreateCourseResponse};

#[derive(Debug, Clone)]
enum Reply {
    Accepted { course_id: String },
    Rejected { message: String },
    Unreachable { message: String },
}

/// Mock implementation of [`CourseApi`] that records every payload.
///
/// The base behavior is fixed at construction (`accepting`, `rejecting`
/// or `failing`). One-shot replies can be queued on top with
/// [`fail_next`] and [`reject_next`] to script sequences such as a
/// transport failure followed by a successful retry.
///
/// [`fail_next`]: MockCourseApi::fail_next
/// [`reject_next`]: MockCourseApi::reject_next
#[derive(Clone)]
pub struct MockCourseApi {
    base: Reply,
    queued: Arc<RwLock<VecDeque<Reply>>>,
    recorded: Arc<RwLock<Vec<CoursePayload>>>,
}

impl MockCourseApi {
    fn with_base(base: Reply) -> Self {
        Self {
            base,
            queued: Arc::new(RwLock::new(VecDeque::new())),
            recorded: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Endpoint that accepts every course with id `course-1`.
    pub fn accepting() -> Self {
        Self::with_base(Reply::Accepted {
            course_id: "course-1".to_string(),
        })
    }

    /// Endpoint that answers every request with `success: false`.
    pub fn rejecting(message: &str) -> Self {
        Self::with_base(Reply::Rejected {
            message: message.to_string(),
        })
    }

    /// Endpoint that fails every request at the transport layer.
    pub fn failing(message: &str) -> Self {
        Self::with_base(Reply::Unreachable {
            message: message.to_string(),
        })
    }

    /// Queue a one-shot transport failure ahead of the base behavior.
    pub fn fail_next(&self, message: &str) {
        self.queued.write().unwrap().push_back(Reply::Unreachable {
            message: message.to_string(),
        });
    }

    /// Queue a one-shot `success: false` reply ahead of the base behavior.
    pub fn reject_next(&self, message: &str) {
        self.queued.write().unwrap().push_back(Reply::Rejected {
            message: message.to_string(),
        });
    }

    /// All payloads observed so far, in call order.
    pub fn recorded(&self) -> Vec<CoursePayload> {
        self.recorded.read().unwrap().clone()
    }

    /// The most recent payload, if any call was made.
    pub fn last_payload(&self) -> Option<CoursePayload> {
        self.recorded.read().unwrap().last().cloned()
    }

    /// Assert that the endpoint was called exactly this many times.
    pub fn assert_called_times(&self, expected: usize) {
        let actual = self.recorded.read().unwrap().len();
        assert!(
            actual == expected,
            "Expected {} course submissions but saw {}",
            expected,
            actual
        );
    }

    /// Assert that the endpoint was never called.
    pub fn assert_not_called(&self) {
        self.assert_called_times(0);
    }

    fn next_reply(&self) -> Reply {
        let queued = self.queued.write().unwrap().pop_front();
        match queued {
            Some(reply) => reply,
            None => self.base.clone(),
        }
    }
}

impl Default for MockCourseApi {
    fn default() -> Self {
        Self::accepting()
    }
}

impl CourseApi for MockCourseApi {
    fn create_course(
        &self,
        payload: CoursePayload,
    ) -> Pin<Box<dyn Future<Output = Result<CreateCourseResponse>> + Send + '_>> {
        self.recorded.write().unwrap().push(payload);
        let reply = self.next_reply();
        Box::pin(async move {
            match reply {
                Reply::Accepted { course_id } => Ok(CreateCourseResponse {
                    success: true,
                    message: None,
                    errors: None,
                    course_id: Some(course_id),
                }),
                Reply::Rejected { message } => Ok(CreateCourseResponse {
                    success: false,
                    message: Some(message),
                    errors: None,
                    course_id: None,
                }),
                Reply::Unreachable { message } => Err(CurricleError::Transport(message)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::CourseStatus;

    fn sample_payload(title: &str) -> CoursePayload {
        CoursePayload {
            title: title.to_string(),
            description: "About".to_string(),
            category: "engineering".to_string(),
            thumbnail: "https://media.invalid/thumb.png".to_string(),
            course_type: "free".to_string(),
            price: 0.0,
            discount_price: 0.0,
            status: CourseStatus::Draft,
            modules: Vec::new(),
            teacher: "teacher-1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_accepting_api_records_payload() {
        let api = MockCourseApi::accepting();
        let response = api.create_course(sample_payload("Rust 101")).await.unwrap();

        assert!(response.success);
        assert_eq!(response.course_id.as_deref(), Some("course-1"));
        api.assert_called_times(1);
        assert_eq!(api.last_payload().unwrap().title, "Rust 101");
    }

    #[tokio::test]
    async fn test_rejecting_api_reports_failure_body() {
        let api = MockCourseApi::rejecting("title is required");
        let response = api.create_course(sample_payload("")).await.unwrap();

        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("title is required"));
        api.assert_called_times(1);
    }

    #[tokio::test]
    async fn test_fail_next_runs_once_then_base_behavior() {
        let api = MockCourseApi::accepting();
        api.fail_next("connection refused");

        let first = api.create_course(sample_payload("Rust 101")).await;
        assert!(matches!(first, Err(CurricleError::Transport(_))));

        let second = api.create_course(sample_payload("Rust 101")).await.unwrap();
        assert!(second.success);
        api.assert_called_times(2);
    }

    #[test]
    fn test_not_called_by_default() {
        let api = MockCourseApi::accepting();
        api.assert_not_called();
    }
}
