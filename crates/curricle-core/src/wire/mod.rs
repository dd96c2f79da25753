use serde::{Deserialize, Serialize};

use crate::content::{
    AssignmentContent, Course, CourseStatus, FileAttachment, Lesson, LessonContent, Question,
    QuizMode,
};
use crate::editor::{AssignmentDraft, DraftBody, FileDraft, LessonDraft, QuizDraft, VideoDraft};
use crate::error::{CurricleError, Result};
use crate::identity::Instructor;
use crate::media::MediaDuration;

/// Request body of the course-creation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePayload {
    pub title: String,
    pub description: String,
    pub category: String,
    pub thumbnail: String,
    /// `"free"` or `"paid"`.
    pub course_type: String,
    pub price: f64,
    pub discount_price: f64,
    pub status: CourseStatus,
    pub modules: Vec<ModulePayload>,
    /// Instructor account identifier.
    pub teacher: String,
}

/// One module inside a [`CoursePayload`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModulePayload {
    pub title: String,
    pub order: u32,
    pub lessons: Vec<LessonPayload>,
}

/// One lesson record on the wire, as sent to the platform and as read
/// back when a committed lesson is reopened for editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonPayload {
    pub title: String,
    pub order: u32,
    /// Playback length. Present on video lessons only.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub duration: Option<MediaDuration>,
    #[serde(flatten)]
    pub variant: LessonVariantPayload,
}

/// Variant-specific wire fields, discriminated by the `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LessonVariantPayload {
    #[serde(rename_all = "camelCase")]
    Video { media_url: String },
    #[serde(rename_all = "camelCase")]
    Quiz {
        questions: Vec<Question>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        time_limit_minutes: Option<u32>,
        quiz_mode: QuizMode,
    },
    #[serde(rename_all = "camelCase")]
    Assignment {
        instructions: String,
        /// `"text"` or `"file"`.
        content_type: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        text_content: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        file_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        file_url: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    File {
        description: String,
        file_name: String,
        file_url: String,
    },
}

/// Response body of the upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

/// Response body of the course-creation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub errors: Option<Vec<serde_json::Value>>,
    /// Identifier of the created course, reported on success.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub course_id: Option<String>,
}

impl CreateCourseResponse {
    /// Collapse the endpoint's message and error list into one line.
    pub fn failure_text(&self) -> String {
        let mut parts = Vec::new();
        if let Some(message) = &self.message {
            parts.push(message.clone());
        }
        if let Some(errors) = &self.errors {
            for error in errors {
                match error.as_str() {
                    Some(s) => parts.push(s.to_string()),
                    None => parts.push(error.to_string()),
                }
            }
        }
        if parts.is_empty() {
            parts.push("request rejected".to_string());
        }
        parts.join("; ")
    }
}

/// Flatten a course into the creation-request shape.
///
/// Deterministic: module and lesson order follow the tree, `order`
/// fields carry the ordinals, durations are formatted `m:ss`. Callers
/// validate first; a missing thumbnail serializes as an empty string.
pub fn course_to_payload(
    course: &Course,
    status: CourseStatus,
    instructor: &Instructor,
) -> CoursePayload {
    let (price, discount_price) = match &course.pricing {
        crate::content::Pricing::Free => (0.0, 0.0),
        crate::content::Pricing::Paid {
            price,
            discount_price,
        } => (*price, *discount_price),
    };

    CoursePayload {
        title: course.title.clone(),
        description: course.description.clone(),
        category: course.category.clone(),
        thumbnail: course.thumbnail_url.clone().unwrap_or_default(),
        course_type: course.pricing.course_type().to_string(),
        price,
        discount_price,
        status,
        modules: course
            .modules
            .iter()
            .map(|module| ModulePayload {
                title: module.title.clone(),
                order: module.ordinal,
                lessons: module.lessons.iter().map(lesson_to_payload).collect(),
            })
            .collect(),
        teacher: instructor.id.clone(),
    }
}

/// Flatten one lesson into its wire record.
pub fn lesson_to_payload(lesson: &Lesson) -> LessonPayload {
    let variant = match &lesson.content {
        LessonContent::Video { media_url, .. } => LessonVariantPayload::Video {
            media_url: media_url.clone(),
        },
        LessonContent::Quiz {
            questions,
            time_limit_minutes,
            mode,
        } => LessonVariantPayload::Quiz {
            questions: questions.clone(),
            time_limit_minutes: *time_limit_minutes,
            quiz_mode: *mode,
        },
        LessonContent::Assignment {
            instructions,
            content,
        } => {
            let (text_content, file_name, file_url) = match content {
                AssignmentContent::Text(text) => (Some(text.clone()), None, None),
                AssignmentContent::File(attachment) => (
                    None,
                    Some(attachment.file_name.clone()),
                    Some(attachment.file_url.clone()),
                ),
            };
            LessonVariantPayload::Assignment {
                instructions: instructions.clone(),
                content_type: content.content_type().to_string(),
                text_content,
                file_name,
                file_url,
            }
        }
        LessonContent::File {
            description,
            attachment,
        } => LessonVariantPayload::File {
            description: description.clone(),
            file_name: attachment.file_name.clone(),
            file_url: attachment.file_url.clone(),
        },
    };

    LessonPayload {
        title: lesson.title.clone(),
        order: lesson.ordinal,
        duration: lesson.duration(),
        variant,
    }
}

/// Rehydrate an edit draft from a stored lesson record.
///
/// The inverse of [`lesson_to_payload`]: for any committed lesson the
/// round trip reproduces every variant-specific field. The returned
/// draft is detached; the editor points it at its place in the tree
/// when reopening a lesson. Records that break the assignment
/// exactly-one rule are rejected.
pub fn lesson_from_payload(payload: &LessonPayload) -> Result<LessonDraft> {
    let body = match &payload.variant {
        LessonVariantPayload::Video { media_url } => DraftBody::Video(VideoDraft {
            media_url: if media_url.trim().is_empty() {
                None
            } else {
                Some(media_url.clone())
            },
            duration: payload.duration,
        }),
        LessonVariantPayload::Quiz {
            questions,
            time_limit_minutes,
            quiz_mode,
        } => DraftBody::Quiz(QuizDraft::from_questions(
            questions.clone(),
            *time_limit_minutes,
            *quiz_mode,
        )),
        LessonVariantPayload::Assignment {
            instructions,
            content_type,
            text_content,
            file_name,
            file_url,
        } => {
            let content = match content_type.as_str() {
                "text" => {
                    let text = text_content.clone().ok_or_else(|| {
                        CurricleError::Serialization(
                            "Assignment record with contentType text has no textContent"
                                .to_string(),
                        )
                    })?;
                    AssignmentContent::Text(text)
                }
                "file" => {
                    let (name, url) = match (file_name, file_url) {
                        (Some(name), Some(url)) => (name.clone(), url.clone()),
                        _ => {
                            return Err(CurricleError::Serialization(
                                "Assignment record with contentType file is missing fileName or fileUrl"
                                    .to_string(),
                            ))
                        }
                    };
                    AssignmentContent::File(FileAttachment::new(name, url))
                }
                other => {
                    return Err(CurricleError::Serialization(format!(
                        "Unknown assignment contentType: {}",
                        other
                    )))
                }
            };
            DraftBody::Assignment(AssignmentDraft {
                instructions: instructions.clone(),
                content: Some(content),
            })
        }
        LessonVariantPayload::File {
            description,
            file_name,
            file_url,
        } => DraftBody::File(FileDraft {
            description: description.clone(),
            attachment: Some(FileAttachment::new(file_name.clone(), file_url.clone())),
        }),
    };

    Ok(LessonDraft::from_parts(0, None, payload.title.clone(), body))
}
