use serde::{Deserialize, Serialize};

use super::quiz::{Question, QuizMode};
use crate::media::MediaDuration;

/// The fixed content-type tag of a lesson. Set at creation and never
/// changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonKind {
    Video,
    Quiz,
    Assignment,
    File,
}

impl LessonKind {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Quiz => "quiz",
            Self::Assignment => "assignment",
            Self::File => "file",
        }
    }
}

impl std::fmt::Display for LessonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single unit of content within a module.
#[derive(Debug, Clone, PartialEq)]
pub struct Lesson {
    /// Lesson title. Non-empty once committed.
    pub title: String,

    /// 1-based position within the module, contiguous.
    pub ordinal: u32,

    /// Variant-specific payload.
    pub content: LessonContent,
}

impl Lesson {
    /// The lesson's content-type tag.
    pub fn kind(&self) -> LessonKind {
        self.content.kind()
    }

    /// Playback length. Only video lessons carry one.
    pub fn duration(&self) -> Option<MediaDuration> {
        match &self.content {
            LessonContent::Video { duration, .. } => *duration,
            _ => None,
        }
    }
}

/// Variant payload of a lesson. Each variant carries only its own
/// required fields.
#[derive(Debug, Clone, PartialEq)]
pub enum LessonContent {
    Video {
        /// Where the platform serves the video. Populated by a
        /// finished upload; required before the lesson can be
        /// committed.
        media_url: String,
        /// Playback length derived from the uploaded asset.
        duration: Option<MediaDuration>,
    },
    Quiz {
        /// Ordered questions. At least one required to commit.
        questions: Vec<Question>,
        /// Optional time limit for the whole quiz.
        time_limit_minutes: Option<u32>,
        /// Correct-answer cardinality rule.
        mode: QuizMode,
    },
    Assignment {
        /// What the student is asked to do.
        instructions: String,
        /// The assignment body, either inline text or a file.
        content: AssignmentContent,
    },
    File {
        /// What the download contains.
        description: String,
        /// The downloadable file.
        attachment: FileAttachment,
    },
}

impl LessonContent {
    /// The content-type tag of this payload.
    pub fn kind(&self) -> LessonKind {
        match self {
            Self::Video { .. } => LessonKind::Video,
            Self::Quiz { .. } => LessonKind::Quiz,
            Self::Assignment { .. } => LessonKind::Assignment,
            Self::File { .. } => LessonKind::File,
        }
    }
}

/// Assignment body. Exactly one of inline text or an attached file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentContent {
    Text(String),
    File(FileAttachment),
}

impl AssignmentContent {
    /// Wire value of the `contentType` field.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::File(_) => "file",
        }
    }
}

/// A named file hosted by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAttachment {
    /// Original file name shown to students.
    pub file_name: String,

    /// Where the platform serves the file.
    pub file_url: String,
}

impl FileAttachment {
    /// Create an attachment record.
    pub fn new(file_name: impl Into<String>, file_url: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            file_url: file_url.into(),
        }
    }
}
