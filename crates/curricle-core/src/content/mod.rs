mod course;
mod lesson;
mod module;
mod quiz;
mod tree;

pub use course::{Course, CourseStatus, Pricing};
pub use lesson::{AssignmentContent, FileAttachment, Lesson, LessonContent, LessonKind};
pub use module::{Module, ModuleSummary};
pub use quiz::{Answer, Question, QuizMode};
pub use tree::{ContentTree, Node, Walk};
