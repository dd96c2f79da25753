use serde::{Deserialize, Serialize};

use super::module::Module;

/// Lifecycle status of a course on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    /// Saved but not visible to students.
    Draft,
    /// Published and visible.
    Active,
}

impl CourseStatus {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
        }
    }
}

impl std::fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pricing model of a course. Paid courses carry a list price and a
/// discounted price; both must be non-negative to pass validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Pricing {
    Free,
    Paid { price: f64, discount_price: f64 },
}

impl Pricing {
    /// Wire value of the `courseType` field.
    pub fn course_type(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Paid { .. } => "paid",
        }
    }
}

/// Root aggregate of the content tree.
///
/// A course is owned exclusively by its editing session: the only live
/// mutable reference is held inside the session's editor, and the
/// aggregate is dropped once submission succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    /// Course title. Must be non-empty to submit.
    pub title: String,

    /// Full description shown on the course page.
    pub description: String,

    /// Platform category slug (e.g. `design`, `programming`).
    pub category: String,

    /// Free or paid, with amounts when paid.
    pub pricing: Pricing,

    /// Cover image URL. Populated by an image upload; required before
    /// submit.
    pub thumbnail_url: Option<String>,

    /// Current lifecycle status.
    pub status: CourseStatus,

    /// Ordered modules. Ordinals are contiguous from 1.
    pub modules: Vec<Module>,
}

impl Course {
    /// Create an empty course in draft status.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        pricing: Pricing,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
            pricing,
            thumbnail_url: None,
            status: CourseStatus::Draft,
            modules: Vec::new(),
        }
    }

    /// Total number of lessons across all modules.
    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|m| m.lessons.len()).sum()
    }

    /// Module with the given ordinal, if present.
    pub fn module(&self, ordinal: u32) -> Option<&Module> {
        self.modules.iter().find(|m| m.ordinal == ordinal)
    }

    pub(crate) fn module_mut(&mut self, ordinal: u32) -> Option<&mut Module> {
        self.modules.iter_mut().find(|m| m.ordinal == ordinal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings() {
        assert_eq!(CourseStatus::Draft.as_str(), "draft");
        assert_eq!(CourseStatus::Active.as_str(), "active");
    }

    #[test]
    fn test_course_type() {
        assert_eq!(Pricing::Free.course_type(), "free");
        let paid = Pricing::Paid {
            price: 49.0,
            discount_price: 29.0,
        };
        assert_eq!(paid.course_type(), "paid");
    }

    #[test]
    fn test_new_course_is_empty_draft() {
        let course = Course::new("Rust 101", "Intro", "programming", Pricing::Free);
        assert_eq!(course.status, CourseStatus::Draft);
        assert!(course.modules.is_empty());
        assert!(course.thumbnail_url.is_none());
        assert_eq!(course.lesson_count(), 0);
    }
}
