use std::fmt;

use crate::content::{AssignmentContent, Course, LessonContent, Pricing, Question, QuizMode};
use crate::editor::{DraftBody, LessonDraft};
use crate::error::ValidationReport;

/// A structural rule broken by a quiz question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizViolation {
    /// Fewer than two answers on the question.
    TooFewAnswers { question: usize, count: usize },
    /// No answer is marked correct.
    NoCorrectAnswer { question: usize },
    /// More than one correct answer in single-correct mode.
    MultipleCorrect { question: usize, count: usize },
    /// Correct count exceeds the multi-correct cap.
    TooManyCorrect {
        question: usize,
        count: usize,
        limit: usize,
    },
}

impl QuizViolation {
    /// Zero-based index of the offending question.
    pub fn question_index(&self) -> usize {
        match self {
            Self::TooFewAnswers { question, .. }
            | Self::NoCorrectAnswer { question }
            | Self::MultipleCorrect { question, .. }
            | Self::TooManyCorrect { question, .. } => *question,
        }
    }
}

impl fmt::Display for QuizViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewAnswers { question, count } => write!(
                f,
                "Question {} has {} answers; at least 2 are required",
                question + 1,
                count
            ),
            Self::NoCorrectAnswer { question } => {
                write!(f, "Question {} has no correct answer", question + 1)
            }
            Self::MultipleCorrect { question, count } => write!(
                f,
                "Question {} has {} correct answers; exactly one is allowed",
                question + 1,
                count
            ),
            Self::TooManyCorrect {
                question,
                count,
                limit,
            } => write!(
                f,
                "Question {} has {} correct answers; at most {} are allowed",
                question + 1,
                count,
                limit
            ),
        }
    }
}

/// Check every question of a quiz against the cardinality rules.
///
/// Pure: the returned list is empty exactly when the quiz is valid.
/// `correct_limit` only applies in multi-correct mode.
pub fn quiz_violations(
    questions: &[Question],
    mode: QuizMode,
    correct_limit: Option<usize>,
) -> Vec<QuizViolation> {
    let mut violations = Vec::new();

    for (index, question) in questions.iter().enumerate() {
        if question.answers.len() < 2 {
            violations.push(QuizViolation::TooFewAnswers {
                question: index,
                count: question.answers.len(),
            });
        }

        let correct = question.correct_count();
        if correct == 0 {
            violations.push(QuizViolation::NoCorrectAnswer { question: index });
            continue;
        }

        match mode {
            QuizMode::SingleCorrect => {
                if correct > 1 {
                    violations.push(QuizViolation::MultipleCorrect {
                        question: index,
                        count: correct,
                    });
                }
            }
            QuizMode::MultiCorrect => {
                if let Some(limit) = correct_limit {
                    if correct > limit {
                        violations.push(QuizViolation::TooManyCorrect {
                            question: index,
                            count: correct,
                            limit,
                        });
                    }
                }
            }
        }
    }

    violations
}

/// Check a lesson draft for everything commit requires.
pub fn validate_draft(draft: &LessonDraft) -> ValidationReport {
    let mut report = ValidationReport::new();

    if draft.title.trim().is_empty() {
        report.push("title", "Title is required");
    }

    match draft.body() {
        DraftBody::Video(video) => {
            let missing = video
                .media_url
                .as_deref()
                .map_or(true, |url| url.trim().is_empty());
            if missing {
                report.push("media", "media required");
            }
        }
        DraftBody::Quiz(quiz) => {
            check_questions(
                &mut report,
                "questions",
                quiz.questions(),
                quiz.mode(),
                quiz.correct_limit(),
            );
        }
        DraftBody::Assignment(assignment) => match &assignment.content {
            None => report.push("content", "assignment content required"),
            Some(AssignmentContent::Text(text)) if text.trim().is_empty() => {
                report.push("content", "Assignment text is empty");
            }
            Some(_) => {}
        },
        DraftBody::File(file) => {
            if file.attachment.is_none() {
                report.push("attachment", "file attachment required");
            }
        }
    }

    report
}

/// Check a whole course before submission.
///
/// Every lesson must independently satisfy its variant rules, on top
/// of the course-level required fields and ordinal contiguity.
/// `correct_limit` is the platform-wide multi-correct cap, if any.
pub fn validate_course(course: &Course, correct_limit: Option<usize>) -> ValidationReport {
    let mut report = ValidationReport::new();

    if course.title.trim().is_empty() {
        report.push("title", "Title is required");
    }
    if course.description.trim().is_empty() {
        report.push("description", "Description is required");
    }
    if course.category.trim().is_empty() {
        report.push("category", "Category is required");
    }
    if let Pricing::Paid {
        price,
        discount_price,
    } = &course.pricing
    {
        if *price < 0.0 {
            report.push("price", "Price must be non-negative");
        }
        if *discount_price < 0.0 {
            report.push("discountPrice", "Discount price must be non-negative");
        }
    }
    if course
        .thumbnail_url
        .as_deref()
        .map_or(true, |url| url.trim().is_empty())
    {
        report.push("thumbnail", "Thumbnail is required");
    }

    let contiguous = course
        .modules
        .iter()
        .enumerate()
        .all(|(i, m)| m.ordinal == i as u32 + 1);
    if !contiguous {
        report.push("modules", "Module ordinals must be contiguous from 1");
    }

    for (mi, module) in course.modules.iter().enumerate() {
        if module.title.trim().is_empty() {
            report.push(format!("modules[{}].title", mi), "Module title is required");
        }

        let lessons_contiguous = module
            .lessons
            .iter()
            .enumerate()
            .all(|(i, l)| l.ordinal == i as u32 + 1);
        if !lessons_contiguous {
            report.push(
                format!("modules[{}].lessons", mi),
                "Lesson ordinals must be contiguous from 1",
            );
        }

        for (li, lesson) in module.lessons.iter().enumerate() {
            let base = format!("modules[{}].lessons[{}]", mi, li);

            if lesson.title.trim().is_empty() {
                report.push(format!("{}.title", base), "Title is required");
            }

            match &lesson.content {
                LessonContent::Video { media_url, .. } => {
                    if media_url.trim().is_empty() {
                        report.push(format!("{}.media_url", base), "media required");
                    }
                }
                LessonContent::Quiz {
                    questions, mode, ..
                } => {
                    check_questions(
                        &mut report,
                        &format!("{}.questions", base),
                        questions,
                        *mode,
                        correct_limit,
                    );
                }
                LessonContent::Assignment { content, .. } => {
                    if let AssignmentContent::Text(text) = content {
                        if text.trim().is_empty() {
                            report.push(format!("{}.content", base), "Assignment text is empty");
                        }
                    }
                }
                LessonContent::File { .. } => {}
            }
        }
    }

    report
}

fn check_questions(
    report: &mut ValidationReport,
    base: &str,
    questions: &[Question],
    mode: QuizMode,
    correct_limit: Option<usize>,
) {
    if questions.is_empty() {
        report.push(base, "At least one question is required");
        return;
    }

    for (qi, question) in questions.iter().enumerate() {
        if question.text.trim().is_empty() {
            report.push(
                format!("{}[{}].text", base, qi),
                "Question text is required",
            );
        }
        for (ai, answer) in question.answers.iter().enumerate() {
            if answer.text.trim().is_empty() {
                report.push(
                    format!("{}[{}].answers[{}].text", base, qi, ai),
                    "Answer text is required",
                );
            }
        }
    }

    for violation in quiz_violations(questions, mode, correct_limit) {
        report.push(
            format!("{}[{}]", base, violation.question_index()),
            violation.to_string(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{
        Answer, Course, FileAttachment, Lesson, LessonContent, Module, Pricing,
    };

    fn question(texts: &[(&str, bool)]) -> Question {
        let mut q = Question::new("What does `?` do?");
        for (text, correct) in texts {
            q.answers.push(Answer {
                text: text.to_string(),
                correct: *correct,
            });
        }
        q
    }

    #[test]
    fn test_valid_single_correct_quiz() {
        let questions = vec![question(&[("Propagates errors", true), ("Panics", false)])];
        assert!(quiz_violations(&questions, QuizMode::SingleCorrect, None).is_empty());
    }

    #[test]
    fn test_too_few_answers() {
        let questions = vec![question(&[("Only option", true)])];
        let violations = quiz_violations(&questions, QuizMode::SingleCorrect, None);
        assert_eq!(
            violations,
            vec![QuizViolation::TooFewAnswers {
                question: 0,
                count: 1
            }]
        );
    }

    #[test]
    fn test_no_correct_answer() {
        let questions = vec![question(&[("A", false), ("B", false)])];
        let violations = quiz_violations(&questions, QuizMode::MultiCorrect, None);
        assert_eq!(violations, vec![QuizViolation::NoCorrectAnswer { question: 0 }]);
    }

    #[test]
    fn test_single_correct_rejects_two_marks() {
        let questions = vec![question(&[("A", true), ("B", true)])];
        let violations = quiz_violations(&questions, QuizMode::SingleCorrect, None);
        assert_eq!(
            violations,
            vec![QuizViolation::MultipleCorrect {
                question: 0,
                count: 2
            }]
        );
    }

    #[test]
    fn test_multi_correct_cap() {
        let questions = vec![question(&[("A", true), ("B", true), ("C", true)])];

        assert!(quiz_violations(&questions, QuizMode::MultiCorrect, None).is_empty());
        assert_eq!(
            quiz_violations(&questions, QuizMode::MultiCorrect, Some(2)),
            vec![QuizViolation::TooManyCorrect {
                question: 0,
                count: 3,
                limit: 2
            }]
        );
    }

    #[test]
    fn test_violations_name_later_questions() {
        let questions = vec![
            question(&[("A", true), ("B", false)]),
            question(&[("Lone", false)]),
        ];
        let violations = quiz_violations(&questions, QuizMode::SingleCorrect, None);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].question_index(), 1);
        assert!(violations[0].to_string().contains("Question 2"));
    }

    fn submittable_course() -> Course {
        let mut course = Course::new("Rust", "A course", "programming", Pricing::Free);
        course.thumbnail_url = Some("https://cdn.example.com/cover.png".to_string());
        let mut module = Module::with_ordinal(1);
        module.lessons.push(Lesson {
            title: "Slides".to_string(),
            ordinal: 1,
            content: LessonContent::File {
                description: "Deck".to_string(),
                attachment: FileAttachment::new("deck.pdf", "https://x/deck.pdf"),
            },
        });
        course.modules.push(module);
        course
    }

    #[test]
    fn test_validate_course_accepts_complete_tree() {
        assert!(validate_course(&submittable_course(), None).is_empty());
    }

    #[test]
    fn test_validate_course_requires_thumbnail() {
        let mut course = submittable_course();
        course.thumbnail_url = None;
        let report = validate_course(&course, None);
        assert!(report.mentions("thumbnail"));
    }

    #[test]
    fn test_validate_course_rejects_negative_price() {
        let mut course = submittable_course();
        course.pricing = Pricing::Paid {
            price: -1.0,
            discount_price: 0.0,
        };
        let report = validate_course(&course, None);
        assert!(report.mentions("price"));
        assert!(!report.mentions("discountPrice"));
    }

    #[test]
    fn test_validate_course_flags_ordinal_gap() {
        let mut course = submittable_course();
        course.modules[0].ordinal = 2;
        let report = validate_course(&course, None);
        assert!(report.mentions("modules"));
    }

    #[test]
    fn test_validate_course_flags_incomplete_video() {
        let mut course = submittable_course();
        course.modules[0].lessons.push(Lesson {
            title: "Intro".to_string(),
            ordinal: 2,
            content: LessonContent::Video {
                media_url: String::new(),
                duration: None,
            },
        });
        let report = validate_course(&course, None);
        assert!(report.mentions("modules[0].lessons[1].media_url"));
    }
}
