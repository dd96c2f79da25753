use serde::{Deserialize, Serialize};

/// Correct-answer cardinality rule for a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizMode {
    /// Exactly one answer per question is correct.
    SingleCorrect,
    /// One or more answers per question are correct, up to an optional
    /// cap.
    MultiCorrect,
}

impl QuizMode {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleCorrect => "single-correct",
            Self::MultiCorrect => "multi-correct",
        }
    }
}

impl std::fmt::Display for QuizMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One quiz question with its candidate answers.
///
/// "Question N" labels shown in the editor are derived from position,
/// never stored, so deleting a question renumbers the rest inherently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text. Non-empty once committed.
    pub text: String,

    /// Candidate answers. At least two required to commit.
    pub answers: Vec<Answer>,
}

impl Question {
    /// Create a question with no answers yet.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            answers: Vec::new(),
        }
    }

    /// Number of answers currently marked correct.
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.correct).count()
    }
}

/// A candidate answer on a quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// The answer text. Non-empty once committed.
    pub text: String,

    /// Whether this answer is marked correct.
    #[serde(rename = "isCorrect")]
    pub correct: bool,
}

impl Answer {
    /// Create an answer, not yet marked correct.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            correct: false,
        }
    }
}
