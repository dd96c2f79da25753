use uuid::Uuid;

use crate::content::{
    Answer, AssignmentContent, FileAttachment, LessonContent, LessonKind, Question, QuizMode,
};
use crate::error::{CurricleError, Result};
use crate::media::{MediaDuration, UploadedMedia};

/// Unique identifier of a lesson edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DraftId(pub Uuid);

impl DraftId {
    /// Generate a new random draft ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DraftId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DraftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An uncommitted lesson edit session.
///
/// Nothing a draft holds touches the content tree until the editor
/// commits it; discarding a draft discards every change in it.
#[derive(Debug, Clone)]
pub struct LessonDraft {
    id: DraftId,
    module_ordinal: u32,
    /// Ordinal of the committed lesson this draft reopens, when any.
    target: Option<u32>,

    /// Lesson title. Must be non-empty to commit.
    pub title: String,

    body: DraftBody,
}

/// Variant-specific draft state.
#[derive(Debug, Clone)]
pub enum DraftBody {
    Video(VideoDraft),
    Quiz(QuizDraft),
    Assignment(AssignmentDraft),
    File(FileDraft),
}

impl LessonDraft {
    pub(crate) fn new(module_ordinal: u32, kind: LessonKind) -> Self {
        let body = match kind {
            LessonKind::Video => DraftBody::Video(VideoDraft::default()),
            LessonKind::Quiz => DraftBody::Quiz(QuizDraft::default()),
            LessonKind::Assignment => DraftBody::Assignment(AssignmentDraft::default()),
            LessonKind::File => DraftBody::File(FileDraft::default()),
        };

        Self {
            id: DraftId::new(),
            module_ordinal,
            target: None,
            title: String::new(),
            body,
        }
    }

    pub(crate) fn from_parts(
        module_ordinal: u32,
        target: Option<u32>,
        title: String,
        body: DraftBody,
    ) -> Self {
        Self {
            id: DraftId::new(),
            module_ordinal,
            target,
            title,
            body,
        }
    }

    /// Point the draft at its destination in the tree. Used when a
    /// draft is rehydrated from a stored record.
    pub(crate) fn retarget(&mut self, module_ordinal: u32, target: Option<u32>) {
        self.module_ordinal = module_ordinal;
        self.target = target;
    }

    /// Identifier of this edit session.
    pub fn id(&self) -> DraftId {
        self.id
    }

    /// Ordinal of the module this draft commits into.
    pub fn module_ordinal(&self) -> u32 {
        self.module_ordinal
    }

    /// Ordinal of the committed lesson this draft replaces, when it
    /// reopens one.
    pub fn target_ordinal(&self) -> Option<u32> {
        self.target
    }

    /// The draft's content-type tag.
    pub fn kind(&self) -> LessonKind {
        match &self.body {
            DraftBody::Video(_) => LessonKind::Video,
            DraftBody::Quiz(_) => LessonKind::Quiz,
            DraftBody::Assignment(_) => LessonKind::Assignment,
            DraftBody::File(_) => LessonKind::File,
        }
    }

    /// Variant-specific state, read-only.
    pub fn body(&self) -> &DraftBody {
        &self.body
    }

    /// Video state of this draft.
    pub fn video(&self) -> Option<&VideoDraft> {
        match &self.body {
            DraftBody::Video(v) => Some(v),
            _ => None,
        }
    }

    /// Mutable video state, or an error for other variants.
    pub fn video_mut(&mut self) -> Result<&mut VideoDraft> {
        let kind = self.kind();
        match &mut self.body {
            DraftBody::Video(v) => Ok(v),
            _ => Err(CurricleError::NotFound(format!(
                "No video fields on a {} lesson",
                kind
            ))),
        }
    }

    /// Quiz state of this draft.
    pub fn quiz(&self) -> Option<&QuizDraft> {
        match &self.body {
            DraftBody::Quiz(q) => Some(q),
            _ => None,
        }
    }

    /// Mutable quiz state, or an error for other variants.
    pub fn quiz_mut(&mut self) -> Result<&mut QuizDraft> {
        let kind = self.kind();
        match &mut self.body {
            DraftBody::Quiz(q) => Ok(q),
            _ => Err(CurricleError::NotFound(format!(
                "No quiz fields on a {} lesson",
                kind
            ))),
        }
    }

    /// Assignment state of this draft.
    pub fn assignment(&self) -> Option<&AssignmentDraft> {
        match &self.body {
            DraftBody::Assignment(a) => Some(a),
            _ => None,
        }
    }

    /// Mutable assignment state, or an error for other variants.
    pub fn assignment_mut(&mut self) -> Result<&mut AssignmentDraft> {
        let kind = self.kind();
        match &mut self.body {
            DraftBody::Assignment(a) => Ok(a),
            _ => Err(CurricleError::NotFound(format!(
                "No assignment fields on a {} lesson",
                kind
            ))),
        }
    }

    /// File state of this draft.
    pub fn file(&self) -> Option<&FileDraft> {
        match &self.body {
            DraftBody::File(f) => Some(f),
            _ => None,
        }
    }

    /// Mutable file state, or an error for other variants.
    pub fn file_mut(&mut self) -> Result<&mut FileDraft> {
        let kind = self.kind();
        match &mut self.body {
            DraftBody::File(f) => Ok(f),
            _ => Err(CurricleError::NotFound(format!(
                "No file fields on a {} lesson",
                kind
            ))),
        }
    }

    /// Write a finished upload into the draft's media slot.
    ///
    /// Video drafts take the URL and playback length; file and
    /// assignment drafts take a file attachment. Quiz drafts have no
    /// media slot.
    pub fn apply_media(&mut self, media: &UploadedMedia) -> Result<()> {
        match &mut self.body {
            DraftBody::Video(v) => {
                v.media_url = Some(media.url.clone());
                v.duration = media.duration;
                Ok(())
            }
            DraftBody::File(f) => {
                f.attachment = Some(FileAttachment::new(&media.file_name, &media.url));
                Ok(())
            }
            DraftBody::Assignment(a) => {
                a.content = Some(AssignmentContent::File(FileAttachment::new(
                    &media.file_name,
                    &media.url,
                )));
                Ok(())
            }
            DraftBody::Quiz(_) => Err(CurricleError::UploadRejected(
                "Quiz lessons have no media slot".to_string(),
            )),
        }
    }

    /// Build the lesson content this draft describes.
    ///
    /// Callers validate first; a draft with unfilled required slots
    /// yields a validation error naming the first missing one.
    pub(crate) fn build_content(&self) -> Result<LessonContent> {
        match &self.body {
            DraftBody::Video(v) => {
                let media_url = v
                    .media_url
                    .clone()
                    .ok_or_else(|| required("media", "media required"))?;
                Ok(LessonContent::Video {
                    media_url,
                    duration: v.duration,
                })
            }
            DraftBody::Quiz(q) => Ok(LessonContent::Quiz {
                questions: q.questions.clone(),
                time_limit_minutes: q.time_limit_minutes,
                mode: q.mode,
            }),
            DraftBody::Assignment(a) => {
                let content = a
                    .content
                    .clone()
                    .ok_or_else(|| required("content", "assignment content required"))?;
                Ok(LessonContent::Assignment {
                    instructions: a.instructions.clone(),
                    content,
                })
            }
            DraftBody::File(f) => {
                let attachment = f
                    .attachment
                    .clone()
                    .ok_or_else(|| required("attachment", "file attachment required"))?;
                Ok(LessonContent::File {
                    description: f.description.clone(),
                    attachment,
                })
            }
        }
    }
}

fn required(field: &str, message: &str) -> CurricleError {
    let mut report = crate::error::ValidationReport::new();
    report.push(field, message);
    CurricleError::Validation(report)
}

/// Draft state of a video lesson.
#[derive(Debug, Clone, Default)]
pub struct VideoDraft {
    /// Set by a finished upload. Required to commit.
    pub media_url: Option<String>,

    /// Playback length of the uploaded asset.
    pub duration: Option<MediaDuration>,
}

/// Draft state of an assignment lesson.
#[derive(Debug, Clone, Default)]
pub struct AssignmentDraft {
    /// What the student is asked to do.
    pub instructions: String,

    /// Exactly one of inline text or an uploaded file. Required to
    /// commit.
    pub content: Option<AssignmentContent>,
}

/// Draft state of a file lesson.
#[derive(Debug, Clone, Default)]
pub struct FileDraft {
    /// What the download contains.
    pub description: String,

    /// Set by a finished upload. Required to commit.
    pub attachment: Option<FileAttachment>,
}

/// Draft state of a quiz lesson.
///
/// Questions and answers are edited through methods so the
/// correct-answer rules hold at every step, not only at commit.
#[derive(Debug, Clone)]
pub struct QuizDraft {
    questions: Vec<Question>,

    /// Optional time limit for the whole quiz.
    pub time_limit_minutes: Option<u32>,

    mode: QuizMode,
    correct_limit: Option<usize>,
}

impl Default for QuizDraft {
    fn default() -> Self {
        Self {
            questions: Vec::new(),
            time_limit_minutes: None,
            mode: QuizMode::SingleCorrect,
            correct_limit: None,
        }
    }
}

impl QuizDraft {
    pub(crate) fn from_questions(
        questions: Vec<Question>,
        time_limit_minutes: Option<u32>,
        mode: QuizMode,
    ) -> Self {
        Self {
            questions,
            time_limit_minutes,
            mode,
            correct_limit: None,
        }
    }

    /// Current correct-answer cardinality rule.
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    /// Switch the cardinality rule. Existing marks are kept; commit
    /// validation decides whether they still hold.
    pub fn set_mode(&mut self, mode: QuizMode) {
        self.mode = mode;
    }

    /// Cap on correct answers per question in multi-correct mode.
    pub fn correct_limit(&self) -> Option<usize> {
        self.correct_limit
    }

    /// Set or clear the multi-correct cap.
    pub fn set_correct_limit(&mut self, limit: Option<usize>) {
        self.correct_limit = limit;
    }

    /// Questions in display order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Position-derived display labels: `"Question 1"`, `"Question 2"`, …
    pub fn question_labels(&self) -> Vec<String> {
        (1..=self.questions.len())
            .map(|n| format!("Question {}", n))
            .collect()
    }

    /// Append an empty question. Returns its index.
    pub fn add_question(&mut self) -> usize {
        self.questions.push(Question::new(""));
        self.questions.len() - 1
    }

    /// Remove a question. Reports whether one was removed; labels of
    /// the remaining questions renumber inherently.
    pub fn delete_question(&mut self, index: usize) -> bool {
        if index < self.questions.len() {
            self.questions.remove(index);
            true
        } else {
            false
        }
    }

    /// Set a question's text.
    pub fn set_question_text(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let question = self.question_mut(index)?;
        question.text = text.into();
        Ok(())
    }

    /// Append an empty, not-correct answer to a question. Returns the
    /// answer's index.
    pub fn add_answer(&mut self, question_index: usize) -> Result<usize> {
        let question = self.question_mut(question_index)?;
        question.answers.push(Answer::new(""));
        Ok(question.answers.len() - 1)
    }

    /// Remove an answer from a question. Reports whether one was
    /// removed.
    pub fn delete_answer(&mut self, question_index: usize, answer_index: usize) -> Result<bool> {
        let question = self.question_mut(question_index)?;
        if answer_index < question.answers.len() {
            question.answers.remove(answer_index);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Set an answer's text.
    pub fn set_answer_text(
        &mut self,
        question_index: usize,
        answer_index: usize,
        text: impl Into<String>,
    ) -> Result<()> {
        let question = self.question_mut(question_index)?;
        let answer = question.answers.get_mut(answer_index).ok_or_else(|| {
            CurricleError::NotFound(format!("Answer {} does not exist", answer_index + 1))
        })?;
        answer.text = text.into();
        Ok(())
    }

    /// Mark or unmark an answer as correct under the current mode.
    ///
    /// Single-correct: the target becomes correct and every sibling is
    /// cleared. Multi-correct: the target flips; turning one on fails
    /// with a capacity error, and no mark changes, when it would push
    /// the correct count past the cap.
    pub fn toggle_correct(&mut self, question_index: usize, answer_index: usize) -> Result<()> {
        let mode = self.mode;
        let limit = self.correct_limit;
        let question = self.question_mut(question_index)?;

        if answer_index >= question.answers.len() {
            return Err(CurricleError::NotFound(format!(
                "Answer {} does not exist",
                answer_index + 1
            )));
        }

        match mode {
            QuizMode::SingleCorrect => {
                for (i, answer) in question.answers.iter_mut().enumerate() {
                    answer.correct = i == answer_index;
                }
            }
            QuizMode::MultiCorrect => {
                let turning_on = !question.answers[answer_index].correct;
                if turning_on {
                    if let Some(limit) = limit {
                        if question.correct_count() + 1 > limit {
                            return Err(CurricleError::CorrectAnswerLimit(limit));
                        }
                    }
                }
                question.answers[answer_index].correct = turning_on;
            }
        }

        Ok(())
    }

    fn question_mut(&mut self, index: usize) -> Result<&mut Question> {
        self.questions.get_mut(index).ok_or_else(|| {
            CurricleError::NotFound(format!("Question {} does not exist", index + 1))
        })
    }
}
