mod draft;

pub use draft::{
    AssignmentDraft, DraftBody, DraftId, FileDraft, LessonDraft, QuizDraft, VideoDraft,
};

use crate::content::{ContentTree, Course, Lesson, LessonKind, Module, Pricing};
use crate::error::{CurricleError, Result};
use crate::{validate, wire};

/// The single mutation path into a course's content tree.
///
/// An editor owns its tree for the whole editing session. Module and
/// lesson operations keep the structural invariants (contiguous
/// ordinals, derived titles, all-or-nothing commits) at every step, so
/// readers never observe a half-applied change.
#[derive(Debug)]
pub struct CourseEditor {
    tree: ContentTree,
    correct_limit: Option<usize>,
}

impl CourseEditor {
    /// Start an editing session over a course aggregate.
    pub fn new(course: Course) -> Self {
        Self {
            tree: ContentTree::new(course),
            correct_limit: None,
        }
    }

    /// Default cap on correct answers for new multi-correct quiz
    /// drafts. `None` leaves them unbounded.
    pub fn with_correct_limit(mut self, limit: Option<usize>) -> Self {
        self.correct_limit = limit;
        self
    }

    /// The course aggregate, read-only.
    pub fn course(&self) -> &Course {
        self.tree.course()
    }

    /// The content tree, read-only.
    pub fn tree(&self) -> &ContentTree {
        &self.tree
    }

    /// End the session, yielding the course aggregate.
    pub fn into_course(self) -> Course {
        self.tree.into_course()
    }

    /// Replace the course's descriptive fields.
    pub fn update_details(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) {
        let course = self.tree.course_mut();
        course.title = title.into();
        course.description = description.into();
        course.category = category.into();
    }

    /// Replace the course's pricing model.
    pub fn set_pricing(&mut self, pricing: Pricing) {
        self.tree.course_mut().pricing = pricing;
    }

    /// Set the cover image URL, normally from a finished image upload.
    pub fn set_thumbnail_url(&mut self, url: impl Into<String>) {
        self.tree.course_mut().thumbnail_url = Some(url.into());
    }

    /// Append an empty module titled `"Module N"` with the next
    /// contiguous ordinal. Returns the new ordinal.
    pub fn add_module(&mut self) -> u32 {
        let modules = &mut self.tree.course_mut().modules;
        let ordinal = modules.len() as u32 + 1;
        modules.push(Module::with_ordinal(ordinal));
        tracing::debug!(module = ordinal, "Module added");
        ordinal
    }

    /// Retitle a module. Reports whether the module existed.
    pub fn rename_module(&mut self, ordinal: u32, title: impl Into<String>) -> bool {
        match self.tree.course_mut().module_mut(ordinal) {
            Some(module) => {
                module.title = title.into();
                true
            }
            None => false,
        }
    }

    /// Remove a module and renumber the ones after it, regenerating
    /// ordinal-derived title prefixes. A missing ordinal is a no-op;
    /// the return value reports whether anything was removed.
    pub fn delete_module(&mut self, ordinal: u32) -> bool {
        let modules = &mut self.tree.course_mut().modules;
        let pos = match modules.iter().position(|m| m.ordinal == ordinal) {
            Some(pos) => pos,
            None => return false,
        };

        modules.remove(pos);
        for (idx, module) in modules.iter_mut().enumerate() {
            let want = idx as u32 + 1;
            if module.ordinal != want {
                module.renumber(want);
            }
        }

        tracing::debug!(module = ordinal, "Module deleted");
        true
    }

    /// Open an edit session for a new lesson of the given kind.
    ///
    /// The tree is untouched until the draft is committed; dropping
    /// the draft abandons the lesson.
    pub fn add_lesson(&mut self, module_ordinal: u32, kind: LessonKind) -> Result<LessonDraft> {
        if self.tree.course().module(module_ordinal).is_none() {
            return Err(CurricleError::NotFound(format!(
                "Module {} does not exist",
                module_ordinal
            )));
        }

        let mut draft = LessonDraft::new(module_ordinal, kind);
        if let Ok(quiz) = draft.quiz_mut() {
            quiz.set_correct_limit(self.correct_limit);
        }
        Ok(draft)
    }

    /// Reopen a committed lesson as a fresh draft.
    ///
    /// The draft is rehydrated through the wire mapping, the same
    /// inverse used for stored lesson records, so committing it
    /// unchanged writes back an identical lesson.
    pub fn edit_lesson(&self, module_ordinal: u32, lesson_ordinal: u32) -> Result<LessonDraft> {
        let lesson = self
            .tree
            .course()
            .module(module_ordinal)
            .and_then(|m| m.lesson(lesson_ordinal))
            .ok_or_else(|| {
                CurricleError::NotFound(format!(
                    "Lesson {} in module {} does not exist",
                    lesson_ordinal, module_ordinal
                ))
            })?;

        let payload = wire::lesson_to_payload(lesson);
        let mut draft = wire::lesson_from_payload(&payload)?;
        draft.retarget(module_ordinal, Some(lesson_ordinal));
        if let Ok(quiz) = draft.quiz_mut() {
            quiz.set_correct_limit(self.correct_limit);
        }
        Ok(draft)
    }

    /// Validate a draft and merge it into the tree.
    ///
    /// On success the lesson is appended (new draft) or replaces the
    /// lesson the draft reopened, and the committed lesson is
    /// returned. On any failure the tree is left exactly as it was.
    pub fn commit_lesson(&mut self, draft: &LessonDraft) -> Result<&Lesson> {
        validate::validate_draft(draft).into_result()?;
        let content = draft.build_content()?;

        let module_ordinal = draft.module_ordinal();
        let module = self
            .tree
            .course_mut()
            .module_mut(module_ordinal)
            .ok_or_else(|| {
                CurricleError::NotFound(format!("Module {} does not exist", module_ordinal))
            })?;

        match draft.target_ordinal() {
            Some(target) => {
                let pos = module
                    .lessons
                    .iter()
                    .position(|l| l.ordinal == target)
                    .ok_or_else(|| {
                        CurricleError::NotFound(format!(
                            "Lesson {} in module {} does not exist",
                            target, module_ordinal
                        ))
                    })?;
                module.lessons[pos] = Lesson {
                    title: draft.title.clone(),
                    ordinal: target,
                    content,
                };
                tracing::debug!(module = module_ordinal, lesson = target, "Lesson replaced");
                Ok(&module.lessons[pos])
            }
            None => {
                let ordinal = module.lessons.len() as u32 + 1;
                module.lessons.push(Lesson {
                    title: draft.title.clone(),
                    ordinal,
                    content,
                });
                tracing::debug!(module = module_ordinal, lesson = ordinal, "Lesson committed");
                let idx = module.lessons.len() - 1;
                Ok(&module.lessons[idx])
            }
        }
    }

    /// Remove a lesson and renumber the ones after it. A missing
    /// target is a no-op; the return value reports whether anything
    /// was removed.
    pub fn delete_lesson(&mut self, module_ordinal: u32, lesson_ordinal: u32) -> bool {
        let module = match self.tree.course_mut().module_mut(module_ordinal) {
            Some(module) => module,
            None => return false,
        };
        let pos = match module.lessons.iter().position(|l| l.ordinal == lesson_ordinal) {
            Some(pos) => pos,
            None => return false,
        };

        module.lessons.remove(pos);
        for (idx, lesson) in module.lessons.iter_mut().enumerate() {
            lesson.ordinal = idx as u32 + 1;
        }

        tracing::debug!(module = module_ordinal, lesson = lesson_ordinal, "Lesson deleted");
        true
    }
}
