use super::lesson::Lesson;
use crate::media::MediaDuration;

/// An ordered section of a course.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    /// 1-based position within the course. Contiguous across the
    /// course's modules; renumbered after every insert or delete.
    pub ordinal: u32,

    /// Section title. Defaults to `"Module N"` on creation.
    pub title: String,

    /// Ordered lessons. Ordinals are contiguous from 1.
    pub lessons: Vec<Lesson>,
}

impl Module {
    /// Create an empty module with the default ordinal-derived title.
    pub(crate) fn with_ordinal(ordinal: u32) -> Self {
        Self {
            ordinal,
            title: format!("Module {}", ordinal),
            lessons: Vec::new(),
        }
    }

    /// Lesson with the given ordinal, if present.
    pub fn lesson(&self, ordinal: u32) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.ordinal == ordinal)
    }

    /// Compute the lesson-count and total-duration summary.
    ///
    /// Summaries are always derived from the current lessons, never
    /// cached, so they cannot go stale after edits.
    pub fn summary(&self) -> ModuleSummary {
        let total_seconds = self
            .lessons
            .iter()
            .filter_map(|l| l.duration())
            .map(|d| d.total_seconds())
            .sum();

        ModuleSummary {
            lesson_count: self.lessons.len(),
            total_duration: MediaDuration::from_seconds(total_seconds),
        }
    }

    /// Move this module to a new ordinal, regenerating the
    /// ordinal-derived title prefix when one is present.
    ///
    /// `"Module 3: Advanced"` becomes `"Module 2: Advanced"` when the
    /// ordinal drops from 3 to 2; a custom title without the prefix is
    /// left alone. `"Module 10"` does not match a prefix check for
    /// ordinal 1.
    pub(crate) fn renumber(&mut self, new_ordinal: u32) {
        let old_prefix = format!("Module {}", self.ordinal);
        if let Some(rest) = self.title.strip_prefix(&old_prefix) {
            if rest.is_empty() || rest.starts_with(':') {
                self.title = format!("Module {}{}", new_ordinal, rest);
            }
        }
        self.ordinal = new_ordinal;
    }
}

/// Snapshot of a module's aggregate figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleSummary {
    /// Number of lessons in the module.
    pub lesson_count: usize,

    /// Sum of the playback lengths of the module's video lessons.
    pub total_duration: MediaDuration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::lesson::{Lesson, LessonContent};

    fn video(ordinal: u32, seconds: u32) -> Lesson {
        Lesson {
            title: format!("Clip {}", ordinal),
            ordinal,
            content: LessonContent::Video {
                media_url: "https://cdn.example.com/clip.mp4".to_string(),
                duration: Some(MediaDuration::from_seconds(seconds)),
            },
        }
    }

    #[test]
    fn test_default_title() {
        let module = Module::with_ordinal(3);
        assert_eq!(module.title, "Module 3");
    }

    #[test]
    fn test_summary_sums_video_durations() {
        let mut module = Module::with_ordinal(1);
        module.lessons.push(video(1, 90));
        module.lessons.push(video(2, 30));

        let summary = module.summary();
        assert_eq!(summary.lesson_count, 2);
        assert_eq!(summary.total_duration, MediaDuration::from_seconds(120));
    }

    #[test]
    fn test_renumber_rewrites_default_title() {
        let mut module = Module::with_ordinal(3);
        module.renumber(2);
        assert_eq!(module.ordinal, 2);
        assert_eq!(module.title, "Module 2");
    }

    #[test]
    fn test_renumber_rewrites_prefixed_title() {
        let mut module = Module::with_ordinal(3);
        module.title = "Module 3: Advanced Topics".to_string();
        module.renumber(2);
        assert_eq!(module.title, "Module 2: Advanced Topics");
    }

    #[test]
    fn test_renumber_keeps_custom_title() {
        let mut module = Module::with_ordinal(3);
        module.title = "Closing Thoughts".to_string();
        module.renumber(2);
        assert_eq!(module.title, "Closing Thoughts");
        assert_eq!(module.ordinal, 2);
    }

    #[test]
    fn test_renumber_does_not_match_longer_ordinal() {
        let mut module = Module::with_ordinal(1);
        module.title = "Module 10: Recap".to_string();
        module.renumber(4);
        assert_eq!(module.title, "Module 10: Recap");
    }
}
