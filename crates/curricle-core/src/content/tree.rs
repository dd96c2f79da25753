use super::course::Course;
use super::lesson::{Lesson, LessonContent};
use super::module::Module;
use super::quiz::{Answer, Question};

/// The in-memory document holding a course aggregate.
///
/// Reads go through [`ContentTree::course`] and [`ContentTree::walk`];
/// structural mutation is crate-internal so every change passes through
/// the editor and its invariant checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentTree {
    course: Course,
}

impl ContentTree {
    /// Wrap a course aggregate.
    pub fn new(course: Course) -> Self {
        Self { course }
    }

    /// The course aggregate, read-only.
    pub fn course(&self) -> &Course {
        &self.course
    }

    pub(crate) fn course_mut(&mut self) -> &mut Course {
        &mut self.course
    }

    /// Consume the tree, yielding the course aggregate.
    pub fn into_course(self) -> Course {
        self.course
    }

    /// Depth-first, document-order traversal of every node.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![Node::Course(&self.course)],
        }
    }
}

/// One node of the content tree, borrowed during traversal.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Course(&'a Course),
    Module(&'a Module),
    Lesson(&'a Lesson),
    Question(&'a Question),
    Answer(&'a Answer),
}

/// Depth-first iterator over a [`ContentTree`].
pub struct Walk<'a> {
    stack: Vec<Node<'a>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;

        // Children are pushed in reverse so they pop in document order.
        match node {
            Node::Course(course) => {
                self.stack
                    .extend(course.modules.iter().rev().map(Node::Module));
            }
            Node::Module(module) => {
                self.stack
                    .extend(module.lessons.iter().rev().map(Node::Lesson));
            }
            Node::Lesson(lesson) => {
                if let LessonContent::Quiz { questions, .. } = &lesson.content {
                    self.stack.extend(questions.iter().rev().map(Node::Question));
                }
            }
            Node::Question(question) => {
                self.stack
                    .extend(question.answers.iter().rev().map(Node::Answer));
            }
            Node::Answer(_) => {}
        }

        Some(node)
    }
}
