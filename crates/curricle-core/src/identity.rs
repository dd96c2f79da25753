use serde::{Deserialize, Serialize};

/// The instructor who owns the courses being authored.
///
/// Carried on every course payload so the platform can attribute
/// content without a separate lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    /// Platform-assigned account identifier.
    pub id: String,

    /// Display name shown alongside published courses.
    pub name: String,
}

impl Instructor {
    /// Create an instructor identity.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructor_new() {
        let instructor = Instructor::new("acct-9", "Dana Feld");
        assert_eq!(instructor.id, "acct-9");
        assert_eq!(instructor.name, "Dana Feld");
    }
}
