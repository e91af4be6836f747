use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a Student.
///
/// Stored and displayed as a numeric string ("1", "2", …) to match the
/// persisted roster snapshot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct StudentId(u64);

impl StudentId {
    /// Creates a new `StudentId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StudentId({})", self.0)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing a `StudentId` from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStudentIdError {
    raw: String,
}

impl fmt::Display for ParseStudentIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid student id: {}", self.raw)
    }
}

impl std::error::Error for ParseStudentIdError {}

impl FromStr for StudentId {
    type Err = ParseStudentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(StudentId::new)
            .map_err(|_| ParseStudentIdError { raw: s.to_string() })
    }
}

impl From<StudentId> for String {
    fn from(id: StudentId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for StudentId {
    type Error = ParseStudentIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ─── Catalog Identifiers ───────────────────────────────────────────────────────

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

string_id! {
    /// Unique identifier for a Subject, e.g. `francais`.
    SubjectId
}

string_id! {
    /// Identifier for an exercise category, unique within its Subject.
    CategoryId
}

string_id! {
    /// Identifier for an exercise, unique within its Subject.
    ExerciseId
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_id_display() {
        let id = StudentId::new(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_student_id_from_str() {
        let id: StudentId = "123".parse().unwrap();
        assert_eq!(id, StudentId::new(123));
    }

    #[test]
    fn test_student_id_from_str_invalid() {
        let result = "not-a-number".parse::<StudentId>();
        assert!(result.is_err());
    }

    #[test]
    fn test_student_id_roundtrip() {
        let original = StudentId::new(7);
        let serialized = original.to_string();
        let deserialized: StudentId = serialized.parse().unwrap();
        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_subject_id_as_str() {
        let id = SubjectId::new("francais");
        assert_eq!(id.as_str(), "francais");
        assert_eq!(id.to_string(), "francais");
    }

    #[test]
    fn test_exercise_id_from_str_ref() {
        let id: ExerciseId = "TRANSPO-1".into();
        assert_eq!(id, ExerciseId::new("TRANSPO-1"));
    }
}
