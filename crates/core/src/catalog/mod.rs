//! The fixed exercise catalog: Subjects → Categories → Exercises.
//!
//! Pure data built once at startup. Statistics and ranking count against the
//! totals exposed here, so ids must be stable across runs; both generators
//! are deterministic.

mod standard;

use crate::model::{CategoryId, ExerciseId, SubjectId};

/// The atomic completable unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseId,
    pub label: String,
}

/// An ordered group of exercises within a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseCategory {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub exercises: Vec<Exercise>,
}

/// A top-level subject with its categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub categories: Vec<ExerciseCategory>,
}

/// Generates `end - start + 1` exercises numbered `start..=end`.
///
/// Ids are `{id_prefix}{i}`; labels use `label_prefix` when given, falling
/// back to the id prefix.
#[must_use]
pub fn generate_range(
    id_prefix: &str,
    start: u32,
    end: u32,
    label_prefix: Option<&str>,
) -> Vec<Exercise> {
    let display_prefix = label_prefix.unwrap_or(id_prefix);
    (start..=end)
        .map(|i| Exercise {
            id: ExerciseId::new(format!("{id_prefix}{i}")),
            label: format!("{display_prefix}{i}"),
        })
        .collect()
}

/// Generates one exercise per (number, letter) pair, number-major.
///
/// For each `i` in `start..=end` and each letter in the given order, the id
/// is `{id_prefix}{i}{letter}`; total count is
/// `(end - start + 1) * letters.len()`.
#[must_use]
pub fn generate_lettered_range(
    id_prefix: &str,
    start: u32,
    end: u32,
    letters: &[&str],
    label_prefix: Option<&str>,
) -> Vec<Exercise> {
    let display_prefix = label_prefix.unwrap_or(id_prefix);
    (start..=end)
        .flat_map(|i| {
            letters.iter().map(move |letter| Exercise {
                id: ExerciseId::new(format!("{id_prefix}{i}{letter}")),
                label: format!("{display_prefix}{i}{letter}"),
            })
        })
        .collect()
}

/// Read-only lookups over the subject hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    subjects: Vec<Subject>,
}

impl Catalog {
    #[must_use]
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }

    /// The fixed subject table shipped with the application.
    ///
    /// Identical output on every call.
    #[must_use]
    pub fn standard() -> Self {
        standard::build()
    }

    #[must_use]
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    #[must_use]
    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id.as_str() == id)
    }

    /// Exercise count across all categories of a subject; 0 when unknown.
    #[must_use]
    pub fn total_exercises(&self, subject_id: &str) -> usize {
        self.subject(subject_id).map_or(0, |subject| {
            subject.categories.iter().map(|c| c.exercises.len()).sum()
        })
    }

    /// Every exercise id under a subject, in category order; empty when
    /// unknown.
    #[must_use]
    pub fn exercise_ids(&self, subject_id: &str) -> Vec<&ExerciseId> {
        self.subject(subject_id).map_or_else(Vec::new, |subject| {
            subject
                .categories
                .iter()
                .flat_map(|c| c.exercises.iter().map(|e| &e.id))
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_range_is_inclusive_and_labeled() {
        let exercises = generate_range("TRANSPO-", 1, 3, Some("T"));
        assert_eq!(exercises.len(), 3);
        assert_eq!(exercises[0].id.as_str(), "TRANSPO-1");
        assert_eq!(exercises[0].label, "T1");
        assert_eq!(exercises[2].id.as_str(), "TRANSPO-3");
    }

    #[test]
    fn generate_range_defaults_label_to_id_prefix() {
        let exercises = generate_range("S", 1, 2, None);
        assert_eq!(exercises[0].label, "S1");
        assert_eq!(exercises[1].label, "S2");
    }

    #[test]
    fn generate_range_empty_when_start_exceeds_end() {
        assert!(generate_range("X", 5, 4, None).is_empty());
    }

    #[test]
    fn lettered_range_is_number_major() {
        let exercises = generate_lettered_range("M", 1, 3, &["a", "b"], None);
        let ids: Vec<&str> = exercises.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["M1a", "M1b", "M2a", "M2b", "M3a", "M3b"]);
    }

    #[test]
    fn generators_are_deterministic() {
        assert_eq!(
            generate_range("W-", 1, 50, Some("W")),
            generate_range("W-", 1, 50, Some("W"))
        );
        assert_eq!(
            generate_lettered_range("H", 1, 10, &["a", "b"], None),
            generate_lettered_range("H", 1, 10, &["a", "b"], None)
        );
    }

    #[test]
    fn unknown_subject_yields_zero_and_empty() {
        let catalog = Catalog::standard();
        assert!(catalog.subject("nope").is_none());
        assert_eq!(catalog.total_exercises("nope"), 0);
        assert!(catalog.exercise_ids("nope").is_empty());
    }
}
