use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::model::ids::{ExerciseId, StudentId, SubjectId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StudentError {
    #[error("student name cannot be empty")]
    EmptyName,
}

/// A tracked pupil and their recorded exercise completions.
///
/// Completion state is a per-subject set of exercise ids; a missing subject
/// key is equivalent to an empty set. The sets record membership only; they
/// are never checked against the catalog, so an id that later disappears
/// from the catalog stays in the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: StudentId,
    first_name: String,
    last_name: String,
    completed: BTreeMap<SubjectId, BTreeSet<ExerciseId>>,
}

impl Student {
    /// Creates a new Student with no completed exercises.
    ///
    /// # Errors
    ///
    /// Returns `StudentError::EmptyName` if either name is empty or
    /// whitespace-only.
    pub fn new(
        id: StudentId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, StudentError> {
        Ok(Self {
            id,
            first_name: clean_name(first_name)?,
            last_name: clean_name(last_name)?,
            completed: BTreeMap::new(),
        })
    }

    /// Rebuilds a Student from a stored snapshot.
    ///
    /// Performs no name validation so that any previously persisted record
    /// remains loadable.
    #[must_use]
    pub fn from_persisted(
        id: StudentId,
        first_name: String,
        last_name: String,
        completed: BTreeMap<SubjectId, BTreeSet<ExerciseId>>,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            completed,
        }
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> StudentId {
        self.id
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    #[must_use]
    pub fn completed_exercises(&self) -> &BTreeMap<SubjectId, BTreeSet<ExerciseId>> {
        &self.completed
    }

    /// Completion set for one subject, if any exercise was ever recorded.
    #[must_use]
    pub fn completed_for(&self, subject: &SubjectId) -> Option<&BTreeSet<ExerciseId>> {
        self.completed.get(subject)
    }

    /// Number of completed exercises recorded for one subject.
    #[must_use]
    pub fn completed_count(&self, subject: &SubjectId) -> usize {
        self.completed.get(subject).map_or(0, BTreeSet::len)
    }

    #[must_use]
    pub fn is_completed(&self, subject: &SubjectId, exercise: &ExerciseId) -> bool {
        self.completed
            .get(subject)
            .is_some_and(|set| set.contains(exercise))
    }

    /// Total completions across all subjects.
    ///
    /// Counts every recorded id, including ids that are no longer part of
    /// the catalog.
    #[must_use]
    pub fn total_completed(&self) -> usize {
        self.completed.values().map(BTreeSet::len).sum()
    }

    /// Flips the completion state of one exercise.
    ///
    /// Returns `true` if the exercise is completed after the toggle.
    pub fn toggle_exercise(&mut self, subject: &SubjectId, exercise: &ExerciseId) -> bool {
        let set = self.completed.entry(subject.clone()).or_default();
        if set.remove(exercise) {
            false
        } else {
            set.insert(exercise.clone());
            true
        }
    }

    /// Clears the completion set for one subject, removing its key.
    pub fn reset_subject(&mut self, subject: &SubjectId) {
        self.completed.remove(subject);
    }

    /// Clears all completion state.
    pub fn reset_all(&mut self) {
        self.completed.clear();
    }

    /// Renames the student in place.
    ///
    /// # Errors
    ///
    /// Returns `StudentError::EmptyName` if either name is empty or
    /// whitespace-only; the current names are left untouched.
    pub fn rename(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<(), StudentError> {
        let first_name = clean_name(first_name)?;
        let last_name = clean_name(last_name)?;
        self.first_name = first_name;
        self.last_name = last_name;
        Ok(())
    }
}

fn clean_name(raw: impl Into<String>) -> Result<String, StudentError> {
    let name = raw.into();
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StudentError::EmptyName);
    }
    Ok(trimmed.to_owned())
}
