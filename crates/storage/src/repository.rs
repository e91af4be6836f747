use async_trait::async_trait;
use classtrack_core::model::{ExerciseId, ParseStudentIdError, Student, StudentId, SubjectId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("backend refused the write")]
    WriteRejected,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Persisted shape for a student.
///
/// This mirrors the domain `Student` so backends can serialize/deserialize
/// without leaking storage concerns into the domain layer. Field names and
/// the per-subject id arrays match the snapshot format the application has
/// always written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub completed_exercises: BTreeMap<String, BTreeSet<String>>,
}

impl StudentRecord {
    #[must_use]
    pub fn from_student(student: &Student) -> Self {
        Self {
            id: student.id().to_string(),
            first_name: student.first_name().to_owned(),
            last_name: student.last_name().to_owned(),
            completed_exercises: student
                .completed_exercises()
                .iter()
                .map(|(subject, set)| {
                    (
                        subject.to_string(),
                        set.iter().map(ToString::to_string).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Convert the record back into a domain `Student`.
    ///
    /// # Errors
    ///
    /// Returns `ParseStudentIdError` if the stored id is not a numeric
    /// string.
    pub fn into_student(self) -> Result<Student, ParseStudentIdError> {
        let id: StudentId = self.id.parse()?;
        let completed = self
            .completed_exercises
            .into_iter()
            .map(|(subject, set)| {
                (
                    SubjectId::new(subject),
                    set.into_iter().map(ExerciseId::new).collect(),
                )
            })
            .collect();
        Ok(Student::from_persisted(
            id,
            self.first_name,
            self.last_name,
            completed,
        ))
    }
}

/// Backend contract for the roster snapshot.
///
/// Only the full roster is ever read or written; there is no incremental
/// persistence format.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Write a full roster snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be stored.
    async fn save_roster(&self, roster: &[StudentRecord]) -> Result<(), StorageError>;

    /// Read the stored roster snapshot.
    ///
    /// Returns `Ok(None)` when no snapshot has ever been written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be read or parsed.
    async fn load_roster(&self) -> Result<Option<Vec<StudentRecord>>, StorageError>;
}

/// Simple in-memory backend for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    slot: Arc<Mutex<Option<Vec<StudentRecord>>>>,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently stored snapshot, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<Vec<StudentRecord>> {
        self.slot.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl StorageBackend for InMemoryBackend {
    async fn save_roster(&self, roster: &[StudentRecord]) -> Result<(), StorageError> {
        let mut guard = self
            .slot
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(roster.to_vec());
        Ok(())
    }

    async fn load_roster(&self) -> Result<Option<Vec<StudentRecord>>, StorageError> {
        let guard = self
            .slot
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}
