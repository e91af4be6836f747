use classtrack_core::catalog::Catalog;
use classtrack_core::model::{ExerciseId, Roster, Student, StudentError, StudentId, SubjectId};
use storage::PersistenceAdapter;

use crate::ranking::{self, Rank};
use crate::statistics::{self, ProgressSummary};

/// The authoritative in-memory roster with its mutation and query surface.
///
/// A store only exists after the initial load has completed (`hydrate` is
/// the sole constructor), so no mutation can ever overwrite data that has
/// not been loaded yet. Every mutation that changes the roster schedules a
/// detached full-snapshot save through the persistence adapter.
pub struct ProgressStore {
    roster: Roster,
    adapter: PersistenceAdapter,
}

impl ProgressStore {
    /// Loads the roster through the adapter and builds the store over it.
    pub async fn hydrate(adapter: PersistenceAdapter) -> Self {
        let roster = adapter.load().await;
        Self { roster, adapter }
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn students(&self) -> &[Student] {
        self.roster.students()
    }

    #[must_use]
    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.roster.get(id)
    }

    // ─── Mutations ─────────────────────────────────────────────────────────

    /// Flips the completion state of one exercise. No-op for an unknown
    /// student.
    pub fn toggle_exercise(&mut self, id: StudentId, subject: &SubjectId, exercise: &ExerciseId) {
        if let Some(student) = self.roster.get_mut(id) {
            student.toggle_exercise(subject, exercise);
            self.persist();
        }
    }

    /// Clears completion state: one subject's set when given, everything
    /// otherwise. No-op for an unknown student.
    pub fn reset_progress(&mut self, id: StudentId, subject: Option<&SubjectId>) {
        if let Some(student) = self.roster.get_mut(id) {
            match subject {
                Some(subject) => student.reset_subject(subject),
                None => student.reset_all(),
            }
            self.persist();
        }
    }

    /// Renames a student in place. `Ok` no-op for an unknown student.
    ///
    /// # Errors
    ///
    /// Returns `StudentError::EmptyName` if either name is empty; the
    /// roster is left untouched.
    pub fn update_student(
        &mut self,
        id: StudentId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<(), StudentError> {
        if let Some(student) = self.roster.get_mut(id) {
            student.rename(first_name, last_name)?;
            self.persist();
        }
        Ok(())
    }

    /// Adds a student at the end of the roster and returns the assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StudentError::EmptyName` if either name is empty.
    pub fn add_student(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<StudentId, StudentError> {
        let id = self.roster.add(first_name, last_name)?;
        self.persist();
        Ok(id)
    }

    /// Removes a student by id. No-op when absent.
    pub fn remove_student(&mut self, id: StudentId) {
        if self.roster.remove(id) {
            self.persist();
        }
    }

    /// Writes the current roster and waits for the backend to finish.
    ///
    /// Mutations already persist on their own (detached); this is for
    /// orderly shutdown, where the process must not exit before the last
    /// snapshot lands.
    pub async fn flush(&self) {
        self.adapter.save(&self.roster).await;
    }

    fn persist(&self) {
        self.adapter.save_detached(&self.roster);
    }

    // ─── Queries ───────────────────────────────────────────────────────────

    /// Per-subject progress; the all-zero summary for an unknown student.
    #[must_use]
    pub fn progress(
        &self,
        id: StudentId,
        catalog: &Catalog,
        subject: &SubjectId,
    ) -> ProgressSummary {
        self.roster
            .get(id)
            .map_or_else(ProgressSummary::default, |student| {
                statistics::subject_progress(student, catalog, subject)
            })
    }

    /// Whole-catalog progress; the all-zero summary for an unknown student.
    #[must_use]
    pub fn total_progress(&self, id: StudentId, catalog: &Catalog) -> ProgressSummary {
        self.roster
            .get(id)
            .map_or_else(ProgressSummary::default, |student| {
                statistics::overall_progress(student, catalog)
            })
    }

    /// Raw completion count used for ranking; 0 for an unknown student.
    #[must_use]
    pub fn total_completed(&self, id: StudentId) -> usize {
        self.roster.get(id).map_or(0, statistics::raw_completed)
    }

    /// Students in leaderboard order.
    #[must_use]
    pub fn sorted_by_progress(&self) -> Vec<&Student> {
        ranking::sorted_by_progress(&self.roster)
    }

    /// Competition rank and tie flag for one student.
    #[must_use]
    pub fn rank(&self, id: StudentId) -> Rank {
        ranking::rank_of(&self.roster, id)
    }
}
