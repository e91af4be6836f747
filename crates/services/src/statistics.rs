//! Pure progress aggregation over a student's completion sets and the
//! catalog.

use classtrack_core::catalog::Catalog;
use classtrack_core::model::{Student, SubjectId};

/// Aggregated completion figures for one scope (a subject, or everything).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
    pub percentage: u32,
}

impl ProgressSummary {
    #[must_use]
    pub fn new(completed: usize, total: usize) -> Self {
        Self {
            completed,
            total,
            percentage: percentage(completed, total),
        }
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}

/// Progress for one subject, counted against the catalog total.
#[must_use]
pub fn subject_progress(
    student: &Student,
    catalog: &Catalog,
    subject: &SubjectId,
) -> ProgressSummary {
    ProgressSummary::new(
        student.completed_count(subject),
        catalog.total_exercises(subject.as_str()),
    )
}

/// Progress summed across every subject in the catalog, not just subjects
/// the student has touched.
#[must_use]
pub fn overall_progress(student: &Student, catalog: &Catalog) -> ProgressSummary {
    let mut completed = 0;
    let mut total = 0;
    for subject in catalog.subjects() {
        completed += student.completed_count(&subject.id);
        total += catalog.total_exercises(subject.id.as_str());
    }
    ProgressSummary::new(completed, total)
}

/// Raw completion count across all of the student's per-subject sets.
///
/// Unlike [`overall_progress`], this is not clamped to the catalog: ids that
/// are no longer part of the catalog still count. Ranking is built on this
/// figure.
#[must_use]
pub fn raw_completed(student: &Student) -> usize {
    student.total_completed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use classtrack_core::catalog::{Catalog, ExerciseCategory, Subject, generate_range};
    use classtrack_core::model::{CategoryId, ExerciseId, StudentId};

    fn small_catalog() -> Catalog {
        Catalog::new(vec![
            Subject {
                id: SubjectId::new("math"),
                name: "Math".to_owned(),
                icon: "➕".to_owned(),
                color: "pastel-yellow".to_owned(),
                categories: vec![ExerciseCategory {
                    id: CategoryId::new("sums"),
                    name: "Sums".to_owned(),
                    description: String::new(),
                    exercises: generate_range("A", 1, 8, None),
                }],
            },
            Subject {
                id: SubjectId::new("reading"),
                name: "Reading".to_owned(),
                icon: "📚".to_owned(),
                color: "pastel-pink".to_owned(),
                categories: vec![ExerciseCategory {
                    id: CategoryId::new("series-s"),
                    name: "Series S".to_owned(),
                    description: String::new(),
                    exercises: generate_range("S", 1, 2, None),
                }],
            },
        ])
    }

    fn student_with(completed: &[(&str, &str)]) -> Student {
        let mut student = Student::new(StudentId::new(1), "Emma", "D.").unwrap();
        for (subject, exercise) in completed {
            student.toggle_exercise(&SubjectId::new(*subject), &ExerciseId::new(*exercise));
        }
        student
    }

    #[test]
    fn percentage_rounds_half_up() {
        // 3 of 8 → 37.5 → 38
        let catalog = small_catalog();
        let student = student_with(&[("math", "A1"), ("math", "A2"), ("math", "A3")]);
        let summary = subject_progress(&student, &catalog, &SubjectId::new("math"));
        assert_eq!(summary.completed, 3);
        assert_eq!(summary.total, 8);
        assert_eq!(summary.percentage, 38);
    }

    #[test]
    fn empty_scope_yields_zero_percentage() {
        assert_eq!(ProgressSummary::new(0, 0).percentage, 0);
    }

    #[test]
    fn unknown_subject_has_zero_total() {
        let catalog = small_catalog();
        let student = student_with(&[]);
        let summary = subject_progress(&student, &catalog, &SubjectId::new("nope"));
        assert_eq!(summary, ProgressSummary::new(0, 0));
    }

    #[test]
    fn overall_progress_counts_every_catalog_subject() {
        let catalog = small_catalog();
        let student = student_with(&[("math", "A1"), ("reading", "S1")]);
        let summary = overall_progress(&student, &catalog);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.total, 10);
        assert_eq!(summary.percentage, 20);
    }

    #[test]
    fn raw_completed_counts_ids_outside_the_catalog() {
        let catalog = small_catalog();
        let student = student_with(&[("math", "A1"), ("retired-subject", "Z9")]);

        // The stale id is invisible to catalog-based totals…
        assert_eq!(overall_progress(&student, &catalog).completed, 1);
        // …but still counts toward the raw figure used for ranking.
        assert_eq!(raw_completed(&student), 2);
    }
}
