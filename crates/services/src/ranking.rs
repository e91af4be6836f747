//! Leaderboard ordering and competition ranking.

use classtrack_core::model::{Roster, Student, StudentId};

use crate::statistics::raw_completed;

/// A student's place on the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    /// 1-based competition rank; 0 for an empty roster or unknown student.
    pub rank: usize,
    /// True when at least one other student shares the same total.
    pub is_ex_aequo: bool,
}

impl Rank {
    const NONE: Self = Self {
        rank: 0,
        is_ex_aequo: false,
    };
}

/// Students ordered for the leaderboard: descending raw completion count,
/// ties broken by ascending student id so the order is reproducible.
#[must_use]
pub fn sorted_by_progress(roster: &Roster) -> Vec<&Student> {
    let mut students: Vec<&Student> = roster.iter().collect();
    students.sort_by_key(|s| (std::cmp::Reverse(raw_completed(s)), s.id()));
    students
}

/// Competition rank for one student.
///
/// A block of students sharing a total all receive the same rank, one plus
/// the number of students strictly ahead of the block. The next distinct
/// total skips ahead by the block size: totals `[10, 7, 7, 3]` rank
/// `[1, 2, 2, 4]`.
#[must_use]
pub fn rank_of(roster: &Roster, id: StudentId) -> Rank {
    let Some(student) = roster.get(id) else {
        return Rank::NONE;
    };
    let total = raw_completed(student);

    let ahead = roster.iter().filter(|s| raw_completed(s) > total).count();
    let tied = roster.iter().filter(|s| raw_completed(s) == total).count();

    Rank {
        rank: ahead + 1,
        is_ex_aequo: tied > 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classtrack_core::model::{ExerciseId, SubjectId};

    /// Roster where student `i` has completed `counts[i]` exercises.
    fn roster_with_counts(counts: &[usize]) -> Roster {
        let mut roster = Roster::default();
        let subject = SubjectId::new("math");
        for (i, count) in counts.iter().enumerate() {
            let id = roster.add(format!("Student{i}"), "X.").unwrap();
            let student = roster.get_mut(id).unwrap();
            for n in 0..*count {
                student.toggle_exercise(&subject, &ExerciseId::new(format!("A{n}")));
            }
        }
        roster
    }

    #[test]
    fn tie_block_shares_rank_and_next_skips() {
        let roster = roster_with_counts(&[10, 7, 7, 3]);
        let sorted = sorted_by_progress(&roster);
        let totals: Vec<usize> = sorted.iter().map(|s| raw_completed(s)).collect();
        assert_eq!(totals, [10, 7, 7, 3]);

        let ranks: Vec<usize> = sorted
            .iter()
            .map(|s| rank_of(&roster, s.id()).rank)
            .collect();
        assert_eq!(ranks, [1, 2, 2, 4]);
    }

    #[test]
    fn ex_aequo_only_for_shared_totals() {
        let roster = roster_with_counts(&[10, 7, 7, 3]);
        let sorted = sorted_by_progress(&roster);

        assert!(!rank_of(&roster, sorted[0].id()).is_ex_aequo);
        assert!(rank_of(&roster, sorted[1].id()).is_ex_aequo);
        assert!(rank_of(&roster, sorted[2].id()).is_ex_aequo);
        assert!(!rank_of(&roster, sorted[3].id()).is_ex_aequo);
    }

    #[test]
    fn tied_students_sort_by_ascending_id() {
        let roster = roster_with_counts(&[5, 5, 5]);
        let sorted = sorted_by_progress(&roster);
        let ids: Vec<u64> = sorted.iter().map(|s| s.id().value()).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn all_tied_means_everyone_ranks_first() {
        let roster = roster_with_counts(&[4, 4]);
        for student in &roster {
            let rank = rank_of(&roster, student.id());
            assert_eq!(rank.rank, 1);
            assert!(rank.is_ex_aequo);
        }
    }

    #[test]
    fn empty_roster_and_unknown_student_rank_zero() {
        let empty = Roster::default();
        assert_eq!(rank_of(&empty, StudentId::new(1)), Rank::NONE);
        assert!(sorted_by_progress(&empty).is_empty());

        let roster = roster_with_counts(&[2]);
        assert_eq!(rank_of(&roster, StudentId::new(99)), Rank::NONE);
    }
}
