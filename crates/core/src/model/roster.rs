use std::collections::BTreeSet;

use crate::model::ids::StudentId;
use crate::model::student::{Student, StudentError};

/// The full, ordered collection of students, the unit of persistence.
///
/// Ids are unique within the roster; insertion order is preserved and is the
/// order students are displayed and persisted in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    /// Builds a roster from loaded students.
    ///
    /// A duplicated id keeps the first occurrence and drops the rest, so a
    /// damaged snapshot can never break the unique-id invariant.
    #[must_use]
    pub fn new(students: Vec<Student>) -> Self {
        let mut seen = BTreeSet::new();
        let students = students
            .into_iter()
            .filter(|s| seen.insert(s.id()))
            .collect();
        Self { students }
    }

    /// The fixed fallback roster used whenever loading fails.
    #[must_use]
    pub fn seed() -> Self {
        let names = [
            ("Emma", "D."),
            ("Lucas", "M."),
            ("Léa", "B."),
            ("Hugo", "P."),
            ("Chloé", "R."),
            ("Nathan", "L."),
            ("Manon", "G."),
            ("Théo", "F."),
            ("Jade", "C."),
            ("Enzo", "A."),
            ("Camille", "T."),
            ("Louis", "V."),
            ("Sarah", "H."),
        ];
        let students = names
            .iter()
            .enumerate()
            .map(|(i, (first, last))| {
                Student::from_persisted(
                    StudentId::new(i as u64 + 1),
                    (*first).to_owned(),
                    (*last).to_owned(),
                    std::collections::BTreeMap::new(),
                )
            })
            .collect();
        Self { students }
    }

    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    #[must_use]
    pub fn get(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: StudentId) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: StudentId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Student> {
        self.students.iter()
    }

    /// Adds a new student at the end of the roster.
    ///
    /// The id is `max(existing ids) + 1`, or `1` for an empty roster.
    ///
    /// # Errors
    ///
    /// Returns `StudentError::EmptyName` if either name is empty.
    pub fn add(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<StudentId, StudentError> {
        let id = self.next_id();
        let student = Student::new(id, first_name, last_name)?;
        self.students.push(student);
        Ok(id)
    }

    /// Removes a student by id. Returns `true` if one was removed.
    pub fn remove(&mut self, id: StudentId) -> bool {
        let before = self.students.len();
        self.students.retain(|s| s.id() != id);
        self.students.len() < before
    }

    fn next_id(&self) -> StudentId {
        let max = self
            .students
            .iter()
            .map(|s| s.id().value())
            .max()
            .unwrap_or(0);
        StudentId::new(max + 1)
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Student;
    type IntoIter = std::slice::Iter<'a, Student>;

    fn into_iter(self) -> Self::IntoIter {
        self.students.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn student(id: u64) -> Student {
        Student::from_persisted(
            StudentId::new(id),
            format!("Student{id}"),
            "X.".to_owned(),
            BTreeMap::new(),
        )
    }

    #[test]
    fn add_assigns_max_plus_one() {
        let mut roster = Roster::new(vec![student(1), student(2), student(5)]);
        let id = roster.add("Nina", "Z.").unwrap();
        assert_eq!(id, StudentId::new(6));
        assert_eq!(roster.len(), 4);
        assert_eq!(roster.students().last().unwrap().id(), id);
    }

    #[test]
    fn add_to_empty_roster_starts_at_one() {
        let mut roster = Roster::default();
        let id = roster.add("Nina", "Z.").unwrap();
        assert_eq!(id, StudentId::new(1));
    }

    #[test]
    fn add_rejects_empty_name() {
        let mut roster = Roster::default();
        assert!(roster.add(" ", "Z.").is_err());
        assert!(roster.is_empty());
    }

    #[test]
    fn new_drops_duplicate_ids_keeping_first() {
        let mut dup = student(2);
        dup.rename("Other", "Y.").unwrap();
        let roster = Roster::new(vec![student(1), student(2), dup]);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get(StudentId::new(2)).unwrap().first_name(), "Student2");
    }

    #[test]
    fn remove_deletes_by_id() {
        let mut roster = Roster::new(vec![student(1), student(2)]);
        assert!(roster.remove(StudentId::new(1)));
        assert!(!roster.remove(StudentId::new(1)));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn seed_has_thirteen_students_with_sequential_ids() {
        let roster = Roster::seed();
        assert_eq!(roster.len(), 13);
        assert_eq!(roster.students()[0].first_name(), "Emma");
        assert_eq!(roster.students()[12].id(), StudentId::new(13));
        for student in &roster {
            assert_eq!(student.total_completed(), 0);
        }
    }
}
