mod ids;
mod roster;
mod student;

pub use ids::{CategoryId, ExerciseId, ParseStudentIdError, StudentId, SubjectId};
pub use roster::Roster;
pub use student::{Student, StudentError};
