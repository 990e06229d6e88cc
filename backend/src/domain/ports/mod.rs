//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by persistence adapters.
//! Driving ports (`*Command`, `*Query`) are implemented by domain services
//! and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod mark_repository;
mod marks_command;
mod student_command;
mod student_query;
mod student_repository;
mod subject_command;
mod subject_query;
mod subject_repository;

#[cfg(test)]
pub use mark_repository::MockMarkRepository;
pub use mark_repository::{MarkRepository, MarkRepositoryError};
#[cfg(test)]
pub use marks_command::MockMarksCommand;
pub use marks_command::{MarksCommand, MarksRecorded};
#[cfg(test)]
pub use student_command::MockStudentCommand;
pub use student_command::StudentCommand;
#[cfg(test)]
pub use student_query::MockStudentQuery;
pub use student_query::StudentQuery;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::{StudentRepository, StudentRepositoryError};
#[cfg(test)]
pub use subject_command::MockSubjectCommand;
pub use subject_command::SubjectCommand;
#[cfg(test)]
pub use subject_query::MockSubjectQuery;
pub use subject_query::SubjectQuery;
#[cfg(test)]
pub use subject_repository::MockSubjectRepository;
pub use subject_repository::{SubjectRepository, SubjectRepositoryError};
