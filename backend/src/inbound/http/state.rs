//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    MarkRepository, MarksCommand, StudentCommand, StudentQuery, StudentRepository,
    SubjectCommand, SubjectQuery, SubjectRepository,
};
use crate::domain::{MarksService, StudentService, SubjectService};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub students: Arc<dyn StudentCommand>,
    pub students_query: Arc<dyn StudentQuery>,
    pub marks: Arc<dyn MarksCommand>,
    pub subjects: Arc<dyn SubjectCommand>,
    pub subjects_query: Arc<dyn SubjectQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub students: Arc<dyn StudentCommand>,
    pub students_query: Arc<dyn StudentQuery>,
    pub marks: Arc<dyn MarksCommand>,
    pub subjects: Arc<dyn SubjectCommand>,
    pub subjects_query: Arc<dyn SubjectQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            students,
            students_query,
            marks,
            subjects,
            subjects_query,
        } = ports;
        Self {
            students,
            students_query,
            marks,
            subjects,
            subjects_query,
        }
    }

    /// Wire the record services over one set of repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use records_backend::inbound::http::state::HttpState;
    /// use records_backend::test_support::InMemoryRecordStore;
    ///
    /// let store = Arc::new(InMemoryRecordStore::default());
    /// let _state = HttpState::from_repositories(
    ///     store.clone(),
    ///     store.clone(),
    ///     store,
    ///     Arc::new(DefaultClock),
    /// );
    /// ```
    pub fn from_repositories<S, J, M>(
        students: Arc<S>,
        subjects: Arc<J>,
        marks: Arc<M>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        S: StudentRepository + 'static,
        J: SubjectRepository + 'static,
        M: MarkRepository + 'static,
    {
        let student_service = Arc::new(StudentService::new(
            students.clone(),
            marks.clone(),
            clock.clone(),
        ));
        let subject_service = Arc::new(SubjectService::new(subjects.clone()));
        let marks_service = Arc::new(MarksService::new(students, subjects, marks, clock));
        Self::new(HttpStatePorts {
            students: student_service.clone(),
            students_query: student_service,
            marks: marks_service,
            subjects: subject_service.clone(),
            subjects_query: subject_service,
        })
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
