//! JSON response envelopes.
//!
//! Successful responses always carry a human-readable `message` next to the
//! payload. Student mutations return the record under `student`; reads and
//! mark recording return it under `data`.

use serde::{Deserialize, Serialize};

use crate::domain::Student;

/// `{message, data}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub message: String,
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(message: &str, data: T) -> Self {
        Self {
            message: message.to_owned(),
            data,
        }
    }
}

/// `{message, student}` envelope returned by student create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentEnvelope {
    pub message: String,
    pub student: Student,
}

impl StudentEnvelope {
    pub fn new(message: &str, student: Student) -> Self {
        Self {
            message: message.to_owned(),
            student,
        }
    }
}

/// `{message}` envelope for operations without a payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub message: String,
}

impl MessageEnvelope {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}
