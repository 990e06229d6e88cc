//! Diesel table definitions matching `migrations/`.
//!
//! Keep in step with the migration SQL; `diesel print-schema` against a
//! migrated database regenerates this file.

diesel::table! {
    /// Registered students. `email` carries the `students_email_key`
    /// unique constraint.
    students (id) {
        id -> Int4,
        #[max_length = 100]
        name -> Varchar,
        #[max_length = 255]
        email -> Varchar,
        age -> Int4,
        parent_id -> Nullable<Int4>,
        registration_date -> Timestamptz,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    subjects (id) {
        id -> Int4,
        #[max_length = 100]
        name -> Varchar,
    }
}

diesel::table! {
    /// One row per recorded mark. No uniqueness on `(student_id, subject_id)`.
    marks (id) {
        id -> Int4,
        #[sql_name = "marks"]
        score -> Int4,
        date -> Timestamptz,
        student_id -> Int4,
        subject_id -> Int4,
    }
}

diesel::joinable!(marks -> students (student_id));
diesel::joinable!(marks -> subjects (subject_id));

diesel::allow_tables_to_appear_in_same_query!(marks, students, subjects);
