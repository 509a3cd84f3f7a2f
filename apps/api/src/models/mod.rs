pub mod candidate;
pub mod form_schema;
pub mod job;
