//! Resume and job-description extraction.
//!
//! One upload flows through here as: prompt → AI call → [`repair`] →
//! [`candidate`] / [`job`] mapping onto the caller's current record.

pub mod candidate;
pub mod dates;
pub mod docx;
pub mod document;
pub mod education;
pub mod error;
pub mod handlers;
pub mod job;
pub mod prompts;
pub mod raw;
pub mod repair;
pub mod service;

use crate::extraction::error::ValidationWarning;

/// A mapped record plus the fields that were rejected along the way.
#[derive(Debug, Clone)]
pub struct Mapped<T> {
    pub value: T,
    pub warnings: Vec<ValidationWarning>,
}

/// Overwrites `dest` only when something was extracted.
pub(crate) fn fill(dest: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *dest = value;
    }
}

/// Same rule for lists: an empty extraction keeps the prior list.
pub(crate) fn replace_list<T>(dest: &mut Vec<T>, value: Vec<T>) {
    if !value.is_empty() {
        *dest = value;
    }
}
