//! Storage representations of a user record.

pub mod user;
pub mod user_document;
