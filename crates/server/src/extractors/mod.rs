//! Custom extractors.

mod form;
mod selector;

pub use form::{FileField, UserForm};
pub use selector::{resolve_store, Selector, SelectorQuery};
