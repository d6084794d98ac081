//! User Service Library
//!
//! This crate provides user record storage over two backends, a MySQL table
//! and a MongoDB collection, behind a single service interface. The HTTP
//! layer picks the backend per request.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

pub use config::UserServiceConfig;
pub use infra::Stores;
pub use repository::UserRepository;
pub use service::{UserManager, UserService};
