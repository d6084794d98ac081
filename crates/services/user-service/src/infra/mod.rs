//! Infrastructure layer - store connections.

mod db;
mod document;
mod stores;

pub use db::Database;
pub use document::DocumentDatabase;
pub use stores::Stores;
