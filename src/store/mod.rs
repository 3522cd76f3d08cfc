//! Persistence: where finished profiles are saved.

pub mod libsql_backend;
mod migrations;
pub mod rest;
pub mod traits;

pub use libsql_backend::LibSqlProfileStore;
pub use rest::RestProfileStore;
pub use traits::{ProfileStore, SaveMode, SavedProfile};
