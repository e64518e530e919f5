//! # Codes Module
//!
//! Validity-windowed reference code tables (gender codes, data-source codes):
//! lookups for the payload validator and read-only listing endpoints.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(test)]
mod tests;

pub use models::{code_window, CodeTableEntry, CodeWindow};
pub use routes::codes_routes;
pub use services::{CodeTableLookup, SqliteCodeTableService};
