//! # Services Card Module
//!
//! This module handles the services card student record:
//! - payload validation (PEN and email uniqueness, code validity windows)
//! - create, read, update and delete against the SQLite store

pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod validators;


pub use routes::services_card_routes;
