// Common module - shared types and utilities across all modules

pub mod clock;
pub mod dev_mode;
pub mod error;
pub mod helpers;
pub mod migrations;
pub mod state;
pub mod validation;

// Re-export commonly used types for convenience
pub use clock::{Clock, SystemClock};
#[cfg(test)]
pub use clock::FixedClock;
pub use error::ApiError;
pub use helpers::{mask_pen, safe_email_log};
pub use state::AppState;
pub use validation::{FieldError, ValidationResult, Validator};
