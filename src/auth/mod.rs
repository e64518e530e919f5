//! # Auth Module
//!
//! Bearer token validation and scope checks:
//! - JWT claims and scope names
//! - AuthedClient extractor for protected routes

pub mod claims;
pub mod extractors;

#[cfg(test)]
mod tests;

pub use claims::{
    DELETE_SERVICES_CARD, READ_SERVICES_CARD, READ_SERVICES_CARD_CODES, WRITE_SERVICES_CARD,
};
pub use extractors::AuthedClient;
