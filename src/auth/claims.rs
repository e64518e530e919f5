//! JWT claims and scope names
//!
//! Kept free of crate-internal imports so the `generate_token` binary can
//! include it directly.

use serde::{Deserialize, Serialize};

pub const READ_SERVICES_CARD: &str = "READ_SERVICES_CARD";
pub const WRITE_SERVICES_CARD: &str = "WRITE_SERVICES_CARD";
pub const DELETE_SERVICES_CARD: &str = "DELETE_SERVICES_CARD";
pub const READ_SERVICES_CARD_CODES: &str = "READ_SERVICES_CARD_CODES";

pub const ALL_SCOPES: &[&str] = &[
    READ_SERVICES_CARD,
    WRITE_SERVICES_CARD,
    DELETE_SERVICES_CARD,
    READ_SERVICES_CARD_CODES,
];

/// JWT claims structure; `scope` is a space separated list
#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub scope: String,
}
