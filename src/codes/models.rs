use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of a validity-windowed reference code table (gender, data source)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CodeTableEntry {
    pub code: String,
    pub label: String,
    pub description: Option<String>,
    pub display_order: i64,
    pub effective_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
}

/// Where an instant falls relative to a code's validity window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeWindow {
    Effective,
    NotYetEffective,
    Expired,
}

/// Both window boundaries are inclusive.
pub fn code_window(entry: &CodeTableEntry, now: DateTime<Utc>) -> CodeWindow {
    if now < entry.effective_date {
        CodeWindow::NotYetEffective
    } else if now > entry.expiry_date {
        CodeWindow::Expired
    } else {
        CodeWindow::Effective
    }
}
