// src/services_card/validators.rs

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use std::sync::{Arc, OnceLock};

use super::models::{OperationMode, ServicesCard, ServicesCardPayload};
use super::repository::ServicesCardLookup;
use crate::codes::{code_window, CodeTableEntry, CodeTableLookup, CodeWindow};
use crate::common::{ApiError, Clock, FieldError, ValidationResult, Validator};

pub const PEN_FIELD: &str = "pen";
pub const EMAIL_FIELD: &str = "email";
pub const GENDER_CODE_FIELD: &str = "gender_code";
pub const DATA_SOURCE_CODE_FIELD: &str = "data_source_code";
pub const ID_FIELD: &str = "services_card_id";

// ============================================================================
// Structural Validation
// ============================================================================

fn pen_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{9}$").expect("valid PEN pattern"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern")
    })
}

/// Lookup-free checks on the shape of a payload
pub struct ServicesCardRequestValidator {
    pub mode: OperationMode,
}

impl Validator<ServicesCardPayload> for ServicesCardRequestValidator {
    fn validate(&self, data: &ServicesCardPayload) -> ValidationResult {
        let mut result = ValidationResult::new();

        match (self.mode, data.services_card_id.as_deref()) {
            (OperationMode::Create, Some(_)) => {
                result.add_error(ID_FIELD, "services_card_id must be empty for a create operation");
            }
            (OperationMode::Update, None) => {
                result.add_error(ID_FIELD, "services_card_id is required for an update operation");
            }
            _ => {}
        }

        if data.pen.trim().is_empty() {
            result.add_error(PEN_FIELD, "PEN is required");
        } else if !pen_pattern().is_match(&data.pen) {
            result.add_error(PEN_FIELD, "PEN must be exactly 9 digits");
        }

        if data.gender_code.trim().is_empty() {
            result.add_error(GENDER_CODE_FIELD, "Gender code is required");
        }

        if data.data_source_code.trim().is_empty() {
            result.add_error(DATA_SOURCE_CODE_FIELD, "Data source code is required");
        }

        if let Some(email) = &data.email {
            if !email_pattern().is_match(email) {
                result.add_error(EMAIL_FIELD, "Email must be a valid email address");
            }
        }

        if let Some(birth_date) = &data.birth_date {
            if NaiveDate::parse_from_str(birth_date, "%Y-%m-%d").is_err() {
                result.add_error("birth_date", "Birth date must be in YYYY-MM-DD format");
            }
        }

        for (field, value) in [
            ("surname", &data.surname),
            ("given_name", &data.given_name),
            ("user_display_name", &data.user_display_name),
        ] {
            if value.as_ref().is_some_and(|v| v.chars().count() > 255) {
                result.add_error(field, &format!("{} must not exceed 255 characters", field));
            }
        }

        result
    }
}

// ============================================================================
// Business Rules
// ============================================================================

/// True when `existing` belongs to someone other than the candidate.
/// A candidate without an identifier never owns an existing record.
fn belongs_to_another(
    existing: &ServicesCard,
    candidate: &ServicesCardPayload,
    mode: OperationMode,
) -> bool {
    match mode {
        OperationMode::Create => true,
        OperationMode::Update => {
            candidate.services_card_id.as_deref() != Some(existing.services_card_id.as_str())
        }
    }
}

pub fn validate_pen(
    existing: Option<&ServicesCard>,
    candidate: &ServicesCardPayload,
    mode: OperationMode,
) -> Option<FieldError> {
    existing
        .filter(|card| belongs_to_another(card, candidate, mode))
        .map(|_| FieldError::new(PEN_FIELD, "PEN is already associated to a student."))
}

pub fn validate_email(
    existing: Option<&ServicesCard>,
    candidate: &ServicesCardPayload,
    mode: OperationMode,
) -> Option<FieldError> {
    existing
        .filter(|card| belongs_to_another(card, candidate, mode))
        .map(|_| FieldError::new(EMAIL_FIELD, "Email is already associated to a student."))
}

fn validate_code(
    field: &str,
    label: &str,
    entry: Option<&CodeTableEntry>,
    now: DateTime<Utc>,
) -> Option<FieldError> {
    let message = match entry.map(|e| code_window(e, now)) {
        None => format!("Invalid {}.", label),
        Some(CodeWindow::NotYetEffective) => format!("{} provided is not yet effective.", label),
        Some(CodeWindow::Expired) => format!("{} provided has expired.", label),
        Some(CodeWindow::Effective) => return None,
    };
    Some(FieldError::new(field, &message))
}

pub fn validate_gender_code(
    entry: Option<&CodeTableEntry>,
    now: DateTime<Utc>,
) -> Option<FieldError> {
    validate_code(GENDER_CODE_FIELD, "Gender Code", entry, now)
}

pub fn validate_data_source_code(
    entry: Option<&CodeTableEntry>,
    now: DateTime<Utc>,
) -> Option<FieldError> {
    validate_code(DATA_SOURCE_CODE_FIELD, "Data Source Code", entry, now)
}

// ============================================================================
// Payload Validator
// ============================================================================

/// Checks a candidate record against existing records and the code tables
#[derive(Clone)]
pub struct ServicesCardPayloadValidator {
    cards: Arc<dyn ServicesCardLookup>,
    codes: Arc<dyn CodeTableLookup>,
    clock: Arc<dyn Clock>,
}

impl ServicesCardPayloadValidator {
    pub fn new(
        cards: Arc<dyn ServicesCardLookup>,
        codes: Arc<dyn CodeTableLookup>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cards,
            codes,
            clock,
        }
    }

    /// Runs every rule and returns the failures in rule order
    /// (pen, gender code, data source code, email).
    ///
    /// `Err` is reserved for lookup failures, which are passed through as-is.
    pub async fn validate_payload(
        &self,
        candidate: &ServicesCardPayload,
        mode: OperationMode,
    ) -> Result<Vec<FieldError>, ApiError> {
        let email_lookup = async {
            match candidate.email.as_deref() {
                Some(email) => self.cards.find_by_email(email).await,
                None => Ok(None),
            }
        };

        let (by_pen, gender_code, data_source_code, by_email) = tokio::try_join!(
            self.cards.find_by_pen(&candidate.pen),
            self.codes.find_gender_code(&candidate.gender_code),
            self.codes.find_data_source_code(&candidate.data_source_code),
            email_lookup,
        )?;

        let now = self.clock.now();

        let errors = [
            validate_pen(by_pen.as_ref(), candidate, mode),
            validate_gender_code(gender_code.as_ref(), now),
            validate_data_source_code(data_source_code.as_ref(), now),
            validate_email(by_email.as_ref(), candidate, mode),
        ]
        .into_iter()
        .flatten()
        .collect();

        Ok(errors)
    }

    /// Adds the rule failures to `structural` and fails with
    /// `ApiError::InvalidPayload` when anything is left.
    ///
    /// A rule error is dropped when `structural` already flags its field,
    /// so every field reports at most one error.
    pub async fn ensure_valid(
        &self,
        candidate: &ServicesCardPayload,
        mode: OperationMode,
        structural: ValidationResult,
    ) -> Result<(), ApiError> {
        let mut result = structural;

        for error in self.validate_payload(candidate, mode).await? {
            if !result.errors.iter().any(|e| e.field == error.field) {
                result.add_error(&error.field, &error.message);
            }
        }

        if result.is_valid {
            Ok(())
        } else {
            Err(ApiError::invalid_payload(result.into_errors(), self.clock.now()))
        }
    }
}
