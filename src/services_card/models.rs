use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Persisted services card record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ServicesCard {
    pub services_card_id: String,
    pub did: Option<String>,
    pub pen: String,
    pub email: Option<String>,
    pub gender_code: String,
    pub data_source_code: String,
    pub user_display_name: Option<String>,
    pub given_name: Option<String>,
    pub given_names: Option<String>,
    pub surname: Option<String>,
    pub birth_date: Option<String>, // YYYY-MM-DD
    pub identity_assurance_level: Option<i64>,
    pub postal_code: Option<String>,
    pub create_user: String,
    pub create_date: String,
    pub update_user: String,
    pub update_date: String,
}

/// Incoming create/update payload; `services_card_id` is only sent on update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServicesCardPayload {
    pub services_card_id: Option<String>,
    pub did: Option<String>,
    pub pen: String,
    pub email: Option<String>,
    pub gender_code: String,
    pub data_source_code: String,
    pub user_display_name: Option<String>,
    pub given_name: Option<String>,
    pub given_names: Option<String>,
    pub surname: Option<String>,
    pub birth_date: Option<String>,
    pub identity_assurance_level: Option<i64>,
    pub postal_code: Option<String>,
}

/// Whether a payload is validated for insert or for update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    Create,
    Update,
}

#[derive(Debug, Deserialize)]
pub struct DidQuery {
    pub did: String,
}
