use async_trait::async_trait;
use sqlx::SqlitePool;

use super::models::ServicesCard;
use crate::common::ApiError;

const SELECT_COLUMNS: &str = r#"
    SELECT services_card_id, did, pen, email, gender_code, data_source_code,
           user_display_name, given_name, given_names, surname, birth_date,
           identity_assurance_level, postal_code,
           create_user, create_date, update_user, update_date
    FROM services_card
"#;

/// Existing-record lookups consumed by the payload validator
#[async_trait]
pub trait ServicesCardLookup: Send + Sync {
    async fn find_by_pen(&self, pen: &str) -> Result<Option<ServicesCard>, ApiError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<ServicesCard>, ApiError>;
}

/// Full read/write access used by the service layer
#[async_trait]
pub trait ServicesCardRepository: ServicesCardLookup {
    async fn find_by_id(&self, id: &str) -> Result<Option<ServicesCard>, ApiError>;

    async fn find_by_did(&self, did: &str) -> Result<Option<ServicesCard>, ApiError>;

    async fn insert(&self, card: &ServicesCard) -> Result<(), ApiError>;

    async fn update(&self, card: &ServicesCard) -> Result<(), ApiError>;

    /// Returns false when no row matched
    async fn delete(&self, id: &str) -> Result<bool, ApiError>;
}

pub struct SqliteServicesCardRepository {
    db: SqlitePool,
}

impl SqliteServicesCardRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<ServicesCard>, ApiError> {
        let query = format!("{} WHERE {} = ?", SELECT_COLUMNS, column);

        let card = sqlx::query_as::<_, ServicesCard>(&query)
            .bind(value)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        Ok(card)
    }
}

fn map_write_error(e: sqlx::Error) -> ApiError {
    if e.to_string().contains("UNIQUE constraint failed") {
        ApiError::ValidationError("PEN or email is already associated to a student".to_string())
    } else {
        ApiError::DatabaseError(e)
    }
}

#[async_trait]
impl ServicesCardLookup for SqliteServicesCardRepository {
    async fn find_by_pen(&self, pen: &str) -> Result<Option<ServicesCard>, ApiError> {
        self.find_one("pen", pen).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<ServicesCard>, ApiError> {
        self.find_one("email", email).await
    }
}

#[async_trait]
impl ServicesCardRepository for SqliteServicesCardRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<ServicesCard>, ApiError> {
        self.find_one("services_card_id", id).await
    }

    async fn find_by_did(&self, did: &str) -> Result<Option<ServicesCard>, ApiError> {
        self.find_one("did", did).await
    }

    async fn insert(&self, card: &ServicesCard) -> Result<(), ApiError> {
        sqlx::query(
            r#"
            INSERT INTO services_card (
                services_card_id, did, pen, email, gender_code, data_source_code,
                user_display_name, given_name, given_names, surname, birth_date,
                identity_assurance_level, postal_code,
                create_user, create_date, update_user, update_date
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&card.services_card_id)
        .bind(&card.did)
        .bind(&card.pen)
        .bind(&card.email)
        .bind(&card.gender_code)
        .bind(&card.data_source_code)
        .bind(&card.user_display_name)
        .bind(&card.given_name)
        .bind(&card.given_names)
        .bind(&card.surname)
        .bind(&card.birth_date)
        .bind(card.identity_assurance_level)
        .bind(&card.postal_code)
        .bind(&card.create_user)
        .bind(&card.create_date)
        .bind(&card.update_user)
        .bind(&card.update_date)
        .execute(&self.db)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn update(&self, card: &ServicesCard) -> Result<(), ApiError> {
        sqlx::query(
            r#"
            UPDATE services_card
            SET did = ?, pen = ?, email = ?, gender_code = ?, data_source_code = ?,
                user_display_name = ?, given_name = ?, given_names = ?, surname = ?,
                birth_date = ?, identity_assurance_level = ?, postal_code = ?,
                update_user = ?, update_date = ?
            WHERE services_card_id = ?
            "#,
        )
        .bind(&card.did)
        .bind(&card.pen)
        .bind(&card.email)
        .bind(&card.gender_code)
        .bind(&card.data_source_code)
        .bind(&card.user_display_name)
        .bind(&card.given_name)
        .bind(&card.given_names)
        .bind(&card.surname)
        .bind(&card.birth_date)
        .bind(card.identity_assurance_level)
        .bind(&card.postal_code)
        .bind(&card.update_user)
        .bind(&card.update_date)
        .bind(&card.services_card_id)
        .execute(&self.db)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM services_card WHERE services_card_id = ?")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        Ok(result.rows_affected() > 0)
    }
}
