use async_trait::async_trait;
use sqlx::SqlitePool;

use super::models::CodeTableEntry;
use crate::common::ApiError;

/// Reference code lookups consumed by the payload validator
#[async_trait]
pub trait CodeTableLookup: Send + Sync {
    async fn find_gender_code(&self, code: &str) -> Result<Option<CodeTableEntry>, ApiError>;

    async fn find_data_source_code(&self, code: &str)
        -> Result<Option<CodeTableEntry>, ApiError>;
}

#[derive(Debug, Clone, Copy)]
enum CodeTable {
    Gender,
    DataSource,
}

impl CodeTable {
    fn table_name(self) -> &'static str {
        match self {
            CodeTable::Gender => "gender_code",
            CodeTable::DataSource => "data_source_code",
        }
    }
}

pub struct SqliteCodeTableService {
    db: SqlitePool,
}

impl SqliteCodeTableService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// All gender codes, including ones outside their validity window
    pub async fn list_gender_codes(&self) -> Result<Vec<CodeTableEntry>, ApiError> {
        self.list(CodeTable::Gender).await
    }

    /// All data-source codes, including ones outside their validity window
    pub async fn list_data_source_codes(&self) -> Result<Vec<CodeTableEntry>, ApiError> {
        self.list(CodeTable::DataSource).await
    }

    async fn list(&self, table: CodeTable) -> Result<Vec<CodeTableEntry>, ApiError> {
        let query = format!(
            r#"
            SELECT code, label, description, display_order, effective_date, expiry_date
            FROM {}
            ORDER BY display_order ASC, code ASC
            "#,
            table.table_name()
        );

        let entries = sqlx::query_as::<_, CodeTableEntry>(&query)
            .fetch_all(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        Ok(entries)
    }

    async fn find(&self, table: CodeTable, code: &str) -> Result<Option<CodeTableEntry>, ApiError> {
        let query = format!(
            r#"
            SELECT code, label, description, display_order, effective_date, expiry_date
            FROM {}
            WHERE code = ?
            "#,
            table.table_name()
        );

        let entry = sqlx::query_as::<_, CodeTableEntry>(&query)
            .bind(code)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        Ok(entry)
    }
}

#[async_trait]
impl CodeTableLookup for SqliteCodeTableService {
    async fn find_gender_code(&self, code: &str) -> Result<Option<CodeTableEntry>, ApiError> {
        self.find(CodeTable::Gender, code).await
    }

    async fn find_data_source_code(
        &self,
        code: &str,
    ) -> Result<Option<CodeTableEntry>, ApiError> {
        self.find(CodeTable::DataSource, code).await
    }
}
