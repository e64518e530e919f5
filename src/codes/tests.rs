//! Tests for codes module
//!
//! These tests verify:
//! - validity window classification, including boundaries
//! - SQLite lookups against the seeded code tables

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::common::migrations::run_migrations;
    use chrono::{TimeZone, Utc};
    use sqlx::sqlite::SqlitePoolOptions;

    fn entry(effective: (i32, u32, u32), expiry: (i32, u32, u32)) -> CodeTableEntry {
        CodeTableEntry {
            code: "M".to_string(),
            label: "Male".to_string(),
            description: None,
            display_order: 1,
            effective_date: Utc
                .with_ymd_and_hms(effective.0, effective.1, effective.2, 0, 0, 0)
                .unwrap(),
            expiry_date: Utc
                .with_ymd_and_hms(expiry.0, expiry.1, expiry.2, 0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_code_window_effective() {
        let code = entry((2020, 1, 1), (2099, 12, 31));
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(code_window(&code, now), CodeWindow::Effective);
    }

    #[test]
    fn test_code_window_not_yet_effective() {
        let code = entry((2099, 2, 1), (2099, 12, 31));
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(code_window(&code, now), CodeWindow::NotYetEffective);
    }

    #[test]
    fn test_code_window_expired() {
        let code = entry((2010, 1, 1), (2020, 1, 1));
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(code_window(&code, now), CodeWindow::Expired);
    }

    #[test]
    fn test_code_window_boundaries_are_inclusive() {
        let code = entry((2020, 1, 1), (2030, 1, 1));
        assert_eq!(code_window(&code, code.effective_date), CodeWindow::Effective);
        assert_eq!(code_window(&code, code.expiry_date), CodeWindow::Effective);
    }

    #[tokio::test]
    async fn test_sqlite_lookup_finds_seeded_codes() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        let service = SqliteCodeTableService::new(pool);

        let male = service.find_gender_code("M").await.unwrap();
        assert_eq!(male.map(|c| c.label), Some("Male".to_string()));

        let missing = service.find_data_source_code("MY_ED").await.unwrap();
        assert!(missing.is_none());

        let sources = service.list_data_source_codes().await.unwrap();
        let codes: Vec<_> = sources.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["MYED", "SLD", "BCSC"]);
    }
}
