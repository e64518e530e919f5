// src/common/migrations.rs
//! Database schema creation and reference code seeding

use sqlx::SqlitePool;
use std::env;
use tracing::{info, warn};

/// Gender codes seeded on first start: (code, label, description, display order)
const GENDER_CODES: &[(&str, &str, &str, i64)] = &[
    ("F", "Female", "Persons whose current gender is female.", 1),
    ("M", "Male", "Persons whose current gender is male.", 2),
    ("X", "Gender Diverse", "Persons whose current gender is not exclusively male or female.", 3),
    ("U", "Unknown", "Persons whose gender is not known at the time of data collection.", 4),
];

/// Data-source codes seeded on first start: (code, label, description, display order)
const DATA_SOURCE_CODES: &[(&str, &str, &str, i64)] = &[
    ("MYED", "MyEducation BC", "Record originated from the MyEducation BC student system.", 1),
    ("SLD", "Student Level Data", "Record originated from the Student Level Data collection.", 2),
    ("BCSC", "BC Services Card", "Record originated from a BC Services Card login.", 3),
];

const SEED_EFFECTIVE_DATE: &str = "2020-01-01T00:00:00Z";
const SEED_EXPIRY_DATE: &str = "2099-12-31T23:59:59Z";

/// Run all database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // Only drop tables if RESET_DB environment variable is set to "true"
    let should_reset_db = env::var("RESET_DB").unwrap_or_else(|_| "false".to_string()) == "true";

    if should_reset_db {
        warn!("RESET_DB=true - dropping all tables and recreating schema");
        drop_all_tables(pool).await?;
    }

    create_tables(pool).await?;
    seed_code_tables(pool).await?;

    info!("Database migration completed successfully");

    Ok(())
}

async fn drop_all_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for table in ["services_card", "gender_code", "data_source_code"] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool)
            .await?;
    }
    Ok(())
}

async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services_card (
            services_card_id TEXT PRIMARY KEY,
            did TEXT,
            pen TEXT NOT NULL UNIQUE,
            email TEXT UNIQUE,
            gender_code TEXT NOT NULL,
            data_source_code TEXT NOT NULL,
            user_display_name TEXT,
            given_name TEXT,
            given_names TEXT,
            surname TEXT,
            birth_date TEXT,
            identity_assurance_level INTEGER,
            postal_code TEXT,
            create_user TEXT NOT NULL,
            create_date TEXT NOT NULL,
            update_user TEXT NOT NULL,
            update_date TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    for table in ["gender_code", "data_source_code"] {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                code TEXT PRIMARY KEY,
                label TEXT NOT NULL,
                description TEXT,
                display_order INTEGER NOT NULL DEFAULT 0,
                effective_date TEXT NOT NULL,
                expiry_date TEXT NOT NULL
            )
            "#,
            table
        ))
        .execute(pool)
        .await?;
    }

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_services_card_did ON services_card(did)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn seed_code_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for (table, codes) in [("gender_code", GENDER_CODES), ("data_source_code", DATA_SOURCE_CODES)] {
        for &(code, label, description, display_order) in codes {
            sqlx::query(&format!(
                r#"
                INSERT OR IGNORE INTO {} (code, label, description, display_order, effective_date, expiry_date)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
                table
            ))
            .bind(code)
            .bind(label)
            .bind(description)
            .bind(display_order)
            .bind(SEED_EFFECTIVE_DATE)
            .bind(SEED_EXPIRY_DATE)
            .execute(pool)
            .await?;
        }
        info!(table = %table, count = codes.len(), "Seeded code table");
    }

    Ok(())
}
