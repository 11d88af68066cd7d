use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

use crate::models::{CompatibilityProfile, HabitsRecord, ProfileRecord};
use crate::services::store::{ProfileStore, StoreError};

/// PostgreSQL-backed profile store
///
/// One row per owner in `flatmate_profiles`. Categorical values are stored
/// as their display strings and read back raw, so rows written by older
/// versions still surface as validation errors instead of being coerced.
pub struct PostgresProfileStore {
    pool: PgPool,
}

impl PostgresProfileStore {
    /// Create a new store from a connection string and run migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL profile store");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Remove an owner's profile
    pub async fn delete_profile(&self, owner_id: &str) -> Result<bool, StoreError> {
        let query = r#"
            DELETE FROM flatmate_profiles
            WHERE owner_id = $1
        "#;

        let result = sqlx::query(query).bind(owner_id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT owner_id, gender, preferred_gender, budget, location_preference,
           smoking, pets, sleep_time, cleanliness, bio
    FROM flatmate_profiles
"#;

fn record_from_row(row: &PgRow) -> Result<ProfileRecord, StoreError> {
    Ok(ProfileRecord {
        owner_id: row.try_get("owner_id")?,
        gender: row.try_get("gender")?,
        preferred_gender: row.try_get("preferred_gender")?,
        budget: row.try_get("budget")?,
        location_preference: row.try_get("location_preference")?,
        habits: Some(HabitsRecord {
            smoking: row.try_get("smoking")?,
            pets: row.try_get("pets")?,
            sleep_time: row.try_get("sleep_time")?,
            cleanliness: row.try_get("cleanliness")?,
        }),
        bio: row.try_get("bio")?,
    })
}

impl ProfileStore for PostgresProfileStore {
    async fn get_profile(&self, owner_id: &str) -> Result<Option<ProfileRecord>, StoreError> {
        let query = format!("{} WHERE owner_id = $1", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(record_from_row).transpose()
    }

    /// Uses INSERT ... ON CONFLICT so every column is replaced on update
    async fn upsert_profile(
        &self,
        profile: &CompatibilityProfile,
    ) -> Result<ProfileRecord, StoreError> {
        if profile.owner_id.is_empty() {
            return Err(StoreError::InvalidInput("owner id must not be empty".to_string()));
        }

        let query = r#"
            INSERT INTO flatmate_profiles (
                owner_id, gender, preferred_gender, budget, location_preference,
                smoking, pets, sleep_time, cleanliness, bio, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW())
            ON CONFLICT (owner_id)
            DO UPDATE SET
                gender = EXCLUDED.gender,
                preferred_gender = EXCLUDED.preferred_gender,
                budget = EXCLUDED.budget,
                location_preference = EXCLUDED.location_preference,
                smoking = EXCLUDED.smoking,
                pets = EXCLUDED.pets,
                sleep_time = EXCLUDED.sleep_time,
                cleanliness = EXCLUDED.cleanliness,
                bio = EXCLUDED.bio,
                updated_at = EXCLUDED.updated_at
        "#;

        let record = ProfileRecord::from(profile);

        sqlx::query(query)
            .bind(&profile.owner_id)
            .bind(profile.gender.to_string())
            .bind(profile.preferred_gender.to_string())
            .bind(profile.budget)
            .bind(&profile.location_preference)
            .bind(profile.habits.smoking.to_string())
            .bind(profile.habits.pets.to_string())
            .bind(profile.habits.sleep_time.to_string())
            .bind(profile.habits.cleanliness.to_string())
            .bind(&profile.bio)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Upserted flatmate profile {}", profile.owner_id);

        Ok(record)
    }

    async fn candidate_pool(
        &self,
        requester_owner_id: &str,
    ) -> Result<Vec<ProfileRecord>, StoreError> {
        let query = format!("{} WHERE owner_id <> $1 ORDER BY owner_id", SELECT_COLUMNS);

        let rows = sqlx::query(&query)
            .bind(requester_owner_id)
            .fetch_all(&self.pool)
            .await?;

        let records = rows
            .iter()
            .map(record_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            "Loaded {} candidate profiles for {}",
            records.len(),
            requester_owner_id
        );

        Ok(records)
    }

    async fn snapshot(&self) -> Result<Vec<ProfileRecord>, StoreError> {
        let query = format!("{} ORDER BY owner_id", SELECT_COLUMNS);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.iter().map(record_from_row).collect()
    }
}
