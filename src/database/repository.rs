use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{
    NewReading, NewThreshold, NewUser, SensorReading, Threshold, User, UserCredentials,
};
use super::store::{ReadingStore, ThresholdStore, UserStore};

const USER_COLUMNS: &str = "id, email, name, created_at";
const READING_COLUMNS: &str = "id, temperature, threshold_value, recorded_at";
const THRESHOLD_COLUMNS: &str = "id, threshold_value, created_at";

/// Table-scoped access to one PostgreSQL table
pub struct Repository<T> {
    table_name: String,
    pool: PgPool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Repository<T> {
    pub fn new(table_name: impl Into<String>, pool: PgPool) -> Self {
        Self {
            table_name: table_name.into(),
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Quoted table identifier for interpolation into SQL
    fn table(&self) -> String {
        format!("\"{}\"", self.table_name.replace('"', "\"\""))
    }

    async fn count_rows(&self) -> Result<i64, DatabaseError> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.table());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }
}

#[async_trait]
impl UserStore for Repository<User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DatabaseError> {
        let sql = format!(
            "SELECT {}, password_hash FROM {} WHERE email = $1",
            USER_COLUMNS,
            self.table()
        );
        let row = sqlx::query_as::<_, UserCredentials>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", USER_COLUMNS, self.table());
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO {} (email, password_hash, name) VALUES ($1, $2, $3) RETURNING {}",
            self.table(),
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl ReadingStore for Repository<SensorReading> {
    async fn count(&self) -> Result<i64, DatabaseError> {
        self.count_rows().await
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<SensorReading>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY recorded_at DESC, id DESC LIMIT $1 OFFSET $2",
            READING_COLUMNS,
            self.table()
        );
        let rows = sqlx::query_as::<_, SensorReading>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn latest(&self) -> Result<Option<SensorReading>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY recorded_at DESC, id DESC LIMIT 1",
            READING_COLUMNS,
            self.table()
        );
        let row = sqlx::query_as::<_, SensorReading>(&sql)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, reading: NewReading) -> Result<SensorReading, DatabaseError> {
        let sql = format!(
            "INSERT INTO {} (temperature, threshold_value) VALUES ($1, $2) RETURNING {}",
            self.table(),
            READING_COLUMNS
        );
        let row = sqlx::query_as::<_, SensorReading>(&sql)
            .bind(reading.temperature)
            .bind(reading.threshold_value)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl ThresholdStore for Repository<Threshold> {
    async fn count(&self) -> Result<i64, DatabaseError> {
        self.count_rows().await
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Threshold>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
            THRESHOLD_COLUMNS,
            self.table()
        );
        let rows = sqlx::query_as::<_, Threshold>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn latest(&self) -> Result<Option<Threshold>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY created_at DESC, id DESC LIMIT 1",
            THRESHOLD_COLUMNS,
            self.table()
        );
        let row = sqlx::query_as::<_, Threshold>(&sql)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, threshold: NewThreshold) -> Result<Threshold, DatabaseError> {
        let sql = format!(
            "INSERT INTO {} (threshold_value) VALUES ($1) RETURNING {}",
            self.table(),
            THRESHOLD_COLUMNS
        );
        let row = sqlx::query_as::<_, Threshold>(&sql)
            .bind(threshold.threshold_value)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }
}
