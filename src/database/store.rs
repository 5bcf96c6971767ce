use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::manager::{DatabaseError, DatabaseManager};
use super::memory::MemoryStore;
use super::models::{
    NewReading, NewThreshold, NewUser, SensorReading, Threshold, User, UserCredentials,
};
use super::repository::Repository;

/// User accounts, looked up by email for login and by id for profiles
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    /// Fails with `DatabaseError::UniqueViolation` when the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, DatabaseError>;
}

/// Sensor readings, newest first
#[async_trait]
pub trait ReadingStore: Send + Sync {
    async fn count(&self) -> Result<i64, DatabaseError>;

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<SensorReading>, DatabaseError>;

    async fn latest(&self) -> Result<Option<SensorReading>, DatabaseError>;

    async fn create(&self, reading: NewReading) -> Result<SensorReading, DatabaseError>;
}

/// Alert thresholds, newest first
#[async_trait]
pub trait ThresholdStore: Send + Sync {
    async fn count(&self) -> Result<i64, DatabaseError>;

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Threshold>, DatabaseError>;

    async fn latest(&self) -> Result<Option<Threshold>, DatabaseError>;

    async fn create(&self, threshold: NewThreshold) -> Result<Threshold, DatabaseError>;
}

/// Store handle passed into the application state
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn UserStore>,
    pub readings: Arc<dyn ReadingStore>,
    pub thresholds: Arc<dyn ThresholdStore>,
    pool: Option<PgPool>,
}

impl Store {
    /// PostgreSQL-backed store sharing one pool across tables
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(Repository::<User>::new("users", pool.clone())),
            readings: Arc::new(Repository::<SensorReading>::new("sensor_readings", pool.clone())),
            thresholds: Arc::new(Repository::<Threshold>::new("thresholds", pool.clone())),
            pool: Some(pool),
        }
    }

    /// Process-local store, used for tests and local development
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            readings: store.clone(),
            thresholds: store,
            pool: None,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }

    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        match &self.pool {
            Some(pool) => DatabaseManager::health_check(pool).await,
            None => Ok(()),
        }
    }
}
