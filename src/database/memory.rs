use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{
    NewReading, NewThreshold, NewUser, SensorReading, Threshold, User, UserCredentials,
};
use super::store::{ReadingStore, ThresholdStore, UserStore};

#[derive(Default)]
struct Tables {
    users: Vec<UserCredentials>,
    // Kept in insertion order; ids grow monotonically
    readings: Vec<SensorReading>,
    thresholds: Vec<Threshold>,
    next_reading_id: i64,
    next_threshold_id: i64,
}

/// In-process store with the same contract as the PostgreSQL tables
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest-first window over an insertion-ordered series
fn newest_first<T: Clone>(rows: &[T], offset: i64, limit: i64) -> Vec<T> {
    let offset = usize::try_from(offset).unwrap_or(0);
    let limit = usize::try_from(limit).unwrap_or(0);
    rows.iter().rev().skip(offset).take(limit).cloned().collect()
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.user.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.user.id == id)
            .map(|u| u.user.clone()))
    }

    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.user.email == user.email) {
            return Err(DatabaseError::UniqueViolation("users_email_key".to_string()));
        }

        let created = User {
            id: Uuid::new_v4(),
            email: user.email,
            name: user.name,
            created_at: Utc::now(),
        };
        tables.users.push(UserCredentials {
            user: created.clone(),
            password_hash: user.password_hash,
        });
        Ok(created)
    }
}

#[async_trait]
impl ReadingStore for MemoryStore {
    async fn count(&self) -> Result<i64, DatabaseError> {
        Ok(self.tables.read().await.readings.len() as i64)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<SensorReading>, DatabaseError> {
        Ok(newest_first(&self.tables.read().await.readings, offset, limit))
    }

    async fn latest(&self) -> Result<Option<SensorReading>, DatabaseError> {
        Ok(self.tables.read().await.readings.last().cloned())
    }

    async fn create(&self, reading: NewReading) -> Result<SensorReading, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.next_reading_id += 1;
        let created = SensorReading {
            id: tables.next_reading_id,
            temperature: reading.temperature,
            threshold_value: reading.threshold_value,
            recorded_at: Utc::now(),
        };
        tables.readings.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl ThresholdStore for MemoryStore {
    async fn count(&self) -> Result<i64, DatabaseError> {
        Ok(self.tables.read().await.thresholds.len() as i64)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Threshold>, DatabaseError> {
        Ok(newest_first(&self.tables.read().await.thresholds, offset, limit))
    }

    async fn latest(&self) -> Result<Option<Threshold>, DatabaseError> {
        Ok(self.tables.read().await.thresholds.last().cloned())
    }

    async fn create(&self, threshold: NewThreshold) -> Result<Threshold, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.next_threshold_id += 1;
        let created = Threshold {
            id: tables.next_threshold_id,
            threshold_value: threshold.threshold_value,
            created_at: Utc::now(),
        };
        tables.thresholds.push(created.clone());
        Ok(created)
    }
}
