use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error(transparent)]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("password worker failed: {0}")]
    Worker(String),
}

/// Hash a password with bcrypt at the given cost.
///
/// bcrypt is deliberately slow, so the work runs on the blocking pool.
pub async fn hash_password(password: String, cost: u32) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| PasswordError::Worker(e.to_string()))?
        .map_err(PasswordError::from)
}

/// Compare a password against a stored bcrypt hash.
pub async fn verify_password(password: String, hash: String) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| PasswordError::Worker(e.to_string()))?
        .map_err(PasswordError::from)
}
