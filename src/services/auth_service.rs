use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::validate::{validate_email_format, validate_password_length};
use crate::auth::{hash_password, verify_password, PasswordError, TokenService};
use crate::database::models::{NewUser, User};
use crate::database::{DatabaseError, UserStore};
use crate::error::ApiError;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

// Compared against when the email is unknown so both login failures cost one bcrypt check
static DUMMY_HASH: OnceCell<String> = OnceCell::new();

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Returned by register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: User,
}

/// Registration, login and profile lookup over the user store
pub struct AuthService<'a> {
    users: &'a dyn UserStore,
    tokens: &'a TokenService,
    password_hash_cost: u32,
}

impl<'a> AuthService<'a> {
    pub fn new(users: &'a dyn UserStore, tokens: &'a TokenService, password_hash_cost: u32) -> Self {
        Self {
            users,
            tokens,
            password_hash_cost,
        }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(
            state.users(),
            &state.tokens,
            state.config.security.password_hash_cost,
        )
    }

    /// Create an account and issue its first token
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, ApiError> {
        let (email, password, name) = match (
            present(request.email),
            present(request.password),
            present(request.name),
        ) {
            (Some(email), Some(password), Some(name)) => (email, password, name),
            _ => {
                return Err(ApiError::validation_error(
                    "Email, password, and name are required",
                ))
            }
        };

        validate_email_format(&email).map_err(ApiError::validation_error)?;
        validate_password_length(&password).map_err(ApiError::validation_error)?;

        let password_hash = hash_password(password, self.password_hash_cost).await?;

        let user = self
            .users
            .create(NewUser {
                email,
                name,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                DatabaseError::UniqueViolation(_) => ApiError::conflict("Email already exists"),
                other => other.into(),
            })?;

        let token = self.tokens.issue(user.id, &user.email)?;
        tracing::info!(user_id = %user.id, "User registered");

        Ok(AuthResponse { user, token })
    }

    /// Check credentials and issue a token
    ///
    /// Unknown email and wrong password produce the same response.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, ApiError> {
        let (email, password) = match (present(request.email), present(request.password)) {
            (Some(email), Some(password)) => (email, password),
            _ => return Err(ApiError::validation_error("Email and password are required")),
        };

        let Some(credentials) = self.users.find_by_email(&email).await? else {
            let hash = self.dummy_hash().await?;
            verify_password(password, hash.to_string()).await?;
            tracing::debug!("Login rejected: unknown email");
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(password, credentials.password_hash.clone()).await? {
            tracing::debug!(user_id = %credentials.user.id, "Login rejected: password mismatch");
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        }

        let user = credentials.into_user();
        let token = self.tokens.issue(user.id, &user.email)?;

        Ok(AuthResponse { user, token })
    }

    /// Look up the user behind an already verified token
    pub async fn profile(&self, user_id: Uuid) -> Result<ProfileResponse, ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found"))?;

        Ok(ProfileResponse { user })
    }

    /// A valid bcrypt hash at the configured cost, built on first use
    async fn dummy_hash(&self) -> Result<&'static str, PasswordError> {
        if let Some(hash) = DUMMY_HASH.get() {
            return Ok(hash.as_str());
        }
        let hash = hash_password("unknown-account".to_string(), self.password_hash_cost).await?;
        Ok(DUMMY_HASH.get_or_init(|| hash).as_str())
    }
}

/// Treat empty strings like missing fields
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
