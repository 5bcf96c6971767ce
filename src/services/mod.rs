pub mod auth_service;

pub use auth_service::{AuthResponse, AuthService, LoginRequest, ProfileResponse, RegisterRequest};
