// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route here sits behind jwt_auth_middleware, which rejects requests
// without a token (401) or with a bad one (403) and otherwise injects
// `AuthUser` into the request extensions.

pub mod auth;
pub mod thresholds;
