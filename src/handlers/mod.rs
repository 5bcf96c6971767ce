// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) -> Protected (bearer token verified by jwt_auth_middleware)
pub mod protected; // Tier 2: AuthUser available in request extensions
pub mod public; // Tier 1: No authentication required
