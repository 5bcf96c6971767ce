// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition plus read access to readings and thresholds. Readings
// can also be created anonymously so sensors do not need accounts.
//
// Security Level: None
// Route Prefix: /api
// Middleware: None

pub mod auth;
pub mod readings;
pub mod thresholds;
