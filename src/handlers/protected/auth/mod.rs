pub mod profile; // GET /api/auth/profile - current user

pub use profile::profile_get;
