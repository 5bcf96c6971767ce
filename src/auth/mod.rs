pub mod password;
pub mod token;
pub mod validate;

pub use password::{hash_password, verify_password, PasswordError};
pub use token::{Claims, TokenError, TokenService};
