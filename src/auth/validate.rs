use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_PASSWORD_LENGTH: usize = 6;

// local@domain.tld with no whitespace and a single @
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Validate email format
pub fn validate_email_format(email: &str) -> Result<(), String> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err("Invalid email format".to_string())
    }
}

/// Validate password length, counted in UTF-16 code units
///
/// Characters outside the Basic Multilingual Plane count twice, matching how
/// browser clients measure the same field.
pub fn validate_password_length(password: &str) -> Result<(), String> {
    if password.encode_utf16().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }
    Ok(())
}
