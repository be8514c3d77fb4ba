//! Input validation functions
//!
//! Validators for the administrative-account fields, matching the limits
//! the application server enforces on its side.

const MAX_EMAIL_LEN: usize = 254;
const MAX_USERNAME_LEN: usize = 150;
const MAX_NAME_LEN: usize = 150;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err("Email too long".to_string());
    }
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    if !email_regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate a username: letters, digits and `.`, `@`, `+`, `-`
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err("Username too long".to_string());
    }
    let username_regex = regex_lite::Regex::new(r"^[\w.@+-]+$").unwrap();
    if !username_regex.is_match(username) {
        return Err(
            "Invalid username. Only letters, digits and ./@/+/- are allowed".to_string(),
        );
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate a person-name field (first or last name)
pub fn validate_person_name(name: &str) -> Result<(), String> {
    if name.len() > MAX_NAME_LEN {
        return Err("Name too long".to_string());
    }
    Ok(())
}
