//! User-related custom validators.

use validator::ValidationError;

use crate::constants::{
    ERR_INVALID_USERNAME_FORMAT, ERR_PASSWORD_DIGIT, ERR_PASSWORD_LOWERCASE, ERR_PASSWORD_TOO_LONG,
    ERR_PASSWORD_TOO_SHORT, ERR_PASSWORD_UPPERCASE,
};

/// bcrypt silently truncates past this many bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;
pub const MIN_PASSWORD_CHARS: usize = 8;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Password must be 8 characters to 72 bytes and contain a digit,
/// an uppercase and a lowercase letter. Reports the first rule broken.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(error("password_too_short", ERR_PASSWORD_TOO_SHORT));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(error("password_too_long", ERR_PASSWORD_TOO_LONG));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(error("password_no_digit", ERR_PASSWORD_DIGIT));
    }
    if !password.chars().any(char::is_uppercase) {
        return Err(error("password_no_uppercase", ERR_PASSWORD_UPPERCASE));
    }
    if !password.chars().any(char::is_lowercase) {
        return Err(error("password_no_lowercase", ERR_PASSWORD_LOWERCASE));
    }
    Ok(())
}

/// Username may only contain letters, numbers, underscores and hyphens.
pub fn validate_username_format(username: &str) -> Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        Ok(())
    } else {
        Err(error("invalid_username", ERR_INVALID_USERNAME_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    use crate::models::RegisterRequest;

    fn message(result: Result<(), ValidationError>) -> String {
        result.unwrap_err().message.unwrap().to_string()
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password_strength("SecurePass123").is_ok());
        assert_eq!(message(validate_password_strength("Sh0rt")), ERR_PASSWORD_TOO_SHORT);
        assert_eq!(message(validate_password_strength("NoDigitsHere")), ERR_PASSWORD_DIGIT);
        assert_eq!(message(validate_password_strength("alllower123")), ERR_PASSWORD_UPPERCASE);
        assert_eq!(message(validate_password_strength("ALLUPPER123")), ERR_PASSWORD_LOWERCASE);
    }

    #[test]
    fn test_password_byte_limit_counts_multibyte_chars() {
        // 25 three-byte characters: 25 chars but 75 bytes.
        let long = format!("Aa1{}", "€".repeat(25));
        assert_eq!(message(validate_password_strength(&long)), ERR_PASSWORD_TOO_LONG);
    }

    #[test]
    fn test_username_format() {
        assert!(validate_username_format("john_doe-42").is_ok());
        assert!(validate_username_format("john doe").is_err());
        assert!(validate_username_format("jo@hn").is_err());
    }

    #[test]
    fn test_register_request_validation() {
        let ok = RegisterRequest {
            email: "user@example.com".into(),
            username: "johndoe".into(),
            password: "SecurePass123".into(),
            role: None,
        };
        assert!(ok.validate().is_ok());

        let bad = RegisterRequest {
            email: "not-an-email".into(),
            username: "jd".into(),
            password: "weak".into(),
            role: None,
        };
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 3);
    }
}
