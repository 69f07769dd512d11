//! Client-side form checks run before any request is issued

use shiftline_domain::constants::{
    MIN_PASSWORD_LENGTH, MSG_LOGIN_FIELDS_REQUIRED, MSG_PASSWORDS_DO_NOT_MATCH,
    MSG_PASSWORD_TOO_SHORT, MSG_REGISTER_FIELDS_REQUIRED,
};
use shiftline_domain::{Credentials, Registration, Result, ShiftlineError};

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Build login credentials, requiring both fields.
///
/// # Errors
/// `Validation` when either field is blank.
pub fn login_credentials(email: &str, password: &str) -> Result<Credentials> {
    if blank(email) || password.is_empty() {
        return Err(ShiftlineError::Validation(MSG_LOGIN_FIELDS_REQUIRED.to_string()));
    }
    Ok(Credentials { email: email.trim().to_string(), password: password.to_string() })
}

/// Build a registration request.
///
/// Checks run in order: every field present, confirmation matches, minimum
/// length.
///
/// # Errors
/// `Validation` with the first failing check's message.
pub fn registration(name: &str, email: &str, password: &str, confirm: &str) -> Result<Registration> {
    if blank(name) || blank(email) || password.is_empty() || confirm.is_empty() {
        return Err(ShiftlineError::Validation(MSG_REGISTER_FIELDS_REQUIRED.to_string()));
    }
    if password != confirm {
        return Err(ShiftlineError::Validation(MSG_PASSWORDS_DO_NOT_MATCH.to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ShiftlineError::Validation(MSG_PASSWORD_TOO_SHORT.to_string()));
    }

    Ok(Registration {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<impl std::fmt::Debug>) -> String {
        match result {
            Err(ShiftlineError::Validation(message)) => message,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn login_requires_both_fields() {
        assert_eq!(message(login_credentials("", "secret")), "Please enter both email and password");
        assert_eq!(message(login_credentials("a@b.c", "")), "Please enter both email and password");

        let credentials = login_credentials("  a@b.c ", "secret").unwrap();
        assert_eq!(credentials.email, "a@b.c");
    }

    #[test]
    fn registration_messages_in_order() {
        assert_eq!(message(registration("", "a@b.c", "secret", "secret")), "Please fill in all fields");
        assert_eq!(message(registration("Ada", "a@b.c", "secret", "secreT")), "Passwords do not match");
        assert_eq!(
            message(registration("Ada", "a@b.c", "abc", "abc")),
            "Password must be at least 6 characters long"
        );
        assert!(registration("Ada", "a@b.c", "secret", "secret").is_ok());
    }
}
