//! Sign-up validation.
//!
//! Rules are checked in a fixed order and the first failure is reported on
//! its own; the form never surfaces more than one message per attempt.

use thiserror::Error;

use crate::domain::customers::data::SignupForm;

const MIN_NAME_CHARS: usize = 3;
const MIN_PHONE_CHARS: usize = 10;
const MIN_PASSWORD_CHARS: usize = 5;
const MIN_EMAIL_CHARS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please Enter your First Name !!")]
    FirstNameMissing,

    #[error("First Name must be 3 char long or more")]
    FirstNameTooShort,

    #[error("Please Enter your Last Name")]
    LastNameMissing,

    #[error("Last Name must be 3 char long or more")]
    LastNameTooShort,

    #[error("Enter your Phone Number")]
    PhoneMissing,

    #[error("Phone Number must be 10 char Long")]
    PhoneTooShort,

    #[error("Password must be 5 char long")]
    PasswordTooShort,

    #[error("Email must be 5 char long")]
    EmailTooShort,

    #[error("Email Address Already Registered..")]
    EmailTaken,
}

/// A sign-up form that passed the field rules.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidSignup<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub address: Option<&'a str>,
    pub phone: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

impl std::fmt::Debug for ValidSignup<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidSignup")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Check every field rule except email uniqueness, which needs storage.
pub fn validate_signup(form: &SignupForm) -> Result<ValidSignup<'_>, ValidationError> {
    let first_name = required(form.first_name.as_deref())
        .ok_or(ValidationError::FirstNameMissing)?;

    if char_len(first_name) < MIN_NAME_CHARS {
        return Err(ValidationError::FirstNameTooShort);
    }

    let last_name =
        required(form.last_name.as_deref()).ok_or(ValidationError::LastNameMissing)?;

    if char_len(last_name) < MIN_NAME_CHARS {
        return Err(ValidationError::LastNameTooShort);
    }

    let phone = required(form.phone.as_deref()).ok_or(ValidationError::PhoneMissing)?;

    if char_len(phone) < MIN_PHONE_CHARS {
        return Err(ValidationError::PhoneTooShort);
    }

    let password = form.password.as_deref().unwrap_or_default();

    if char_len(password) < MIN_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }

    let email = form.email.as_deref().unwrap_or_default();

    if char_len(email) < MIN_EMAIL_CHARS {
        return Err(ValidationError::EmailTooShort);
    }

    Ok(ValidSignup {
        first_name,
        last_name,
        address: required(form.address.as_deref()),
        phone,
        email,
        password,
    })
}

fn required(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}
