//! Input validation utilities

use chrono::{NaiveDate, Utc};
use regex::Regex;
use std::sync::OnceLock;

use crate::{dto::RegistrationForm, error::FieldError};

/// Validate user name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".to_string());
    }

    let length = name.chars().count();
    if !(2..=20).contains(&length) {
        return Err("Name must be between 2 and 20 characters".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Email is not valid".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.trim().is_empty() {
        return Err("Password is required".to_string());
    }

    let length = password.chars().count();
    if !(2..=20).contains(&length) {
        return Err("Password must be between 2 and 20 characters".to_string());
    }

    Ok(())
}

/// Validate an optional `yyyy-MM-dd` birth date, which must lie in the past
pub fn validate_birth_date(raw: Option<&str>) -> Result<Option<NaiveDate>, String> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| "Birth date must use the yyyy-MM-dd format".to_string())?;

    if date >= Utc::now().date_naive() {
        return Err("Birth date must be in the past".to_string());
    }

    Ok(Some(date))
}

/// Registration data that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRegistration {
    pub name: String,
    pub password: String,
    pub email: String,
    pub birth_date: Option<NaiveDate>,
}

/// Validate every field of the registration form, collecting all failures
pub fn validate_registration(form: &RegistrationForm) -> Result<ValidRegistration, Vec<FieldError>> {
    let mut errors = Vec::new();
    let name = form.name.trim();
    let email = form.email.trim();

    if let Err(message) = validate_name(name) {
        errors.push(FieldError::new("name", message));
    }
    if let Err(message) = validate_password(&form.password) {
        errors.push(FieldError::new("password", message));
    }
    if let Err(message) = validate_email(email) {
        errors.push(FieldError::new("email", message));
    }
    let birth_date = validate_birth_date(form.birth_date.as_deref()).unwrap_or_else(|message| {
        errors.push(FieldError::new("birthDate", message));
        None
    });

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidRegistration {
        name: name.to_string(),
        password: form.password.clone(),
        email: email.to_string(),
        birth_date,
    })
}
