//! Form and input validation
//!
//! Provides a fluent [`Validator`] plus the rule sets the portal forms use:
//! - Login (email + password)
//! - Signup (name, email, phone, password confirmation)
//! - OTP entry
//! - Vendor rejection reason
//!
//! Every rule set is pure and synchronous. A form submits only when its
//! [`FieldErrors`] map is empty.
//!
//! # Example
//!
//! ```rust
//! use eventmart_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("name", "Aurora Events")
//!     .min_length("name", "Aurora Events", 3)
//!     .max_length("name", "Aurora Events", 50)
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

use crate::error::{Error, ErrorCode, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Basic `x@y.z` shape
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10}$").expect("phone pattern is valid"));

static OTP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6}$").expect("otp pattern is valid"));

/// Symbols accepted (and one required) in a password
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

/// Minimum password length
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Bare wildcard the password field rejects outright
pub const PASSWORD_WILDCARD: &str = "*";

/// Field name to first error message. Absent entries are valid.
pub type FieldErrors = BTreeMap<String, String>;

/// Validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }

    /// Collapse into the per-field map a form displays.
    ///
    /// Only the first error recorded for a field is kept.
    #[must_use]
    pub fn field_errors(&self) -> FieldErrors {
        let mut map = FieldErrors::new();
        for error in &self.errors {
            map.entry(error.field.clone())
                .or_insert_with(|| error.message.clone());
        }
        map
    }

    /// Convert to Result type
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
            Err(Error::new(
                ErrorCode::ValidationError,
                format!("Validation failed: {}", messages.join("; ")),
            ))
        }
    }
}

/// Fluent validator builder
///
/// Once a field has failed, later rules for the same field are skipped so
/// each field reports its most basic problem first.
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    #[must_use]
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    fn failed(&self, field: &str) -> bool {
        self.result.errors.iter().any(|e| e.field == field)
    }

    fn push(&mut self, field: &str, message: String, code: &str, expected: Option<String>, actual: Option<String>) {
        self.result.add_error(ValidationError {
            field: field.to_string(),
            message,
            code: code.to_string(),
            expected,
            actual,
        });
    }

    /// Validate that a field is not empty
    #[must_use]
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if !self.failed(field) && value.trim().is_empty() {
            self.push(
                field,
                format!("{} is required", display_name(field)),
                "REQUIRED",
                Some("non-empty value".to_string()),
                Some("empty".to_string()),
            );
        }
        self
    }

    /// Validate minimum length (in characters)
    #[must_use]
    pub fn min_length(mut self, field: &str, value: &str, min: usize) -> Self {
        let len = value.chars().count();
        if !self.failed(field) && len < min {
            self.push(
                field,
                format!("Must be at least {min} characters"),
                "MIN_LENGTH",
                Some(format!(">= {min} chars")),
                Some(format!("{len} chars")),
            );
        }
        self
    }

    /// Validate maximum length (in characters)
    #[must_use]
    pub fn max_length(mut self, field: &str, value: &str, max: usize) -> Self {
        let len = value.chars().count();
        if !self.failed(field) && len > max {
            self.push(
                field,
                format!("Must be at most {max} characters"),
                "MAX_LENGTH",
                Some(format!("<= {max} chars")),
                Some(format!("{len} chars")),
            );
        }
        self
    }

    /// Validate against a precompiled pattern
    #[must_use]
    pub fn matches(mut self, field: &str, value: &str, re: &Regex, message: &str) -> Self {
        if !self.failed(field) && !re.is_match(value) {
            self.push(
                field,
                message.to_string(),
                "PATTERN",
                Some(re.as_str().to_string()),
                None,
            );
        }
        self
    }

    /// Validate that a value differs from a forbidden one
    #[must_use]
    pub fn not_equal(mut self, field: &str, value: &str, forbidden: &str, message: &str) -> Self {
        if !self.failed(field) && value == forbidden {
            self.push(field, message.to_string(), "FORBIDDEN_VALUE", None, None);
        }
        self
    }

    /// Validate a numeric range. Values that do not compare (NaN) fail.
    #[must_use]
    pub fn range<T: PartialOrd + std::fmt::Display>(
        mut self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        let in_range = min <= value && value <= max;
        if !self.failed(field) && !in_range {
            self.push(
                field,
                format!("Must be between {min} and {max}"),
                "RANGE",
                Some(format!("{min} - {max}")),
                Some(value.to_string()),
            );
        }
        self
    }

    /// Add a custom validation
    #[must_use]
    pub fn custom<F>(mut self, field: &str, f: F) -> Self
    where
        F: FnOnce() -> Option<String>,
    {
        if !self.failed(field) {
            if let Some(message) = f() {
                self.push(field, message, "CUSTOM", None, None);
            }
        }
        self
    }

    /// Complete validation and return result
    #[must_use]
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

/// "confirmPassword" -> "Confirm password"
fn display_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for (i, c) in field.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Check the composed password strength rule.
///
/// At least [`PASSWORD_MIN_LENGTH`] characters drawn from ASCII letters,
/// digits and [`PASSWORD_SYMBOLS`], with one of each class present.
#[must_use]
pub fn is_strong_password(password: &str) -> bool {
    let allowed = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c);

    password.chars().count() >= PASSWORD_MIN_LENGTH
        && password.chars().all(allowed)
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

fn email_rules(v: Validator, email: &str) -> Validator {
    v.required("email", email)
        .matches("email", email, &EMAIL_RE, "Enter a valid email address")
}

fn password_rules(v: Validator, password: &str) -> Validator {
    v.required("password", password)
        .not_equal(
            "password",
            password,
            PASSWORD_WILDCARD,
            "Password cannot be a wildcard",
        )
        .custom("password", || {
            (!is_strong_password(password)).then(|| {
                format!(
                    "Password must be at least {PASSWORD_MIN_LENGTH} characters and include an \
                     uppercase letter, a lowercase letter, a number and a symbol ({PASSWORD_SYMBOLS})"
                )
            })
        })
}

/// Login form values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginFields {
    /// Email address
    pub email: String,
    /// Plain password, sent to the backend as-is
    pub password: String,
}

impl LoginFields {
    /// Create login fields
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Validate the login form
#[must_use]
pub fn validate_login(fields: &LoginFields) -> FieldErrors {
    let v = email_rules(Validator::new(), &fields.email);
    password_rules(v, &fields.password).validate().field_errors()
}

/// Signup form values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct SignupFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

/// Validate the signup form
#[must_use]
pub fn validate_signup(fields: &SignupFields) -> FieldErrors {
    let v = Validator::new()
        .required("name", &fields.name)
        .min_length("name", fields.name.trim(), 3)
        .max_length("name", &fields.name, 50);
    let v = email_rules(v, &fields.email)
        .required("phone", &fields.phone)
        .matches("phone", &fields.phone, &PHONE_RE, "Phone number must be 10 digits");
    password_rules(v, &fields.password)
        .required("confirmPassword", &fields.confirm_password)
        .custom("confirmPassword", || {
            (fields.password != fields.confirm_password)
                .then(|| "Passwords do not match".to_string())
        })
        .validate()
        .field_errors()
}

/// Validate a one-time password entry
#[must_use]
pub fn validate_otp(otp: &str) -> FieldErrors {
    Validator::new()
        .required("otp", otp)
        .matches("otp", otp, &OTP_RE, "OTP must be 6 digits")
        .validate()
        .field_errors()
}

/// Validate the reason given when rejecting a vendor
#[must_use]
pub fn validate_rejection_reason(reason: &str) -> FieldErrors {
    Validator::new()
        .required("rejectionReason", reason)
        .min_length("rejectionReason", reason.trim(), 10)
        .max_length("rejectionReason", reason, 500)
        .validate()
        .field_errors()
}
