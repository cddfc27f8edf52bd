//! Request validation utilities.
//!
//! Body fields are sanitised in a fixed order: trim surrounding whitespace,
//! check the length of the trimmed value, then HTML-escape it. Failures are
//! collected per field so a single response can report all of them.

use serde::Serialize;

/// Maximum accepted username length (after trimming).
pub const USERNAME_MAX_LEN: usize = 30;
/// Minimum accepted username length (after trimming).
pub const USERNAME_MIN_LEN: usize = 3;
/// Minimum accepted password length.
pub const PASSWORD_MIN_LEN: usize = 6;
/// Maximum accepted length of a secure data payload.
pub const DATA_MAX_LEN: usize = 500;

/// One failed check, reported without echoing the offending value.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub path: &'static str,
    pub msg: String,
    pub location: &'static str,
}

impl FieldError {
    pub fn body(path: &'static str, msg: impl Into<String>) -> Self {
        Self {
            kind: "field",
            path,
            msg: msg.into(),
            location: "body",
        }
    }
}

/// Accumulates field errors for one request.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trim and length-check a field, returning the escaped value if it passed.
    pub fn text(
        &mut self,
        path: &'static str,
        value: &str,
        min: usize,
        max: Option<usize>,
        msg: &str,
    ) -> Option<String> {
        let trimmed = value.trim();
        if length_within(trimmed, min, max) {
            Some(escape_html(trimmed))
        } else {
            self.errors.push(FieldError::body(path, msg));
            None
        }
    }

    /// Length-check a field without altering it (passwords).
    pub fn raw(&mut self, path: &'static str, value: &str, min: usize, msg: &str) -> bool {
        let ok = length_within(value, min, None);
        if !ok {
            self.errors.push(FieldError::body(path, msg));
        }
        ok
    }

    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

fn length_within(value: &str, min: usize, max: Option<usize>) -> bool {
    let len = value.chars().count();
    len >= min && max.map_or(true, |max| len <= max)
}

/// Replace HTML-significant characters with entities.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Validated login credentials.
#[derive(Debug)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Check a login payload: username 3-30 chars after trimming, password at least 6.
pub fn validate_login(username: &str, password: &str) -> Result<LoginInput, Vec<FieldError>> {
    let mut v = Validator::new();
    let username = v.text(
        "username",
        username,
        USERNAME_MIN_LEN,
        Some(USERNAME_MAX_LEN),
        "Username must be between 3 and 30 characters",
    );
    v.raw(
        "password",
        password,
        PASSWORD_MIN_LEN,
        "Password must be at least 6 characters",
    );
    v.finish()?;

    Ok(LoginInput {
        username: username.unwrap_or_default(),
        password: password.to_string(),
    })
}

/// Check a secure data payload: 1-500 chars after trimming, returned escaped.
pub fn validate_data(data: &str) -> Result<String, Vec<FieldError>> {
    let mut v = Validator::new();
    let data = v.text(
        "data",
        data,
        1,
        Some(DATA_MAX_LEN),
        "Data must be between 1 and 500 characters",
    );
    v.finish()?;
    Ok(data.unwrap_or_default())
}
