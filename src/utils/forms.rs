use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
        .expect("email pattern compiles")
});

/// Field name to error messages, in field order.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// A submitted (or blank) form echoed back to the view.
#[derive(Debug, Clone, Serialize)]
pub struct BoundForm<T> {
    pub values: T,
    pub errors: FieldErrors,
}

impl<T> BoundForm<T> {
    pub fn new(values: T) -> Self {
        BoundForm {
            values,
            errors: FieldErrors::new(),
        }
    }

    pub fn with_errors(values: T, errors: FieldErrors) -> Self {
        BoundForm { values, errors }
    }
}

/// Collects field errors while cleaning submitted values.
#[derive(Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Trimmed, non-empty text of at most `max_len` characters.
    pub fn required(&mut self, field: &str, value: Option<&str>, max_len: Option<usize>) -> String {
        let value = value.map(str::trim).unwrap_or_default();
        if value.is_empty() {
            self.push(field, "This field is required.");
            return String::new();
        }
        if let Some(max) = max_len {
            let len = value.chars().count();
            if len > max {
                self.push(
                    field,
                    format!(
                        "Ensure this value has at most {} characters (it has {}).",
                        max, len
                    ),
                );
            }
        }
        value.to_string()
    }

    pub fn optional(&mut self, value: Option<&str>) -> String {
        value.map(str::trim).unwrap_or_default().to_string()
    }

    pub fn email(&mut self, field: &str, value: Option<&str>) -> String {
        let value = self.required(field, value, Some(254));
        if !value.is_empty() && !EMAIL_RE.is_match(&value) {
            self.push(field, "Enter a valid email address.");
        }
        value
    }

    pub fn finish(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
