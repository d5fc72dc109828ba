//! Form validation schema shared by the create and update forms
//!
//! Every field is required, the email must be well formed, and no field may
//! contain `<` or `>`. Only the first failing rule of each field is reported,
//! in that order, so the form can show one message under each input.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use validator::{ValidationError, ValidationErrors};

use crate::models::UserInput;

/// Form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Email,
    Phone,
}

impl Field {
    /// All fields in form order
    pub const ALL: [Field; 3] = [Field::FullName, Field::Email, Field::Phone];

    /// Label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Field::FullName => "Full name",
            Field::Email => "Email",
            Field::Phone => "Phone",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "full_name" => Some(Field::FullName),
            "email" => Some(Field::Email),
            "phone" => Some(Field::Phone),
            _ => None,
        }
    }

    /// Current value of this field in `input`
    pub fn value<'a>(&self, input: &'a UserInput) -> &'a str {
        match self {
            Field::FullName => &input.full_name,
            Field::Email => &input.email,
            Field::Phone => &input.phone,
        }
    }

    /// Replace the value of this field in `input`
    pub fn set(&self, input: &mut UserInput, value: impl Into<String>) {
        let slot = match self {
            Field::FullName => &mut input.full_name,
            Field::Email => &mut input.email,
            Field::Phone => &mut input.phone,
        };
        *slot = value.into();
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One message per invalid field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field.label(), message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

// Lower ranks are reported first.
fn rank(error: &ValidationError) -> u8 {
    match error.code.as_ref() {
        "required" => 0,
        "email" => 1,
        _ => 2,
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = BTreeMap::new();
        for (key, field_errors) in errors.field_errors() {
            let Some(field) = Field::from_key(key.as_ref()) else {
                continue;
            };
            if let Some(first) = field_errors.iter().min_by_key(|e| rank(e)) {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                out.insert(field, message);
            }
        }
        FieldErrors(out)
    }
}

/// Reject values containing `<` or `>`
pub fn no_angle_brackets(value: &str) -> Result<(), ValidationError> {
    if value.contains(['<', '>']) {
        return Err(ValidationError::new("no_angle_brackets"));
    }
    Ok(())
}

/// Validate a single field value in isolation, for inline feedback while typing
pub fn check_field(field: Field, value: &str) -> Result<(), String> {
    let mut scratch = UserInput {
        full_name: "x".to_string(),
        email: "x@example.com".to_string(),
        phone: "1".to_string(),
    };
    field.set(&mut scratch, value);
    match scratch.check() {
        Ok(()) => Ok(()),
        Err(errors) => match errors.get(field) {
            Some(message) => Err(message.to_string()),
            None => Ok(()),
        },
    }
}
