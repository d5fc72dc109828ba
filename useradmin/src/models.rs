//! Data models for the users API

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use validator::Validate;

use crate::error::{Error, Result};
use crate::ids::UserId;
use crate::validation::{no_angle_brackets, FieldErrors};

/// User record as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "UserRecord", rename_all = "camelCase")]
pub struct User {
    pub id: Option<UserId>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: Option<CreatedAt>,
}

impl User {
    /// Identifier, or an error for records the server sent without one
    pub fn require_id(&self) -> Result<UserId> {
        self.id.ok_or(Error::MissingIdentifier)
    }

    /// Name shown in prompts and notifications
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.email
        } else {
            &self.full_name
        }
    }

    /// Form input pre-filled from this record
    pub fn to_input(&self) -> UserInput {
        UserInput::new(&self.full_name, &self.email, &self.phone)
    }
}

/// Wire shape of a user record
///
/// `uuid` wins over the legacy `id` when both are present. `fullName` and
/// `email` are required so that unrelated objects are not read as blank users.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    #[serde(default)]
    uuid: Option<UserId>,
    #[serde(default)]
    id: Option<UserId>,
    full_name: String,
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    created_at: Option<CreatedAt>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.uuid.or(record.id),
            full_name: record.full_name,
            email: record.email,
            phone: record.phone,
            created_at: record.created_at,
        }
    }
}

/// Creation timestamp in whichever shape the server chose to send it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreatedAt {
    DateTime(DateTime<FixedOffset>),
    Local(NaiveDateTime),
    Date(NaiveDate),
    Unparsed(String),
}

impl CreatedAt {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::parse(text),
            Value::Array(parts) => Self::from_parts(parts)
                .unwrap_or_else(|| CreatedAt::Unparsed(value.to_string())),
            other => CreatedAt::Unparsed(other.to_string()),
        }
    }

    fn parse(text: &str) -> Self {
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return CreatedAt::DateTime(dt);
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
            return CreatedAt::Local(dt);
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return CreatedAt::Date(date);
        }
        CreatedAt::Unparsed(text.to_string())
    }

    // [year, month, day, hour?, minute?, second?]
    fn from_parts(parts: &[Value]) -> Option<Self> {
        let nums: Vec<i64> = parts.iter().map(Value::as_i64).collect::<Option<_>>()?;
        let (year, month, day) = match nums.as_slice() {
            [y, m, d, ..] => (*y, *m, *d),
            _ => return None,
        };
        let date = NaiveDate::from_ymd_opt(
            i32::try_from(year).ok()?,
            u32::try_from(month).ok()?,
            u32::try_from(day).ok()?,
        )?;
        if nums.len() == 3 {
            return Some(CreatedAt::Date(date));
        }
        let time = |i: usize| nums.get(i).copied().unwrap_or(0);
        let dt = date.and_hms_opt(
            u32::try_from(time(3)).ok()?,
            u32::try_from(time(4)).ok()?,
            u32::try_from(time(5)).ok()?,
        )?;
        Some(CreatedAt::Local(dt))
    }
}

impl fmt::Display for CreatedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreatedAt::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
            CreatedAt::Local(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
            CreatedAt::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            CreatedAt::Unparsed(raw) => f.write_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for CreatedAt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(CreatedAt::from_value(&value))
    }
}

impl Serialize for CreatedAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CreatedAt::DateTime(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            CreatedAt::Local(dt) => {
                serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S").to_string())
            }
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

/// Request body for create and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    #[validate(
        length(min = 1, code = "required", message = "Full name is required"),
        custom(
            function = "no_angle_brackets",
            message = "The characters < and > are not allowed"
        )
    )]
    pub full_name: String,

    #[validate(
        length(min = 1, code = "required", message = "Email is required"),
        email(message = "Enter a valid email address"),
        custom(
            function = "no_angle_brackets",
            message = "The characters < and > are not allowed"
        )
    )]
    pub email: String,

    #[validate(
        length(min = 1, code = "required", message = "Phone is required"),
        custom(
            function = "no_angle_brackets",
            message = "The characters < and > are not allowed"
        )
    )]
    pub phone: String,
}

impl UserInput {
    /// Build an input with every field trimmed
    pub fn new(
        full_name: impl AsRef<str>,
        email: impl AsRef<str>,
        phone: impl AsRef<str>,
    ) -> Self {
        Self {
            full_name: full_name.as_ref().trim().to_string(),
            email: email.as_ref().trim().to_string(),
            phone: phone.as_ref().trim().to_string(),
        }
    }

    /// Copy of this input with surrounding whitespace removed
    pub fn trimmed(&self) -> Self {
        Self::new(&self.full_name, &self.email, &self.phone)
    }

    /// Run the shared form schema, reporting one message per failing field
    pub fn check(&self) -> std::result::Result<(), FieldErrors> {
        self.trimmed().validate().map_err(FieldErrors::from)
    }
}

/// Body of the list endpoint: a bare array or a `{data: [...]}` envelope
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListPayload {
    Bare(Vec<User>),
    Envelope { data: Vec<User> },
}

impl ListPayload {
    pub fn into_users(self) -> Vec<User> {
        match self {
            ListPayload::Bare(users) | ListPayload::Envelope { data: users } => users,
        }
    }
}

/// Outcome of a create or update call
///
/// The server may answer with the record itself, an envelope around it, a
/// message-only envelope, or nothing at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedUser {
    pub user: Option<User>,
    pub message: Option<String>,
}

impl SavedUser {
    /// Interpret a 2xx response body
    pub fn from_body(body: &str) -> Self {
        if body.trim().is_empty() {
            return Self::default();
        }

        let value: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(_) => {
                return Self {
                    user: None,
                    message: Some(body.trim().to_string()),
                }
            }
        };

        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);

        let record = ["data", "user"]
            .iter()
            .find_map(|key| value.get(key).filter(|v| v.is_object()))
            .or_else(|| value.get("fullName").map(|_| &value));

        let user = record.and_then(|record| match User::deserialize(record) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Ignoring malformed user record in response: {}", e);
                None
            }
        });

        Self { user, message }
    }
}

/// Display strings for one table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRow {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            created_at: user
                .created_at
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }
}
