use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The four inputs of the sign-up form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Username,
    Phone,
    Email,
    Password,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Password => "password",
        }
    }

    pub fn all() -> [Field; 4] {
        [Field::Username, Field::Phone, Field::Email, Field::Password]
    }
}

/// Current values of the sign-up inputs, updated on every keystroke
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pub username: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

impl FormData {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::Password => &self.password,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Username => self.username = value,
            Field::Phone => self.phone = value,
            Field::Email => self.email = value,
            Field::Password => self.password = value,
        }
    }

    /// Body posted to the registration endpoints.
    pub fn to_request(&self) -> RegistrationRequest {
        RegistrationRequest {
            username: self.username.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// Per-field validation messages. A missing entry means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap(BTreeMap<Field, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Returns the message for `field`, treating an empty message as no error.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0
            .get(&field)
            .map(String::as_str)
            .filter(|m| !m.is_empty())
    }

    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(String::is_empty)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0
            .iter()
            .filter(|(_, m)| !m.is_empty())
            .map(|(f, _)| *f)
    }
}

/// JSON payload of `POST /api/users/register` and `POST /api/users`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub username: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

/// Identity assigned by the backend on success. Only kept for logging.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisteredUser {
    #[serde(default, alias = "_id", deserialize_with = "id_as_string")]
    pub id: Option<String>,
}

fn id_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Error payload the backend may attach to a non-success response.
/// Non-string values (`"error": true`) are ignored field by field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(default, deserialize_with = "text_only")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "text_only")]
    pub error: Option<String>,
}

fn text_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}
