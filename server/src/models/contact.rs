//! Contact records: the stored shape, the client-facing shape and input bodies.

use serde::Deserialize;
use serde_json::json;
use shape_engine::{Shape, Shaped};
use sqlx::Row;
use std::sync::OnceLock;

use crate::error::{AppError, Result};

/// Shortest accepted phone number.
const PHONE_MIN_LEN: usize = 3;

/// Longest accepted phone number.
const PHONE_MAX_LEN: usize = 15;

/// A contact as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: String,
    pub email: Option<String>,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for Contact {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(Contact {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            phone: row.try_get("phone")?,
            email: row.try_get("email")?,
        })
    }
}

impl Shaped for Contact {
    fn shape() -> &'static Shape<Self> {
        static SHAPE: OnceLock<Shape<Contact>> = OnceLock::new();
        SHAPE.get_or_init(|| {
            Shape::<Contact>::new("Contact")
                .field("Id", |c| json!(c.id))
                .field("FirstName", |c| json!(c.first_name))
                .field("LastName", |c| json!(c.last_name))
                .field("Phone", |c| json!(c.phone))
                .field("Email", |c| json!(c.email))
        })
    }
}

impl Contact {
    /// Display name: first and last name separated by a space.
    pub fn full_name(&self) -> String {
        match self.last_name.as_deref().map(str::trim) {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }
}

/// A contact as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDto {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

impl From<&Contact> for ContactDto {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.full_name(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
        }
    }
}

impl From<Contact> for ContactDto {
    fn from(contact: Contact) -> Self {
        Self::from(&contact)
    }
}

impl Shaped for ContactDto {
    fn shape() -> &'static Shape<Self> {
        static SHAPE: OnceLock<Shape<ContactDto>> = OnceLock::new();
        SHAPE.get_or_init(|| {
            Shape::<ContactDto>::new("ContactDto")
                .field("Id", |c| json!(c.id))
                .field("Name", |c| json!(c.name))
                .field("Phone", |c| json!(c.phone))
                .field("Email", |c| json!(c.email))
        })
    }
}

/// Request body for creating or replacing a contact.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl ContactInput {
    /// Check the body and normalize whitespace.
    pub fn validate(self) -> Result<Self> {
        let first_name = self.first_name.trim().to_string();
        if first_name.is_empty() {
            return Err(AppError::Validation("firstName is required".to_string()));
        }

        let phone = self.phone.trim().to_string();
        let phone_len = phone.chars().count();
        if !(PHONE_MIN_LEN..=PHONE_MAX_LEN).contains(&phone_len) {
            return Err(AppError::Validation(format!(
                "phone must be between {} and {} characters",
                PHONE_MIN_LEN, PHONE_MAX_LEN
            )));
        }

        Ok(Self {
            first_name,
            last_name: optional_trimmed(self.last_name),
            phone,
            email: optional_trimmed(self.email),
        })
    }
}

fn optional_trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
