use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub type ContactId = Uuid;

/// A persisted contact. `owner` is assigned by the server at creation and
/// never rewritten afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub owner: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// JSON body accepted by `POST /contacts` and `PUT /contacts/:id`.
///
/// Any other key (including `owner` or `user`) is ignored. Numbers and
/// booleans are accepted and kept in their JSON text form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactInput {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub phone: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "scalar_as_string")]
    pub kind: Option<String>,
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(de::Error::custom("expected a string")),
    }
}

/// Fields of a contact about to be created. The owner is passed separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub kind: Option<String>,
}

/// Fields to merge into an existing contact. `None` leaves the stored value
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub kind: Option<String>,
}

impl ContactPatch {
    /// Builds a patch from a request body. Empty strings count as "not
    /// supplied", so a field can't be cleared through an update.
    pub fn from_input(input: ContactInput) -> Self {
        Self {
            name: supplied(input.name),
            email: supplied(input.email),
            phone: supplied(input.phone),
            kind: supplied(input.kind),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.kind.is_none()
    }

    pub fn apply_to(&self, contact: &mut Contact) {
        if let Some(name) = &self.name {
            contact.name = name.clone();
        }
        if let Some(email) = &self.email {
            contact.email = Some(email.clone());
        }
        if let Some(phone) = &self.phone {
            contact.phone = Some(phone.clone());
        }
        if let Some(kind) = &self.kind {
            contact.kind = Some(kind.clone());
        }
    }
}

fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
