//! User records as exchanged with the directory API.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned identity of a user. The API may use numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(u64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{n}"),
            UserId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for UserId {
    /// Form inputs are text. Only the canonical decimal form of a number
    /// reads back as a number; anything else is kept verbatim.
    fn from(raw: &str) -> Self {
        match raw.parse::<u64>() {
            Ok(n) if n.to_string() == raw => UserId::Number(n),
            _ => UserId::Text(raw.to_string()),
        }
    }
}

impl From<u64> for UserId {
    fn from(n: u64) -> Self {
        UserId::Number(n)
    }
}

/// Names of the editable fields, in form order.
pub const DRAFT_FIELDS: [&str; 6] = ["fName", "lName", "phone", "street", "city", "zip"];

/// Name of the identity field.
pub const ID_FIELD: &str = "id";

/// A full user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(rename = "fName", default)]
    pub first_name: String,
    #[serde(rename = "lName", default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip: String,
}

impl User {
    /// Combine a server id with the editable fields.
    pub fn from_draft(id: UserId, draft: UserDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            phone: draft.phone,
            street: draft.street,
            city: draft.city,
            zip: draft.zip,
        }
    }

    /// `(field name, value)` pairs, `id` first, using the wire names.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![(ID_FIELD, self.id.to_string())];
        fields.extend(self.draft().fields());
        fields
    }

    /// The editable part of this record.
    pub fn draft(&self) -> UserDraft {
        UserDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            street: self.street.clone(),
            city: self.city.clone(),
            zip: self.zip.clone(),
        }
    }

    /// "First Last", trimmed when either part is empty.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// The editable fields sent on create and edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    #[serde(rename = "fName", default)]
    pub first_name: String,
    #[serde(rename = "lName", default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip: String,
}

impl UserDraft {
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("fName", self.first_name.clone()),
            ("lName", self.last_name.clone()),
            ("phone", self.phone.clone()),
            ("street", self.street.clone()),
            ("city", self.city.clone()),
            ("zip", self.zip.clone()),
        ]
    }

    /// Mutable slot for a wire field name, if it is one of [`DRAFT_FIELDS`].
    pub fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "fName" => Some(&mut self.first_name),
            "lName" => Some(&mut self.last_name),
            "phone" => Some(&mut self.phone),
            "street" => Some(&mut self.street),
            "city" => Some(&mut self.city),
            "zip" => Some(&mut self.zip),
            _ => None,
        }
    }
}

/// Response of the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserList {
    /// A missing or non-array `all` reads as an empty list.
    #[serde(default, deserialize_with = "lenient_users")]
    pub all: Vec<User>,
}

fn lenient_users<'de, D>(deserializer: D) -> Result<Vec<User>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(serde::de::Error::custom))
            .collect(),
        _ => Ok(Vec::new()),
    }
}
