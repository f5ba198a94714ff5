//! Flattened form payloads.
//!
//! A submitted form is a sequence of `(name, value)` pairs in input order.
//! Flattening turns it into one map: a name seen once keeps a single
//! value, a name seen again becomes an ordered list of every value.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The value(s) collected for one field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// The name occurred exactly once.
    Single(String),
    /// The name occurred two or more times; values in encounter order.
    Multiple(Vec<String>),
}

impl FieldValue {
    /// The scalar value, if the field was not repeated.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            FieldValue::Single(value) => Some(value),
            FieldValue::Multiple(_) => None,
        }
    }

    /// All values in encounter order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            FieldValue::Single(value) => vec![value.as_str()],
            FieldValue::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            FieldValue::Single(first) => {
                let first = std::mem::take(first);
                *self = FieldValue::Multiple(vec![first, value]);
            }
            FieldValue::Multiple(values) => values.push(value),
        }
    }
}

/// Field name → value(s), ordered by first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormPayload {
    fields: IndexMap<String, FieldValue>,
}

impl FormPayload {
    /// Flatten an ordered sequence of `(name, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields: IndexMap<String, FieldValue> = IndexMap::new();
        for (name, value) in pairs {
            let value = value.into();
            match fields.entry(name.into()) {
                indexmap::map::Entry::Occupied(mut slot) => slot.get_mut().push(value),
                indexmap::map::Entry::Vacant(slot) => {
                    slot.insert(FieldValue::Single(value));
                }
            }
        }
        Self { fields }
    }

    /// Expand back into a pair sequence, repeated fields in value order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .flat_map(|(name, value)| {
                value
                    .values()
                    .into_iter()
                    .map(move |v| (name.clone(), v.to_string()))
            })
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Shorthand for a field that must be scalar.
    pub fn single(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_single)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Flatten form pairs into a [`FormPayload`].
pub fn flatten<I, K, V>(pairs: I) -> FormPayload
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    FormPayload::from_pairs(pairs)
}
