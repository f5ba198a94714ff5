//! The three user forms and their typed payloads.
//!
//! A submitted form is flattened into a [`FormPayload`] and then resolved
//! into a [`UserForm`] before anything reaches the repository, so the
//! repository only ever sees well-shaped requests.

pub mod modal;
pub mod state;

use std::fmt;
use std::str::FromStr;

use strum::{Display, EnumIter};
use thiserror::Error;

use crate::constants::UNSUPPORTED_ACTION_MESSAGE;
use crate::models::user::{DRAFT_FIELDS, ID_FIELD};
use crate::models::{FieldValue, FormPayload, UserDraft, UserId};

pub use modal::{Location, Modal};
pub use state::{Form, FormFill, FormInput};

/// Errors raised while reading or resolving a form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("field '{0}' is required")]
    MissingField(String),

    #[error("field '{0}' was submitted more than once")]
    MultipleValues(String),

    #[error("form has no input named '{0}'")]
    UnknownField(String),

    #[error("input '{0}' is read-only")]
    ReadOnly(String),
}

/// An action tag that does not name one of the known forms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", UNSUPPORTED_ACTION_MESSAGE)]
pub struct UnsupportedAction {
    pub tag: String,
}

impl UnsupportedAction {
    /// Status code reported alongside the message.
    pub const CODE: u16 = 400;
}

/// Which form is being submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum FormAction {
    Create,
    Edit,
    Delete,
}

impl FormAction {
    /// Verb used in success messages.
    pub fn past_tense(self) -> &'static str {
        match self {
            FormAction::Create => "created",
            FormAction::Edit => "edited",
            FormAction::Delete => "deleted",
        }
    }
}

impl FromStr for FormAction {
    type Err = UnsupportedAction;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "create" => Ok(FormAction::Create),
            "edit" => Ok(FormAction::Edit),
            "delete" => Ok(FormAction::Delete),
            other => Err(UnsupportedAction {
                tag: other.to_string(),
            }),
        }
    }
}

/// Payload of the create form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePayload {
    pub draft: UserDraft,
}

/// Payload of the edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPayload {
    pub id: UserId,
    pub draft: UserDraft,
}

/// Payload of the delete form. Only the id is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePayload {
    pub id: UserId,
}

/// A form payload resolved to the shape its action needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserForm {
    Create(CreatePayload),
    Edit(EditPayload),
    Delete(DeletePayload),
}

impl UserForm {
    /// Resolve a flattened payload for the given action.
    ///
    /// Missing draft fields read as empty strings, the way an untouched
    /// input submits. Unknown fields are ignored.
    pub fn resolve(action: FormAction, payload: &FormPayload) -> Result<Self, FormError> {
        match action {
            FormAction::Create => Ok(UserForm::Create(CreatePayload {
                draft: draft_from(payload)?,
            })),
            FormAction::Edit => Ok(UserForm::Edit(EditPayload {
                id: id_from(payload)?,
                draft: draft_from(payload)?,
            })),
            FormAction::Delete => Ok(UserForm::Delete(DeletePayload {
                id: id_from(payload)?,
            })),
        }
    }

    pub fn action(&self) -> FormAction {
        match self {
            UserForm::Create(_) => FormAction::Create,
            UserForm::Edit(_) => FormAction::Edit,
            UserForm::Delete(_) => FormAction::Delete,
        }
    }

    /// Swap in the id of the record the form was populated from when the
    /// submitted id text still names it, so the server's id goes back
    /// exactly as it was fetched.
    pub fn bind_subject(mut self, subject: Option<&UserId>) -> Self {
        let Some(subject) = subject else {
            return self;
        };
        let id = match &mut self {
            UserForm::Create(_) => None,
            UserForm::Edit(p) => Some(&mut p.id),
            UserForm::Delete(p) => Some(&mut p.id),
        };
        if let Some(id) = id {
            if id.to_string() == subject.to_string() {
                *id = subject.clone();
            }
        }
        self
    }
}

impl fmt::Display for UserForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserForm::Create(_) => write!(f, "create user"),
            UserForm::Edit(p) => write!(f, "edit user #{}", p.id),
            UserForm::Delete(p) => write!(f, "delete user #{}", p.id),
        }
    }
}

fn scalar<'a>(payload: &'a FormPayload, name: &str) -> Result<Option<&'a str>, FormError> {
    match payload.get(name) {
        None => Ok(None),
        Some(FieldValue::Single(value)) => Ok(Some(value)),
        Some(FieldValue::Multiple(_)) => Err(FormError::MultipleValues(name.to_string())),
    }
}

fn id_from(payload: &FormPayload) -> Result<UserId, FormError> {
    match scalar(payload, ID_FIELD)? {
        Some(raw) if !raw.trim().is_empty() => Ok(UserId::from(raw)),
        _ => Err(FormError::MissingField(ID_FIELD.to_string())),
    }
}

fn draft_from(payload: &FormPayload) -> Result<UserDraft, FormError> {
    let mut draft = UserDraft::default();
    for name in DRAFT_FIELDS {
        if let Some(value) = scalar(payload, name)? {
            if let Some(slot) = draft.field_mut(name) {
                *slot = value.to_string();
            }
        }
    }
    Ok(draft)
}
