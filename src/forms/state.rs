//! Form state: the ordered inputs a form submits.

use tracing::warn;

use super::{FormAction, FormError};
use crate::models::User;
use crate::models::user::{DRAFT_FIELDS, ID_FIELD};
use crate::models::UserId;

/// One named input of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub value: String,
    /// Set while a delete prompt shows a record for confirmation.
    pub read_only: bool,
    /// Carried by the form but never typed into (the record id).
    pub hidden: bool,
}

impl FormInput {
    fn new(name: &str, hidden: bool) -> Self {
        Self {
            name: name.to_string(),
            value: String::new(),
            read_only: false,
            hidden,
        }
    }
}

/// Result of copying a fetched record into a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFill {
    /// Inputs that received a value.
    pub filled: Vec<String>,
    /// Record fields the form has no input for.
    pub unmatched: Vec<String>,
}

impl FormFill {
    pub fn is_complete(&self) -> bool {
        self.unmatched.is_empty()
    }
}

/// A create, edit or delete form.
#[derive(Debug, Clone)]
pub struct Form {
    action: FormAction,
    inputs: Vec<FormInput>,
    /// Id shown in the modal heading while a prompt is open.
    subject: Option<UserId>,
}

impl Form {
    /// Build the standard layout for an action.
    ///
    /// Create has the six editable inputs. Edit and delete add a hidden
    /// `id` input in front of them.
    pub fn new(action: FormAction) -> Self {
        let mut inputs = Vec::with_capacity(DRAFT_FIELDS.len() + 1);
        if action != FormAction::Create {
            inputs.push(FormInput::new(ID_FIELD, true));
        }
        inputs.extend(DRAFT_FIELDS.iter().map(|name| FormInput::new(name, false)));
        Self::with_inputs(action, inputs)
    }

    /// Build a form with an explicit input list.
    pub fn with_inputs(action: FormAction, inputs: Vec<FormInput>) -> Self {
        Self {
            action,
            inputs,
            subject: None,
        }
    }

    pub fn action(&self) -> FormAction {
        self.action
    }

    pub fn inputs(&self) -> &[FormInput] {
        &self.inputs
    }

    pub fn subject(&self) -> Option<&UserId> {
        self.subject.as_ref()
    }

    pub fn set_subject(&mut self, id: UserId) {
        self.subject = Some(id);
    }

    /// Current value of the first input with this name.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.inputs
            .iter()
            .find(|i| i.name == name)
            .map(|i| i.value.as_str())
    }

    /// Type a value into an input, as a user would.
    pub fn enter(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        let input = self
            .inputs
            .iter_mut()
            .find(|i| i.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        if input.read_only || input.hidden {
            return Err(FormError::ReadOnly(name.to_string()));
        }
        input.value = value.to_string();
        Ok(())
    }

    /// Copy every field of `user` into the matching input.
    ///
    /// A field with no matching input is recorded in
    /// [`FormFill::unmatched`] and the remaining fields are still copied.
    /// A delete form locks each populated input.
    pub fn populate(&mut self, user: &User) -> FormFill {
        let lock = self.action == FormAction::Delete;
        let mut fill = FormFill::default();

        for (name, value) in user.fields() {
            match self.inputs.iter_mut().find(|i| i.name == name) {
                Some(input) => {
                    input.value = value;
                    if lock {
                        input.read_only = true;
                    }
                    fill.filled.push(name.to_string());
                }
                None => fill.unmatched.push(name.to_string()),
            }
        }

        if !fill.is_complete() {
            warn!(
                form = %self.action,
                fields = ?fill.unmatched,
                "fetched record has fields with no matching form input"
            );
        }
        fill
    }

    /// The `(name, value)` sequence this form submits, in input order.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.inputs
            .iter()
            .map(|i| (i.name.clone(), i.value.clone()))
            .collect()
    }

    /// Clear every value, lock and heading.
    pub fn reset(&mut self) {
        for input in &mut self.inputs {
            input.value.clear();
            input.read_only = false;
        }
        self.subject = None;
    }
}
