//! Modal visibility, driven by a location fragment.
//!
//! Opening a modal sets the fragment to its id, closing sets it empty.

use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};

use super::FormAction;

/// The three form modals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumString, EnumIter)]
pub enum Modal {
    #[strum(serialize = "m_create_user")]
    CreateUser,
    #[strum(serialize = "m_edit_user")]
    EditUser,
    #[strum(serialize = "m_delete_user")]
    DeleteUser,
}

impl Modal {
    /// Modal hosting the form for `action`.
    pub fn for_action(action: FormAction) -> Self {
        match action {
            FormAction::Create => Modal::CreateUser,
            FormAction::Edit => Modal::EditUser,
            FormAction::Delete => Modal::DeleteUser,
        }
    }

    /// Fragment id of this modal.
    pub fn id(self) -> &'static str {
        match self {
            Modal::CreateUser => "m_create_user",
            Modal::EditUser => "m_edit_user",
            Modal::DeleteUser => "m_delete_user",
        }
    }
}

/// Current location fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    fragment: String,
}

impl Location {
    pub fn open(&mut self, modal: Modal) {
        self.fragment = modal.id().to_string();
    }

    /// Close whichever modal is open.
    pub fn close(&mut self) {
        self.fragment.clear();
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// The modal named by the fragment, if any.
    pub fn open_modal(&self) -> Option<Modal> {
        Modal::iter().find(|m| m.id() == self.fragment)
    }
}
