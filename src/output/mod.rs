//! Output renderers for the user list and single records: terminal table, JSON.

pub mod json;
pub mod table;

use crate::models::{OutputFormat, User};

/// Trait for rendering users to an output format.
pub trait ListRenderer {
    /// Render the whole list.
    fn render(&self, users: &[User]) -> String;

    /// Render one record.
    fn render_one(&self, user: &User) -> String;
}

impl OutputFormat {
    pub fn renderer(self) -> Box<dyn ListRenderer> {
        match self {
            OutputFormat::Terminal => Box::new(table::TableRenderer),
            OutputFormat::Json => Box::new(json::JsonRenderer),
        }
    }
}
