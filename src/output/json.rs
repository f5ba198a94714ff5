//! JSON output renderer.
//!
//! Lists print as `{"all": [...], "total": n}`, records as the bare object.

use crate::models::User;
use crate::output::ListRenderer;

/// JSON output renderer.
pub struct JsonRenderer;

impl ListRenderer for JsonRenderer {
    fn render(&self, users: &[User]) -> String {
        let output = serde_json::json!({
            "all": users,
            "total": users.len(),
        });

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn render_one(&self, user: &User) -> String {
        serde_json::to_string_pretty(user).unwrap_or_else(|_| "{}".to_string())
    }
}
