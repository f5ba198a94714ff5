//! Terminal renderer: an aligned table, one row per user.

use colored::Colorize;

use crate::constants::NO_USERS_MESSAGE;
use crate::models::User;
use crate::output::ListRenderer;

const HEADERS: [&str; 7] = ["ID", "First name", "Last name", "Phone", "Street", "City", "Zip"];

/// Terminal table renderer.
pub struct TableRenderer;

fn row(user: &User) -> [String; 7] {
    [
        user.id.to_string(),
        user.first_name.clone(),
        user.last_name.clone(),
        user.phone.clone(),
        user.street.clone(),
        user.city.clone(),
        user.zip.clone(),
    ]
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{cell}{}", " ".repeat(width.saturating_sub(len)))
}

impl ListRenderer for TableRenderer {
    fn render(&self, users: &[User]) -> String {
        if users.is_empty() {
            return format!("  {}\n", NO_USERS_MESSAGE.dimmed());
        }

        let rows: Vec<[String; 7]> = users.iter().map(row).collect();
        let mut widths = HEADERS.map(|h| h.chars().count());
        for cells in &rows {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut output = String::new();
        let header: Vec<String> = HEADERS
            .iter()
            .zip(widths)
            .map(|(h, w)| pad(h, w).bold().to_string())
            .collect();
        output.push_str(&format!("  {}\n", header.join("  ").trim_end()));

        for cells in &rows {
            let line: Vec<String> = cells.iter().zip(widths).map(|(c, w)| pad(c, w)).collect();
            output.push_str(&format!("  {}\n", line.join("  ").trim_end()));
        }

        output.push_str(&format!(
            "{}\n {} {}\n",
            "───────────────────────────────────".dimmed(),
            users.len().to_string().bold(),
            if users.len() == 1 { "user" } else { "users" },
        ));
        output
    }

    fn render_one(&self, user: &User) -> String {
        let mut output = format!(" {} {}\n", format!("#{}", user.id).bold(), user.full_name().bold());
        for (name, value) in user.fields().into_iter().skip(1) {
            output.push_str(&format!("   {} {}\n", format!("{name}:").cyan(), value));
        }
        output
    }
}
