use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use useradmin::models::UserRow;

const HEADERS: [&str; 5] = ["ID", "Full name", "Email", "Phone", "Created"];

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// User table, or `empty` when there are no rows
pub fn render_users(rows: &[UserRow], empty: &str) -> String {
    if rows.is_empty() {
        return empty.to_string();
    }

    let mut table = base_table();
    table.set_header(
        HEADERS
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
    );

    for row in rows {
        table.add_row(vec![
            row.id.as_str(),
            row.full_name.as_str(),
            row.email.as_str(),
            row.phone.as_str(),
            row.created_at.as_str(),
        ]);
    }

    table.to_string()
}

/// Two-column view of a single user
pub fn render_user(row: &UserRow) -> String {
    let mut table = base_table();
    let values = [
        &row.id,
        &row.full_name,
        &row.email,
        &row.phone,
        &row.created_at,
    ];
    for (header, value) in HEADERS.iter().zip(values) {
        table.add_row(vec![
            Cell::new(header).add_attribute(Attribute::Bold),
            Cell::new(value),
        ]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, name: &str) -> UserRow {
        UserRow {
            id: id.to_string(),
            full_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555".to_string(),
            created_at: "2025-01-31".to_string(),
        }
    }

    #[test]
    fn test_empty_rows_render_empty_state() {
        assert_eq!(render_users(&[], "No records"), "No records");
    }

    #[test]
    fn test_rows_render_every_column() {
        let out = render_users(&[row("1", "Ada"), row("2", "Bob")], "No records");
        for needle in ["Full name", "Ada", "bob@example.com", "2025-01-31"] {
            assert!(out.contains(needle), "missing {needle} in\n{out}");
        }
        assert!(!out.contains("No records"));
    }

    #[test]
    fn test_single_user_is_vertical() {
        let out = render_user(&row("7", "Grace"));
        assert!(out.contains("Email"));
        assert!(out.contains("grace@example.com"));
    }
}
