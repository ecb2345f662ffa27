//! Category display formatting

use tabled::Tabled;

use super::{or_dash, render_table, yes_no};
use crate::models::Category;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Active")]
    active: &'static str,
    #[tabled(rename = "Used")]
    usage: u32,
    #[tabled(rename = "ID")]
    id: String,
}

/// Format a list of categories
pub fn format_category_list(categories: &[Category]) -> String {
    let rows = categories
        .iter()
        .map(|c| CategoryRow {
            name: c.name.clone(),
            kind: c.category_type.to_string(),
            active: yes_no(c.is_active),
            usage: c.usage_count,
            id: c.id.clone(),
        })
        .collect();
    render_table(rows, "No categories found.")
}

/// Format category details
pub fn format_category_details(category: &Category) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:          {}\n", category.id));
    output.push_str(&format!("  Type:        {}\n", category.category_type));
    output.push_str(&format!(
        "  Description: {}\n",
        or_dash(category.description.as_deref())
    ));
    output.push_str(&format!("  Active:      {}\n", yes_no(category.is_active)));
    output.push_str(&format!("  Used by:     {} transaction(s)\n", category.usage_count));

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}",
        category.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    if let Some(by) = &category.created_by {
        output.push_str(&format!(" by {}", by));
    }
    output.push('\n');
    if let Some(updated) = category.updated_at {
        output.push_str(&format!(
            "  Modified: {}\n",
            updated.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    output
}
