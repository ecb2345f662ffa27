//! Display formatting for terminal output
//!
//! Lists of entities render as `tabled` tables; single entities render as
//! labelled detail blocks.

pub mod admin;
pub mod category;
pub mod journal;
pub mod transaction;

use tabled::settings::Style;
use tabled::{Table, Tabled};

pub use admin::{
    format_contact_details, format_contact_list, format_currency_list, format_tax_rate_list,
    format_template_details, format_template_list, format_warehouse_details,
    format_warehouse_list,
};
pub use category::{format_category_details, format_category_list};
pub use journal::{format_journal_entry_details, format_journal_page, format_journal_summary};
pub use transaction::{
    format_cashbook_save, format_health_status, format_import_preview, format_import_result,
    format_profile, format_recent_transactions, format_transaction_save,
};

/// Render rows as a table, or `empty_message` when there are none
pub(crate) fn render_table<T: Tabled>(rows: Vec<T>, empty_message: &str) -> String {
    if rows.is_empty() {
        return empty_message.to_string();
    }
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

pub(crate) fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

pub(crate) fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}
