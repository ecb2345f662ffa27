//! Journal entry display formatting

use tabled::Tabled;

use super::{or_dash, render_table};
use crate::models::{JournalEntry, JournalEntryPage, SummaryInfo};
use crate::reports::trial_balance::clip;

#[derive(Tabled)]
struct JournalRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Journal No")]
    number: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Particulars")]
    particulars: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Reference")]
    reference: String,
}

/// Format one page of journal entries with its paging line and totals
pub fn format_journal_page(page: &JournalEntryPage) -> String {
    let rows: Vec<JournalRow> = page
        .entries
        .iter()
        .map(|e| JournalRow {
            date: e.transaction_date.format("%Y-%m-%d").to_string(),
            number: e.journal_number.clone(),
            kind: e.entry_type.to_string(),
            category: e.category_name.clone(),
            particulars: clip(&e.particulars, 30),
            amount: e.amount.format_grouped(),
            reference: e.reference_number.clone(),
        })
        .collect();

    let mut output = render_table(rows, "No journal entries found.");
    output.push('\n');

    let pagination = &page.pagination;
    if pagination.total_pages > 0 {
        output.push_str(&format!(
            "Page {} of {} ({} entries)\n",
            pagination.current_page, pagination.total_pages, pagination.total_entries
        ));
    }
    output.push_str(&format_journal_summary(&page.summary));

    output
}

/// Totals line shared by listings and `journal stats`
pub fn format_journal_summary(summary: &SummaryInfo) -> String {
    format!(
        "Entries: {}  |  Debits: {}  |  Credits: {}  |  Balance: {}\n",
        summary.total_entries,
        summary.total_debits.format_grouped(),
        summary.total_credits.format_grouped(),
        summary.balance.format_grouped()
    )
}

pub fn format_journal_entry_details(entry: &JournalEntry) -> String {
    let mut output = String::new();

    output.push_str(&format!("Journal Entry: {}\n", or_dash(Some(&entry.journal_number))));
    output.push_str(&format!("  ID:          {}\n", entry.id));
    output.push_str(&format!(
        "  Date:        {}\n",
        entry.transaction_date.format("%Y-%m-%d")
    ));
    output.push_str(&format!("  Type:        {}\n", entry.entry_type));
    output.push_str(&format!("  Amount:      {}\n", entry.amount.format_grouped()));
    output.push_str(&format!("  Account:     {}\n", or_dash(Some(&entry.account_name))));
    output.push_str(&format!("  Category:    {}\n", or_dash(Some(&entry.category_name))));
    output.push_str(&format!("  Particulars: {}\n", or_dash(Some(&entry.particulars))));
    output.push_str(&format!("  Reference:   {}\n", or_dash(Some(&entry.reference_number))));
    output.push_str(&format!("  Contact:     {}\n", or_dash(entry.contact_name.as_deref())));
    output.push_str(&format!("  Status:      {}\n", or_dash(entry.status.as_deref())));
    output.push_str(&format!(
        "  Created:     {}\n",
        entry.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}
