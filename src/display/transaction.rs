//! Display formatting for cash book transactions, imports and session info

use tabled::Tabled;

use super::{or_dash, render_table};
use crate::models::{CashBookSaveResponse, SavedTransaction, TransactionSaveResponse, UserInfo};
use crate::reports::trial_balance::clip;
use crate::services::{HealthStatus, ImportPreview, ImportResult};

#[derive(Tabled)]
struct RecentRow {
    #[tabled(rename = "Date")]
    date: String,
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

pub fn format_recent_transactions(transactions: &[SavedTransaction]) -> String {
    let rows = transactions
        .iter()
        .map(|t| RecentRow {
            date: t.date.format("%Y-%m-%d").to_string(),
            kind: t.entry_type.to_string(),
            category: t.category_name.clone(),
            particulars: clip(&t.particulars, 30),
            amount: t.amount.format_grouped(),
            reference: t.reference_number.clone(),
        })
        .collect();
    render_table(rows, "No recent transactions.")
}

pub fn format_transaction_save(response: &TransactionSaveResponse) -> String {
    if !response.success {
        return format!("Transaction was not saved: {}", response.message);
    }
    let mut output = String::from("Transaction saved.");
    if let Some(id) = &response.transaction_id {
        output.push_str(&format!("\n  Transaction ID:   {}", id));
    }
    if let Some(id) = &response.journal_entry_id {
        output.push_str(&format!("\n  Journal entry ID: {}", id));
    }
    output
}

pub fn format_cashbook_save(response: &CashBookSaveResponse) -> String {
    if !response.success {
        return format!("Cash book entry was not saved: {}", response.message);
    }
    let mut output = String::from("Cash book entry saved.");
    if let Some(id) = &response.journal_entry_id {
        output.push_str(&format!("\n  Journal entry ID: {}", id));
    }
    if let Some(n) = response.transactions_processed {
        output.push_str(&format!("\n  Transactions:     {}", n));
    }
    if let Some(n) = response.accounts_created.filter(|n| *n > 0) {
        output.push_str(&format!("\n  New accounts:     {}", n));
    }
    if let Some(n) = response.contacts_created.filter(|n| *n > 0) {
        output.push_str(&format!("\n  New contacts:     {}", n));
    }
    output
}

#[derive(Tabled)]
struct PreviewRow {
    #[tabled(rename = "Line")]
    line: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Reference")]
    reference: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Credit")]
    credit: String,
    #[tabled(rename = "Debit")]
    debit: String,
}

pub fn format_import_preview(preview: &ImportPreview) -> String {
    let rows = preview
        .rows
        .iter()
        .map(|r| PreviewRow {
            line: r.line,
            date: r.entry.transaction_date.format("%Y-%m-%d").to_string(),
            reference: r.entry.reference_number.clone(),
            description: clip(&r.entry.description, 40),
            credit: r.entry.total_credits().format_grouped(),
            debit: r.entry.total_debits().format_grouped(),
        })
        .collect();

    let mut output = render_table(rows, "No importable rows found.");
    output.push('\n');
    output.push_str(&format!(
        "{} entr(ies) ready  |  Credits: {}  |  Debits: {}  |  Skipped: {}\n",
        preview.rows.len(),
        preview.total_credits().format_grouped(),
        preview.total_debits().format_grouped(),
        preview.skipped
    ));

    if !preview.errors.is_empty() {
        output.push_str(&format!("\n{} row(s) could not be read:\n", preview.errors.len()));
        for (line, message) in &preview.errors {
            output.push_str(&format!("  line {}: {}\n", line, message));
        }
    }

    output
}

pub fn format_import_result(result: &ImportResult) -> String {
    let mut output = format!(
        "Imported {} entr(ies), {} failed.\n",
        result.imported, result.failed
    );
    for (line, message) in &result.error_messages {
        output.push_str(&format!("  line {}: {}\n", line, message));
    }
    output
}

pub fn format_health_status(status: &HealthStatus) -> String {
    if status.is_healthy {
        let mut output = String::from("API is healthy");
        if let Some(ms) = status.response_time_ms {
            output.push_str(&format!(" ({} ms)", ms));
        }
        if status.retry_count > 0 {
            output.push_str(&format!(" after {} retr(ies)", status.retry_count));
        }
        output
    } else {
        format!(
            "API is unreachable after {} attempt(s): {}",
            status.retry_count,
            status.error.as_deref().unwrap_or("unknown error")
        )
    }
}

pub fn format_profile(user: &UserInfo) -> String {
    let mut output = String::new();

    output.push_str(&format!("User: {}\n", user.username));
    output.push_str(&format!("  ID:      {}\n", user.id));
    output.push_str(&format!("  Name:    {}\n", or_dash(Some(&user.full_name))));
    output.push_str(&format!("  Email:   {}\n", or_dash(Some(&user.email))));
    output.push_str(&format!("  Phone:   {}\n", or_dash(Some(&user.contact_number))));
    output.push_str(&format!(
        "  Roles:   {}\n",
        if user.roles.is_empty() {
            "-".to_string()
        } else {
            user.roles.join(", ")
        }
    ));
    output.push_str(&format!(
        "  Active:  {}\n",
        super::yes_no(user.is_active)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::import::parse_cash_book;

    #[test]
    fn test_save_messages() {
        let ok = TransactionSaveResponse {
            success: true,
            message: String::new(),
            transaction_id: Some("t-9".into()),
            journal_entry_id: None,
        };
        assert_eq!(format_transaction_save(&ok), "Transaction saved.\n  Transaction ID:   t-9");

        let failed = TransactionSaveResponse::failed("Network error: refused");
        assert_eq!(
            format_transaction_save(&failed),
            "Transaction was not saved: Network error: refused"
        );
        assert_eq!(
            format_cashbook_save(&CashBookSaveResponse::failed("boom")),
            "Cash book entry was not saved: boom"
        );
    }

    #[test]
    fn test_import_preview_lists_errors() {
        let sheet = "\
Cash Book,,,,,,,,,
Date,Catagories,Particulars,Amount,Date,Catagories,Supplier,Buyer,Particulars,Amount
01-02-2025,Loan A/C Chairman,,\"1,000\",,,,,,
02-02-2025,Sales,,abc,,,,,,
";
        let preview = parse_cash_book(sheet.as_bytes()).unwrap();
        let text = format_import_preview(&preview);

        assert!(text.contains("Loan A/C Chairman"));
        assert!(text.contains("1 entr(ies) ready  |  Credits: 1,000.00"));
        assert!(text.contains("line 4: Invalid amount 'abc'"));
    }

    #[test]
    fn test_health_lines() {
        let healthy = HealthStatus {
            is_healthy: true,
            response_time_ms: Some(42),
            retry_count: 1,
            error: None,
        };
        assert_eq!(format_health_status(&healthy), "API is healthy (42 ms) after 1 retr(ies)");

        let down = HealthStatus {
            is_healthy: false,
            response_time_ms: None,
            retry_count: 3,
            error: Some("Network error: refused".into()),
        };
        assert_eq!(
            format_health_status(&down),
            "API is unreachable after 3 attempt(s): Network error: refused"
        );
    }
}
