//! CSV export functionality
//!
//! Reports are written line by line. Every field is quoted so the company and
//! section rows line up with the eight data columns in a spreadsheet.

use std::io::Write;

use chrono::{DateTime, Utc};

use super::{export_err, ExportOptions, ReportHeader};
use crate::error::LedgerResult;
use crate::models::{AccountTransactions, DateRange, TrialBalanceData};

const GENERATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Export a trial balance grouped by category
///
/// Zero-balance accounts are left out unless asked for, but category
/// subtotals are printed as the server computed them.
pub fn write_trial_balance_csv<W: Write>(
    data: &TrialBalanceData,
    header: &ReportHeader,
    options: ExportOptions,
    writer: &mut W,
) -> LedgerResult<()> {
    writeln!(writer, "{}", quote(&header.company_name)).map_err(export_err)?;
    writeln!(writer, "\"Trial Balance Report\"").map_err(export_err)?;
    writeln!(writer, "{}", quote(&format!("Period: {}", data.date_range))).map_err(export_err)?;
    writeln!(
        writer,
        "{}",
        quote(&format!("Generated: {}", data.generated_at.format(GENERATED_FORMAT)))
    )
    .map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    writeln!(
        writer,
        "\"Account Name\",\"Category\",\"Category Description\",\"Particulars\",\"Debit Amount\",\"Credit Amount\",\"Net Balance\",\"Transaction Count\""
    )
    .map_err(export_err)?;

    for category in &data.categories {
        let name = category.name.as_str();
        write_row(writer, &[&format!("=== {} ===", name), "", "", "", "", "", "", ""])?;

        for account in category.visible_accounts(options.include_zero_balances) {
            write_row(
                writer,
                &[
                    &account.account_name,
                    name,
                    &account.category_description,
                    &account.particulars,
                    &account.debit_amount.to_string(),
                    &account.credit_amount.to_string(),
                    &account.net_balance.to_string(),
                    &account.transaction_count.to_string(),
                ],
            )?;
        }

        write_row(
            writer,
            &[
                &format!("{} Subtotal", name),
                name,
                "",
                "",
                "",
                "",
                &category.subtotal.to_string(),
                "",
            ],
        )?;
        writeln!(writer).map_err(export_err)?;
    }

    write_row(writer, &["=== TOTALS ===", "", "", "", "", "", "", ""])?;
    write_row(
        writer,
        &["Total Debits", "", "", "", &data.total_debits.to_string(), "", "", ""],
    )?;
    write_row(
        writer,
        &["Total Credits", "", "", "", "", &data.total_credits.to_string(), "", ""],
    )?;
    write_row(
        writer,
        &["Final Balance", "", "", "", "", "", &data.final_balance.to_string(), ""],
    )?;

    if options.include_calculation_details {
        writeln!(writer).map_err(export_err)?;
        write_row(writer, &["=== CALCULATION DETAILS ===", "", "", "", "", "", "", ""])?;
        write_row(
            writer,
            &["Calculation Expression", &data.calculation_expression, "", "", "", "", "", ""],
        )?;
        write_row(
            writer,
            &["Total Transactions", &data.total_transactions.to_string(), "", "", "", "", "", ""],
        )?;
    }

    Ok(())
}

/// Export the transactions behind one account
pub fn write_account_transactions_csv<W: Write>(
    account: &AccountTransactions,
    range: &DateRange,
    header: &ReportHeader,
    generated_at: DateTime<Utc>,
    writer: &mut W,
) -> LedgerResult<()> {
    writeln!(writer, "{}", quote(&header.company_name)).map_err(export_err)?;
    writeln!(writer, "\"Account Transaction Details\"").map_err(export_err)?;
    writeln!(writer, "{}", quote(&format!("Account: {}", account.account_name))).map_err(export_err)?;
    writeln!(writer, "{}", quote(&format!("Period: {}", range))).map_err(export_err)?;
    writeln!(
        writer,
        "{}",
        quote(&format!("Generated: {}", generated_at.format(GENERATED_FORMAT)))
    )
    .map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    writeln!(
        writer,
        "\"Date\",\"Category Description\",\"Particulars\",\"Reference Number\",\"Debit Amount\",\"Credit Amount\",\"Running Balance\""
    )
    .map_err(export_err)?;

    for tx in &account.transactions {
        write_row(
            writer,
            &[
                &tx.date.format("%Y-%m-%d").to_string(),
                &tx.category_description,
                &tx.particulars,
                &tx.reference_number,
                &tx.debit_amount.to_string(),
                &tx.credit_amount.to_string(),
                &tx.running_balance.to_string(),
            ],
        )?;
    }

    Ok(())
}

fn write_row<W: Write>(writer: &mut W, fields: &[&str]) -> LedgerResult<()> {
    let line: Vec<String> = fields.iter().map(|f| quote(f)).collect();
    writeln!(writer, "{}", line.join(",")).map_err(export_err)
}

/// Quote a field, doubling embedded quotes
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}
