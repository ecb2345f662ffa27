//! Cash book CLI commands
//!
//! Single credit and debit postings, the recent transaction list and the
//! CSV import of a two-sided cash book sheet.

use std::path::PathBuf;

use clap::Subcommand;

use super::{parse_date_or_today, parse_positive_amount, AppContext};
use crate::display::{
    format_import_preview, format_import_result, format_recent_transactions,
    format_transaction_save,
};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{CreditTransaction, DebitTransaction, LookupItem};
use crate::services::transaction::DEFAULT_RECENT_LIMIT;
use crate::services::{CashBookImportService, CashBookService, TransactionService};

/// Cash book subcommands
#[derive(Subcommand, Debug)]
pub enum CashBookCommands {
    /// Record money received
    Credit {
        /// Amount (e.g. "1500" or "1,500.00")
        amount: String,
        /// Credit category name
        #[arg(short, long)]
        category: String,
        /// Particulars (defaults to the category)
        #[arg(short, long)]
        particulars: Option<String>,
        /// Transaction date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// Who paid
        #[arg(long)]
        contact: Option<String>,
    },

    /// Record money paid out
    Debit {
        /// Amount (e.g. "1500" or "1,500.00")
        amount: String,
        /// Debit category name
        #[arg(short, long)]
        category: String,
        /// Particulars (defaults to the category)
        #[arg(short, long)]
        particulars: Option<String>,
        /// Transaction date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// Supplier paid
        #[arg(long)]
        supplier: Option<String>,
        /// Buyer the expense is booked against
        #[arg(long)]
        buyer: Option<String>,
    },

    /// Show recently saved transactions
    Recent {
        /// Number of transactions
        #[arg(short, long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: u32,
    },

    /// Import a cash book CSV sheet
    Import {
        /// Path to the CSV file
        file: PathBuf,
        /// Only show what would be imported
        #[arg(long)]
        dry_run: bool,
    },

    /// List the category and contact names the cash book accepts
    Lookups,
}

/// Handle a cash book command
pub fn handle_cashbook_command(ctx: &AppContext, cmd: CashBookCommands) -> LedgerResult<()> {
    match cmd {
        CashBookCommands::Credit {
            amount,
            category,
            particulars,
            date,
            contact,
        } => {
            let tx = CreditTransaction {
                date: parse_date_or_today(date.as_deref(), "date")?,
                particulars: particulars.unwrap_or_else(|| category.clone()),
                category_name: category,
                amount: parse_positive_amount(&amount)?,
                contact_name: contact,
            };
            let response = TransactionService::new(&ctx.client).save_credit(&tx)?;
            println!("{}", format_transaction_save(&response));
            if !response.success {
                return Err(LedgerError::InvalidResponse(response.message));
            }
        }

        CashBookCommands::Debit {
            amount,
            category,
            particulars,
            date,
            supplier,
            buyer,
        } => {
            let tx = DebitTransaction {
                date: parse_date_or_today(date.as_deref(), "date")?,
                particulars: particulars.unwrap_or_else(|| category.clone()),
                category_name: category,
                supplier_name: supplier,
                buyer_name: buyer,
                amount: parse_positive_amount(&amount)?,
            };
            let response = TransactionService::new(&ctx.client).save_debit(&tx)?;
            println!("{}", format_transaction_save(&response));
            if !response.success {
                return Err(LedgerError::InvalidResponse(response.message));
            }
        }

        CashBookCommands::Recent { limit } => {
            let transactions = TransactionService::new(&ctx.client).recent_transactions(limit)?;
            println!("{}", format_recent_transactions(&transactions));
        }

        CashBookCommands::Import { file, dry_run } => {
            let importer = CashBookImportService::new(CashBookService::new(&ctx.client));
            let preview = importer.parse_file(&file)?;
            print!("{}", format_import_preview(&preview));

            if dry_run || preview.rows.is_empty() {
                return Ok(());
            }

            println!();
            let result = importer.import(&preview);
            print!("{}", format_import_result(&result));
            if result.imported == 0 && result.failed > 0 {
                return Err(LedgerError::Import(format!(
                    "None of the {} entries could be saved",
                    result.failed
                )));
            }
        }

        CashBookCommands::Lookups => {
            let service = CashBookService::new(&ctx.client);
            println!("Categories: {}", join_names(&service.categories()));
            println!("Contacts:   {}", join_names(&service.contacts()));
        }
    }

    Ok(())
}

fn join_names(items: &[LookupItem]) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items
        .iter()
        .map(|i| i.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
