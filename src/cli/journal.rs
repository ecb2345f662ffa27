//! Journal entry CLI commands

use clap::{Args, Subcommand};

use super::{parse_date, AppContext};
use crate::display::{format_journal_entry_details, format_journal_page, format_journal_summary};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{JournalEntryFilters, JournalExportFormat, JournalExportRequest, Money};
use crate::services::journal::{DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::services::JournalEntryService;

/// Columns the server can export
pub const EXPORT_COLUMNS: &[&str] = &[
    "journalNumber",
    "transactionDate",
    "type",
    "categoryName",
    "particulars",
    "amount",
    "referenceNumber",
    "contactName",
    "accountName",
    "createdAt",
];

/// Selected when `--columns` is not given
pub const DEFAULT_EXPORT_COLUMNS: &[&str] = &[
    "journalNumber",
    "transactionDate",
    "type",
    "categoryName",
    "particulars",
    "amount",
    "referenceNumber",
    "contactName",
];

/// Filters shared by listing, statistics and export
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Entries on or after this date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,
    /// Entries on or before this date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
    /// all, credit or debit
    #[arg(short = 't', long = "type", default_value = "all")]
    transaction_type: String,
    /// Minimum amount
    #[arg(long)]
    min: Option<String>,
    /// Maximum amount
    #[arg(long)]
    max: Option<String>,
    /// Category name
    #[arg(short, long)]
    category: Option<String>,
    /// Reference number
    #[arg(long)]
    reference: Option<String>,
    /// Contact name
    #[arg(long)]
    contact: Option<String>,
    /// Text in the particulars
    #[arg(long)]
    description: Option<String>,
    /// Entry status
    #[arg(long)]
    status: Option<String>,
}

impl FilterArgs {
    pub fn to_filters(&self) -> LedgerResult<JournalEntryFilters> {
        let amount = |label: &str, value: &Option<String>| -> LedgerResult<Option<Money>> {
            value
                .as_deref()
                .map(|v| {
                    Money::parse(v).map_err(|e| {
                        LedgerError::Validation(format!("Invalid {} '{}': {}", label, v, e))
                    })
                })
                .transpose()
        };

        let filters = JournalEntryFilters {
            date_from: self.from.as_deref().map(|d| parse_date(d, "from date")).transpose()?,
            date_to: self.to.as_deref().map(|d| parse_date(d, "to date")).transpose()?,
            transaction_type: self.transaction_type.parse()?,
            amount_min: amount("minimum amount", &self.min)?,
            amount_max: amount("maximum amount", &self.max)?,
            category: self.category.clone(),
            reference_number: self.reference.clone(),
            contact_name: self.contact.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
        };
        filters.validate()?;
        Ok(filters)
    }
}

/// Journal subcommands
#[derive(Subcommand, Debug)]
pub enum JournalCommands {
    /// List journal entries, newest first
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Page number
        #[arg(short, long, default_value_t = DEFAULT_PAGE)]
        page: u32,
        /// Entries per page
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
    },

    /// Show one journal entry
    Show {
        /// Journal entry ID
        id: String,
    },

    /// Show totals for the filtered entries
    Stats {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Ask the server to export the filtered entries
    Export {
        #[command(flatten)]
        filters: FilterArgs,
        /// csv, excel or pdf
        #[arg(short, long, default_value = "csv")]
        format: String,
        /// Comma-separated columns (see --help for the list)
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
    },
}

/// Handle a journal command
pub fn handle_journal_command(ctx: &AppContext, cmd: JournalCommands) -> LedgerResult<()> {
    let service = JournalEntryService::new(&ctx.client, ctx.cache_ttl());

    match cmd {
        JournalCommands::List {
            filters,
            page,
            limit,
        } => {
            let page = service.list(&filters.to_filters()?, page, limit)?;
            print!("{}", format_journal_page(&page));
        }

        JournalCommands::Show { id } => {
            print!("{}", format_journal_entry_details(&service.get_by_id(&id)?));
        }

        JournalCommands::Stats { filters } => {
            let summary = service.statistics(&filters.to_filters()?)?;
            print!("{}", format_journal_summary(&summary));
        }

        JournalCommands::Export {
            filters,
            format,
            columns,
        } => {
            let format: JournalExportFormat = format.parse()?;
            let columns = select_columns(columns)?;
            let request = JournalExportRequest::new(format, columns, &filters.to_filters()?);
            let response = service.export(&request)?;

            if !response.success {
                return Err(LedgerError::Export(
                    response
                        .message
                        .unwrap_or_else(|| "The server could not export the entries".into()),
                ));
            }
            println!("Export ready.");
            if let Some(name) = response.file_name {
                println!("  File: {}", name);
            }
            if let Some(url) = response.download_url {
                println!("  Download: {}", url);
            }
        }
    }

    Ok(())
}

/// Default the column list and reject names the server does not know
fn select_columns(columns: Vec<String>) -> LedgerResult<Vec<String>> {
    let columns: Vec<String> = columns
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if columns.is_empty() {
        return Ok(DEFAULT_EXPORT_COLUMNS.iter().map(|c| c.to_string()).collect());
    }
    if let Some(unknown) = columns.iter().find(|c| !EXPORT_COLUMNS.contains(&c.as_str())) {
        return Err(LedgerError::Validation(format!(
            "Unknown column '{}'. Available: {}",
            unknown,
            EXPORT_COLUMNS.join(", ")
        )));
    }
    Ok(columns)
}
