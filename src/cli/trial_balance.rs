//! Trial balance CLI commands

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::{Local, Utc};
use clap::{Subcommand, ValueEnum};

use super::{parse_date, AppContext};
use crate::api::partial::DEFAULT_MIN_SUCCESS_RATE;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{
    account_transactions_filename, export_trial_balance, trial_balance_filename,
    write_account_transactions_csv, write_json, write_yaml, ExportFormat, ExportOptions,
    ReportHeader,
};
use crate::models::{AccountCategoryType, DateRange};
use crate::reports::{
    AccountTransactionsReport, ComparisonReport, PeriodSummaryReport, TrialBalanceReport,
};
use crate::services::{Pagination, TrialBalanceOptions, TrialBalanceService};

/// Output formats for `trial-balance export`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Csv,
    Pdf,
    Json,
    Yaml,
}

/// Trial balance subcommands
#[derive(Subcommand, Debug)]
pub enum TrialBalanceCommands {
    /// Show the trial balance for a period (default: the current month)
    Show {
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,
        /// Summarize the N calendar months ending with the end date instead
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=24))]
        months: Option<u32>,
        /// Only these categories (repeatable)
        #[arg(short, long = "category")]
        categories: Vec<String>,
        /// Include accounts with a zero balance
        #[arg(long)]
        zero: bool,
        /// Print the detailed breakdown of category subtotals
        #[arg(long)]
        breakdown: bool,
        /// Show an empty report instead of failing when the API is unavailable
        #[arg(long)]
        fallback: bool,
        /// Use the development endpoint
        #[arg(long)]
        dev: bool,
        /// Fail on the first error instead of retrying
        #[arg(long)]
        no_retry: bool,
    },

    /// List the transactions behind one account
    #[command(alias = "drill-down")]
    Accounts {
        /// Account ID
        account_id: String,
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,
        /// Page number
        #[arg(long)]
        page: Option<u32>,
        /// Transactions per page
        #[arg(long)]
        page_size: Option<u32>,
        /// Also write the transactions to CSV (default file name in the current directory)
        #[arg(long)]
        csv: bool,
        /// CSV output path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare two non-overlapping periods
    Compare {
        /// First period start (YYYY-MM-DD)
        #[arg(long)]
        start1: String,
        /// First period end (YYYY-MM-DD)
        #[arg(long)]
        end1: String,
        /// Second period start (YYYY-MM-DD)
        #[arg(long)]
        start2: String,
        /// Second period end (YYYY-MM-DD)
        #[arg(long)]
        end2: String,
        /// Include accounts with a zero balance
        #[arg(long)]
        zero: bool,
    },

    /// Export the trial balance to a file
    Export {
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Csv)]
        format: ReportFormat,
        /// Output path (default: a dated file name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Include the calculation details block
        #[arg(long)]
        details: bool,
        /// Include accounts with a zero balance
        #[arg(long)]
        zero: bool,
    },
}

/// Handle a trial balance command
pub fn handle_trial_balance_command(ctx: &AppContext, cmd: TrialBalanceCommands) -> LedgerResult<()> {
    let service =
        TrialBalanceService::new(&ctx.client, &ctx.limiter).with_retry_policy(ctx.retry_policy());

    match cmd {
        TrialBalanceCommands::Show {
            start,
            end,
            months,
            categories,
            zero,
            breakdown,
            fallback,
            dev,
            no_retry,
        } => {
            let category_filter = categories
                .iter()
                .map(|c| c.parse::<AccountCategoryType>())
                .collect::<LedgerResult<Vec<_>>>()?;
            let options = TrialBalanceOptions {
                include_zero_balances: zero,
                category_filter,
                enable_retry: !no_retry,
                enable_fallback: fallback || ctx.settings.dev_fallback,
                use_dev_endpoint: dev,
                ..TrialBalanceOptions::default()
            };

            if let Some(months) = months {
                if start.is_some() {
                    return Err(LedgerError::Validation(
                        "--months counts back from --end; --start cannot be combined with it".into(),
                    ));
                }
                let end_date = match end.as_deref() {
                    Some(e) => parse_date(e, "end date")?,
                    None => Local::now().date_naive(),
                };
                let ranges = DateRange::trailing_months(end_date, months);
                let results = service.generate_for_periods(&ranges, &options, DEFAULT_MIN_SUCCESS_RATE)?;
                print!("{}", PeriodSummaryReport::new(&results).format_terminal());
                return Ok(());
            }

            let range = resolve_range(start.as_deref(), end.as_deref())?;
            let data = service.generate_trial_balance(&range, &options)?;
            let report = TrialBalanceReport::new(&data, zero);
            print!("{}", report.format_terminal());
            if breakdown {
                println!();
                print!("{}", report.format_breakdown());
            }
        }

        TrialBalanceCommands::Accounts {
            account_id,
            start,
            end,
            page,
            page_size,
            csv,
            output,
        } => {
            let range = resolve_range(start.as_deref(), end.as_deref())?;
            let account =
                service.get_account_transactions(&account_id, &range, Pagination { page, page_size })?;
            print!(
                "{}",
                AccountTransactionsReport::new(&account, range).format_terminal()
            );

            if csv || output.is_some() {
                let path = output.unwrap_or_else(|| {
                    PathBuf::from(account_transactions_filename(
                        &account.account_name,
                        &range,
                        Local::now().date_naive(),
                    ))
                });
                let mut writer = BufWriter::new(File::create(&path)?);
                write_account_transactions_csv(
                    &account,
                    &range,
                    &ReportHeader::from_settings(&ctx.settings),
                    Utc::now(),
                    &mut writer,
                )?;
                writer.flush()?;
                println!("Wrote {}", path.display());
            }
        }

        TrialBalanceCommands::Compare {
            start1,
            end1,
            start2,
            end2,
            zero,
        } => {
            let period1 = DateRange::parse(&start1, &end1)?;
            let period2 = DateRange::parse(&start2, &end2)?;
            let options = TrialBalanceOptions {
                include_zero_balances: zero,
                ..TrialBalanceOptions::default()
            };
            let comparison = service.compare_trial_balances(&period1, &period2, &options)?;
            print!("{}", ComparisonReport::new(&comparison).format_terminal());
        }

        TrialBalanceCommands::Export {
            start,
            end,
            format,
            output,
            details,
            zero,
        } => {
            let range = resolve_range(start.as_deref(), end.as_deref())?;
            let options = TrialBalanceOptions {
                include_zero_balances: zero,
                ..TrialBalanceOptions::default()
            };
            let data = service.generate_trial_balance(&range, &options)?;
            let path = output.unwrap_or_else(|| default_export_path(&range, format));

            match format {
                ReportFormat::Csv | ReportFormat::Pdf => {
                    let export_format = if format == ReportFormat::Pdf {
                        ExportFormat::Pdf
                    } else {
                        ExportFormat::Csv
                    };
                    export_trial_balance(
                        &data,
                        export_format,
                        ExportOptions {
                            include_calculation_details: details,
                            include_zero_balances: zero,
                        },
                        &ReportHeader::from_settings(&ctx.settings),
                        &path,
                    )?;
                }
                ReportFormat::Json | ReportFormat::Yaml => {
                    let mut writer = BufWriter::new(File::create(&path)?);
                    if format == ReportFormat::Json {
                        write_json(&data, &mut writer)?;
                    } else {
                        write_yaml(&data, &mut writer)?;
                    }
                    writer.flush()?;
                }
            }
            println!("Exported trial balance to {}", path.display());
        }
    }

    Ok(())
}

/// Both dates, or neither for the current month
pub fn resolve_range(start: Option<&str>, end: Option<&str>) -> LedgerResult<DateRange> {
    match (start, end) {
        (Some(s), Some(e)) => {
            let range = DateRange::parse(s, e)?;
            range.validate()?;
            Ok(range)
        }
        (None, None) => Ok(DateRange::month_of(Local::now().date_naive())),
        _ => Err(LedgerError::Validation(
            "Provide both --start and --end, or neither for the current month".into(),
        )),
    }
}

fn default_export_path(range: &DateRange, format: ReportFormat) -> PathBuf {
    let today = Local::now().date_naive();
    let name = PathBuf::from(trial_balance_filename(range, ExportFormat::Csv, today));
    match format {
        ReportFormat::Csv => name,
        ReportFormat::Pdf => name.with_extension("pdf"),
        ReportFormat::Json => name.with_extension("json"),
        ReportFormat::Yaml => name.with_extension("yaml"),
    }
}
