use anyhow::Result;
use clap::{Parser, Subcommand};

use garments_ledger::cli::{
    handle_auth_command, handle_cashbook_command, handle_category_command,
    handle_contact_command, handle_currency_command, handle_health_command,
    handle_journal_command, handle_tax_rate_command, handle_template_command,
    handle_trial_balance_command, handle_warehouse_command, AppContext,
};
use garments_ledger::config::{paths::LedgerPaths, settings::Settings};
use garments_ledger::services::health::DEFAULT_ATTEMPTS;
use garments_ledger::{logging, LedgerError};

#[derive(Parser)]
#[command(
    name = "gledger",
    version,
    about = "Accounting client for the Garments ERP API",
    long_about = "gledger talks to the Garments ERP accounting API. It generates \
                  trial balances with drill-down and period comparison, exports \
                  them to CSV, PDF, JSON or YAML, and manages categories, contacts, \
                  master data, journal entries and the cash book from the command line."
)]
struct Cli {
    /// Increase log output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// API base URL, overriding the stored setting
    #[arg(long, env = "GLEDGER_API_URL", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Trial balance reports and exports
    #[command(subcommand, alias = "tb")]
    TrialBalance(garments_ledger::cli::TrialBalanceCommands),

    /// Credit and debit category management
    #[command(subcommand)]
    Category(garments_ledger::cli::CategoryCommands),

    /// Customer and supplier management
    #[command(subcommand)]
    Contact(garments_ledger::cli::ContactCommands),

    /// Warehouse management
    #[command(subcommand)]
    Warehouse(garments_ledger::cli::WarehouseCommands),

    /// Currency management
    #[command(subcommand)]
    Currency(garments_ledger::cli::CurrencyCommands),

    /// Tax rate management
    #[command(subcommand)]
    TaxRate(garments_ledger::cli::TaxRateCommands),

    /// Report template management
    #[command(subcommand)]
    Template(garments_ledger::cli::TemplateCommands),

    /// Browse and export journal entries
    #[command(subcommand)]
    Journal(garments_ledger::cli::JournalCommands),

    /// Record and import cash book transactions
    #[command(subcommand, alias = "cb")]
    Cashbook(garments_ledger::cli::CashBookCommands),

    /// Session management
    #[command(subcommand)]
    Auth(garments_ledger::cli::AuthCommands),

    /// Check that the API is reachable
    Health {
        /// Attempts before giving up
        #[arg(long, default_value_t = DEFAULT_ATTEMPTS)]
        attempts: u32,
    },

    /// Show current configuration and paths
    Config {
        /// Write the effective settings to the settings file
        #[arg(long)]
        save: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli) {
        match err.downcast_ref::<LedgerError>() {
            Some(e) => eprintln!("Error: {}", e.user_message()),
            None => eprintln!("Error: {:#}", err),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?.with_api_url_override(cli.api_url);

    let Some(command) = cli.command else {
        println!("gledger - Garments ERP accounting client");
        println!();
        println!("Run 'gledger --help' for usage information.");
        return Ok(());
    };

    let ctx = AppContext::new(paths, settings)?;

    match command {
        Commands::TrialBalance(cmd) => handle_trial_balance_command(&ctx, cmd)?,
        Commands::Category(cmd) => handle_category_command(&ctx, cmd)?,
        Commands::Contact(cmd) => handle_contact_command(&ctx, cmd)?,
        Commands::Warehouse(cmd) => handle_warehouse_command(&ctx, cmd)?,
        Commands::Currency(cmd) => handle_currency_command(&ctx, cmd)?,
        Commands::TaxRate(cmd) => handle_tax_rate_command(&ctx, cmd)?,
        Commands::Template(cmd) => handle_template_command(&ctx, cmd)?,
        Commands::Journal(cmd) => handle_journal_command(&ctx, cmd)?,
        Commands::Cashbook(cmd) => handle_cashbook_command(&ctx, cmd)?,
        Commands::Auth(cmd) => handle_auth_command(&ctx, cmd)?,
        Commands::Health { attempts } => handle_health_command(&ctx, attempts)?,
        Commands::Config { save } => {
            print_config(&ctx.paths, &ctx.settings);
            if save {
                ctx.settings.save(&ctx.paths)?;
                println!();
                println!("Saved to {}", ctx.paths.settings_file().display());
            }
        }
    }

    Ok(())
}

fn print_config(paths: &LedgerPaths, settings: &Settings) {
    println!("gledger Configuration");
    println!("=====================");
    println!("Config directory: {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Token file:       {}", paths.token_file().display());
    println!();
    println!("Settings:");
    println!("  API base URL:   {}", settings.api_base_url);
    println!("  Timeout:        {}s", settings.timeout_secs);
    println!(
        "  Retry:          {} attempts, {}-{} ms backoff",
        settings.retry.max_attempts, settings.retry.base_delay_ms, settings.retry.max_delay_ms
    );
    println!(
        "  Rate limit:     {} requests per {}s",
        settings.rate_limit.max_requests, settings.rate_limit.window_secs
    );
    println!("  Cache TTL:      {}s", settings.cache_ttl_secs);
    println!(
        "  Company:        {} ({})",
        settings.company_name, settings.company_department
    );
    println!("  Dev fallback:   {}", settings.dev_fallback);
    println!("  Date format:    {}", settings.date_format);
}
