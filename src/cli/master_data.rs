//! CLI commands for warehouses, currencies, tax rates and report templates

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Subcommand;

use super::{parse_date, AppContext};
use crate::display::{
    format_currency_list, format_tax_rate_list, format_template_details, format_template_list,
    format_warehouse_details, format_warehouse_list,
};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{CurrencyRequest, ReportTemplateRequest, TaxRateRequest, WarehouseRequest};
use crate::services::{CurrencyService, ReportTemplateService, TaxRateService, WarehouseService};

/// Warehouse subcommands
#[derive(Subcommand, Debug)]
pub enum WarehouseCommands {
    /// List warehouses
    List {
        /// Only active warehouses
        #[arg(long)]
        active: bool,
    },
    /// Show warehouse details
    Show { id: String },
    /// Create a warehouse
    Create {
        /// Warehouse name
        name: String,
        /// Warehouse code
        #[arg(short, long)]
        code: String,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        manager: Option<String>,
    },
    /// Delete a warehouse
    Delete { id: String },
}

/// Currency subcommands
#[derive(Subcommand, Debug)]
pub enum CurrencyCommands {
    /// List currencies
    List {
        /// Only active currencies
        #[arg(long)]
        active: bool,
    },
    /// Show the base currency
    Base,
    /// Create a currency
    Create {
        /// ISO code, e.g. BDT
        code: String,
        /// Currency name
        #[arg(short, long)]
        name: String,
        /// Display symbol
        #[arg(short, long, default_value = "")]
        symbol: String,
        /// Make this the base currency
        #[arg(long)]
        base: bool,
    },
    /// Delete a currency
    Delete { id: String },
}

/// Tax rate subcommands
#[derive(Subcommand, Debug)]
pub enum TaxRateCommands {
    /// List tax rates
    List {
        /// Only active rates
        #[arg(long, conflicts_with = "effective")]
        active: bool,
        /// Only rates in effect on this date (YYYY-MM-DD)
        #[arg(long)]
        effective: Option<String>,
    },
    /// Create a tax rate
    Create {
        /// Tax name
        name: String,
        /// Percentage, 0 to 100
        #[arg(short, long)]
        percentage: f64,
        /// Tax type, e.g. VAT
        #[arg(short = 't', long = "type", default_value = "")]
        tax_type: String,
        /// First day in effect (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// Last day in effect (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Delete a tax rate
    Delete { id: String },
}

/// Report template subcommands
#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    /// List report templates
    List {
        /// Only templates of this report type
        #[arg(short = 't', long = "type", conflicts_with = "mine")]
        report_type: Option<String>,
        /// Only templates created by the logged-in user
        #[arg(long)]
        mine: bool,
    },
    /// Show a template and its content
    Show { id: String },
    /// Create a template from a file
    Create {
        /// Template name
        name: String,
        /// Report type, e.g. TrialBalance
        #[arg(short = 't', long = "type")]
        report_type: String,
        /// File holding the template content
        #[arg(short, long)]
        content: PathBuf,
        #[arg(short, long)]
        description: Option<String>,
        /// Parameters as a JSON string
        #[arg(long)]
        parameters: Option<String>,
    },
    /// Delete a template (system templates are protected)
    Delete { id: String },
}

pub fn handle_warehouse_command(ctx: &AppContext, cmd: WarehouseCommands) -> LedgerResult<()> {
    let service = WarehouseService::new(&ctx.client);

    match cmd {
        WarehouseCommands::List { active } => {
            let warehouses = if active {
                service.list_active()?
            } else {
                service.list()?
            };
            println!("{}", format_warehouse_list(&warehouses));
        }
        WarehouseCommands::Show { id } => {
            print!("{}", format_warehouse_details(&service.get(&id)?));
        }
        WarehouseCommands::Create {
            name,
            code,
            address,
            city,
            country,
            manager,
        } => {
            let mut request = WarehouseRequest::new(name.trim(), code.trim());
            request.address = address;
            request.city = city;
            request.country = country;
            request.manager_name = manager;
            let warehouse = service.create(&request)?;
            println!(
                "Created warehouse: {} ({})",
                warehouse.warehouse_name, warehouse.warehouse_code
            );
            println!("  ID: {}", warehouse.id);
        }
        WarehouseCommands::Delete { id } => {
            service.delete(&id)?;
            println!("Deleted warehouse {}", id.trim());
        }
    }

    Ok(())
}

pub fn handle_currency_command(ctx: &AppContext, cmd: CurrencyCommands) -> LedgerResult<()> {
    let service = CurrencyService::new(&ctx.client);

    match cmd {
        CurrencyCommands::List { active } => {
            let currencies = if active {
                service.list_active()?
            } else {
                service.list()?
            };
            println!("{}", format_currency_list(&currencies));
        }
        CurrencyCommands::Base => match service.base_currency()? {
            Some(currency) => println!(
                "Base currency: {} ({}) {}",
                currency.currency_name, currency.currency_code, currency.symbol
            ),
            None => println!("No base currency is configured."),
        },
        CurrencyCommands::Create {
            code,
            name,
            symbol,
            base,
        } => {
            let request = CurrencyRequest {
                currency_code: code.trim().to_string(),
                currency_name: name.trim().to_string(),
                symbol,
                is_base_currency: base,
                is_active: true,
            };
            let currency = service.create(&request)?;
            println!(
                "Created currency: {} ({})",
                currency.currency_name, currency.currency_code
            );
        }
        CurrencyCommands::Delete { id } => {
            service.delete(&id)?;
            println!("Deleted currency {}", id.trim());
        }
    }

    Ok(())
}

pub fn handle_tax_rate_command(ctx: &AppContext, cmd: TaxRateCommands) -> LedgerResult<()> {
    let service = TaxRateService::new(&ctx.client);

    match cmd {
        TaxRateCommands::List { active, effective } => {
            let rates = match effective {
                Some(date) => service.effective_at(start_of_day(&date, "effective date")?)?,
                None if active => service.list_active()?,
                None => service.list()?,
            };
            println!("{}", format_tax_rate_list(&rates));
        }
        TaxRateCommands::Create {
            name,
            percentage,
            tax_type,
            from,
            to,
        } => {
            let request = TaxRateRequest {
                tax_name: name.trim().to_string(),
                tax_percentage: percentage,
                tax_type,
                description: None,
                is_active: true,
                effective_from: start_of_day(&from, "start date")?,
                effective_to: to
                    .as_deref()
                    .map(|d| start_of_day(d, "end date"))
                    .transpose()?,
            };
            let rate = service.create(&request)?;
            println!("Created tax rate: {} ({:.2}%)", rate.tax_name, rate.tax_percentage);
        }
        TaxRateCommands::Delete { id } => {
            service.delete(&id)?;
            println!("Deleted tax rate {}", id.trim());
        }
    }

    Ok(())
}

pub fn handle_template_command(ctx: &AppContext, cmd: TemplateCommands) -> LedgerResult<()> {
    let service = ReportTemplateService::new(&ctx.client);

    match cmd {
        TemplateCommands::List { report_type, mine } => {
            let templates = match report_type {
                Some(t) => service.by_type(&t)?,
                None if mine => service.my_templates()?,
                None => service.list()?,
            };
            println!("{}", format_template_list(&templates));
        }
        TemplateCommands::Show { id } => {
            print!("{}", format_template_details(&service.get(&id)?));
        }
        TemplateCommands::Create {
            name,
            report_type,
            content,
            description,
            parameters,
        } => {
            let template_content = std::fs::read_to_string(&content).map_err(|e| {
                LedgerError::Io(format!("Cannot read {}: {}", content.display(), e))
            })?;
            let request = ReportTemplateRequest {
                template_name: name.trim().to_string(),
                report_type: report_type.trim().to_string(),
                template_content,
                description,
                is_active: true,
                is_system: false,
                parameters,
            };
            let template = service.create(&request)?;
            println!("Created report template: {}", template.template_name);
            println!("  ID: {}", template.id);
        }
        TemplateCommands::Delete { id } => {
            let template = service.get(&id)?;
            service.delete(&template)?;
            println!("Deleted report template '{}'", template.template_name);
        }
    }

    Ok(())
}

fn start_of_day(value: &str, label: &str) -> LedgerResult<DateTime<Utc>> {
    let date = parse_date(value, label)?;
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| LedgerError::Validation(format!("Invalid {} '{}'", label, value)))
}
