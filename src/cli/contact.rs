//! Contact CLI commands

use clap::Subcommand;

use super::AppContext;
use crate::display::{format_contact_details, format_contact_list};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{ContactRequest, ContactType, Money};
use crate::services::ContactService;

/// Contact subcommands
#[derive(Subcommand, Debug)]
pub enum ContactCommands {
    /// List contacts
    List {
        /// Only suppliers
        #[arg(long, conflicts_with = "buyers")]
        suppliers: bool,
        /// Only buyers
        #[arg(long)]
        buyers: bool,
    },

    /// Show contact details
    Show {
        /// Contact ID
        id: String,
    },

    /// Search contacts by name, company or email
    Search {
        /// Search term
        term: String,
    },

    /// Create a contact
    Create {
        /// Contact name
        name: String,
        /// customer, supplier or both
        #[arg(short = 't', long = "type", default_value = "customer")]
        contact_type: String,
        /// Company name
        #[arg(short, long)]
        company: Option<String>,
        /// Email address
        #[arg(short, long)]
        email: Option<String>,
        /// Phone number
        #[arg(long)]
        phone: Option<String>,
        /// Mobile number
        #[arg(long)]
        mobile: Option<String>,
        /// Credit limit (e.g. "50000" or "50,000.00")
        #[arg(long)]
        credit_limit: Option<String>,
        /// Payment terms in days
        #[arg(long, default_value = "30")]
        payment_terms: u32,
    },

    /// Delete a contact
    Delete {
        /// Contact ID
        id: String,
    },
}

/// Handle a contact command
pub fn handle_contact_command(ctx: &AppContext, cmd: ContactCommands) -> LedgerResult<()> {
    let service = ContactService::new(&ctx.client);

    match cmd {
        ContactCommands::List { suppliers, buyers } => {
            let contacts = if suppliers {
                service.suppliers()?
            } else if buyers {
                service.buyers()?
            } else {
                service.list()?
            };
            println!("{}", format_contact_list(&contacts));
        }

        ContactCommands::Show { id } => {
            print!("{}", format_contact_details(&service.get(&id)?));
        }

        ContactCommands::Search { term } => {
            println!("{}", format_contact_list(&service.search(&term)?));
        }

        ContactCommands::Create {
            name,
            contact_type,
            company,
            email,
            phone,
            mobile,
            credit_limit,
            payment_terms,
        } => {
            let contact_type: ContactType = contact_type.parse()?;
            let mut request = ContactRequest::new(name.trim(), contact_type);
            request.company_name = company.unwrap_or_default();
            request.email = email.unwrap_or_default();
            request.phone = phone;
            request.mobile = mobile;
            request.payment_terms = payment_terms;
            if let Some(limit) = credit_limit {
                request.credit_limit = Money::parse(&limit).map_err(|e| {
                    LedgerError::Validation(format!("Invalid credit limit '{}': {}", limit, e))
                })?;
            }

            let contact = service.create(&request)?;
            println!("Created contact: {}", contact.name);
            println!("  Type: {}", contact.contact_type);
            println!("  ID: {}", contact.id);
        }

        ContactCommands::Delete { id } => {
            service.delete(&id)?;
            println!("Deleted contact {}", id.trim());
        }
    }

    Ok(())
}
