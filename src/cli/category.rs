//! Category CLI commands
//!
//! Implements CLI commands for credit and debit category management.

use clap::Subcommand;

use super::AppContext;
use crate::display::{format_category_details, format_category_list};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryType, CreateCategoryRequest, UpdateCategoryRequest};
use crate::services::CategoryService;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List categories
    List {
        /// Only this type (credit or debit)
        #[arg(short = 't', long = "type")]
        category_type: Option<String>,
        /// Only active categories
        #[arg(long)]
        active: bool,
    },

    /// Show category details
    Show {
        /// Category ID
        id: String,
    },

    /// Create a new category
    Create {
        /// Category name
        name: String,
        /// Category type (credit or debit)
        #[arg(short = 't', long = "type")]
        category_type: String,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Edit a category
    Edit {
        /// Category ID
        id: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New description (empty to clear)
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Activate or deactivate a category
    Toggle {
        /// Category ID
        id: String,
    },

    /// Delete a category
    Delete {
        /// Category ID
        id: String,
        /// Delete even when transactions use the category
        #[arg(long)]
        force: bool,
    },

    /// Search category names and descriptions
    Search {
        /// Search term
        term: String,
    },
}

/// Handle a category command
pub fn handle_category_command(ctx: &AppContext, cmd: CategoryCommands) -> LedgerResult<()> {
    let service = CategoryService::new(&ctx.client).with_dev_fallback(ctx.settings.dev_fallback);

    match cmd {
        CategoryCommands::List {
            category_type,
            active,
        } => {
            let category_type = category_type
                .as_deref()
                .map(str::parse::<CategoryType>)
                .transpose()?;
            let categories = match (category_type, active) {
                (Some(t), true) => service.get_active_by_type(t)?,
                (Some(t), false) => service.get_by_type(t)?,
                (None, true) => service.get_active()?,
                (None, false) => service.get_all()?,
            };
            println!("{}", format_category_list(&categories));
        }

        CategoryCommands::Show { id } => {
            let category = service.get_by_id(&id)?;
            print!("{}", format_category_details(&category));
        }

        CategoryCommands::Create {
            name,
            category_type,
            description,
        } => {
            let category_type: CategoryType = category_type.parse()?;
            let request = CreateCategoryRequest {
                name,
                description,
                category_type,
            }
            .normalized()?;

            if !service.is_name_unique(&request.name, category_type, None) {
                return Err(LedgerError::Validation(format!(
                    "A {} category named '{}' already exists",
                    category_type, request.name
                )));
            }

            let category = service.create(request)?;
            println!("Created category: {}", category.name);
            println!("  Type: {}", category.category_type);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Edit {
            id,
            name,
            description,
        } => {
            if name.is_none() && description.is_none() {
                return Err(LedgerError::Validation(
                    "Nothing to change: pass --name and/or --description".into(),
                ));
            }
            let existing = service.get_by_id(&id)?;

            if let Some(new_name) = name.as_deref() {
                if new_name.trim() != existing.name
                    && !service.is_name_unique(new_name, existing.category_type, Some(&existing.id))
                {
                    return Err(LedgerError::Validation(format!(
                        "A {} category named '{}' already exists",
                        existing.category_type,
                        new_name.trim()
                    )));
                }
            }

            let request = UpdateCategoryRequest {
                name: name.unwrap_or_else(|| existing.name.clone()),
                description: description.or(existing.description.clone()),
                is_active: existing.is_active,
            };
            let category = service.update(&existing.id, request)?;
            println!("Updated category: {}", category.name);
        }

        CategoryCommands::Toggle { id } => {
            let category = service.toggle_active(&id)?;
            println!(
                "Category '{}' is now {}",
                category.name,
                if category.is_active { "active" } else { "inactive" }
            );
        }

        CategoryCommands::Delete { id, force } => {
            let used = service.usage_count(&id)?;
            if used > 0 && !force {
                return Err(LedgerError::Validation(format!(
                    "Category is used by {} transaction(s); pass --force to delete it anyway",
                    used
                )));
            }
            service.delete(&id)?;
            println!("Deleted category {}", id.trim());
        }

        CategoryCommands::Search { term } => {
            let categories = service.search(&term)?;
            println!("{}", format_category_list(&categories));
        }
    }

    Ok(())
}
