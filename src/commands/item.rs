use clap::{Args, Subcommand, ValueEnum};
use std::io::{self, Write};
use uuid::Uuid;

use super::category::find_category;
use crate::auth::AdminSession;
use crate::db::{CategoryRepository, ItemRepository};
use crate::models::InfoItem;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Manage directory entries
#[derive(Args)]
pub struct ItemCommand {
    #[command(subcommand)]
    pub command: ItemSubcommand,
}

#[derive(Subcommand)]
pub enum ItemSubcommand {
    /// Create a new entry
    Create {
        /// Entry title (institution name)
        title: String,

        /// Category ID (UUID) or name
        #[arg(long)]
        category: String,

        /// Street address
        #[arg(long)]
        address: Option<String>,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,

        /// Kind of institution (e.g. "High School", "Clinic")
        #[arg(long = "type")]
        item_type: Option<String>,

        /// Year established
        #[arg(long)]
        established: Option<String>,

        /// Specialty (doctors, clinics)
        #[arg(long)]
        specialty: Option<String>,

        /// Opening hours
        #[arg(long)]
        timing: Option<String>,

        /// Transport route
        #[arg(long)]
        route: Option<String>,

        /// Free-form details
        #[arg(long)]
        details: Option<String>,

        /// Map link
        #[arg(long)]
        map_link: Option<String>,
    },

    /// List entries
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Filter by category ID or name
        #[arg(long)]
        category: Option<String>,
    },

    /// Show an entry's details
    Show {
        /// Entry ID (UUID) or title
        identifier: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Search entries by title or address
    Search {
        /// Search term (case-insensitive)
        term: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Update an existing entry
    Update {
        /// Entry ID (UUID) or title
        identifier: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// Move to another category (ID or name)
        #[arg(long)]
        category: Option<String>,

        /// New address
        #[arg(long)]
        address: Option<String>,

        /// New phone number
        #[arg(long)]
        phone: Option<String>,

        /// New type
        #[arg(long = "type")]
        item_type: Option<String>,

        /// New established year
        #[arg(long)]
        established: Option<String>,

        /// New specialty
        #[arg(long)]
        specialty: Option<String>,

        /// New opening hours
        #[arg(long)]
        timing: Option<String>,

        /// New route
        #[arg(long)]
        route: Option<String>,

        /// New details
        #[arg(long)]
        details: Option<String>,

        /// New map link
        #[arg(long)]
        map_link: Option<String>,
    },

    /// Delete an entry
    Delete {
        /// Entry ID (UUID) or title
        identifier: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl ItemCommand {
    pub async fn run(
        &self,
        items: &ItemRepository,
        categories: &CategoryRepository,
        session: &AdminSession,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ItemSubcommand::Create {
                title,
                category,
                address,
                phone,
                item_type,
                established,
                specialty,
                timing,
                route,
                details,
                map_link,
            } => {
                session.require()?;

                if title.trim().is_empty() {
                    return Err("Entry title cannot be empty".into());
                }

                let category = match find_category(categories, category).await? {
                    Some(c) => c,
                    None => return Err(format!("Category not found: {}", category).into()),
                };

                let mut item = InfoItem::new(title.trim(), category.id);
                if let Some(address) = address {
                    item = item.with_address(address);
                }
                if let Some(phone) = phone {
                    item = item.with_phone(phone);
                }
                if let Some(item_type) = item_type {
                    item = item.with_item_type(item_type);
                }
                if let Some(established) = established {
                    item.established = Some(established.clone());
                }
                if let Some(specialty) = specialty {
                    item = item.with_specialty(specialty);
                }
                if let Some(timing) = timing {
                    item = item.with_timing(timing);
                }
                if let Some(route) = route {
                    item = item.with_route(route);
                }
                if let Some(details) = details {
                    item = item.with_details(details);
                }
                if let Some(map_link) = map_link {
                    item = item.with_map_link(map_link);
                }

                let created = items.create(&item).await?;
                println!("Created entry in '{}':", category.name);
                println!("{}", created);
                Ok(())
            }

            ItemSubcommand::List { format, category } => {
                let listed = match category {
                    Some(identifier) => {
                        let category = match find_category(categories, identifier).await? {
                            Some(c) => c,
                            None => {
                                return Err(format!("Category not found: {}", identifier).into())
                            }
                        };
                        items.list_by_category(category.id).await?
                    }
                    None => items.list().await?,
                };

                print_items(&listed, format, categories).await
            }

            ItemSubcommand::Show { identifier, format } => {
                let item = find_item(items, identifier).await?;

                match item {
                    Some(item) => {
                        match format {
                            OutputFormat::Json => {
                                println!("{}", serde_json::to_string_pretty(&item)?);
                            }
                            OutputFormat::Text => {
                                println!("{}", item);
                                let category_name =
                                    match categories.get_by_id(item.category_id).await? {
                                        Some(c) => c.name,
                                        None => "uncategorized".to_string(),
                                    };
                                println!("Category:    {}", category_name);
                            }
                        }
                        Ok(())
                    }
                    None => Err(format!("Entry not found: {}", identifier).into()),
                }
            }

            ItemSubcommand::Search { term, format } => {
                let found = items.search(term).await?;
                if found.is_empty() {
                    println!("No entries match '{}'", term);
                    return Ok(());
                }
                print_items(&found, format, categories).await
            }

            ItemSubcommand::Update {
                identifier,
                title,
                category,
                address,
                phone,
                item_type,
                established,
                specialty,
                timing,
                route,
                details,
                map_link,
            } => {
                session.require()?;

                let has_updates = title.is_some()
                    || category.is_some()
                    || address.is_some()
                    || phone.is_some()
                    || item_type.is_some()
                    || established.is_some()
                    || specialty.is_some()
                    || timing.is_some()
                    || route.is_some()
                    || details.is_some()
                    || map_link.is_some();
                if !has_updates {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let mut item = match find_item(items, identifier).await? {
                    Some(i) => i,
                    None => return Err(format!("Entry not found: {}", identifier).into()),
                };

                if let Some(new_title) = title {
                    item.title = new_title.clone();
                }
                if let Some(identifier) = category {
                    let category = match find_category(categories, identifier).await? {
                        Some(c) => c,
                        None => return Err(format!("Category not found: {}", identifier).into()),
                    };
                    item.category_id = category.id;
                }
                if let Some(new_address) = address {
                    item.address = new_address.clone();
                }
                if let Some(new_phone) = phone {
                    item.phone = Some(new_phone.clone());
                }
                if let Some(new_type) = item_type {
                    item.item_type = Some(new_type.clone());
                }
                if let Some(new_established) = established {
                    item.established = Some(new_established.clone());
                }
                if let Some(new_specialty) = specialty {
                    item.specialty = Some(new_specialty.clone());
                }
                if let Some(new_timing) = timing {
                    item.timing = Some(new_timing.clone());
                }
                if let Some(new_route) = route {
                    item.route = Some(new_route.clone());
                }
                if let Some(new_details) = details {
                    item.details = Some(new_details.clone());
                }
                if let Some(new_map_link) = map_link {
                    item.map_link = Some(new_map_link.clone());
                }

                let updated = items.update(&item).await?;
                println!("Updated entry:");
                println!("{}", updated);
                Ok(())
            }

            ItemSubcommand::Delete { identifier, force } => {
                session.require()?;

                let item = match find_item(items, identifier).await? {
                    Some(i) => i,
                    None => return Err(format!("Entry not found: {}", identifier).into()),
                };

                if !force {
                    print!("Delete entry '{}'? [y/N] ", item.title);
                    io::stdout().flush()?;

                    let mut input = String::new();
                    io::stdin().read_line(&mut input)?;

                    if !input.trim().eq_ignore_ascii_case("y") {
                        println!("Deletion cancelled.");
                        return Ok(());
                    }
                }

                items.delete(item.id).await?;
                println!("Deleted entry: {}", item.title);
                Ok(())
            }
        }
    }
}

async fn find_item(
    repo: &ItemRepository,
    identifier: &str,
) -> Result<Option<InfoItem>, sqlx::Error> {
    if let Ok(uuid) = Uuid::parse_str(identifier) {
        repo.get_by_id(uuid).await
    } else {
        repo.get_by_title(identifier).await
    }
}

async fn print_items(
    items: &[InfoItem],
    format: &OutputFormat,
    categories: &CategoryRepository,
) -> Result<(), Box<dyn std::error::Error>> {
    if items.is_empty() {
        println!("No entries found");
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items)?);
        }
        OutputFormat::Text => {
            let known = categories.list().await?;
            println!("{:<36}  {:<30}  {:<18}  PHONE", "ID", "TITLE", "CATEGORY");
            println!("{}", "-".repeat(100));
            for item in items {
                // Orphaned references display as uncategorized.
                let category_name = known
                    .iter()
                    .find(|c| c.id == item.category_id)
                    .map(|c| c.name.as_str())
                    .unwrap_or("uncategorized");
                let title = if item.title.chars().count() > 30 {
                    format!("{}...", item.title.chars().take(27).collect::<String>())
                } else {
                    item.title.clone()
                };
                println!(
                    "{:<36}  {:<30}  {:<18}  {}",
                    item.id,
                    title,
                    category_name,
                    item.phone.as_deref().unwrap_or("-")
                );
            }
            println!("\nTotal: {} entr(ies)", items.len());
        }
    }
    Ok(())
}
