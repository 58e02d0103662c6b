use clap::{Args, Subcommand, ValueEnum};
use std::io::{self, Write};
use uuid::Uuid;

use crate::auth::AdminSession;
use crate::db::CategoryRepository;
use crate::models::{Category, Color, Icon};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Manage categories
#[derive(Args)]
pub struct CategoryCommand {
    #[command(subcommand)]
    pub command: CategorySubcommand,
}

#[derive(Subcommand)]
pub enum CategorySubcommand {
    /// Create a new category
    Create {
        /// Category name
        name: String,

        /// Short description
        #[arg(long)]
        description: Option<String>,

        /// Symbolic icon name (hospital, school, bus, ...)
        #[arg(long)]
        icon: Option<String>,

        /// Symbolic color name (blue, green, purple, ...)
        #[arg(long)]
        color: Option<String>,

        /// Image URL or data URI
        #[arg(long)]
        image: Option<String>,
    },

    /// List all categories
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a category's details
    Show {
        /// Category ID (UUID) or name
        identifier: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Update an existing category
    Update {
        /// Category ID (UUID) or name
        identifier: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New icon
        #[arg(long)]
        icon: Option<String>,

        /// New color
        #[arg(long)]
        color: Option<String>,

        /// New image URL
        #[arg(long)]
        image: Option<String>,
    },

    /// Delete a category (referencing entries are kept and shown as uncategorized)
    Delete {
        /// Category ID (UUID) or name
        identifier: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl CategoryCommand {
    pub async fn run(
        &self,
        repo: &CategoryRepository,
        session: &AdminSession,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            CategorySubcommand::Create {
                name,
                description,
                icon,
                color,
                image,
            } => {
                session.require()?;

                if name.trim().is_empty() {
                    return Err("Category name cannot be empty".into());
                }

                let mut category = Category::new(name.trim());
                if let Some(description) = description {
                    category = category.with_description(description);
                }
                if let Some(icon) = icon {
                    category = category.with_icon(Icon::parse(icon));
                }
                if let Some(color) = color {
                    category = category.with_color(Color::parse(color));
                }
                if let Some(image) = image {
                    category = category.with_image(image);
                }

                let created = repo.create(&category).await?;
                println!("Created category:");
                println!("{}", created);
                Ok(())
            }

            CategorySubcommand::List { format } => {
                let categories = repo.list().await?;

                if categories.is_empty() {
                    println!("No categories found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&categories)?);
                    }
                    OutputFormat::Text => {
                        println!("{:<36}  {:<24}  {:<10}  COLOR", "ID", "NAME", "ICON");
                        println!("{}", "-".repeat(84));
                        for category in &categories {
                            println!(
                                "{:<36}  {:<24}  {:<10}  {}",
                                category.id,
                                category.name,
                                category.icon.to_string(),
                                category.color
                            );
                        }
                        println!("\nTotal: {} categor(ies)", categories.len());
                    }
                }
                Ok(())
            }

            CategorySubcommand::Show { identifier, format } => {
                let category = find_category(repo, identifier).await?;

                match category {
                    Some(category) => {
                        match format {
                            OutputFormat::Json => {
                                println!("{}", serde_json::to_string_pretty(&category)?);
                            }
                            OutputFormat::Text => {
                                println!("{}", category);
                            }
                        }
                        Ok(())
                    }
                    None => Err(format!("Category not found: {}", identifier).into()),
                }
            }

            CategorySubcommand::Update {
                identifier,
                name,
                description,
                icon,
                color,
                image,
            } => {
                session.require()?;

                let has_updates = name.is_some()
                    || description.is_some()
                    || icon.is_some()
                    || color.is_some()
                    || image.is_some();
                if !has_updates {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let mut category = match find_category(repo, identifier).await? {
                    Some(c) => c,
                    None => return Err(format!("Category not found: {}", identifier).into()),
                };

                if let Some(new_name) = name {
                    category.name = new_name.clone();
                }
                if let Some(new_description) = description {
                    category.description = new_description.clone();
                }
                if let Some(new_icon) = icon {
                    category.icon = Icon::parse(new_icon);
                }
                if let Some(new_color) = color {
                    category.color = Color::parse(new_color);
                }
                if let Some(new_image) = image {
                    category.image = Some(new_image.clone());
                }

                let updated = repo.update(&category).await?;
                println!("Updated category:");
                println!("{}", updated);
                Ok(())
            }

            CategorySubcommand::Delete { identifier, force } => {
                session.require()?;

                let category = match find_category(repo, identifier).await? {
                    Some(c) => c,
                    None => return Err(format!("Category not found: {}", identifier).into()),
                };

                if !force {
                    print!(
                        "Delete category '{}'? Its entries are kept as uncategorized. [y/N] ",
                        category.name
                    );
                    io::stdout().flush()?;

                    let mut input = String::new();
                    io::stdin().read_line(&mut input)?;

                    if !input.trim().eq_ignore_ascii_case("y") {
                        println!("Deletion cancelled.");
                        return Ok(());
                    }
                }

                repo.delete(category.id).await?;
                println!("Deleted category: {}", category.name);
                Ok(())
            }
        }
    }
}

/// Resolves a category by UUID or, failing that, by name.
pub async fn find_category(
    repo: &CategoryRepository,
    identifier: &str,
) -> Result<Option<Category>, sqlx::Error> {
    if let Ok(uuid) = Uuid::parse_str(identifier) {
        repo.get_by_id(uuid).await
    } else {
        repo.get_by_name(identifier).await
    }
}
