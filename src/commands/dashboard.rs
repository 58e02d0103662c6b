use clap::Args;
use std::collections::HashMap;
use uuid::Uuid;

use crate::db::{CategoryRepository, ItemRepository};

/// Show dataset totals and per-category entry counts
#[derive(Args)]
pub struct DashboardCommand {}

impl DashboardCommand {
    pub async fn run(
        &self,
        categories: &CategoryRepository,
        items: &ItemRepository,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let listed = categories.list().await?;
        let total_items = items.count().await?;
        let counts: HashMap<Uuid, i64> = items.count_by_category().await?.into_iter().collect();

        println!("Aminpur Thana Directory");
        println!("=======================");
        println!();
        println!("Categories: {}", listed.len());
        println!("Entries:    {}", total_items);
        println!();

        if listed.is_empty() && total_items == 0 {
            println!("The store is empty. Run 'thanainfo sync pull' to seed it.");
            return Ok(());
        }

        println!("{:<24}  {:<10}  ENTRIES", "CATEGORY", "ICON");
        println!("{}", "-".repeat(46));
        let mut counted: i64 = 0;
        for category in &listed {
            let count = counts.get(&category.id).copied().unwrap_or(0);
            counted += count;
            println!("{:<24}  {:<10}  {}", category.name, category.icon.to_string(), count);
        }

        // Entries whose category was deleted still count; they belong nowhere.
        let orphans = total_items - counted;
        if orphans > 0 {
            println!("{:<24}  {:<10}  {}", "uncategorized", "-", orphans);
        }

        Ok(())
    }
}
