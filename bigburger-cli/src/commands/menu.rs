//! Menu command - browse products

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use comfy_table::{Cell, Color};

use super::get_context;
use crate::output::{create_table, format_money, print_json};

#[derive(Subcommand)]
pub enum ProductCommands {
    /// Show one product
    Show {
        /// Product id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(category: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let products = ctx.product_service.list(category)?.data;

    if json {
        return print_json(&products);
    }

    if products.is_empty() {
        println!("No products found.");
        return Ok(());
    }

    let mut table = create_table();
    table.set_header(vec!["ID", "Name", "Category", "Price", "Available"]);
    for product in &products {
        let stock = if product.is_in_stock() {
            Cell::new(product.available)
        } else {
            Cell::new("sold out").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(&product.id),
            Cell::new(&product.name),
            Cell::new(&product.category),
            Cell::new(format_money(product.price)),
            stock,
        ]);
    }

    println!("{}", "Big Burger Menu".bold());
    println!("{}", table);
    println!("Add an item with 'bb cart add <id>'.");
    Ok(())
}

pub fn run_product(command: ProductCommands) -> Result<()> {
    match command {
        ProductCommands::Show { id, json } => {
            let ctx = get_context()?;
            let product = ctx.product_service.get(&id)?.data;

            if json {
                return print_json(&product);
            }

            println!("{}", product.name.bold());
            if !product.description.is_empty() {
                println!("  {}", product.description);
            }
            println!("  Price: {}", format_money(product.price));
            if !product.category.is_empty() {
                println!("  Category: {}", product.category);
            }
            if product.is_in_stock() {
                println!("  Available: {}", product.available);
            } else {
                println!("  Available: {}", "sold out".red());
            }
        }
    }
    Ok(())
}
