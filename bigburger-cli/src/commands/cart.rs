//! Cart command - add, change and remove cart lines

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;

use super::get_context;
use crate::output::{create_table, format_money, print_json, success, warning};

#[derive(Subcommand)]
pub enum CartCommands {
    /// Show the cart and its total
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add one unit of a product
    Add {
        /// Product id
        id: String,
    },
    /// Set the quantity of a cart line (0 removes it)
    Set {
        /// Product id
        id: String,
        /// New quantity
        quantity: u32,
    },
    /// Remove a cart line
    Remove {
        /// Product id
        id: String,
        /// Put the units back into stock
        #[arg(long)]
        return_stock: bool,
    },
    /// Empty the cart
    Clear {
        /// Put the units back into stock
        #[arg(long)]
        return_stock: bool,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },
}

pub fn run(command: CartCommands) -> Result<()> {
    let ctx = get_context()?;

    match command {
        CartCommands::Show { json } => {
            let summary = ctx.cart_service.summary()?;
            if json {
                return print_json(&summary);
            }
            if summary.is_empty() {
                println!("Your cart is empty. Browse the menu with 'bb menu'.");
                return Ok(());
            }

            let mut table = create_table();
            table.set_header(vec!["ID", "Item", "Price", "Qty", "Subtotal"]);
            for item in &summary.items {
                table.add_row(vec![
                    item.id.clone(),
                    item.name.clone(),
                    format_money(item.price),
                    item.quantity.to_string(),
                    format_money(item.line_total()),
                ]);
            }
            println!("{}", table);
            println!(
                "{} item(s), total {}",
                summary.total_items,
                format_money(summary.total).bold()
            );
        }
        CartCommands::Add { id } => {
            let added = ctx.cart_service.add_to_cart(&id)?;
            success(&added.message);
            println!("  {} x{}", added.data.name, added.data.quantity);
        }
        CartCommands::Set { id, quantity } => {
            let updated = ctx.cart_service.update_quantity(&id, quantity)?;
            match updated.data {
                Some(item) => success(&format!("{} x{}", item.name, item.quantity)),
                None => warning(&updated.message),
            }
        }
        CartCommands::Remove { id, return_stock } => {
            let removed = ctx.cart_service.remove(&id, return_stock)?;
            success(&removed.message);
        }
        CartCommands::Clear {
            return_stock,
            force,
        } => {
            if !force
                && !Confirm::new()
                    .with_prompt("Remove every item from the cart?")
                    .default(false)
                    .interact()?
            {
                println!("Cancelled.");
                return Ok(());
            }
            let cleared = ctx.cart_service.clear(return_stock)?;
            success(&format!("Removed {} line(s) from the cart", cleared.data));
        }
    }

    Ok(())
}
