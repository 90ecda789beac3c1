//! Orders command - browse past orders

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::get_context;
use crate::output::{create_table, format_money, print_json};

#[derive(Subcommand)]
pub enum OrdersCommands {
    /// List orders of the logged-in user, newest first
    List {
        /// List every order in the store
        #[arg(long)]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one order with its items
    Show {
        /// Order id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: OrdersCommands) -> Result<()> {
    let ctx = get_context()?;

    match command {
        OrdersCommands::List { all, json } => {
            let orders = if all {
                ctx.order_service.list()?.data
            } else {
                let user = ctx.auth_service.require_user()?;
                ctx.order_service.list_for_user(&user.id)?.data
            };

            if json {
                return print_json(&orders);
            }
            if orders.is_empty() {
                println!("No orders yet.");
                return Ok(());
            }

            let mut table = create_table();
            table.set_header(vec!["ID", "Date", "Items", "Payment", "Status", "Total"]);
            for order in &orders {
                table.add_row(vec![
                    order.id.clone(),
                    order.created_at.format("%Y-%m-%d %H:%M").to_string(),
                    order.item_count().to_string(),
                    order.data.payment_method.to_string(),
                    order.data.status.as_str().to_string(),
                    format_money(order.data.total),
                ]);
            }
            println!("{}", table);
        }
        OrdersCommands::Show { id, json } => {
            let order = ctx.order_service.get(&id)?.data;

            if json {
                return print_json(&order);
            }

            println!("{}", format!("Order {}", order.id).bold());
            println!("  Placed: {}", order.created_at.format("%Y-%m-%d %H:%M:%S"));
            println!("  Payment: {}", order.data.payment_method);
            println!("  Status: {}", order.data.status.as_str());

            let mut table = create_table();
            table.set_header(vec!["Item", "Qty", "Subtotal"]);
            for item in &order.data.items {
                table.add_row(vec![
                    item.name.clone(),
                    item.quantity.to_string(),
                    format_money(item.line_total()),
                ]);
            }
            println!("{}", table);
            println!("  Total: {}", format_money(order.data.total).bold());
        }
    }

    Ok(())
}
