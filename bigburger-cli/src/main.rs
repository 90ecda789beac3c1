//! Big Burger CLI - order burgers from your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{account, cart, checkout, config, contact, logs, menu, orders, seed};

/// Big Burger - browse the menu, fill a cart and check out
#[derive(Parser)]
#[command(name = "bb", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the menu
    Menu {
        /// Only show one category (burgers, sides, drinks)
        #[arg(short, long)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect a single product
    Product {
        #[command(subcommand)]
        command: menu::ProductCommands,
    },

    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        command: cart::CartCommands,
    },

    /// Pay for the cart and place an order
    Checkout {
        /// Payment method (pix, credit, boleto)
        #[arg(short, long)]
        method: Option<String>,
        /// Number of card installments
        #[arg(long)]
        installments: Option<u8>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse past orders
    Orders {
        #[command(subcommand)]
        command: orders::OrdersCommands,
    },

    /// Talk to the restaurant
    Contact {
        #[command(subcommand)]
        command: contact::ContactCommands,
    },

    /// Log in with email and password
    Login {
        /// Account email
        #[arg(long)]
        email: Option<String>,
    },

    /// Create an account
    Register {
        /// Full name
        #[arg(long)]
        name: Option<String>,
        /// Account email
        #[arg(long)]
        email: Option<String>,
        /// Phone number
        #[arg(long)]
        phone: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load the demo menu and account into the store
    Seed {
        /// Replace the local database instead of filling gaps
        #[arg(long)]
        reset: bool,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

impl Commands {
    /// Name recorded in the event log
    fn name(&self) -> &'static str {
        match self {
            Commands::Menu { .. } => "menu",
            Commands::Product { .. } => "product",
            Commands::Cart { .. } => "cart",
            Commands::Checkout { .. } => "checkout",
            Commands::Orders { .. } => "orders",
            Commands::Contact { .. } => "contact",
            Commands::Login { .. } => "login",
            Commands::Register { .. } => "register",
            Commands::Logout => "logout",
            Commands::Whoami { .. } => "whoami",
            Commands::Seed { .. } => "seed",
            Commands::Config { .. } => "config",
            Commands::Logs { .. } => "logs",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let name = cli.command.name();
    let logger = commands::get_logger();

    let result = run(cli);
    commands::log_outcome(&logger, name, &result);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Menu { category, json } => menu::run(category.as_deref(), json),
        Commands::Product { command } => menu::run_product(command),
        Commands::Cart { command } => cart::run(command),
        Commands::Checkout {
            method,
            installments,
            json,
        } => checkout::run(method.as_deref(), installments, json),
        Commands::Orders { command } => orders::run(command),
        Commands::Contact { command } => contact::run(command),
        Commands::Login { email } => account::login(email),
        Commands::Register { name, email, phone } => account::register(name, email, phone),
        Commands::Logout => account::logout(),
        Commands::Whoami { json } => account::whoami(json),
        Commands::Seed { reset, force } => seed::run(reset, force),
        Commands::Config { command } => config::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
