//! Contact command - send a message to the restaurant

use anyhow::Result;
use clap::Subcommand;

use super::get_context;
use crate::output::{create_table, print_json, success};
use bigburger_core::domain::ContactForm;
use dialoguer::Input;

#[derive(Subcommand)]
pub enum ContactCommands {
    /// Send a message
    Send {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },
    /// List received messages
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn field(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

pub fn run(command: ContactCommands) -> Result<()> {
    let ctx = get_context()?;

    match command {
        ContactCommands::Send {
            name,
            email,
            message,
        } => {
            let form = ContactForm {
                name: field(name, "Name")?,
                email: field(email, "Email")?,
                message: field(message, "Message")?,
            };
            ctx.contact_service.submit(form)?;
            success("Message sent! We will get back to you soon.");
        }
        ContactCommands::List { json } => {
            let contacts = ctx.contact_service.list()?.data;
            if json {
                return print_json(&contacts);
            }
            if contacts.is_empty() {
                println!("No messages.");
                return Ok(());
            }

            let mut table = create_table();
            table.set_header(vec!["ID", "Date", "Name", "Email", "Message"]);
            for contact in &contacts {
                let date = contact
                    .created_at
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                table.add_row(vec![
                    contact.id.clone(),
                    date,
                    contact.form.name.clone(),
                    contact.form.email.clone(),
                    contact.form.message.clone(),
                ]);
            }
            println!("{}", table);
        }
    }

    Ok(())
}
