//! Seed command - load the demo menu and account

use anyhow::Result;
use dialoguer::Confirm;

use super::{get_context, get_data_dir};
use crate::output::{info, success};
use bigburger_core::adapters::demo;
use bigburger_core::adapters::json_file::JsonFileStore;
use bigburger_core::config::StoreBackend;
use bigburger_core::Error;

pub fn run(reset: bool, force: bool) -> Result<()> {
    let ctx = get_context()?;

    if reset {
        if ctx.config.backend != StoreBackend::Local {
            anyhow::bail!("--reset only applies to the local backend");
        }
        if !force
            && !Confirm::new()
                .with_prompt("Replace the local database with the demo data?")
                .default(false)
                .interact()?
        {
            println!("Cancelled.");
            return Ok(());
        }
        JsonFileStore::in_dir(&get_data_dir()).reset(&demo::seed_collections())?;
        success("Local database reset to the demo menu");
        return Ok(());
    }

    let mut created = 0;
    for product in demo::generate_demo_products() {
        match ctx.product_service.get(&product.id) {
            Ok(_) => {}
            Err(Error::NotFound(_)) => {
                ctx.product_service.create(&product)?;
                created += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    let users = ctx.store.list_users()?.data;
    for record in demo::generate_demo_users() {
        if !users.iter().any(|u| u.user.email == record.user.email) {
            ctx.store.create_user(&record)?;
            created += 1;
        }
    }

    if created == 0 {
        info(&format!("Demo data already present on {}", ctx.backend_name()));
    } else {
        success(&format!("Created {} record(s) on {}", created, ctx.backend_name()));
    }
    Ok(())
}
