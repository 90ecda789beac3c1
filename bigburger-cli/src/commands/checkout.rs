//! Checkout command - pay for the cart

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Confirm, Input, Password, Select};

use super::{account, get_context};
use crate::output::{format_money, info, print_json, spinner, success, warning};
use bigburger_core::domain::payment::MAX_INSTALLMENTS;
use bigburger_core::domain::CardDetails;
use bigburger_core::services::{CheckoutOutcome, PaymentInstructions, PaymentRequest};
use bigburger_core::{Error, PaymentMethod, PaymentStatus, StorefrontContext};
use rust_decimal::Decimal;

const METHODS: [PaymentMethod; 3] = [PaymentMethod::Pix, PaymentMethod::Credit, PaymentMethod::Boleto];

fn choose_method(ctx: &StorefrontContext) -> Result<PaymentMethod> {
    let labels = METHODS
        .iter()
        .map(|&method| {
            let quote = ctx.checkout_service.quote(method)?;
            let label = match method {
                PaymentMethod::Pix => format!(
                    "PIX ({}, {}% off)",
                    format_money(quote.amount_due),
                    ctx.checkout_service.settings().pix_discount_percent
                ),
                PaymentMethod::Credit => format!("Credit card ({})", format_money(quote.amount_due)),
                PaymentMethod::Boleto => format!("Boleto ({})", format_money(quote.amount_due)),
            };
            Ok(label)
        })
        .collect::<Result<Vec<String>>>()?;

    let selection = Select::new()
        .with_prompt("Payment method")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(METHODS[selection])
}

fn prompt_card(amount: Decimal, installments: Option<u8>) -> Result<CardDetails> {
    let number: String = Input::new().with_prompt("Card number").interact_text()?;
    let holder_name: String = Input::new().with_prompt("Name on card").interact_text()?;
    let expiry: String = Input::new().with_prompt("Expiry (MM/YY)").interact_text()?;
    let cvv = Password::new().with_prompt("CVV").interact()?;

    let installments = match installments {
        Some(n) => n,
        None => {
            let options: Vec<String> = (1..=MAX_INSTALLMENTS)
                .map(|n| format!("{}x {}", n, format_money(amount / Decimal::from(n))))
                .collect();
            let selection = Select::new()
                .with_prompt("Installments")
                .items(&options)
                .default(0)
                .interact()?;
            (selection + 1) as u8
        }
    };

    Ok(CardDetails {
        number,
        holder_name,
        expiry,
        cvv,
        installments,
    })
}

fn print_outcome(outcome: &CheckoutOutcome) {
    match &outcome.instructions {
        PaymentInstructions::Pix(charge) => {
            println!("{}", "PIX copy-and-paste code:".bold());
            println!("  {}", charge.pix_code);
            println!("  Transaction: {}", charge.transaction_id);
        }
        PaymentInstructions::Boleto { boleto_code } => {
            println!("{}", "Boleto line:".bold());
            println!("  {}", boleto_code);
        }
        PaymentInstructions::Credit {
            last_four,
            installments,
        } => {
            println!("  Card ending in {}, {}x", last_four, installments);
        }
    }
    println!("  Amount: {}", format_money(outcome.amount_due));

    if let Some(order) = &outcome.order {
        success(&format!("Order {} placed", order.id));
        println!("  {} item(s), total {}", order.item_count(), format_money(order.data.total));
    }
}

pub fn run(method: Option<&str>, installments: Option<u8>, json: bool) -> Result<()> {
    let ctx = get_context()?;

    match ctx.auth_service.require_user() {
        Ok(_) => {}
        Err(Error::Unauthorized(_)) if !json => {
            info("Log in to finish your order.");
            account::prompt_login(&ctx, None)?;
        }
        Err(e) => return Err(e.into()),
    }

    let method = match method {
        Some(m) => m.parse::<PaymentMethod>()?,
        None if json => anyhow::bail!("--method is required with --json"),
        None => choose_method(&ctx)?,
    };
    let quote = ctx.checkout_service.quote(method)?;

    loop {
        let request = match method {
            PaymentMethod::Pix => PaymentRequest::Pix,
            PaymentMethod::Boleto => PaymentRequest::Boleto,
            PaymentMethod::Credit => PaymentRequest::Credit(prompt_card(quote.amount_due, installments)?),
        };

        if !json
            && !Confirm::new()
                .with_prompt(format!("Pay {} with {}?", format_money(quote.amount_due), method))
                .default(true)
                .interact()?
        {
            println!("Cancelled.");
            return Ok(());
        }

        let pb = spinner("Processing payment...", json);
        let result = ctx.checkout_service.checkout(&request);
        pb.finish_and_clear();
        let response = result?;

        if json {
            return print_json(&response);
        }

        if response.data.status == PaymentStatus::Paid {
            print_outcome(&response.data);
            return Ok(());
        }

        warning(&response.message);
        let retry = Confirm::new()
            .with_prompt("Try again?")
            .default(true)
            .interact()?;
        if !retry {
            return Ok(());
        }
        // failed -> initial
        response.data.status.retry()?;
    }
}
