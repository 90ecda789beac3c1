//! Payment domain: methods, the checkout status machine, card checks and
//! the decorative PIX / boleto payloads.
//!
//! Nothing here talks to a gateway. Approval is decided by the checkout
//! service; this module only knows which transitions are legal.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rand::distributions::Alphanumeric;
use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};
use super::ValidationError;

/// Fixed boleto line shown to the customer
pub const BOLETO_CODE: &str = "34191.79001 01043.510047 91020.150008 5 84460000026000";

/// Default PIX discount (percent)
pub const DEFAULT_PIX_DISCOUNT_PERCENT: u32 = 5;

/// Highest number of card installments offered
pub const MAX_INSTALLMENTS: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Pix,
    Credit,
    Boleto,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "pix",
            PaymentMethod::Credit => "credit",
            PaymentMethod::Boleto => "boleto",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pix" => Ok(PaymentMethod::Pix),
            "credit" | "card" => Ok(PaymentMethod::Credit),
            "boleto" => Ok(PaymentMethod::Boleto),
            other => Err(Error::validation(format!("Unknown payment method: {}", other))),
        }
    }
}

/// Checkout payment status
///
/// ```text
/// initial -> processing -> paid
///                       -> failed -> initial (retry)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Initial,
    Processing,
    Paid,
    Failed,
    Expired,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Initial => "initial",
            PaymentStatus::Processing => "processing",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Expired => "expired",
        }
    }

    /// `initial -> processing`
    pub fn begin(self) -> Result<Self> {
        match self {
            PaymentStatus::Initial => Ok(PaymentStatus::Processing),
            other => Err(invalid_transition(other, PaymentStatus::Processing)),
        }
    }

    /// `processing -> paid | failed`
    pub fn settle(self, approved: bool) -> Result<Self> {
        let next = if approved {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Failed
        };
        match self {
            PaymentStatus::Processing => Ok(next),
            other => Err(invalid_transition(other, next)),
        }
    }

    /// `failed -> initial`
    pub fn retry(self) -> Result<Self> {
        match self {
            PaymentStatus::Failed => Ok(PaymentStatus::Initial),
            other => Err(invalid_transition(other, PaymentStatus::Initial)),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentStatus::Paid | PaymentStatus::Expired)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn invalid_transition(from: PaymentStatus, to: PaymentStatus) -> Error {
    Error::validation(format!("Invalid payment transition: {} -> {}", from, to))
}

/// Amount charged for a method: PIX gets the flat discount
pub fn amount_due(method: PaymentMethod, total: Decimal, pix_discount_percent: u32) -> Decimal {
    match method {
        PaymentMethod::Pix => {
            let factor = Decimal::from(100u32.saturating_sub(pix_discount_percent)) / Decimal::from(100);
            (total * factor).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        }
        PaymentMethod::Credit | PaymentMethod::Boleto => total,
    }
}

/// Card details entered at checkout
#[derive(Debug, Clone)]
pub struct CardDetails {
    pub number: String,
    pub holder_name: String,
    /// `MM/YY`
    pub expiry: String,
    pub cvv: String,
    pub installments: u8,
}

impl CardDetails {
    /// Check every field, reporting all failures at once
    pub fn validate(&self, today: NaiveDate) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let digits: String = self.number.chars().filter(|c| !c.is_whitespace()).collect();
        if self.number.trim().is_empty() {
            errors.push(ValidationError::new("cardNumber", "Card number is required"));
        } else if !digits.chars().all(|c| c.is_ascii_digit()) {
            errors.push(ValidationError::new("cardNumber", "Card number must contain only digits"));
        } else if digits.len() < 16 {
            errors.push(ValidationError::new("cardNumber", "Card number must have at least 16 digits"));
        }

        let name = self.holder_name.trim();
        if name.is_empty() {
            errors.push(ValidationError::new("cardName", "Name on card is required"));
        } else if name.chars().count() < 2 {
            errors.push(ValidationError::new("cardName", "Name must have at least 2 characters"));
        } else if !name.chars().all(|c| c.is_ascii_alphabetic() || c.is_whitespace()) {
            errors.push(ValidationError::new("cardName", "Name must contain only letters"));
        }

        if let Err(message) = check_expiry(&self.expiry, today) {
            errors.push(ValidationError::new("expiry", message));
        }

        let cvv = self.cvv.trim();
        if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
            errors.push(ValidationError::new("cvv", "CVV must have 3 or 4 digits"));
        }

        if self.installments == 0 || self.installments > MAX_INSTALLMENTS {
            errors.push(ValidationError::new(
                "installments",
                format!("Installments must be between 1 and {}", MAX_INSTALLMENTS),
            ));
        }

        errors
    }

    /// Last four digits, the only part of the number that may be shown or logged
    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self.number.chars().filter(|c| c.is_ascii_digit()).collect();
        let start = digits.len().saturating_sub(4);
        digits[start..].iter().collect()
    }
}

fn check_expiry(expiry: &str, today: NaiveDate) -> std::result::Result<(), &'static str> {
    const BAD_FORMAT: &str = "Expiry must be in MM/YY format";

    let (month, year) = expiry.trim().split_once('/').ok_or(BAD_FORMAT)?;
    let two_digits = |s: &str| s.len() == 2 && s.chars().all(|c| c.is_ascii_digit());
    if !two_digits(month) || !two_digits(year) {
        return Err(BAD_FORMAT);
    }
    let month: u32 = month.parse().map_err(|_| BAD_FORMAT)?;
    let year: i32 = year.parse().map_err(|_| BAD_FORMAT)?;

    let current_year = today.year() % 100;
    let current_month = today.month();

    if !(1..=12).contains(&month)
        || year < current_year
        || (year == current_year && month < current_month)
    {
        return Err("Expiry date is invalid or in the past");
    }
    Ok(())
}

/// Decorative PIX charge; the payload is not a scannable BR Code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixCharge {
    pub pix_code: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub merchant_name: String,
    pub transaction_id: String,
}

impl PixCharge {
    pub fn generate(amount: Decimal, merchant_name: &str, now_ms: i64) -> Self {
        let transaction_id = pix_transaction_id(now_ms);
        let pix_code = format!(
            "00020126580014br.gov.bcb.pix0136{}520400005303986540{:.2}5802BR5913{}6009Sao Paulo62070503***6304",
            transaction_id, amount, merchant_name
        );

        Self {
            pix_code,
            amount,
            merchant_name: merchant_name.to_string(),
            transaction_id,
        }
    }
}

/// `PIX<millis><9 uppercase alphanumerics>`
fn pix_transaction_id(now_ms: i64) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect();
    format!("PIX{}{}", now_ms, suffix)
}
