//! Checkout service - simulated payment and order placement
//!
//! Payments never leave the process: card approval is a random draw after a
//! delay, PIX and boleto always succeed after a shorter delay. A paid
//! checkout turns the cart into an order and empties the cart without
//! returning stock, since those units were sold.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::Serialize;

use super::auth::AuthService;
use super::cart::CartService;
use super::order::OrderService;
use crate::domain::payment::{amount_due, BOLETO_CODE, DEFAULT_PIX_DISCOUNT_PERCENT};
use crate::domain::result::{ApiResponse, Error, Result};
use crate::domain::{
    describe_validation, CardDetails, CartSummary, Order, OrderData, OrderStatus, PaymentMethod,
    PaymentStatus, PixCharge,
};
use crate::ports::{SessionStore, Store};

pub const DEFAULT_CARD_DECLINE_RATE: f64 = 0.2;
pub const DEFAULT_CARD_DELAY_MS: u64 = 3000;
pub const DEFAULT_INSTANT_DELAY_MS: u64 = 2000;
pub const DEFAULT_MERCHANT_NAME: &str = "Big Burger";

#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    /// Probability in `[0, 1]` that a card payment is declined
    pub card_decline_rate: f64,
    pub card_delay: Duration,
    /// PIX and boleto processing time
    pub instant_delay: Duration,
    pub pix_discount_percent: u32,
    pub merchant_name: String,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            card_decline_rate: DEFAULT_CARD_DECLINE_RATE,
            card_delay: Duration::from_millis(DEFAULT_CARD_DELAY_MS),
            instant_delay: Duration::from_millis(DEFAULT_INSTANT_DELAY_MS),
            pix_discount_percent: DEFAULT_PIX_DISCOUNT_PERCENT,
            merchant_name: DEFAULT_MERCHANT_NAME.to_string(),
        }
    }
}

impl CheckoutSettings {
    /// No delays; used by tests
    pub fn instant() -> Self {
        Self {
            card_delay: Duration::ZERO,
            instant_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Stand-in for a payment gateway
pub struct PaymentSimulator {
    settings: CheckoutSettings,
    rng: Mutex<StdRng>,
}

impl PaymentSimulator {
    pub fn new(settings: CheckoutSettings) -> Self {
        Self {
            settings,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic approvals for tests
    pub fn with_seed(settings: CheckoutSettings, seed: u64) -> Self {
        Self {
            settings,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn settings(&self) -> &CheckoutSettings {
        &self.settings
    }

    /// Wait out the processing delay and decide
    pub fn authorize(&self, method: PaymentMethod) -> Result<bool> {
        match method {
            PaymentMethod::Credit => {
                std::thread::sleep(self.settings.card_delay);
                let draw: f64 = self
                    .rng
                    .lock()
                    .map_err(|_| Error::server("payment simulator lock poisoned"))?
                    .gen();
                Ok(draw >= self.settings.card_decline_rate)
            }
            PaymentMethod::Pix | PaymentMethod::Boleto => {
                std::thread::sleep(self.settings.instant_delay);
                Ok(true)
            }
        }
    }
}

/// What the customer chose to pay with
#[derive(Debug, Clone)]
pub enum PaymentRequest {
    Pix,
    Boleto,
    Credit(CardDetails),
}

impl PaymentRequest {
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentRequest::Pix => PaymentMethod::Pix,
            PaymentRequest::Boleto => PaymentMethod::Boleto,
            PaymentRequest::Credit(_) => PaymentMethod::Credit,
        }
    }
}

/// Method specific details shown to the customer
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum PaymentInstructions {
    Pix(PixCharge),
    #[serde(rename_all = "camelCase")]
    Boleto { boleto_code: String },
    #[serde(rename_all = "camelCase")]
    Credit { last_four: String, installments: u8 },
}

/// Amount due before the customer confirms
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutQuote {
    pub cart: CartSummary,
    pub method: PaymentMethod,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_due: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOutcome {
    pub status: PaymentStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_due: Decimal,
    pub instructions: PaymentInstructions,
    /// Present only when the payment went through
    pub order: Option<Order>,
}

pub struct CheckoutService {
    auth: AuthService,
    cart: CartService,
    orders: OrderService,
    simulator: PaymentSimulator,
}

impl CheckoutService {
    pub fn new(store: Arc<dyn Store>, session: Arc<dyn SessionStore>, simulator: PaymentSimulator) -> Self {
        Self {
            auth: AuthService::new(store.clone(), session),
            cart: CartService::new(store.clone()),
            orders: OrderService::new(store),
            simulator,
        }
    }

    pub fn settings(&self) -> &CheckoutSettings {
        self.simulator.settings()
    }

    /// Cart total and the amount due for `method`
    pub fn quote(&self, method: PaymentMethod) -> Result<CheckoutQuote> {
        let cart = self.cart.summary()?;
        if cart.is_empty() {
            return Err(Error::validation("Cart is empty"));
        }
        let amount_due = amount_due(method, cart.total, self.settings().pix_discount_percent);
        Ok(CheckoutQuote {
            cart,
            method,
            amount_due,
        })
    }

    /// Run one payment attempt
    ///
    /// A declined card is not an error: the outcome carries
    /// `PaymentStatus::Failed` and the cart is left as it was, ready for a
    /// retry. Errors are reserved for guard, validation and store failures.
    pub fn checkout(&self, request: &PaymentRequest) -> Result<ApiResponse<CheckoutOutcome>> {
        let user = self.auth.require_user()?;
        let method = request.method();

        if let PaymentRequest::Credit(card) = request {
            let errors = card.validate(Utc::now().date_naive());
            if !errors.is_empty() {
                return Err(Error::validation(describe_validation(&errors)));
            }
        }

        let quote = self.quote(method)?;
        let instructions = match request {
            PaymentRequest::Pix => PaymentInstructions::Pix(PixCharge::generate(
                quote.amount_due,
                &self.settings().merchant_name,
                Utc::now().timestamp_millis(),
            )),
            PaymentRequest::Boleto => PaymentInstructions::Boleto {
                boleto_code: BOLETO_CODE.to_string(),
            },
            PaymentRequest::Credit(card) => PaymentInstructions::Credit {
                last_four: card.last_four(),
                installments: card.installments,
            },
        };

        let status = PaymentStatus::Initial.begin()?;
        let approved = self.simulator.authorize(method)?;
        let status = status.settle(approved)?;

        if status != PaymentStatus::Paid {
            return Ok(ApiResponse {
                data: CheckoutOutcome {
                    status,
                    amount_due: quote.amount_due,
                    instructions,
                    order: None,
                },
                status: 402,
                message: "Payment declined. Please try again.".to_string(),
            });
        }

        let order = self
            .orders
            .create(OrderData {
                items: quote.cart.items.clone(),
                total: quote.cart.total,
                payment_method: method,
                status: OrderStatus::Completed,
                user_id: Some(user.id),
            })?
            .data;

        for item in &quote.cart.items {
            self.cart.remove(&item.id, false)?;
        }

        Ok(ApiResponse::created(
            CheckoutOutcome {
                status,
                amount_due: quote.amount_due,
                instructions,
                order: Some(order),
            },
            "Payment approved, order placed",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decline_rate_bounds() {
        let always = PaymentSimulator::with_seed(
            CheckoutSettings {
                card_decline_rate: 0.0,
                ..CheckoutSettings::instant()
            },
            7,
        );
        let never = PaymentSimulator::with_seed(
            CheckoutSettings {
                card_decline_rate: 1.0,
                ..CheckoutSettings::instant()
            },
            7,
        );
        for _ in 0..50 {
            assert!(always.authorize(PaymentMethod::Credit).unwrap());
            assert!(!never.authorize(PaymentMethod::Credit).unwrap());
        }
    }

    #[test]
    fn test_default_rate_approves_most_cards() {
        let simulator = PaymentSimulator::with_seed(CheckoutSettings::instant(), 42);
        let approved = (0..1000)
            .filter(|_| simulator.authorize(PaymentMethod::Credit).unwrap())
            .count();
        assert!((700..=900).contains(&approved), "approved {}", approved);
    }

    #[test]
    fn test_instant_methods_always_approve() {
        let simulator = PaymentSimulator::with_seed(
            CheckoutSettings {
                card_decline_rate: 1.0,
                ..CheckoutSettings::instant()
            },
            1,
        );
        assert!(simulator.authorize(PaymentMethod::Pix).unwrap());
        assert!(simulator.authorize(PaymentMethod::Boleto).unwrap());
    }

    #[test]
    fn test_same_seed_same_decisions() {
        let a = PaymentSimulator::with_seed(CheckoutSettings::instant(), 99);
        let b = PaymentSimulator::with_seed(CheckoutSettings::instant(), 99);
        let run = |s: &PaymentSimulator| {
            (0..20)
                .map(|_| s.authorize(PaymentMethod::Credit).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(&a), run(&b));
    }

    #[test]
    fn test_instructions_serialize_with_method_tag() {
        let value = serde_json::to_value(PaymentInstructions::Boleto {
            boleto_code: BOLETO_CODE.to_string(),
        })
        .unwrap();
        assert_eq!(value["method"], "boleto");
        assert_eq!(value["boletoCode"], BOLETO_CODE);
    }
}
