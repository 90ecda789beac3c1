//! Service layer - storefront use cases
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on one feature area and talks to the store only through
//! [`crate::ports::Store`].

mod auth;
mod cart;
pub mod checkout;
mod contact;
pub mod logging;
mod order;
mod product;

pub use auth::{AuthService, LoginResponse};
pub use cart::CartService;
pub use checkout::{
    CheckoutOutcome, CheckoutQuote, CheckoutService, CheckoutSettings, PaymentInstructions,
    PaymentRequest, PaymentSimulator,
};
pub use contact::ContactService;
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use order::OrderService;
pub use product::ProductService;
