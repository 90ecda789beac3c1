//! Core domain entities
//!
//! All storefront entities are defined here. These are pure data structures
//! with validation logic - no I/O.

mod wire;
mod product;
mod cart;
mod order;
mod user;
mod contact;
pub mod payment;
pub mod token;
pub mod result;

pub use product::{AvailabilityPatch, Product};
pub use cart::{CartItem, CartSummary, QuantityPatch};
pub use order::{Order, OrderData, OrderStatus};
pub use user::{NewUser, User, UserRecord};
pub use contact::{describe as describe_validation, is_valid_email, Contact, ContactForm, ValidationError};
pub use payment::{CardDetails, PaymentMethod, PaymentStatus, PixCharge};
pub use token::AuthToken;
