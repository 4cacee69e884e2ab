//! Domain models for the storefront.
//!
//! Row types are kept close to the database schema; response shaping for the
//! priced catalog and cart lives in [`crate::pricing`].

pub mod cart;
pub mod catalog;
pub mod order;
pub mod user;

pub use cart::{Cart, CartItem};
pub use catalog::{Category, LookupItem, PriceVariant, Product, Subcategory};
pub use order::{Order, OrderItem};
pub use user::{CurrentUser, User, session_keys};
