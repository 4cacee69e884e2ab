//! SafeGear Core - Shared types and pricing.
//!
//! This crate provides common types used across all SafeGear components:
//! - `storefront` - Public-facing e-commerce API
//! - `admin` - Internal back-office API
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure computation - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and statuses
//! - [`pricing`] - Price derivation (MRP, discounts, sale prices)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod pricing;
pub mod types;

pub use pricing::{DerivedPricing, PricingContext, PricingInput, derive};
pub use types::*;
