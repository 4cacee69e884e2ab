//! SafeGear Storefront - public shop API.
//!
//! Serves the buyer-facing JSON API: catalog browsing with derived pricing,
//! the per-user cart, Razorpay checkout, order history, content (banners,
//! languages) and contact/newsletter capture.
//!
//! The storefront only ever *reads* the catalog; products, taxonomy and
//! content are maintained by the admin binary against the same database.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod pricing;
pub mod routes;
pub mod services;
pub mod state;
