//! SafeGear Admin - back-office API.
//!
//! Serves the operator-facing JSON API: catalog and taxonomy management
//! (including category/subcategory discounts), banners and languages, order
//! fulfilment and the contact/newsletter inbox.
//!
//! Writes made here are immediately visible to the storefront binary, which
//! reads the same database.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
