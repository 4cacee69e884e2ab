//! Admin services.

pub mod auth;
