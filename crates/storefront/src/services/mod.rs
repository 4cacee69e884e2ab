//! External-facing services: payment gateway and authentication.

pub mod auth;
pub mod razorpay;
