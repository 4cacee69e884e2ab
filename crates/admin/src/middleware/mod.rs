//! Request middleware: sessions and admin authentication extractors.

pub mod auth;
pub mod session;
