//! Integration tests for SafeGear.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! docker compose up -d db
//! cargo run -p safegear-cli -- migrate
//!
//! # Run the tests
//! cargo test -p safegear-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_contracts` - wire-format contracts of the storefront API
//! - `cart_pricing_flow` - cross-crate pricing and cart aggregation
//! - `admin_order_rules` - order lifecycle and operator permission rules
//!
//! The current tests exercise the crates' public surfaces without running
//! servers. A live harness would look like:
//!
//! ```rust,ignore
//! use reqwest::Client;
//! use sqlx::PgPool;
//!
//! pub struct TestContext {
//!     pub client: Client,
//!     pub storefront_url: String,
//!     pub admin_url: String,
//!     pub pool: PgPool,
//! }
//!
//! #[tokio::test]
//! async fn test_storefront_health() {
//!     let ctx = TestContext::new().await;
//!     let resp = ctx.client
//!         .get(format!("{}/health", ctx.storefront_url))
//!         .send()
//!         .await
//!         .unwrap();
//!     assert_eq!(resp.status(), 200);
//! }
//! ```
