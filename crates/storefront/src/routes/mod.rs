//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (database)
//!
//! # Catalog
//! GET  /api/products                - Product listing (priced)
//! GET  /api/products/{id}           - Product detail with priced variants
//! GET  /api/categories              - Category listing
//! GET  /api/subcategories           - Subcategory listing (?category=)
//! GET  /api/sizes                   - Size lookup
//! GET  /api/materials               - Material lookup
//! GET  /api/layouts                 - Layout lookup
//!
//! # Cart (requires auth)
//! GET  /api/cart                    - Current cart with live pricing
//! POST /api/cart/add                - Add a product
//! POST /api/cart/update             - Set a line's quantity (0 removes)
//! POST /api/cart/remove             - Remove a line
//!
//! # Checkout (requires auth)
//! POST /api/checkout                - Create order + gateway order
//! POST /api/checkout/verify         - Verify payment signature
//!
//! # Orders (requires auth)
//! GET  /api/orders                  - Order history
//! GET  /api/orders/{id}             - Order detail with lines
//!
//! # Auth
//! POST /api/auth/register           - Create account + session
//! POST /api/auth/login              - Login
//! POST /api/auth/logout             - Logout
//! GET  /api/auth/me                 - Current user
//!
//! # Content & capture
//! GET  /api/banners                 - Active banners
//! GET  /api/languages               - Active languages
//! POST /api/contact                 - Contact-form submission
//! POST /api/newsletter              - Newsletter subscription
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod contact;
pub mod content;
pub mod orders;
pub mod products;
pub mod taxonomy;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .route("/categories", get(taxonomy::categories))
        .route("/subcategories", get(taxonomy::subcategories))
        .route("/sizes", get(taxonomy::sizes))
        .route("/materials", get(taxonomy::materials))
        .route("/layouts", get(taxonomy::layouts))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::create))
        .route("/verify", post(checkout::verify))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .nest("/orders", order_routes())
        .nest("/auth", auth_routes())
        .route("/banners", get(content::banners))
        .route("/languages", get(content::languages))
        .route("/contact", post(contact::submit))
        .route("/newsletter", post(contact::subscribe))
}
