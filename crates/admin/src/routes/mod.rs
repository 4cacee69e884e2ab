//! HTTP route handlers for the admin API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (database)
//!
//! # Auth
//! POST   /api/auth/login              - Operator login
//! POST   /api/auth/logout             - Logout
//! GET    /api/auth/me                 - Current operator
//!
//! # Products (writes require a writer role)
//! GET    /api/products                - All products, inactive included
//! POST   /api/products                - Create
//! GET    /api/products/{id}           - Detail with variants
//! PUT    /api/products/{id}           - Full update
//! DELETE /api/products/{id}           - Hard delete
//! POST   /api/products/{id}/active    - Activate / deactivate
//! PUT    /api/products/{id}/variants  - Replace variant set
//!
//! # Taxonomy
//! GET/POST       /api/categories
//! PUT/DELETE     /api/categories/{id}
//! GET/POST       /api/subcategories
//! PUT/DELETE     /api/subcategories/{id}
//! GET/POST       /api/sizes            DELETE /api/sizes/{id}
//! GET/POST       /api/materials        DELETE /api/materials/{id}
//! GET/POST       /api/layouts          DELETE /api/layouts/{id}
//!
//! # Content
//! GET/POST       /api/banners
//! PUT/DELETE     /api/banners/{id}
//! GET/POST       /api/languages
//! DELETE         /api/languages/{id}
//! POST           /api/languages/{id}/active
//!
//! # Orders
//! GET    /api/orders                  - All orders (?status=)
//! GET    /api/orders/{id}             - Detail with lines
//! POST   /api/orders/{id}/status      - Advance fulfilment status
//!
//! # Inbox
//! GET    /api/contacts                - Contact messages
//! DELETE /api/contacts/{id}           - Remove handled message
//! GET    /api/subscribers             - Newsletter subscribers
//! ```

pub mod auth;
pub mod content;
pub mod inbox;
pub mod orders;
pub mod products;
pub mod taxonomy;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
        .route("/{id}/active", post(products::set_active))
        .route("/{id}/variants", put(products::replace_variants))
}

/// Create the taxonomy routes router.
pub fn taxonomy_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(taxonomy::categories).post(taxonomy::create_category),
        )
        .route(
            "/categories/{id}",
            put(taxonomy::update_category).delete(taxonomy::delete_category),
        )
        .route(
            "/subcategories",
            get(taxonomy::subcategories).post(taxonomy::create_subcategory),
        )
        .route(
            "/subcategories/{id}",
            put(taxonomy::update_subcategory).delete(taxonomy::delete_subcategory),
        )
        .route("/sizes", get(taxonomy::sizes).post(taxonomy::create_size))
        .route("/sizes/{id}", delete(taxonomy::delete_size))
        .route(
            "/materials",
            get(taxonomy::materials).post(taxonomy::create_material),
        )
        .route("/materials/{id}", delete(taxonomy::delete_material))
        .route(
            "/layouts",
            get(taxonomy::layouts).post(taxonomy::create_layout),
        )
        .route("/layouts/{id}", delete(taxonomy::delete_layout))
}

/// Create the content routes router.
pub fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/banners", get(content::banners).post(content::create_banner))
        .route(
            "/banners/{id}",
            put(content::update_banner).delete(content::delete_banner),
        )
        .route(
            "/languages",
            get(content::languages).post(content::create_language),
        )
        .route("/languages/{id}", delete(content::delete_language))
        .route("/languages/{id}/active", post(content::set_language_active))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
        .route("/{id}/status", post(orders::set_status))
}

/// Create the inbox routes router.
pub fn inbox_routes() -> Router<AppState> {
    Router::new()
        .route("/contacts", get(inbox::contacts))
        .route("/contacts/{id}", delete(inbox::delete_contact))
        .route("/subscribers", get(inbox::subscribers))
}

/// Create all routes for the admin API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/products", product_routes())
        .merge(taxonomy_routes())
        .merge(content_routes())
        .nest("/orders", order_routes())
        .merge(inbox_routes())
}
