//! Database-backed order persistence rules.
//!
//! These tests need a migrated PostgreSQL database and are ignored by
//! default:
//!
//! ```bash
//! cargo run -p safegear-cli -- migrate
//! DATABASE_URL=postgres://... cargo test -p safegear-integration-tests -- --ignored
//! ```

use rust_decimal::Decimal;
use sqlx::PgPool;

use safegear_core::{OrderStatus, PaymentStatus, ProductId, UserId};
use safegear_storefront::db::orders::{OrderLine, OrderRepository};

async fn connect() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    PgPool::connect(&url).await.expect("database connection")
}

async fn test_user(pool: &PgPool) -> UserId {
    sqlx::query_scalar(
        r"
        INSERT INTO users (email, password_hash, name)
        VALUES ('orders-it@safegear.in', 'not-a-real-hash', 'Order Tester')
        ON CONFLICT (email) DO UPDATE SET updated_at = NOW()
        RETURNING id
        ",
    )
    .fetch_one(pool)
    .await
    .expect("test user")
}

fn unique_gateway_id() -> String {
    format!(
        "order_it_{}",
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    )
}

#[tokio::test]
#[ignore = "needs a migrated database"]
async fn test_order_carries_gateway_id_from_creation() {
    let pool = connect().await;
    let user = test_user(&pool).await;
    let gateway_id = unique_gateway_id();

    let order = OrderRepository::new(&pool)
        .create(user, Decimal::new(49900, 2), "INR", &gateway_id, &[])
        .await
        .expect("create order");

    assert_eq!(order.razorpay_order_id.as_deref(), Some(gateway_id.as_str()));
    assert_eq!(order.status, OrderStatus::Created);
    assert_eq!(order.payment_status, PaymentStatus::Pending);
}

#[tokio::test]
#[ignore = "needs a migrated database"]
async fn test_failed_snapshot_line_leaves_no_order() {
    let pool = connect().await;
    let user = test_user(&pool).await;
    let gateway_id = unique_gateway_id();

    // A line referencing a product that doesn't exist fails the insert; the
    // order row must roll back with it, leaving nothing behind for the
    // buyer's order history.
    let ghost_line = OrderLine {
        product_id: ProductId::new(-1),
        title: "Ghost".to_string(),
        unit_price: Decimal::ONE,
        quantity: 1,
    };

    let repo = OrderRepository::new(&pool);
    let result = repo
        .create(user, Decimal::ONE, "INR", &gateway_id, &[ghost_line])
        .await;
    assert!(result.is_err());

    let orphan = repo
        .get_by_razorpay_order(&gateway_id)
        .await
        .expect("lookup");
    assert!(orphan.is_none());
}
