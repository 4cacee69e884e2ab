//! Wire-format contracts of the storefront API.
//!
//! The web client binds to these exact JSON field names; renames here are
//! breaking changes for it.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::Value;

use safegear_core::pricing::PricingContext;
use safegear_core::{CartId, CategoryId, ProductId, ProductKind, SubcategoryId, UserId};
use safegear_storefront::models::{Cart, CartItem, Product};
use safegear_storefront::pricing::{build_cart_view, price_product};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn sample_product() -> Product {
    Product {
        id: ProductId::new(42),
        title: "Fire Exit Sign".to_string(),
        description: "Photoluminescent exit sign.".to_string(),
        images: vec!["https://cdn.safegear.in/exit.jpg".to_string()],
        mrp: Some(dec("500")),
        sale_price: None,
        discount: Some(dec("10")),
        kind: ProductKind::Flat,
        category_id: Some(CategoryId::new(3)),
        subcategory_id: Some(SubcategoryId::new(7)),
        product_code: "SG-SIGN-042".to_string(),
        code: "EXIT-PL".to_string(),
        active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn test_priced_product_field_names() {
    let priced = price_product(&sample_product(), &PricingContext::default());
    let json = serde_json::to_value(&priced).unwrap();
    let object = json.as_object().unwrap();

    for key in [
        "id",
        "title",
        "description",
        "images",
        "price",
        "salePrice",
        "discount",
        "mrp",
        "type",
        "category",
        "subcategory",
        "productCode",
        "code",
        "discountPercentage",
        "discountAmount",
    ] {
        assert!(object.contains_key(key), "missing field {key}");
    }
    // Raw column names must not leak through.
    assert!(!object.contains_key("kind"));
    assert!(!object.contains_key("sale_price"));
    assert!(!object.contains_key("category_id"));
}

#[test]
fn test_priced_product_values_are_derived() {
    let priced = price_product(&sample_product(), &PricingContext::default());
    let json = serde_json::to_value(&priced).unwrap();

    assert_eq!(json["price"], Value::String("450.00".to_string()));
    assert_eq!(json["mrp"], Value::String("500".to_string()));
    assert_eq!(json["type"], Value::String("flat".to_string()));
    assert_eq!(json["category"], serde_json::json!(3));
}

#[test]
fn test_cart_view_field_names() {
    let cart = Cart {
        id: CartId::new(1),
        user_id: UserId::new(9),
        total_price: Decimal::ZERO,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    let product = sample_product();
    let items = vec![CartItem {
        product_id: product.id,
        quantity: 2,
    }];
    let resolved = HashMap::from([(product.id, (product, PricingContext::default()))]);

    let view = build_cart_view(&cart, &items, &resolved);
    let json = serde_json::to_value(&view).unwrap();
    let object = json.as_object().unwrap();

    for key in ["id", "user", "products", "totalPrice", "createdAt", "updatedAt"] {
        assert!(object.contains_key(key), "missing field {key}");
    }
    assert_eq!(json["user"], serde_json::json!(9));

    let line = &json["products"][0];
    assert_eq!(line["quantity"], serde_json::json!(2));
    assert_eq!(line["lineTotal"], Value::String("900.00".to_string()));
    assert_eq!(line["product"]["productCode"], Value::String("SG-SIGN-042".to_string()));
}
