//! Order lifecycle and operator permission rules, plus the admin API's
//! wire-format contract for catalog rows.

use chrono::Utc;
use rust_decimal::Decimal;

use safegear_admin::db::products::{AdminProduct, AdminVariant};
use safegear_core::types::{AdminRole, OrderStatus};
use safegear_core::{
    CategoryId, LayoutId, MaterialId, ProductId, ProductKind, SizeId, SubcategoryId, VariantId,
};

const ALL_STATUSES: [OrderStatus; 5] = [
    OrderStatus::Created,
    OrderStatus::Paid,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
];

/// The full transition matrix the admin order endpoint enforces. Forward
/// movement only, cancellation from any non-terminal state, terminal states
/// frozen.
#[test]
fn test_order_status_transition_matrix() {
    let allowed = [
        (OrderStatus::Created, OrderStatus::Paid),
        (OrderStatus::Created, OrderStatus::Cancelled),
        (OrderStatus::Paid, OrderStatus::Shipped),
        (OrderStatus::Paid, OrderStatus::Cancelled),
        (OrderStatus::Shipped, OrderStatus::Delivered),
        (OrderStatus::Shipped, OrderStatus::Cancelled),
    ];

    for from in ALL_STATUSES {
        for to in ALL_STATUSES {
            let expected = allowed.contains(&(from, to));
            assert_eq!(
                from.can_transition_to(to),
                expected,
                "{from:?} -> {to:?} should be {expected}"
            );
        }
    }
}

#[test]
fn test_terminal_states_accept_nothing() {
    for terminal in [OrderStatus::Delivered, OrderStatus::Cancelled] {
        for to in ALL_STATUSES {
            assert!(!terminal.can_transition_to(to));
        }
    }
}

#[test]
fn test_roles_gate_catalog_writes() {
    assert!(AdminRole::SuperAdmin.can_write());
    assert!(AdminRole::Admin.can_write());
    assert!(!AdminRole::Viewer.can_write());
}

#[test]
fn test_roles_parse_from_database_strings() {
    assert_eq!("super_admin".parse::<AdminRole>().unwrap(), AdminRole::SuperAdmin);
    assert_eq!("viewer".parse::<AdminRole>().unwrap(), AdminRole::Viewer);
    assert!("root".parse::<AdminRole>().is_err());
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn test_admin_product_wire_format() {
    let product = AdminProduct {
        id: ProductId::new(7),
        title: "Hard Hat".to_string(),
        description: String::new(),
        images: vec![],
        mrp: Some(dec("499")),
        sale_price: None,
        discount: None,
        kind: ProductKind::Flat,
        category_id: Some(CategoryId::new(2)),
        subcategory_id: Some(SubcategoryId::new(4)),
        product_code: "SG-PPE-007".to_string(),
        code: "HAT-01".to_string(),
        active: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let json = serde_json::to_value(&product).unwrap();
    let object = json.as_object().unwrap();

    assert_eq!(json["type"], serde_json::json!("flat"));
    assert_eq!(json["category"], serde_json::json!(2));
    assert_eq!(json["subcategory"], serde_json::json!(4));
    assert_eq!(json["productCode"], serde_json::json!("SG-PPE-007"));
    // Inactive rows are part of the admin listing, flagged, never hidden.
    assert_eq!(json["active"], serde_json::json!(false));
    assert!(!object.contains_key("kind"));
    assert!(!object.contains_key("category_id"));
}

#[test]
fn test_admin_variant_wire_format() {
    let variant = AdminVariant {
        id: VariantId::new(1),
        product_id: ProductId::new(7),
        layout_id: LayoutId::new(1),
        size_id: SizeId::new(2),
        material_id: MaterialId::new(3),
        qr: true,
        price: dec("250"),
    };

    let json = serde_json::to_value(&variant).unwrap();

    assert_eq!(json["product"], serde_json::json!(7));
    assert_eq!(json["layout"], serde_json::json!(1));
    assert_eq!(json["size"], serde_json::json!(2));
    assert_eq!(json["material"], serde_json::json!(3));
    assert_eq!(json["qr"], serde_json::json!(true));
    assert_eq!(json["price"], serde_json::json!("250"));
}
