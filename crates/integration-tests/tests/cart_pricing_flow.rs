//! Cross-crate pricing flow: catalog rows through discount attachment,
//! derivation and cart aggregation, the way the storefront handlers wire
//! them together.

use std::collections::HashMap;
use std::convert::Infallible;

use chrono::Utc;
use rust_decimal::Decimal;

use safegear_core::{CartId, CategoryId, ProductId, ProductKind, SubcategoryId, UserId};
use safegear_storefront::models::{Cart, CartItem, Product};
use safegear_storefront::pricing::{
    DiscountSource, attach_discounts, build_cart_view, price_products,
};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// In-memory stand-in for the taxonomy tables.
#[derive(Default)]
struct Taxonomy {
    categories: HashMap<CategoryId, Decimal>,
    subcategories: HashMap<SubcategoryId, Decimal>,
}

impl DiscountSource for Taxonomy {
    type Error = Infallible;

    async fn category_discounts(
        &self,
        ids: &[CategoryId],
    ) -> Result<HashMap<CategoryId, Decimal>, Infallible> {
        Ok(ids
            .iter()
            .filter_map(|id| self.categories.get(id).map(|d| (*id, *d)))
            .collect())
    }

    async fn subcategory_discounts(
        &self,
        ids: &[SubcategoryId],
    ) -> Result<HashMap<SubcategoryId, Decimal>, Infallible> {
        Ok(ids
            .iter()
            .filter_map(|id| self.subcategories.get(id).map(|d| (*id, *d)))
            .collect())
    }
}

struct ProductFields<'a> {
    id: i32,
    mrp: &'a str,
    sale_price: Option<&'a str>,
    discount: Option<&'a str>,
    category: Option<i32>,
    subcategory: Option<i32>,
}

fn product(fields: &ProductFields<'_>) -> Product {
    Product {
        id: ProductId::new(fields.id),
        title: format!("Product {}", fields.id),
        description: String::new(),
        images: vec![],
        mrp: Some(dec(fields.mrp)),
        sale_price: fields.sale_price.map(dec),
        discount: fields.discount.map(dec),
        kind: ProductKind::Flat,
        category_id: fields.category.map(CategoryId::new),
        subcategory_id: fields.subcategory.map(SubcategoryId::new),
        product_code: format!("SG-{:04}", fields.id),
        code: format!("P{}", fields.id),
        active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_listing_prices_across_taxonomy() {
    let taxonomy = Taxonomy {
        categories: HashMap::from([(CategoryId::new(1), dec("10"))]),
        subcategories: HashMap::from([(SubcategoryId::new(5), dec("15"))]),
    };
    let products = vec![
        // Sale price 399 on MRP 499 back-computes ~20%, beating the 10%
        // category discount.
        product(&ProductFields {
            id: 1,
            mrp: "499",
            sale_price: Some("399"),
            discount: None,
            category: Some(1),
            subcategory: None,
        }),
        // No product discount at all: the 15% subcategory discount applies.
        product(&ProductFields {
            id: 2,
            mrp: "200",
            sale_price: None,
            discount: None,
            category: Some(1),
            subcategory: Some(5),
        }),
        // No taxonomy: full MRP.
        product(&ProductFields {
            id: 3,
            mrp: "80",
            sale_price: None,
            discount: None,
            category: None,
            subcategory: None,
        }),
    ];

    let priced = price_products(&products, &taxonomy).await.unwrap();

    assert_eq!(priced[0].discount_percentage, dec("20.04"));
    assert_eq!(priced[0].price, dec("399.00"));

    assert_eq!(priced[1].discount_percentage, dec("15"));
    assert_eq!(priced[1].price, dec("170.00"));

    assert_eq!(priced[2].discount_percentage, Decimal::ZERO);
    assert_eq!(priced[2].price, dec("80.00"));
}

#[tokio::test]
async fn test_cart_total_reflects_live_taxonomy_discounts() {
    let mut taxonomy = Taxonomy {
        categories: HashMap::from([(CategoryId::new(1), dec("10"))]),
        ..Taxonomy::default()
    };
    let p = product(&ProductFields {
        id: 1,
        mrp: "1000",
        sale_price: None,
        discount: None,
        category: Some(1),
        subcategory: None,
    });
    let cart = Cart {
        id: CartId::new(1),
        user_id: UserId::new(1),
        total_price: Decimal::ZERO,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    let items = vec![CartItem {
        product_id: p.id,
        quantity: 2,
    }];

    // First aggregation at 10% off.
    let products = [p.clone()];
    let contexts = attach_discounts(&products, &taxonomy).await.unwrap();
    let resolved = HashMap::from([(p.id, (p.clone(), contexts[0]))]);
    let view = build_cart_view(&cart, &items, &resolved);
    assert_eq!(view.total_price, dec("1800.00"));

    // Operator raises the category discount; the same cart re-aggregates to
    // the new total, no stored line price involved.
    taxonomy
        .categories
        .insert(CategoryId::new(1), dec("25"));
    let contexts = attach_discounts(&products, &taxonomy).await.unwrap();
    let resolved = HashMap::from([(p.id, (p, contexts[0]))]);
    let view = build_cart_view(&cart, &items, &resolved);
    assert_eq!(view.total_price, dec("1500.00"));
}

#[tokio::test]
async fn test_discount_attachment_never_stacks() {
    // 30% product discount, 20% category, 25% subcategory: the buyer gets
    // exactly 30%, not 75%.
    let taxonomy = Taxonomy {
        categories: HashMap::from([(CategoryId::new(1), dec("20"))]),
        subcategories: HashMap::from([(SubcategoryId::new(2), dec("25"))]),
    };
    let products = vec![product(&ProductFields {
        id: 1,
        mrp: "100",
        sale_price: None,
        discount: Some("30"),
        category: Some(1),
        subcategory: Some(2),
    })];

    let priced = price_products(&products, &taxonomy).await.unwrap();

    assert_eq!(priced[0].discount_percentage, dec("30"));
    assert_eq!(priced[0].price, dec("70.00"));
}

#[tokio::test]
async fn test_deleted_category_degrades_to_zero_discount() {
    // The category row is gone but the product still references it.
    let taxonomy = Taxonomy::default();
    let products = vec![product(&ProductFields {
        id: 1,
        mrp: "250",
        sale_price: None,
        discount: None,
        category: Some(99),
        subcategory: None,
    })];

    let contexts = attach_discounts(&products, &taxonomy).await.unwrap();
    assert_eq!(contexts[0].category_discount, Decimal::ZERO);
    assert_eq!(contexts[0].subcategory_discount, Decimal::ZERO);

    let priced = price_products(&products, &taxonomy).await.unwrap();
    assert_eq!(priced[0].price, dec("250.00"));
}
