//! Discount attachment and cart aggregation.
//!
//! The repeated "fetch, enrich with discount, derive price, sum" sequence is
//! factored into one pipeline here so the defaulting and rounding rules stay
//! consistent across product listings, product detail and the cart:
//!
//! 1. [`attach_discounts`] resolves the discounts configured on each
//!    product's category/subcategory - one lookup per distinct reference, not
//!    per item.
//! 2. [`safegear_core::pricing::derive`] computes the per-item figures.
//! 3. [`build_cart_view`] multiplies by quantity and sums line totals.
//!
//! [`load_cart_view`] ties the three together over the database and
//! writes the derived total back through to the cart row.

use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use chrono::{DateTime, Utc};
use safegear_core::pricing::{DerivedPricing, PricingContext, derive};
use safegear_core::{CartId, CategoryId, ProductId, ProductKind, SubcategoryId, UserId, VariantId};

use crate::db::RepositoryError;
use crate::db::cart::CartRepository;
use crate::db::catalog::CatalogRepository;
use crate::models::{Cart, CartItem, PriceVariant, Product};

/// Resolves configured category/subcategory discounts.
///
/// Implemented by [`CatalogRepository`] in production; tests substitute a
/// counting double to verify lookup work stays proportional to the number of
/// distinct references.
pub trait DiscountSource {
    type Error;

    /// Discounts for the given category ids. Ids absent from the result map
    /// (deleted category, stale reference) default to a zero discount.
    async fn category_discounts(
        &self,
        ids: &[CategoryId],
    ) -> Result<HashMap<CategoryId, Decimal>, Self::Error>;

    /// Discounts for the given subcategory ids, same contract.
    async fn subcategory_discounts(
        &self,
        ids: &[SubcategoryId],
    ) -> Result<HashMap<SubcategoryId, Decimal>, Self::Error>;
}

/// Attach category/subcategory discounts to a batch of products.
///
/// Returns one [`PricingContext`] per product, aligned by index. All distinct
/// category references are resolved with a single lookup (and likewise for
/// subcategories); a batch with no references performs no lookups at all.
/// An unresolvable reference degrades to a zero discount rather than failing
/// the batch.
///
/// # Errors
///
/// Propagates the source's error (a failed query, not a missing row).
pub async fn attach_discounts<S: DiscountSource>(
    products: &[Product],
    source: &S,
) -> Result<Vec<PricingContext>, S::Error> {
    let category_ids: Vec<CategoryId> = products
        .iter()
        .filter_map(|p| p.category_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let subcategory_ids: Vec<SubcategoryId> = products
        .iter()
        .filter_map(|p| p.subcategory_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let category_discounts = if category_ids.is_empty() {
        HashMap::new()
    } else {
        source.category_discounts(&category_ids).await?
    };
    let subcategory_discounts = if subcategory_ids.is_empty() {
        HashMap::new()
    } else {
        source.subcategory_discounts(&subcategory_ids).await?
    };

    Ok(products
        .iter()
        .map(|p| PricingContext {
            category_discount: p
                .category_id
                .and_then(|id| category_discounts.get(&id).copied())
                .unwrap_or_default(),
            subcategory_discount: p
                .subcategory_id
                .and_then(|id| subcategory_discounts.get(&id).copied())
                .unwrap_or_default(),
        })
        .collect())
}

/// A product with derived pricing, as returned in listing and cart responses.
///
/// The field set mirrors what the cart depends on: `title, description,
/// images, price, salePrice, discount, mrp, type, category, subcategory,
/// productCode, code` plus the derived figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedProduct {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    /// Final sale price after the winning discount.
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub mrp: Decimal,
    #[serde(rename = "type")]
    pub kind: ProductKind,
    pub category: Option<CategoryId>,
    pub subcategory: Option<SubcategoryId>,
    pub product_code: String,
    pub code: String,
    pub discount_percentage: Decimal,
    pub discount_amount: Decimal,
}

/// Derive pricing for one product.
#[must_use]
pub fn price_product(product: &Product, context: &PricingContext) -> PricedProduct {
    let derived = derive(&product.pricing_input(), context);
    priced(product, derived)
}

fn priced(product: &Product, derived: DerivedPricing) -> PricedProduct {
    PricedProduct {
        id: product.id,
        title: product.title.clone(),
        description: product.description.clone(),
        images: product.images.clone(),
        price: derived.final_price,
        sale_price: product.sale_price,
        discount: product.discount,
        mrp: derived.mrp,
        kind: product.kind,
        category: product.category_id,
        subcategory: product.subcategory_id,
        product_code: product.product_code.clone(),
        code: product.code.clone(),
        discount_percentage: derived.discount_percentage,
        discount_amount: derived.discount_amount,
    }
}

/// Attach discounts and derive pricing for a whole listing.
///
/// # Errors
///
/// Propagates the discount source's error.
pub async fn price_products<S: DiscountSource>(
    products: &[Product],
    source: &S,
) -> Result<Vec<PricedProduct>, S::Error> {
    let contexts = attach_discounts(products, source).await?;
    Ok(products
        .iter()
        .zip(&contexts)
        .map(|(product, context)| price_product(product, context))
        .collect())
}

/// A price variant with derived pricing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedVariant {
    pub id: VariantId,
    pub layout: i32,
    pub size: i32,
    pub material: i32,
    pub qr: bool,
    /// Final price after the owning product's (+ category) discount.
    pub price: Decimal,
    pub mrp: Decimal,
    pub discount_percentage: Decimal,
    pub discount_amount: Decimal,
}

/// Derive pricing for one variant of a product.
///
/// The variant's own base price plays the MRP role; discounts come from the
/// owning product and its taxonomy.
#[must_use]
pub fn price_variant(
    variant: &PriceVariant,
    product: &Product,
    context: &PricingContext,
) -> PricedVariant {
    let derived = derive(&variant.pricing_input(product), context);
    PricedVariant {
        id: variant.id,
        layout: variant.layout_id.as_i32(),
        size: variant.size_id.as_i32(),
        material: variant.material_id.as_i32(),
        qr: variant.qr,
        price: derived.final_price,
        mrp: derived.mrp,
        discount_percentage: derived.discount_percentage,
        discount_amount: derived.discount_amount,
    }
}

/// One enriched cart line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product: PricedProduct,
    pub quantity: i32,
    pub line_total: Decimal,
}

/// The cart as served to the client: enriched lines plus the derived total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub id: CartId,
    #[serde(rename = "user")]
    pub user_id: UserId,
    pub products: Vec<CartLine>,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregate a cart from its line items and resolved products.
///
/// Pricing always uses the *current* catalog record, never a price frozen at
/// add-to-cart time. A line whose product no longer resolves (deleted or
/// deactivated since it was added) is excluded from both the response and the
/// total, and logged; ghost lines cannot be checked out.
#[must_use]
pub fn build_cart_view(
    cart: &Cart,
    items: &[CartItem],
    resolved: &HashMap<ProductId, (Product, PricingContext)>,
) -> CartView {
    let mut lines = Vec::with_capacity(items.len());
    let mut total_price = Decimal::ZERO;

    for item in items {
        let Some((product, context)) = resolved.get(&item.product_id) else {
            tracing::warn!(
                product_id = %item.product_id,
                cart_id = %cart.id,
                "cart line references a product that no longer resolves; excluding from total"
            );
            continue;
        };

        let priced = price_product(product, context);
        let line_total = priced.price * Decimal::from(item.quantity);
        total_price += line_total;
        lines.push(CartLine {
            product: priced,
            quantity: item.quantity,
            line_total,
        });
    }

    CartView {
        id: cart.id,
        user_id: cart.user_id,
        products: lines,
        total_price,
        created_at: cart.created_at,
        updated_at: cart.updated_at,
    }
}

/// Load, enrich and aggregate a cart, writing the derived total back through
/// to the cart row.
///
/// This is the one pipeline every cart read and mutation goes through.
///
/// # Errors
///
/// Returns `RepositoryError` if any query fails; the cart row keeps its
/// previous total in that case.
pub async fn load_cart_view(pool: &PgPool, cart: Cart) -> Result<CartView, RepositoryError> {
    let cart_repo = CartRepository::new(pool);
    let catalog = CatalogRepository::new(pool);

    let items = cart_repo.items(cart.id).await?;
    let ids: Vec<ProductId> = items.iter().map(|item| item.product_id).collect();
    let products_by_id = catalog.get_products_by_ids(&ids).await?;

    let products: Vec<Product> = products_by_id.into_values().collect();
    let contexts = attach_discounts(&products, &catalog).await?;
    let resolved: HashMap<ProductId, (Product, PricingContext)> = products
        .into_iter()
        .zip(contexts)
        .map(|(product, context)| (product.id, (product, context)))
        .collect();

    let view = build_cart_view(&cart, &items, &resolved);
    cart_repo.set_total(cart.id, view.total_price).await?;

    Ok(view)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn product(id: i32, mrp: &str, discount: Option<&str>, category: Option<i32>) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            description: String::new(),
            images: vec![],
            mrp: Some(dec(mrp)),
            sale_price: None,
            discount: discount.map(dec),
            kind: ProductKind::Flat,
            category_id: category.map(CategoryId::new),
            subcategory_id: None,
            product_code: format!("SG-{id:04}"),
            code: format!("P{id}"),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn cart() -> Cart {
        Cart {
            id: CartId::new(1),
            user_id: UserId::new(1),
            total_price: Decimal::ZERO,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Discount source that records how many lookups it receives and how
    /// many ids each lookup carried.
    #[derive(Default)]
    struct CountingSource {
        categories: HashMap<CategoryId, Decimal>,
        category_calls: AtomicUsize,
        category_ids_seen: AtomicUsize,
        subcategory_calls: AtomicUsize,
    }

    impl DiscountSource for CountingSource {
        type Error = Infallible;

        async fn category_discounts(
            &self,
            ids: &[CategoryId],
        ) -> Result<HashMap<CategoryId, Decimal>, Infallible> {
            self.category_calls.fetch_add(1, Ordering::SeqCst);
            self.category_ids_seen.fetch_add(ids.len(), Ordering::SeqCst);
            Ok(ids
                .iter()
                .filter_map(|id| self.categories.get(id).map(|d| (*id, *d)))
                .collect())
        }

        async fn subcategory_discounts(
            &self,
            _ids: &[SubcategoryId],
        ) -> Result<HashMap<SubcategoryId, Decimal>, Infallible> {
            self.subcategory_calls.fetch_add(1, Ordering::SeqCst);
            Ok(HashMap::new())
        }
    }

    #[tokio::test]
    async fn test_batch_attach_is_one_lookup_per_distinct_category() {
        // Six products across only two distinct categories: lookup work must
        // be proportional to 2, not 6.
        let source = CountingSource {
            categories: HashMap::from([
                (CategoryId::new(1), dec("10")),
                (CategoryId::new(2), dec("25")),
            ]),
            ..CountingSource::default()
        };
        let products: Vec<Product> = (0..6)
            .map(|i| product(i, "100", None, Some(1 + i % 2)))
            .collect();

        let contexts = attach_discounts(&products, &source).await.unwrap();

        assert_eq!(source.category_calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.category_ids_seen.load(Ordering::SeqCst), 2);
        // No subcategory references: no lookup at all.
        assert_eq!(source.subcategory_calls.load(Ordering::SeqCst), 0);

        // Order preserved, alternating 10 / 25.
        assert_eq!(contexts[0].category_discount, dec("10"));
        assert_eq!(contexts[1].category_discount, dec("25"));
        assert_eq!(contexts[4].category_discount, dec("10"));
    }

    #[tokio::test]
    async fn test_attach_defaults_unresolvable_reference_to_zero() {
        let source = CountingSource::default();
        let products = vec![product(1, "100", None, Some(77)), product(2, "100", None, None)];

        let contexts = attach_discounts(&products, &source).await.unwrap();

        assert_eq!(contexts[0].category_discount, Decimal::ZERO);
        assert_eq!(contexts[1].category_discount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_price_products_applies_max_discount() {
        // 10% product discount, 25% category discount: buyer gets 25%.
        let source = CountingSource {
            categories: HashMap::from([(CategoryId::new(1), dec("25"))]),
            ..CountingSource::default()
        };
        let products = vec![product(1, "1000", Some("10"), Some(1))];

        let priced = price_products(&products, &source).await.unwrap();

        assert_eq!(priced[0].price, dec("750.00"));
        assert_eq!(priced[0].discount_percentage, dec("25"));
        assert_eq!(priced[0].mrp, dec("1000"));
        assert_eq!(priced[0].discount_amount, dec("250.00"));
    }

    #[test]
    fn test_cart_total_sums_line_totals() {
        // (MRP 500, 20% off, qty 2) + (MRP 300, no discount, qty 1)
        //   = 400*2 + 300 = 1100
        let p1 = product(1, "500", Some("20"), None);
        let p2 = product(2, "300", None, None);
        let items = vec![
            CartItem {
                product_id: p1.id,
                quantity: 2,
            },
            CartItem {
                product_id: p2.id,
                quantity: 1,
            },
        ];
        let resolved = HashMap::from([
            (p1.id, (p1, PricingContext::default())),
            (p2.id, (p2, PricingContext::default())),
        ]);

        let view = build_cart_view(&cart(), &items, &resolved);

        assert_eq!(view.total_price, dec("1100.00"));
        assert_eq!(view.products.len(), 2);
        assert_eq!(view.products[0].line_total, dec("800.00"));
        assert_eq!(view.products[1].line_total, dec("300.00"));
    }

    #[test]
    fn test_unresolved_line_is_excluded_from_total() {
        let p1 = product(1, "500", None, None);
        let items = vec![
            CartItem {
                product_id: p1.id,
                quantity: 1,
            },
            // References a product that was deleted after being added.
            CartItem {
                product_id: ProductId::new(999),
                quantity: 3,
            },
        ];
        let resolved = HashMap::from([(p1.id, (p1, PricingContext::default()))]);

        let view = build_cart_view(&cart(), &items, &resolved);

        assert_eq!(view.products.len(), 1);
        assert_eq!(view.total_price, dec("500.00"));
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let p1 = product(1, "840", Some("12.5"), None);
        let items = vec![CartItem {
            product_id: p1.id,
            quantity: 3,
        }];
        let resolved = HashMap::from([(p1.id, (p1, PricingContext::default()))]);

        let first = build_cart_view(&cart(), &items, &resolved);
        let second = build_cart_view(&cart(), &items, &resolved);

        assert_eq!(first.total_price, second.total_price);
        assert_eq!(first.products, second.products);
    }

    #[test]
    fn test_empty_cart_totals_zero() {
        let view = build_cart_view(&cart(), &[], &HashMap::new());
        assert!(view.products.is_empty());
        assert_eq!(view.total_price, Decimal::ZERO);
    }

    #[test]
    fn test_variant_pricing_uses_variant_price_as_base() {
        let owner = product(1, "0", Some("20"), None);
        let variant = PriceVariant {
            id: VariantId::new(10),
            product_id: owner.id,
            layout_id: safegear_core::LayoutId::new(1),
            size_id: safegear_core::SizeId::new(2),
            material_id: safegear_core::MaterialId::new(3),
            qr: true,
            price: dec("250"),
        };

        let priced = price_variant(&variant, &owner, &PricingContext::default());

        assert_eq!(priced.mrp, dec("250"));
        assert_eq!(priced.price, dec("200.00"));
        assert_eq!(priced.discount_percentage, dec("20"));
    }
}
