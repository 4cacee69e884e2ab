//! Demo catalog seeder.
//!
//! Populates a development database with a small safety-equipment catalog:
//! taxonomy with configured discounts, flat and variant priced products, a
//! home-page banner and the default language. Safe to run repeatedly; every
//! insert upserts on its natural key.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur during seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Seed the database with demo data.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is unset or any statement fails.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| SeedError::MissingEnvVar("DATABASE_URL"))?;
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Seeding taxonomy...");
    let signage = upsert_category(&pool, "Safety Signage", "safety-signage", dec(10)).await?;
    let ppe = upsert_category(&pool, "PPE", "ppe", Decimal::ZERO).await?;
    let fire = upsert_category(&pool, "Fire Safety", "fire-safety", dec(5)).await?;

    let mandatory =
        upsert_subcategory(&pool, signage, "Mandatory Signs", "mandatory-signs", dec(15))
            .await?;
    upsert_subcategory(&pool, signage, "Warning Signs", "warning-signs", Decimal::ZERO).await?;
    let helmets = upsert_subcategory(&pool, ppe, "Helmets", "helmets", Decimal::ZERO).await?;
    let extinguishers =
        upsert_subcategory(&pool, fire, "Extinguishers", "extinguishers", Decimal::ZERO).await?;

    let portrait = upsert_lookup(&pool, "layouts", "Portrait").await?;
    let landscape = upsert_lookup(&pool, "layouts", "Landscape").await?;
    let small = upsert_lookup(&pool, "sizes", "A5").await?;
    let medium = upsert_lookup(&pool, "sizes", "A4").await?;
    upsert_lookup(&pool, "sizes", "A3").await?;
    let acp = upsert_lookup(&pool, "materials", "ACP Sheet").await?;
    let vinyl = upsert_lookup(&pool, "materials", "Retro Vinyl").await?;

    tracing::info!("Seeding products...");
    let helmet = upsert_flat_product(
        &pool,
        FlatProduct {
            title: "Industrial Safety Helmet",
            description: "ISI-marked HDPE helmet with ratchet adjustment.",
            image: "https://cdn.safegear.in/demo/helmet.jpg",
            mrp: dec(499),
            sale_price: Some(dec(399)),
            discount: None,
            category_id: ppe,
            subcategory_id: Some(helmets),
            product_code: "SG-PPE-001",
            code: "HELMET-HDPE",
        },
    )
    .await?;
    upsert_flat_product(
        &pool,
        FlatProduct {
            title: "ABC Dry Powder Extinguisher 4kg",
            description: "Stored-pressure extinguisher for class A, B and C fires.",
            image: "https://cdn.safegear.in/demo/extinguisher.jpg",
            mrp: dec(1850),
            sale_price: None,
            discount: Some(dec(8)),
            category_id: fire,
            subcategory_id: Some(extinguishers),
            product_code: "SG-FIRE-001",
            code: "EXT-ABC-4KG",
        },
    )
    .await?;
    tracing::debug!("Seeded flat product {helmet}");

    let sign = upsert_variant_product(
        &pool,
        "Wear Safety Helmet Sign",
        "Mandatory PPE sign per IS 9457 colour conventions.",
        "https://cdn.safegear.in/demo/helmet-sign.jpg",
        signage,
        Some(mandatory),
        "SG-SIGN-001",
        "SIGN-M001",
    )
    .await?;
    for (layout, size, material, qr, price) in [
        (portrait, small, vinyl, false, dec(149)),
        (portrait, medium, vinyl, false, dec(249)),
        (portrait, medium, acp, false, dec(449)),
        (landscape, medium, acp, true, dec(499)),
    ] {
        upsert_variant(&pool, sign, layout, size, material, qr, price).await?;
    }

    tracing::info!("Seeding content...");
    sqlx::query(
        "INSERT INTO banners (image_url, link, position, active)
         SELECT $1, $2, 0, TRUE
         WHERE NOT EXISTS (SELECT 1 FROM banners WHERE image_url = $1)",
    )
    .bind("https://cdn.safegear.in/demo/banner-monsoon.jpg")
    .bind("/products?category=safety-signage")
    .execute(&pool)
    .await?;

    sqlx::query(
        "INSERT INTO languages (name, code, active)
         VALUES ('English', 'en', TRUE), ('हिन्दी', 'hi', TRUE)
         ON CONFLICT (code) DO NOTHING",
    )
    .execute(&pool)
    .await?;

    tracing::info!("Seed complete!");
    Ok(())
}

struct FlatProduct<'a> {
    title: &'a str,
    description: &'a str,
    image: &'a str,
    mrp: Decimal,
    sale_price: Option<Decimal>,
    discount: Option<Decimal>,
    category_id: i32,
    subcategory_id: Option<i32>,
    product_code: &'a str,
    code: &'a str,
}

fn dec(n: i64) -> Decimal {
    Decimal::new(n, 0)
}

async fn upsert_category(
    pool: &PgPool,
    name: &str,
    slug: &str,
    discount: Decimal,
) -> Result<i32, SeedError> {
    let (id,): (i32,) = sqlx::query_as(
        "INSERT INTO categories (name, slug, discount)
         VALUES ($1, $2, $3)
         ON CONFLICT (slug) DO UPDATE SET discount = EXCLUDED.discount, updated_at = NOW()
         RETURNING id",
    )
    .bind(name)
    .bind(slug)
    .bind(discount)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn upsert_subcategory(
    pool: &PgPool,
    category_id: i32,
    name: &str,
    slug: &str,
    discount: Decimal,
) -> Result<i32, SeedError> {
    let (id,): (i32,) = sqlx::query_as(
        "INSERT INTO subcategories (category_id, name, slug, discount)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (slug) DO UPDATE SET discount = EXCLUDED.discount, updated_at = NOW()
         RETURNING id",
    )
    .bind(category_id)
    .bind(name)
    .bind(slug)
    .bind(discount)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Upsert into one of the plain name lookup tables.
///
/// `table` is compile-time constant at every call site, never user input.
async fn upsert_lookup(pool: &PgPool, table: &str, name: &str) -> Result<i32, SeedError> {
    let sql = format!(
        "INSERT INTO {table} (name) VALUES ($1)
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
         RETURNING id"
    );
    let (id,): (i32,) = sqlx::query_as(&sql).bind(name).fetch_one(pool).await?;
    Ok(id)
}

async fn upsert_flat_product(pool: &PgPool, p: FlatProduct<'_>) -> Result<i32, SeedError> {
    let (id,): (i32,) = sqlx::query_as(
        "INSERT INTO products
           (title, description, images, mrp, sale_price, discount, kind,
            category_id, subcategory_id, product_code, code)
         VALUES ($1, $2, ARRAY[$3], $4, $5, $6, 'flat', $7, $8, $9, $10)
         ON CONFLICT (product_code) DO UPDATE SET
           title = EXCLUDED.title,
           mrp = EXCLUDED.mrp,
           sale_price = EXCLUDED.sale_price,
           discount = EXCLUDED.discount,
           updated_at = NOW()
         RETURNING id",
    )
    .bind(p.title)
    .bind(p.description)
    .bind(p.image)
    .bind(p.mrp)
    .bind(p.sale_price)
    .bind(p.discount)
    .bind(p.category_id)
    .bind(p.subcategory_id)
    .bind(p.product_code)
    .bind(p.code)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

#[allow(clippy::too_many_arguments)]
async fn upsert_variant_product(
    pool: &PgPool,
    title: &str,
    description: &str,
    image: &str,
    category_id: i32,
    subcategory_id: Option<i32>,
    product_code: &str,
    code: &str,
) -> Result<i32, SeedError> {
    let (id,): (i32,) = sqlx::query_as(
        "INSERT INTO products
           (title, description, images, kind, category_id, subcategory_id,
            product_code, code)
         VALUES ($1, $2, ARRAY[$3], 'variant', $4, $5, $6, $7)
         ON CONFLICT (product_code) DO UPDATE SET
           title = EXCLUDED.title,
           updated_at = NOW()
         RETURNING id",
    )
    .bind(title)
    .bind(description)
    .bind(image)
    .bind(category_id)
    .bind(subcategory_id)
    .bind(product_code)
    .bind(code)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn upsert_variant(
    pool: &PgPool,
    product_id: i32,
    layout_id: i32,
    size_id: i32,
    material_id: i32,
    qr: bool,
    price: Decimal,
) -> Result<(), SeedError> {
    sqlx::query(
        "INSERT INTO price_variants (product_id, layout_id, size_id, material_id, qr, price)
         VALUES ($1, $2, $3, $4, $5, $6)
         ON CONFLICT (product_id, layout_id, size_id, material_id, qr)
           DO UPDATE SET price = EXCLUDED.price, updated_at = NOW()",
    )
    .bind(product_id)
    .bind(layout_id)
    .bind(size_id)
    .bind(material_id)
    .bind(qr)
    .bind(price)
    .execute(pool)
    .await?;
    Ok(())
}
