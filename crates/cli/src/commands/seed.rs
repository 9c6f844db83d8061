//! Catalog seeding command.
//!
//! Inserts the demo health-product catalog. Seeding is idempotent: it is a
//! no-op when the catalog already has products, unless `--force` is given.

use rust_decimal::Decimal;
use tracing::info;

use greenbasket_api::db::{self, ProductRepository};
use greenbasket_api::models::NewProduct;

use super::CommandError;

/// Seed the demo product catalog.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or an insert fails.
pub async fn run(force: bool) -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;
    let products = ProductRepository::new(&pool);

    let existing = products.count().await?;
    if existing > 0 && !force {
        info!(existing, "Catalog already seeded, skipping (use --force to override)");
        return Ok(());
    }

    let catalog = demo_catalog();
    let total = catalog.len();
    for product in catalog {
        products.create(&product).await?;
    }

    info!(inserted = total, "Catalog seeded");
    Ok(())
}

/// Row shorthand for the demo catalog table below.
fn product(
    name: &str,
    description: &str,
    price_cents: i64,
    image_url: &str,
    category: &str,
    stock: i32,
    brand: &str,
) -> NewProduct {
    NewProduct {
        name: name.to_owned(),
        description: description.to_owned(),
        price: Decimal::new(price_cents, 2),
        image_url: image_url.to_owned(),
        category: category.to_owned(),
        brand: brand.to_owned(),
        stock,
    }
}

/// The demo health-product catalog.
fn demo_catalog() -> Vec<NewProduct> {
    vec![
        product(
            "Organic Multivitamin Complex",
            "Premium blend of essential vitamins and minerals for overall health and wellness. Supports immune system, energy levels, and bone health.",
            2999,
            "https://images.unsplash.com/photo-1550572017-edd951b55104?w=500",
            "Vitamins",
            50,
            "HealthPlus",
        ),
        product(
            "Omega-3 Fish Oil Capsules",
            "High-quality fish oil rich in EPA and DHA. Supports heart health, brain function, and reduces inflammation.",
            2499,
            "https://images.unsplash.com/photo-1584308666744-24d5c474f2ae?w=500",
            "Supplements",
            75,
            "PureHealth",
        ),
        product(
            "Probiotic Digestive Health",
            "Advanced probiotic formula with 50 billion CFU. Promotes healthy digestion and supports gut microbiome balance.",
            3499,
            "https://images.unsplash.com/photo-1559757148-5c350d0d3c56?w=500",
            "Digestive Health",
            60,
            "GutWell",
        ),
        product(
            "Vitamin D3 5000 IU",
            "High-potency Vitamin D3 supplement. Essential for bone health, immune function, and mood support.",
            1999,
            "https://images.unsplash.com/photo-1559757175-0eb30cd8c063?w=500",
            "Vitamins",
            100,
            "SunVital",
        ),
        product(
            "Turmeric Curcumin Extract",
            "Powerful anti-inflammatory supplement. Supports joint health, reduces inflammation, and promotes overall wellness.",
            2799,
            "https://images.unsplash.com/photo-1606787619248-f301830a5a57?w=500",
            "Supplements",
            45,
            "NatureCure",
        ),
        product(
            "Collagen Peptides Powder",
            "Grass-fed collagen peptides for skin, hair, and joint health. Unflavored and easily mixable.",
            3999,
            "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=500",
            "Beauty & Wellness",
            55,
            "BeautyBoost",
        ),
        product(
            "Magnesium Glycinate",
            "Highly absorbable magnesium supplement. Supports muscle function, sleep quality, and stress management.",
            2299,
            "https://images.unsplash.com/photo-1587854692152-cbe660dbde88?w=500",
            "Minerals",
            80,
            "CalmLife",
        ),
        product(
            "Echinacea Immune Support",
            "Natural immune system booster. Helps reduce duration and severity of cold symptoms.",
            1899,
            "https://images.unsplash.com/photo-1559181567-c3190ca9959b?w=500",
            "Immune Support",
            65,
            "HerbalGuard",
        ),
        product(
            "CoQ10 Heart Health",
            "Coenzyme Q10 supplement for cardiovascular health. Supports energy production and antioxidant protection.",
            3299,
            "https://images.unsplash.com/photo-1559757175-0eb30cd8c063?w=500",
            "Heart Health",
            40,
            "CardioCare",
        ),
        product(
            "Melatonin Sleep Aid",
            "Natural sleep support supplement. Helps regulate sleep cycles and improve sleep quality.",
            1699,
            "https://images.unsplash.com/photo-1559757175-0eb30cd8c063?w=500",
            "Sleep Support",
            90,
            "RestWell",
        ),
        product(
            "Green Tea Extract",
            "High-potency green tea extract with EGCG. Supports metabolism, weight management, and antioxidant health.",
            2199,
            "https://images.unsplash.com/photo-1556679343-c7306c1976bc?w=500",
            "Weight Management",
            70,
            "MetaboBoost",
        ),
        product(
            "B-Complex Vitamins",
            "Complete B-vitamin complex for energy, metabolism, and nervous system support.",
            2399,
            "https://images.unsplash.com/photo-1584308666744-24d5c474f2ae?w=500",
            "Vitamins",
            85,
            "EnergyMax",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_is_well_formed() {
        let catalog = demo_catalog();
        assert_eq!(catalog.len(), 12);
        for p in &catalog {
            assert!(!p.name.is_empty());
            assert!(!p.category.is_empty());
            assert!(p.price > Decimal::ZERO);
            assert!(p.stock > 0);
        }
    }
}
