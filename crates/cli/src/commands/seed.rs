//! Catalog seeding.
//!
//! Inserts the starter incense range so a fresh install has something to
//! browse. Idempotent: refuses to run against a non-empty catalog.

use rust_decimal::Decimal;

use namo_core::Price;
use namo_server::db;
use namo_server::db::products::{NewProduct, ProductRepository};

use super::CliError;

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    price: i64,
    stock: i64,
    category: &'static str,
}

const STARTER_CATALOG: &[SeedProduct] = &[
    SeedProduct {
        name: "Sandalwood Agarbatti",
        description: "Classic Mysore sandalwood incense sticks, pack of 50.",
        price: 299,
        stock: 50,
        category: "sticks",
    },
    SeedProduct {
        name: "Nag Champa Sticks",
        description: "Slow-burning nag champa, pack of 40.",
        price: 149,
        stock: 80,
        category: "sticks",
    },
    SeedProduct {
        name: "Lavender Dhoop Cones",
        description: "Hand-rolled lavender dhoop cones, box of 24.",
        price: 199,
        stock: 60,
        category: "cones",
    },
    SeedProduct {
        name: "Rose Incense Sticks",
        description: "Rose-scented sticks for daily puja, pack of 50.",
        price: 179,
        stock: 45,
        category: "sticks",
    },
    SeedProduct {
        name: "Brass Dhoop Holder",
        description: "Polished brass holder with ash tray.",
        price: 499,
        stock: 20,
        category: "accessories",
    },
];

/// Insert the starter catalog into an empty products table.
pub async fn run() -> Result<(), CliError> {
    let database_url = super::database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let products = ProductRepository::new(&pool);

    let existing = products.list().await?;
    if !existing.is_empty() {
        tracing::info!(count = existing.len(), "Catalog already seeded, nothing to do");
        return Ok(());
    }

    for seed in STARTER_CATALOG {
        let price = Price::new(Decimal::from(seed.price))
            .map_err(|e| CliError::InvalidInput(e.to_string()))?;

        let id = products
            .create(NewProduct {
                name: seed.name,
                description: Some(seed.description),
                price,
                stock: seed.stock,
                image: None,
                category: Some(seed.category),
            })
            .await?;

        tracing::info!(product_id = %id, name = seed.name, "Seeded product");
    }

    tracing::info!(count = STARTER_CATALOG.len(), "Catalog seeded");
    Ok(())
}
