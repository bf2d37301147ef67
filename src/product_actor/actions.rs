use tracing::info;

use crate::domain::{Product, ProductId};
use crate::error::{ShopError, ShopResult};
use crate::product_actor::ProductSummary;
use crate::store::{Repository, Transaction};

pub fn list_products(tx: &Transaction<'_>) -> Vec<ProductSummary> {
    tx.find_all::<Product>()
        .iter()
        .map(ProductSummary::from)
        .collect()
}

pub fn get_product(tx: &Transaction<'_>, id: ProductId) -> ShopResult<Product> {
    tx.find_by_id(id)
        .ok_or_else(|| ShopError::not_found("Product", id))
}

/// Inserts `products` only when the catalog is empty. Returns how many rows
/// were added.
pub fn seed_catalog(tx: &mut Transaction<'_>, products: Vec<Product>) -> usize {
    if !tx.find_all::<Product>().is_empty() {
        info!("Catalog already populated, skipping seed");
        return 0;
    }
    let count = products.len();
    for product in products {
        tx.save(product);
    }
    info!(count, "Catalog seeded");
    count
}

/// The demo catalog loaded at start-up.
pub fn demo_catalog() -> ShopResult<Vec<Product>> {
    Ok(vec![
        Product::new("Premium Wireless Earbuds", 89_000, 50)?,
        Product::new("Smart Watch", 299_000, 30)?,
        Product::new("Gaming Keyboard", 129_000, 40)?,
        Product::new("4K Monitor", 499_000, 15)?,
        Product::new("USB-C Hub", 39_000, 100)?,
    ])
}
