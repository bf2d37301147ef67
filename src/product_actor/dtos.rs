use crate::domain::{Amount, Product, ProductId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub price: Amount,
    pub stock: u32,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id(),
            name: product.name().to_string(),
            price: product.price(),
            stock: product.stock(),
        }
    }
}
