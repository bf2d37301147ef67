use crate::domain::{Amount, ProductId};
use crate::error::{ShopError, ShopResult};

/// A catalog entry. Stock only ever goes down through [`Product::decrease_stock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub(crate) id: ProductId,
    name: String,
    price: Amount,
    stock: u32,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Amount, stock: u32) -> ShopResult<Self> {
        if price < 0 {
            return Err(ShopError::Validation(format!(
                "Product price must not be negative: {}",
                price
            )));
        }
        Ok(Self {
            id: ProductId(0),
            name: name.into(),
            price,
            stock,
        })
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Amount {
        self.price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Takes `quantity` units out of stock and returns what is left.
    ///
    /// # Errors
    /// `InvalidQuantity` for a zero quantity, `InsufficientStock` when more
    /// is requested than available. Stock is unchanged on error.
    pub fn decrease_stock(&mut self, quantity: u32) -> ShopResult<u32> {
        if quantity == 0 {
            return Err(ShopError::InvalidQuantity(quantity));
        }
        if quantity > self.stock {
            return Err(ShopError::InsufficientStock {
                requested: quantity,
                available: self.stock,
            });
        }
        self.stock -= quantity;
        Ok(self.stock)
    }
}
