use crate::actor_framework::Entity;
use crate::domain::{Product, ProductId};
use crate::store::{Table, Tables};

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }

    fn assign_id(&mut self, id: ProductId) {
        self.id = id;
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.products
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.products
    }
}
