use crate::actor_framework::Entity;
use crate::domain::{Order, OrderId, UserId};
use crate::store::{Owned, Table, Tables};

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> OrderId {
        self.id
    }

    fn assign_id(&mut self, id: OrderId) {
        self.id = id;
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.orders
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.orders
    }
}

impl Owned for Order {
    fn owner(&self) -> UserId {
        self.user_id()
    }
}
