use crate::actor_framework::Entity;
use crate::domain::{Payment, PaymentId, UserId};
use crate::store::{Owned, Table, Tables};

impl Entity for Payment {
    type Id = PaymentId;

    fn id(&self) -> PaymentId {
        self.id
    }

    fn assign_id(&mut self, id: PaymentId) {
        self.id = id;
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.payments
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.payments
    }
}

impl Owned for Payment {
    fn owner(&self) -> UserId {
        self.user_id()
    }
}
