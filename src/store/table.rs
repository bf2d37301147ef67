use std::collections::BTreeMap;

use crate::actor_framework::{Entity, EntityId};
use crate::domain::{Order, Payment, Product, User};

/// Rows of one entity type plus the sequence used to hand out ids.
#[derive(Debug, Clone)]
pub struct Table<T: Entity> {
    rows: BTreeMap<T::Id, T>,
    last_seq: u64,
}

impl<T: Entity> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_seq: 0,
        }
    }
}

impl<T: Entity> Table<T> {
    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T::Id, &T)> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ids are never reused, even when the transaction that drew one is
    /// rolled back.
    pub(crate) fn next_id(&mut self) -> T::Id {
        self.last_seq += 1;
        T::Id::from_seq(self.last_seq)
    }

    pub(crate) fn upsert(&mut self, row: T) {
        self.rows.insert(row.id(), row);
    }

    pub(crate) fn absorb(&mut self, staged: Table<T>) {
        self.rows.extend(staged.rows);
    }
}

/// Every table the shop keeps.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub(crate) users: Table<User>,
    pub(crate) products: Table<Product>,
    pub(crate) orders: Table<Order>,
    pub(crate) payments: Table<Payment>,
}

impl Tables {
    pub(crate) fn absorb(&mut self, staged: Tables) {
        self.users.absorb(staged.users);
        self.products.absorb(staged.products);
        self.orders.absorb(staged.orders);
        self.payments.absorb(staged.payments);
    }
}
