use crate::actor_framework::Entity;
use crate::domain::{User, UserId};
use crate::store::{Table, Tables};

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }

    fn assign_id(&mut self, id: UserId) {
        self.id = id;
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.users
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.users
    }
}
