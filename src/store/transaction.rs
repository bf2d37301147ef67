use std::collections::BTreeMap;

use crate::actor_framework::{Entity, EntityId};
use crate::domain::{User, UserId};
use crate::store::Tables;

/// Entities that belong to a single user and are looked up on their behalf.
pub trait Owned: Entity {
    fn owner(&self) -> UserId;
}

/// Persistence operations available to a workflow.
///
/// Lookups return `None` for missing rows; turning that into a `NotFound`
/// error is the caller's job.
pub trait Repository {
    fn find_by_id<I: EntityId>(&self, id: I) -> Option<I::Entity>;

    fn find_all<T: Entity>(&self) -> Vec<T>;

    /// Stages `entity` for commit, assigning an id on first save.
    fn save<T: Entity>(&mut self, entity: T) -> T;

    fn find_by_user_and_id<I>(&self, user: UserId, id: I) -> Option<I::Entity>
    where
        I: EntityId,
        I::Entity: Owned,
    {
        self.find_by_id(id).filter(|row| row.owner() == user)
    }

    fn find_all_by_user<T: Owned>(&self, user: UserId) -> Vec<T> {
        self.find_all::<T>()
            .into_iter()
            .filter(|row| row.owner() == user)
            .collect()
    }

    fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.find_all::<User>()
            .into_iter()
            .find(|user| user.email() == email)
    }
}

/// Unit of work over the store's tables.
///
/// Writes are staged in a private copy and only reach the committed tables
/// on [`Transaction::commit`]. Reads see staged rows first.
pub struct Transaction<'a> {
    committed: &'a mut Tables,
    staged: Tables,
    writes: usize,
}

impl<'a> Transaction<'a> {
    pub(crate) fn begin(committed: &'a mut Tables) -> Self {
        Self {
            committed,
            staged: Tables::default(),
            writes: 0,
        }
    }

    /// Applies every staged write; returns how many saves were made.
    pub(crate) fn commit(self) -> usize {
        let Transaction {
            committed,
            staged,
            writes,
        } = self;
        committed.absorb(staged);
        writes
    }

    /// Drops every staged write; returns how many saves were discarded.
    pub(crate) fn rollback(self) -> usize {
        self.writes
    }
}

impl Repository for Transaction<'_> {
    fn find_by_id<I: EntityId>(&self, id: I) -> Option<I::Entity> {
        <I::Entity as Entity>::table(&self.staged)
            .get(id)
            .or_else(|| <I::Entity as Entity>::table(&*self.committed).get(id))
            .cloned()
    }

    fn find_all<T: Entity>(&self) -> Vec<T> {
        let mut rows: BTreeMap<T::Id, T> = T::table(&*self.committed)
            .iter()
            .map(|(id, row)| (*id, row.clone()))
            .collect();
        rows.extend(
            T::table(&self.staged)
                .iter()
                .map(|(id, row)| (*id, row.clone())),
        );
        rows.into_values().collect()
    }

    fn save<T: Entity>(&mut self, mut entity: T) -> T {
        if entity.id().is_unsaved() {
            entity.assign_id(T::table_mut(&mut *self.committed).next_id());
        }
        T::table_mut(&mut self.staged).upsert(entity.clone());
        self.writes += 1;
        entity
    }
}
