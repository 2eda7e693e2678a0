//! Item store

use indexmap::{map::Entry, IndexMap};

use crate::{
    error::{Entity, LedgerError, LedgerResult},
    models::Item,
};

/// Items keyed by id, in registration order
#[derive(Debug, Default)]
pub(crate) struct ItemsRepository {
    items: IndexMap<String, Item>,
}

impl ItemsRepository {
    pub fn get_by_id(&self, id: &str) -> LedgerResult<&Item> {
        self.items.get(id).ok_or_else(|| LedgerError::item_not_found(id))
    }

    pub fn get_mut(&mut self, id: &str) -> LedgerResult<&mut Item> {
        self.items.get_mut(id).ok_or_else(|| LedgerError::item_not_found(id))
    }

    /// Insert a new item, refusing to overwrite an existing id
    pub fn create(&mut self, item: Item) -> LedgerResult<&Item> {
        match self.items.entry(item.id.clone()) {
            Entry::Occupied(entry) => Err(LedgerError::Duplicate {
                entity: Entity::Item,
                id: entry.key().clone(),
            }),
            Entry::Vacant(entry) => Ok(entry.insert(item)),
        }
    }

    /// Swap the stored item for `item`, returning the previous one
    pub fn replace(&mut self, item: Item) -> LedgerResult<Item> {
        let slot = self.get_mut(&item.id)?;
        Ok(std::mem::replace(slot, item))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }
}
