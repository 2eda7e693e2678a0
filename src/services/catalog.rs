//! Catalog operations: registering, replacing and searching items

use validator::Validate;

use super::{AdminAccess, Ledger};
use crate::{
    audit::AuditEvent,
    error::{LedgerError, LedgerResult},
    models::Item,
};

impl Ledger {
    /// Register a new item. Ids are caller-supplied and must be unused.
    pub fn register_item(&mut self, item: Item) -> LedgerResult<&Item> {
        item.validate()?;
        if !item.is_available() {
            return Err(LedgerError::Validation(format!(
                "Item {} must be available when registered",
                item.id
            )));
        }

        let event = AuditEvent::ItemRegistered {
            item_id: item.id.clone(),
            item_type: item.item_type(),
            title: item.title.clone(),
        };
        let item_id = item.id.clone();
        if let Err(e) = self.repository.items.create(item) {
            tracing::warn!("Catalog register rejected: {}", e);
            return Err(e);
        }

        tracing::info!("Catalog: registered item id={}", item_id);
        self.emit(event);
        self.repository.items.get_by_id(&item_id)
    }

    /// Replace the descriptive data of an existing item. The item must not be on loan.
    pub fn update_item(&mut self, _access: &AdminAccess, item: Item) -> LedgerResult<&Item> {
        item.validate()?;
        if !item.is_available() {
            return Err(LedgerError::Validation(format!(
                "Replacement for item {} must not carry loan state",
                item.id
            )));
        }
        let current = self.repository.items.get_by_id(&item.id)?;
        if !current.is_available() {
            tracing::warn!("Catalog update rejected: item id={} is on loan", item.id);
            return Err(LedgerError::ItemOnLoan(item.id));
        }

        let item_id = item.id.clone();
        self.repository.items.replace(item)?;
        tracing::info!("Catalog: updated item id={}", item_id);
        self.emit(AuditEvent::ItemUpdated { item_id: item_id.clone() });
        self.repository.items.get_by_id(&item_id)
    }

    pub fn item(&self, id: &str) -> LedgerResult<&Item> {
        self.repository.items.get_by_id(id)
    }

    /// Items whose title or author contains `term`, ignoring case, in registration order
    pub fn search_documents(&self, term: &str) -> Vec<&Item> {
        let term = term.to_lowercase();
        let found: Vec<&Item> = self
            .repository
            .items
            .iter()
            .filter(|item| item.matches_lowercase(&term))
            .collect();
        tracing::debug!("Catalog search '{}': {} match(es)", term, found.len());
        found
    }
}
