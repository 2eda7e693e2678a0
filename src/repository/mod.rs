//! Repository layer: in-memory stores owned by the ledger

pub mod items;
pub mod members;

/// Main repository struct holding the item and member stores
#[derive(Debug, Default)]
pub(crate) struct Repository {
    pub items: items::ItemsRepository,
    pub members: members::MembersRepository,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }
}
