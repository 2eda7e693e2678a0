//! Startup catalog: items and members read from a JSON file

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    error::LedgerError,
    models::{Item, Member},
    services::Ledger,
};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Contents of a seed file: `{ "items": [...], "members": [...] }`
#[derive(Debug, Default, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl CatalogSeed {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let raw = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Register every member and item, stopping at the first rejection
    pub fn apply(self, ledger: &mut Ledger) -> Result<(usize, usize), SeedError> {
        let member_count = self.members.len();
        let item_count = self.items.len();
        for member in self.members {
            ledger.register_member(member)?;
        }
        for item in self.items {
            ledger.register_item(item)?;
        }
        tracing::info!("Seeded {} member(s) and {} item(s)", member_count, item_count);
        Ok((member_count, item_count))
    }
}
