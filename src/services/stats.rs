//! Statistics and ledger self-checks

use indexmap::IndexMap;
use serde::Serialize;

use super::Ledger;
use crate::{
    error::{LedgerError, LedgerResult},
    models::ItemType,
};

/// Counts derived from the current ledger state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerStatistics {
    pub total_items: usize,
    pub available_items: usize,
    pub borrowed_items: usize,
    pub overdue_items: usize,
    pub total_members: usize,
    /// Item count per variant; every variant is listed, including empty ones
    pub items_by_type: IndexMap<ItemType, usize>,
}

impl LedgerStatistics {
    /// Flat name-to-count view, per-variant entries keyed by type name
    pub fn as_map(&self) -> IndexMap<String, usize> {
        let mut map = IndexMap::new();
        map.insert("total_items".to_string(), self.total_items);
        map.insert("available_items".to_string(), self.available_items);
        map.insert("borrowed_items".to_string(), self.borrowed_items);
        map.insert("overdue_items".to_string(), self.overdue_items);
        map.insert("total_members".to_string(), self.total_members);
        for (item_type, count) in &self.items_by_type {
            map.insert(item_type.type_name().to_string(), *count);
        }
        map
    }
}

impl Ledger {
    /// Recompute statistics from the current items and members
    pub fn statistics(&self) -> LedgerStatistics {
        let mut items_by_type: IndexMap<ItemType, usize> =
            ItemType::ALL.iter().map(|t| (*t, 0)).collect();
        let mut available_items = 0;
        for item in self.repository.items.iter() {
            *items_by_type.entry(item.item_type()).or_insert(0) += 1;
            if item.is_available() {
                available_items += 1;
            }
        }

        let total_items = self.repository.items.count();
        let stats = LedgerStatistics {
            total_items,
            available_items,
            borrowed_items: total_items - available_items,
            overdue_items: self.overdue_loans().len(),
            total_members: self.repository.members.count(),
            items_by_type,
        };
        tracing::debug!(?stats, "Statistics computed");
        stats
    }

    /// Verify that item borrowers and member loan sets agree with each other
    pub fn check_invariants(&self) -> LedgerResult<()> {
        for item in self.repository.items.iter() {
            let Some(member_id) = item.borrower() else {
                continue;
            };
            let member = self.repository.members.get_by_id(member_id).map_err(|_| {
                LedgerError::Inconsistency(format!(
                    "item {} is on loan to unknown member {}",
                    item.id, member_id
                ))
            })?;
            if !member.borrowed_items().contains(&item.id) {
                return Err(LedgerError::Inconsistency(format!(
                    "item {} is on loan to member {} who does not list it",
                    item.id, member_id
                )));
            }
        }

        for member in self.repository.members.iter() {
            for item_id in member.borrowed_items() {
                let borrower = self
                    .repository
                    .items
                    .get_by_id(item_id)
                    .ok()
                    .and_then(|item| item.borrower());
                if borrower != Some(member.id.as_str()) {
                    return Err(LedgerError::Inconsistency(format!(
                        "member {} lists item {} which is not on loan to them",
                        member.id, item_id
                    )));
                }
            }
        }
        Ok(())
    }
}
