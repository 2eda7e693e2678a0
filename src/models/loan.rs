//! Loan records handed back by the ledger

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::item::{Item, ItemType};

/// An active loan as seen from outside the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub item_id: String,
    pub member_id: String,
    pub item_type: ItemType,
    pub loaned_at: DateTime<Utc>,
}

impl Loan {
    /// Snapshot of the item's loan state, `None` if the item is available
    pub(crate) fn of(item: &Item) -> Option<Self> {
        item.loan().map(|loan| Loan {
            item_id: item.id.clone(),
            member_id: loan.member_id.clone(),
            item_type: item.item_type(),
            loaned_at: loan.loaned_at,
        })
    }
}

/// Outcome of a successful return
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnReceipt {
    pub loan: Loan,
    pub returned_at: DateTime<Utc>,
    pub days_on_loan: i64,
    pub penalty: Decimal,
}

/// A loan held past its grace period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverdueLoan {
    pub loan: Loan,
    pub days_late: i64,
    pub accrued_penalty: Decimal,
}
