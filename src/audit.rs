//! Activity log plumbing.
//!
//! The ledger reports every state change as an [`AuditEntry`] to each
//! registered [`AuditSink`]. Sinks are fire-and-forget: they cannot fail
//! or block the operation that produced the entry.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::ItemType;

/// State changes recorded in the activity log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditEvent {
    ItemRegistered { item_id: String, item_type: ItemType, title: String },
    ItemUpdated { item_id: String },
    MemberRegistered { member_id: String, name: String },
    MemberUpdated { member_id: String },
    ItemBorrowed { item_id: String, member_id: String },
    PenaltyCharged { item_id: String, member_id: String, days_late: i64, amount: Decimal },
    ItemReturned { item_id: String, member_id: String },
}

impl std::fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditEvent::ItemRegistered { item_id, item_type, title } => {
                write!(f, "{} '{}' registered as {}", item_type, title, item_id)
            }
            AuditEvent::ItemUpdated { item_id } => write!(f, "Item {} updated", item_id),
            AuditEvent::MemberRegistered { member_id, name } => {
                write!(f, "Member {} registered as {}", name, member_id)
            }
            AuditEvent::MemberUpdated { member_id } => write!(f, "Member {} updated", member_id),
            AuditEvent::ItemBorrowed { item_id, member_id } => {
                write!(f, "Item {} borrowed by {}", item_id, member_id)
            }
            AuditEvent::PenaltyCharged { item_id, member_id, days_late, amount } => write!(
                f,
                "Penalty of {} charged to {} for item {} ({} days late)",
                amount, member_id, item_id, days_late
            ),
            AuditEvent::ItemReturned { item_id, member_id } => {
                write!(f, "Item {} returned by {}", item_id, member_id)
            }
        }
    }
}

/// Timestamped activity-log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: AuditEvent,
}

impl std::fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%Y-%m-%d %H:%M:%S"), self.event)
    }
}

/// Receiver of activity-log entries
#[cfg_attr(test, mockall::automock)]
pub trait AuditSink: Send + Sync {
    fn record(&self, entry: &AuditEntry);
}

/// Writes entries to the `audit` tracing target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, entry: &AuditEntry) {
        tracing::info!(target: "audit", timestamp = %entry.timestamp, "{}", entry.event);
    }
}

/// Keeps entries in memory. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditSink {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Timestamped one-line messages, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.entries().iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, entry: &AuditEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.clone());
    }
}
