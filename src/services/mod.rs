//! Business logic: the lending ledger.
//!
//! [`Ledger`] exclusively owns every item and member. Callers only get
//! shared references back, so loan state can change only through the
//! operations below:
//!
//! - catalog: [`Ledger::register_item`], [`Ledger::update_item`],
//!   [`Ledger::search_documents`]
//! - members: [`Ledger::register_member`], [`Ledger::update_member`],
//!   [`Ledger::member_loans`]
//! - loans: [`Ledger::borrow_item`], [`Ledger::return_item`],
//!   [`Ledger::assess_penalty`], [`Ledger::overdue_loans`]
//! - stats: [`Ledger::statistics`], [`Ledger::check_invariants`]
//!
//! Each operation checks all of its preconditions before touching any
//! state, so a failed call leaves the ledger exactly as it was.

pub mod auth;
pub mod catalog;
pub mod loans;
pub mod members;
pub mod stats;

use chrono::{DateTime, Utc};

use crate::{
    audit::{AuditEntry, AuditEvent, AuditSink, TracingAuditSink},
    clock::{Clock, SystemClock},
    config::{AppConfig, LendingPolicy},
    error::LedgerResult,
    repository::Repository,
};

pub use auth::{AdminAccess, AdminGate};
pub use stats::LedgerStatistics;

/// Owner of all items and members
pub struct Ledger {
    repository: Repository,
    policy: LendingPolicy,
    clock: Box<dyn Clock>,
    sinks: Vec<Box<dyn AuditSink>>,
}

impl Ledger {
    /// Ledger with the given policy, the wall clock and a tracing audit sink
    pub fn new(policy: LendingPolicy) -> LedgerResult<Self> {
        policy.validate()?;
        Ok(Self {
            repository: Repository::new(),
            policy,
            clock: Box::new(SystemClock),
            sinks: vec![Box::new(TracingAuditSink)],
        })
    }

    /// Ledger configured from the `lending` section
    pub fn from_config(config: &AppConfig) -> LedgerResult<Self> {
        Self::new(LendingPolicy::from(&config.lending))
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace all audit sinks with `sink`
    pub fn with_audit_sink(mut self, sink: impl AuditSink + 'static) -> Self {
        self.sinks = vec![Box::new(sink)];
        self
    }

    pub fn add_audit_sink(&mut self, sink: impl AuditSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn policy(&self) -> &LendingPolicy {
        &self.policy
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn emit(&self, event: AuditEvent) {
        let entry = AuditEntry { timestamp: self.clock.now(), event };
        for sink in &self.sinks {
            sink.record(&entry);
        }
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("items", &self.repository.items.count())
            .field("members", &self.repository.members.count())
            .field("policy", &self.policy)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
