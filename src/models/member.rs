//! Member model and borrowing eligibility

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Limits a member must stay under to borrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowingLimits {
    /// Loans a member may hold at once
    pub max_active_loans: usize,
    /// Accrued penalty at which borrowing is refused
    pub max_penalty: Decimal,
}

impl Default for BorrowingLimits {
    fn default() -> Self {
        Self {
            max_active_loans: 5,
            max_penalty: Decimal::TEN,
        }
    }
}

/// Library member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Member {
    #[validate(length(min = 1, message = "member id must not be empty"))]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    pub registered_at: DateTime<Utc>,
    #[serde(default)]
    borrowed_items: IndexSet<String>,
    #[serde(default)]
    penalty_total: Decimal,
}

impl Member {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            registered_at,
            borrowed_items: IndexSet::new(),
            penalty_total: Decimal::ZERO,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Ids of items currently on loan to this member, in borrow order
    pub fn borrowed_items(&self) -> &IndexSet<String> {
        &self.borrowed_items
    }

    pub fn active_loan_count(&self) -> usize {
        self.borrowed_items.len()
    }

    /// Penalties charged so far; never decreases
    pub fn penalty_total(&self) -> Decimal {
        self.penalty_total
    }

    /// Eligibility under the default limits (5 loans, 10.0 of penalties)
    pub fn can_borrow(&self) -> bool {
        self.can_borrow_under(&BorrowingLimits::default())
    }

    pub fn can_borrow_under(&self, limits: &BorrowingLimits) -> bool {
        self.ineligibility_reason(limits).is_none()
    }

    /// Why the member may not borrow, if they may not
    pub fn ineligibility_reason(&self, limits: &BorrowingLimits) -> Option<String> {
        if self.borrowed_items.len() >= limits.max_active_loans {
            return Some(format!(
                "maximum loans reached ({}/{})",
                self.borrowed_items.len(),
                limits.max_active_loans
            ));
        }
        if self.penalty_total >= limits.max_penalty {
            return Some(format!(
                "outstanding penalties {} reach the limit of {}",
                self.penalty_total, limits.max_penalty
            ));
        }
        None
    }

    /// Copy the ledger-owned loan and penalty state from another record
    pub(crate) fn carry_state_from(&mut self, previous: &Member) {
        self.borrowed_items = previous.borrowed_items.clone();
        self.penalty_total = previous.penalty_total;
    }

    pub(crate) fn has_ledger_state(&self) -> bool {
        !self.borrowed_items.is_empty() || !self.penalty_total.is_zero()
    }

    pub(crate) fn record_loan(&mut self, item_id: &str) {
        self.borrowed_items.insert(item_id.to_string());
    }

    pub(crate) fn release_loan(&mut self, item_id: &str) -> bool {
        self.borrowed_items.shift_remove(item_id)
    }

    pub(crate) fn charge_penalty(&mut self, amount: Decimal) {
        if amount > Decimal::ZERO {
            self.penalty_total = self.penalty_total.saturating_add(amount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> Member {
        Member::new("m1", "Ada", "Lovelace", "ada@example.org", Utc::now())
    }

    #[test]
    fn test_new_member_can_borrow() {
        let m = member();
        assert!(m.can_borrow());
        assert_eq!(m.active_loan_count(), 0);
        assert_eq!(m.penalty_total(), Decimal::ZERO);
        assert_eq!(m.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_loan_limit() {
        let mut m = member();
        for i in 0..4 {
            m.record_loan(&format!("b{i}"));
        }
        assert!(m.can_borrow());
        m.record_loan("b4");
        assert!(!m.can_borrow());
        assert!(m.ineligibility_reason(&BorrowingLimits::default()).unwrap().contains("5/5"));
    }

    #[test]
    fn test_penalty_limit() {
        let mut m = member();
        m.charge_penalty(Decimal::new(999, 2));
        assert!(m.can_borrow());
        m.charge_penalty(Decimal::new(1, 2));
        assert_eq!(m.penalty_total(), Decimal::TEN);
        assert!(!m.can_borrow());
    }

    #[test]
    fn test_penalty_total_saturates() {
        let mut m = member();
        m.charge_penalty(Decimal::MAX);
        m.charge_penalty(Decimal::MAX);
        assert_eq!(m.penalty_total(), Decimal::MAX);
        assert!(!m.can_borrow());
    }

    #[test]
    fn test_penalty_never_decreases() {
        let mut m = member();
        m.charge_penalty(Decimal::new(3, 0));
        m.charge_penalty(Decimal::new(-2, 0));
        assert_eq!(m.penalty_total(), Decimal::new(3, 0));
    }

    #[test]
    fn test_release_keeps_order() {
        let mut m = member();
        m.record_loan("a");
        m.record_loan("b");
        m.record_loan("c");
        assert!(m.release_loan("b"));
        assert!(!m.release_loan("b"));
        let ids: Vec<&str> = m.borrowed_items().iter().map(String::as_str).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_email_validation() {
        assert!(member().validate().is_ok());
        let bad = Member::new("m2", "No", "Mail", "not-an-email", Utc::now());
        assert!(bad.validate().is_err());
    }
}
