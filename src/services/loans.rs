//! Loan lifecycle: borrowing, returning and penalty settlement

use rust_decimal::Decimal;

use super::Ledger;
use crate::{
    audit::AuditEvent,
    error::{LedgerError, LedgerResult},
    models::{Loan, OverdueLoan, ReturnReceipt},
};

impl Ledger {
    /// Lend an item to a member.
    ///
    /// Fails without touching anything when either id is unknown, the item
    /// is already out, or the member is over the loan or penalty limit.
    pub fn borrow_item(&mut self, item_id: &str, member_id: &str) -> LedgerResult<Loan> {
        let now = self.clock.now();
        let item = self.repository.items.get_mut(item_id)?;
        let member = self.repository.members.get_mut(member_id)?;

        if !item.is_available() {
            tracing::warn!("Loan rejected: item id={} is not available", item_id);
            return Err(LedgerError::ItemUnavailable(item_id.to_string()));
        }
        if let Some(reason) = member.ineligibility_reason(&self.policy.limits) {
            tracing::warn!("Loan rejected: member id={} cannot borrow ({})", member_id, reason);
            return Err(LedgerError::MemberIneligible {
                member_id: member_id.to_string(),
                reason,
            });
        }

        if let Err(e) = item.borrow(member_id, now) {
            tracing::error!("Loan of item id={} failed after availability check: {}", item_id, e);
            return Err(LedgerError::ItemUnavailable(item_id.to_string()));
        }
        member.record_loan(item_id);

        let loan = Loan {
            item_id: item_id.to_string(),
            member_id: member_id.to_string(),
            item_type: item.item_type(),
            loaned_at: now,
        };
        tracing::info!("Loans: item id={} borrowed by member id={}", item_id, member_id);
        self.emit(AuditEvent::ItemBorrowed {
            item_id: item_id.to_string(),
            member_id: member_id.to_string(),
        });
        Ok(loan)
    }

    /// Take an item back, charging the borrower any late-return penalty
    pub fn return_item(&mut self, item_id: &str) -> LedgerResult<ReturnReceipt> {
        let now = self.clock.now();
        let item = self.repository.items.get_mut(item_id)?;
        let Some(loan) = Loan::of(item) else {
            tracing::warn!("Return rejected: item id={} is not on loan", item_id);
            return Err(LedgerError::NotOnLoan(item_id.to_string()));
        };

        let member = match self.repository.members.get_mut(&loan.member_id) {
            Ok(member) => member,
            Err(_) => {
                let message = format!(
                    "item {} is on loan to unknown member {}",
                    item_id, loan.member_id
                );
                tracing::error!("Return aborted, ledger inconsistency: {}", message);
                return Err(LedgerError::Inconsistency(message));
            }
        };
        if !member.borrowed_items().contains(item_id) {
            let message = format!(
                "item {} is on loan to member {} who does not list it",
                item_id, loan.member_id
            );
            tracing::error!("Return aborted, ledger inconsistency: {}", message);
            return Err(LedgerError::Inconsistency(message));
        }

        let rule = *self.policy.rule_for(loan.item_type);
        let days_on_loan = now.signed_duration_since(loan.loaned_at).num_days();
        let penalty = item.compute_penalty_with(&rule, now);

        member.charge_penalty(penalty);
        member.release_loan(item_id);
        item.return_item();

        if penalty > Decimal::ZERO {
            let days_late = days_on_loan - i64::from(rule.grace_days);
            tracing::info!(
                "Loans: penalty {} charged to member id={} for item id={}",
                penalty,
                loan.member_id,
                item_id
            );
            self.emit(AuditEvent::PenaltyCharged {
                item_id: item_id.to_string(),
                member_id: loan.member_id.clone(),
                days_late,
                amount: penalty,
            });
        }
        tracing::info!("Loans: item id={} returned by member id={}", item_id, loan.member_id);
        self.emit(AuditEvent::ItemReturned {
            item_id: item_id.to_string(),
            member_id: loan.member_id.clone(),
        });

        Ok(ReturnReceipt { loan, returned_at: now, days_on_loan, penalty })
    }

    /// Penalty a return would charge right now; zero for an available item
    pub fn assess_penalty(&self, item_id: &str) -> LedgerResult<Decimal> {
        let item = self.repository.items.get_by_id(item_id)?;
        let rule = self.policy.rule_for(item.item_type());
        Ok(item.compute_penalty_with(rule, self.clock.now()))
    }

    /// Loans held past their grace period, in catalog order
    pub fn overdue_loans(&self) -> Vec<OverdueLoan> {
        let now = self.clock.now();
        self.repository
            .items
            .iter()
            .filter_map(|item| {
                let active = item.loan()?;
                let rule = self.policy.rule_for(item.item_type());
                let days_late = active.days_elapsed(now) - i64::from(rule.grace_days);
                if days_late <= 0 {
                    return None;
                }
                Some(OverdueLoan {
                    loan: Loan::of(item)?,
                    days_late,
                    accrued_penalty: item.compute_penalty_with(rule, now),
                })
            })
            .collect()
    }
}
