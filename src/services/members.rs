//! Member operations

use validator::Validate;

use super::{AdminAccess, Ledger};
use crate::{
    audit::AuditEvent,
    error::{LedgerError, LedgerResult},
    models::{Loan, Member},
};

impl Ledger {
    /// Register a new member. Ids are caller-supplied and must be unused.
    pub fn register_member(&mut self, member: Member) -> LedgerResult<&Member> {
        member.validate()?;
        if member.has_ledger_state() {
            return Err(LedgerError::Validation(format!(
                "Member {} must be registered without loans or penalties",
                member.id
            )));
        }

        let event = AuditEvent::MemberRegistered {
            member_id: member.id.clone(),
            name: member.full_name(),
        };
        let member_id = member.id.clone();
        if let Err(e) = self.repository.members.create(member) {
            tracing::warn!("Member register rejected: {}", e);
            return Err(e);
        }

        tracing::info!("Members: registered member id={}", member_id);
        self.emit(event);
        self.repository.members.get_by_id(&member_id)
    }

    /// Replace a member's identity fields; loans and penalties stay with the ledger
    pub fn update_member(&mut self, _access: &AdminAccess, mut member: Member) -> LedgerResult<&Member> {
        member.validate()?;
        let current = self.repository.members.get_by_id(&member.id)?;
        member.carry_state_from(current);

        let member_id = member.id.clone();
        self.repository.members.replace(member)?;
        tracing::info!("Members: updated member id={}", member_id);
        self.emit(AuditEvent::MemberUpdated { member_id: member_id.clone() });
        self.repository.members.get_by_id(&member_id)
    }

    pub fn member(&self, id: &str) -> LedgerResult<&Member> {
        self.repository.members.get_by_id(id)
    }

    /// Active loans of a member, in borrow order
    pub fn member_loans(&self, member_id: &str) -> LedgerResult<Vec<Loan>> {
        let member = self.repository.members.get_by_id(member_id)?;
        member
            .borrowed_items()
            .iter()
            .map(|item_id| {
                let item = self.repository.items.get_by_id(item_id)?;
                Loan::of(item)
                    .filter(|loan| loan.member_id == member.id)
                    .ok_or_else(|| {
                        LedgerError::Inconsistency(format!(
                            "member {} lists item {} which is not on loan to them",
                            member.id, item_id
                        ))
                    })
            })
            .collect()
    }
}
