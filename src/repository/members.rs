//! Member store

use indexmap::{map::Entry, IndexMap};

use crate::{
    error::{Entity, LedgerError, LedgerResult},
    models::Member,
};

/// Members keyed by id, in registration order
#[derive(Debug, Default)]
pub(crate) struct MembersRepository {
    members: IndexMap<String, Member>,
}

impl MembersRepository {
    pub fn get_by_id(&self, id: &str) -> LedgerResult<&Member> {
        self.members.get(id).ok_or_else(|| LedgerError::member_not_found(id))
    }

    pub fn get_mut(&mut self, id: &str) -> LedgerResult<&mut Member> {
        self.members.get_mut(id).ok_or_else(|| LedgerError::member_not_found(id))
    }

    /// Insert a new member, refusing to overwrite an existing id
    pub fn create(&mut self, member: Member) -> LedgerResult<&Member> {
        match self.members.entry(member.id.clone()) {
            Entry::Occupied(entry) => Err(LedgerError::Duplicate {
                entity: Entity::Member,
                id: entry.key().clone(),
            }),
            Entry::Vacant(entry) => Ok(entry.insert(member)),
        }
    }

    pub fn replace(&mut self, member: Member) -> LedgerResult<Member> {
        let slot = self.get_mut(&member.id)?;
        Ok(std::mem::replace(slot, member))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    pub fn count(&self) -> usize {
        self.members.len()
    }
}
