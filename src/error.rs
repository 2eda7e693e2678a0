//! Error types for the Elidune lending ledger

use thiserror::Error;

/// Ledger error codes, one per failure kind surfaced to front-ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    NoSuchMember = 4,
    NoSuchItem = 5,
    ItemNotAvailable = 7,
    Duplicate = 8,
    MaxBorrowsReached = 11,
    BadValue = 18,
    NotBorrowed = 22,
    Inconsistency = 23,
}

/// Entity kind an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Item,
    Member,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::Item => write!(f, "item"),
            Entity::Member => write!(f, "member"),
        }
    }
}

/// Main ledger error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("No {entity} with id {id}")]
    NotFound { entity: Entity, id: String },

    #[error("A {entity} with id {id} is already registered")]
    Duplicate { entity: Entity, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Item {0} is not available")]
    ItemUnavailable(String),

    #[error("Member {member_id} cannot borrow: {reason}")]
    MemberIneligible { member_id: String, reason: String },

    #[error("Item {0} is not on loan")]
    NotOnLoan(String),

    #[error("Item {0} is on loan and cannot be replaced")]
    ItemOnLoan(String),

    #[error("Ledger inconsistency: {0}")]
    Inconsistency(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),
}

impl LedgerError {
    pub fn item_not_found(id: &str) -> Self {
        LedgerError::NotFound { entity: Entity::Item, id: id.to_string() }
    }

    pub fn member_not_found(id: &str) -> Self {
        LedgerError::NotFound { entity: Entity::Member, id: id.to_string() }
    }

    /// Error code reported to front-ends
    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::NotFound { entity: Entity::Item, .. } => ErrorCode::NoSuchItem,
            LedgerError::NotFound { entity: Entity::Member, .. } => ErrorCode::NoSuchMember,
            LedgerError::Duplicate { .. } => ErrorCode::Duplicate,
            LedgerError::Validation(_) => ErrorCode::BadValue,
            LedgerError::ItemUnavailable(_) | LedgerError::ItemOnLoan(_) => {
                ErrorCode::ItemNotAvailable
            }
            LedgerError::MemberIneligible { .. } => ErrorCode::MaxBorrowsReached,
            LedgerError::NotOnLoan(_) => ErrorCode::NotBorrowed,
            LedgerError::Inconsistency(_) => ErrorCode::Inconsistency,
            LedgerError::AccessDenied(_) => ErrorCode::NotAuthorized,
        }
    }

    /// True when the error signals corrupted ledger state rather than a rejected request
    pub fn is_inconsistency(&self) -> bool {
        matches!(self, LedgerError::Inconsistency(_))
    }
}

impl From<validator::ValidationErrors> for LedgerError {
    fn from(errors: validator::ValidationErrors) -> Self {
        LedgerError::Validation(errors.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
