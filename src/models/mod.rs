//! Data models for the lending ledger

pub mod item;
pub mod loan;
pub mod member;

// Re-export commonly used types
pub use item::{ActiveLoan, Frequency, Item, ItemError, ItemKind, ItemType, PenaltyRule};
pub use loan::{Loan, OverdueLoan, ReturnReceipt};
pub use member::{BorrowingLimits, Member};
