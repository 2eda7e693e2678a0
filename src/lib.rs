//! Elidune Lending Ledger
//!
//! In-memory lending core for the Elidune library management system:
//! a catalog of books, periodicals and media, the members who borrow
//! them, and the loan and late-return penalty rules that bind the two.

pub mod audit;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
mod repository;
pub mod seed;
pub mod services;

pub use config::{AppConfig, LendingPolicy};
pub use error::{LedgerError, LedgerResult};
pub use services::{Ledger, LedgerStatistics};
