//! Integration tests driving the public ledger API

mod common;
mod ledger_tests;
