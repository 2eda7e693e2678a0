//! Loan lifecycle, penalties, search and statistics through the public API

use chrono::Duration;
use rust_decimal::Decimal;

use elidune_lending::{
    models::ItemType,
    services::{auth::hash_password, AdminGate},
    LedgerError,
};

use crate::common::{assert_consistent, book, library, media, member, periodical};

#[test]
fn test_borrow_flips_availability_once() {
    let mut lib = library();
    lib.ledger.register_item(book("b1", "1984", "George Orwell")).unwrap();
    lib.ledger.register_member(member("m1", "Ada", "Lovelace")).unwrap();

    assert!(lib.ledger.borrow_item("b1", "m1").is_ok());
    assert!(!lib.ledger.item("b1").unwrap().is_available());
    assert_consistent(&lib.ledger);

    assert_eq!(
        lib.ledger.borrow_item("b1", "m1").unwrap_err(),
        LedgerError::ItemUnavailable("b1".into())
    );
    assert_eq!(lib.ledger.member("m1").unwrap().active_loan_count(), 1);
    assert_consistent(&lib.ledger);
}

#[test]
fn test_sixth_loan_refused_even_without_penalties() {
    let mut lib = library();
    lib.ledger.register_member(member("m1", "Ada", "Lovelace")).unwrap();
    for i in 0..6 {
        lib.ledger.register_item(book(&format!("b{}", i), "Book", "Author")).unwrap();
    }
    for i in 0..5 {
        lib.ledger.borrow_item(&format!("b{}", i), "m1").unwrap();
    }

    let m1 = lib.ledger.member("m1").unwrap();
    assert_eq!(m1.penalty_total(), Decimal::ZERO);
    assert!(!m1.can_borrow());
    assert!(matches!(
        lib.ledger.borrow_item("b5", "m1"),
        Err(LedgerError::MemberIneligible { .. })
    ));
    assert_consistent(&lib.ledger);
}

#[test]
fn test_penalty_limit_blocks_member_without_loans() {
    let mut lib = library();
    lib.ledger.register_item(media("d1", "Blade Runner", "Ridley Scott")).unwrap();
    lib.ledger.register_item(periodical("p1", "Wired")).unwrap();
    lib.ledger.register_member(member("m1", "Ada", "Lovelace")).unwrap();

    lib.ledger.borrow_item("d1", "m1").unwrap();
    lib.clock.advance(Duration::days(15));
    let receipt = lib.ledger.return_item("d1").unwrap();
    assert_eq!(receipt.penalty, Decimal::new(12, 0));

    let m1 = lib.ledger.member("m1").unwrap();
    assert_eq!(m1.active_loan_count(), 0);
    assert!(!m1.can_borrow());
    assert!(lib.ledger.borrow_item("p1", "m1").is_err());
    assert!(lib.ledger.item("p1").unwrap().is_available());
}

#[test]
fn test_penalty_rules_per_variant() {
    let mut lib = library();
    lib.ledger.register_member(member("m1", "Ada", "Lovelace")).unwrap();
    lib.ledger.register_member(member("m2", "Alan", "Turing")).unwrap();
    lib.ledger.register_member(member("m3", "Grace", "Hopper")).unwrap();
    lib.ledger.register_item(book("b1", "1984", "George Orwell")).unwrap();
    lib.ledger.register_item(periodical("p1", "Wired")).unwrap();
    lib.ledger.register_item(media("d1", "Blade Runner", "Ridley Scott")).unwrap();

    lib.ledger.borrow_item("b1", "m1").unwrap();
    lib.clock.advance(Duration::days(10));
    lib.ledger.borrow_item("d1", "m3").unwrap();
    lib.clock.advance(Duration::days(5));
    lib.ledger.borrow_item("p1", "m2").unwrap();
    lib.clock.advance(Duration::days(5));

    assert_eq!(lib.ledger.assess_penalty("b1").unwrap(), Decimal::new(30, 1));
    assert_eq!(lib.ledger.return_item("b1").unwrap().penalty, Decimal::new(30, 1));
    assert_eq!(lib.ledger.return_item("p1").unwrap().penalty, Decimal::ZERO);
    assert_eq!(lib.ledger.return_item("d1").unwrap().penalty, Decimal::new(70, 1));

    assert_eq!(lib.ledger.member("m1").unwrap().penalty_total(), Decimal::new(30, 1));
    assert_eq!(lib.ledger.member("m2").unwrap().penalty_total(), Decimal::ZERO);
    assert_eq!(lib.ledger.member("m3").unwrap().penalty_total(), Decimal::new(70, 1));

    let log = lib.log.messages();
    assert_eq!(log.iter().filter(|m| m.contains("Penalty of")).count(), 2);
    assert_consistent(&lib.ledger);
}

#[test]
fn test_return_of_available_item_changes_nothing() {
    let mut lib = library();
    lib.ledger.register_item(book("b1", "1984", "George Orwell")).unwrap();
    let before = lib.ledger.item("b1").unwrap().clone();
    let stats_before = lib.ledger.statistics();
    let log_before = lib.log.len();

    assert_eq!(lib.ledger.return_item("b1").unwrap_err(), LedgerError::NotOnLoan("b1".into()));
    assert_eq!(lib.ledger.item("b1").unwrap(), &before);
    assert_eq!(lib.ledger.statistics(), stats_before);
    assert_eq!(lib.log.len(), log_before);
}

#[test]
fn test_round_trip_restores_item() {
    let mut lib = library();
    lib.ledger.register_item(book("b1", "1984", "George Orwell")).unwrap();
    lib.ledger.register_member(member("m1", "Ada", "Lovelace")).unwrap();
    let before = lib.ledger.item("b1").unwrap().clone();

    lib.ledger.borrow_item("b1", "m1").unwrap();
    lib.clock.advance(Duration::days(30));
    lib.ledger.return_item("b1").unwrap();

    assert_eq!(lib.ledger.item("b1").unwrap(), &before);
    assert!(lib.ledger.member("m1").unwrap().borrowed_items().is_empty());
    assert_eq!(lib.ledger.member("m1").unwrap().penalty_total(), Decimal::new(80, 1));
    assert_consistent(&lib.ledger);
}

#[test]
fn test_search() {
    let mut lib = library();
    lib.ledger.register_item(book("b1", "1984", "George Orwell")).unwrap();
    lib.ledger.register_item(book("b2", "Brave New World", "Aldous Huxley")).unwrap();
    lib.ledger.register_item(media("d1", "Blade Runner", "Ridley Scott")).unwrap();

    let found = lib.ledger.search_documents("1984");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "b1");

    let found: Vec<&str> =
        lib.ledger.search_documents("huxLEY").iter().map(|i| i.id.as_str()).collect();
    assert_eq!(found, vec!["b2"]);

    assert!(lib.ledger.search_documents("Dostoevsky").is_empty());
}

#[test]
fn test_statistics_add_up() {
    let mut lib = library();
    lib.ledger.register_item(book("b1", "1984", "George Orwell")).unwrap();
    lib.ledger.register_item(book("b2", "Brave New World", "Aldous Huxley")).unwrap();
    lib.ledger.register_item(periodical("p1", "Wired")).unwrap();
    lib.ledger.register_item(media("d1", "Blade Runner", "Ridley Scott")).unwrap();
    lib.ledger.register_member(member("m1", "Ada", "Lovelace")).unwrap();
    lib.ledger.borrow_item("b2", "m1").unwrap();
    lib.ledger.borrow_item("p1", "m1").unwrap();

    let stats = lib.ledger.statistics();
    assert_eq!(stats.total_items, 4);
    assert_eq!(stats.available_items + stats.borrowed_items, stats.total_items);
    assert_eq!(stats.borrowed_items, 2);
    assert_eq!(stats.total_members, 1);
    assert_eq!(stats.items_by_type.values().sum::<usize>(), stats.total_items);
    assert_eq!(stats.items_by_type[&ItemType::Book], 2);

    let map = stats.as_map();
    assert_eq!(map["total_items"], 4);
    assert_eq!(map["Periodical"], 1);
    assert_eq!(map["Media"], 1);
}

#[test]
fn test_admin_gated_update() {
    let mut lib = library();
    lib.ledger.register_member(member("m1", "Ada", "Byron")).unwrap();

    let gate = AdminGate::with_hash(hash_password("librarian").unwrap()).unwrap();
    assert!(matches!(gate.authorize("reader"), Err(LedgerError::AccessDenied(_))));

    let access = gate.authorize("librarian").unwrap();
    let updated = lib
        .ledger
        .update_member(&access, member("m1", "Ada", "Lovelace"))
        .unwrap();
    assert_eq!(updated.full_name(), "Ada Lovelace");
    assert!(lib.log.messages().last().unwrap().ends_with("Member m1 updated"));
}

#[test]
fn test_overdue_listing() {
    let mut lib = library();
    lib.ledger.register_item(book("b1", "1984", "George Orwell")).unwrap();
    lib.ledger.register_item(periodical("p1", "Wired")).unwrap();
    lib.ledger.register_member(member("m1", "Ada", "Lovelace")).unwrap();
    lib.ledger.borrow_item("b1", "m1").unwrap();
    lib.ledger.borrow_item("p1", "m1").unwrap();

    lib.clock.advance(Duration::days(9));
    let overdue = lib.ledger.overdue_loans();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].loan.item_id, "p1");
    assert_eq!(overdue[0].accrued_penalty, Decimal::new(6, 1));
    assert_eq!(lib.ledger.statistics().overdue_items, 1);
}
