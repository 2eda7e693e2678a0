//! Shared fixtures

use chrono::{NaiveDate, TimeZone, Utc};
use elidune_lending::{
    audit::MemoryAuditSink,
    clock::ManualClock,
    models::{Frequency, Item, ItemKind, Member},
    Ledger, LendingPolicy,
};

pub struct Library {
    pub ledger: Ledger,
    pub clock: ManualClock,
    pub log: MemoryAuditSink,
}

pub fn library() -> Library {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 2, 14, 0, 0).unwrap());
    let log = MemoryAuditSink::new();
    let ledger = Ledger::new(LendingPolicy::default())
        .expect("default policy is valid")
        .with_clock(clock.clone())
        .with_audit_sink(log.clone());
    Library { ledger, clock, log }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn book(id: &str, title: &str, author: &str) -> Item {
    Item::new(
        id,
        title,
        author,
        date(1949, 6, 8),
        ItemKind::Book { pages: 328, isbn: Some("9780451524935".into()), genre: None },
    )
}

pub fn periodical(id: &str, title: &str) -> Item {
    Item::new(
        id,
        title,
        "Editorial board",
        date(2024, 4, 1),
        ItemKind::Periodical { issue_number: 4, frequency: Frequency::Monthly },
    )
}

pub fn media(id: &str, title: &str, director: &str) -> Item {
    Item::new(
        id,
        title,
        director,
        date(1982, 6, 25),
        ItemKind::Media { duration_minutes: 117, director: director.into(), genre: Some("SF".into()) },
    )
}

pub fn member(id: &str, first: &str, last: &str) -> Member {
    Member::new(id, first, last, format!("{}@example.org", id), Utc::now())
}

/// Every item's availability agrees with its borrower and the member loan sets
pub fn assert_consistent(ledger: &Ledger) {
    ledger.check_invariants().expect("ledger invariants hold");
    for item in ledger.search_documents("") {
        assert_eq!(item.is_available(), item.borrower().is_none(), "item {}", item.id);
    }
}
