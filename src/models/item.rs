//! Lendable item (catalog entry) model and related types.
//!
//! Every catalog entry shares the same identity and loan state; the
//! variant-specific data lives in [`ItemKind`], which also selects the
//! default [`PenaltyRule`] applied when a late item comes back.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Publication frequency of a periodical
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Yearly => "yearly",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Variant tag without the variant data, used as a key for rules and statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Book,
    Periodical,
    Media,
}

impl ItemType {
    pub const ALL: [ItemType; 3] = [ItemType::Book, ItemType::Periodical, ItemType::Media];

    /// Display name of the variant
    pub fn type_name(&self) -> &'static str {
        match self {
            ItemType::Book => "Book",
            ItemType::Periodical => "Periodical",
            ItemType::Media => "Media",
        }
    }

    /// Built-in late-return rule for the variant
    pub fn default_penalty_rule(&self) -> PenaltyRule {
        match self {
            ItemType::Book => PenaltyRule::new(14, Decimal::new(5, 1)),
            ItemType::Periodical => PenaltyRule::new(7, Decimal::new(3, 1)),
            ItemType::Media => PenaltyRule::new(3, Decimal::new(10, 1)),
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Variant-specific attributes of a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    Book {
        pages: u32,
        #[serde(default)]
        isbn: Option<String>,
        #[serde(default)]
        genre: Option<String>,
    },
    Periodical {
        issue_number: u32,
        frequency: Frequency,
    },
    Media {
        duration_minutes: u32,
        director: String,
        #[serde(default)]
        genre: Option<String>,
    },
}

impl ItemKind {
    pub fn item_type(&self) -> ItemType {
        match self {
            ItemKind::Book { .. } => ItemType::Book,
            ItemKind::Periodical { .. } => ItemType::Periodical,
            ItemKind::Media { .. } => ItemType::Media,
        }
    }
}

/// Decimal places every computed penalty carries
pub const PENALTY_SCALE: u32 = 2;

/// Grace period and daily rate charged once the grace period is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyRule {
    pub grace_days: u32,
    pub daily_rate: Decimal,
}

impl PenaltyRule {
    pub fn new(grace_days: u32, daily_rate: Decimal) -> Self {
        Self { grace_days, daily_rate }
    }

    /// Penalty for an item held `days_on_loan` whole days, always at
    /// `PENALTY_SCALE` decimal places. Saturates at `Decimal::MAX`.
    pub fn penalty_for(&self, days_on_loan: i64) -> Decimal {
        let late_days = (days_on_loan - i64::from(self.grace_days)).max(0);
        let mut penalty = Decimal::from(late_days)
            .saturating_mul(self.daily_rate)
            .round_dp(PENALTY_SCALE);
        penalty.rescale(PENALTY_SCALE);
        penalty
    }
}

/// Loan sub-state of an item. Borrower and timestamp exist together or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveLoan {
    pub member_id: String,
    pub loaned_at: DateTime<Utc>,
}

impl ActiveLoan {
    /// Whole days elapsed since the loan started, truncated
    pub fn days_elapsed(&self, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(self.loaned_at).num_days()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("Item {item_id} is already borrowed by {member_id}")]
    AlreadyBorrowed { item_id: String, member_id: String },
}

/// Lendable catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Item {
    #[validate(length(min = 1, message = "item id must not be empty"))]
    pub id: String,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub author: String,
    pub publication_date: NaiveDate,
    #[serde(flatten)]
    pub kind: ItemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    loan: Option<ActiveLoan>,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        publication_date: NaiveDate,
        kind: ItemKind,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            publication_date,
            kind,
            loan: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.loan.is_none()
    }

    /// Current loan, if the item is out
    pub fn loan(&self) -> Option<&ActiveLoan> {
        self.loan.as_ref()
    }

    pub fn borrower(&self) -> Option<&str> {
        self.loan.as_ref().map(|loan| loan.member_id.as_str())
    }

    pub fn item_type(&self) -> ItemType {
        self.kind.item_type()
    }

    pub fn type_name(&self) -> &'static str {
        self.item_type().type_name()
    }

    /// Hand the item to a member. This is the only place loan state is set.
    pub fn borrow(&mut self, member_id: &str, now: DateTime<Utc>) -> Result<(), ItemError> {
        if let Some(loan) = &self.loan {
            return Err(ItemError::AlreadyBorrowed {
                item_id: self.id.clone(),
                member_id: loan.member_id.clone(),
            });
        }
        self.loan = Some(ActiveLoan { member_id: member_id.to_string(), loaned_at: now });
        Ok(())
    }

    /// Clear the loan state; harmless on an item that is already available
    pub fn return_item(&mut self) {
        self.loan = None;
    }

    /// Penalty owed at `now` under the variant's built-in rule
    pub fn compute_penalty(&self, now: DateTime<Utc>) -> Decimal {
        self.compute_penalty_with(&self.item_type().default_penalty_rule(), now)
    }

    /// Penalty owed at `now` under an explicit rule
    pub fn compute_penalty_with(&self, rule: &PenaltyRule, now: DateTime<Utc>) -> Decimal {
        match &self.loan {
            Some(loan) => rule.penalty_for(loan.days_elapsed(now)),
            None => Decimal::ZERO,
        }
    }

    /// Case-insensitive match of an already lowercased term against title or author
    pub(crate) fn matches_lowercase(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(term) || self.author.to_lowercase().contains(term)
    }
}
