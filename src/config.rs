//! Configuration management for the Elidune lending ledger

use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;

use crate::{
    error::{LedgerError, LedgerResult},
    models::{BorrowingLimits, ItemType, PenaltyRule},
};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Late-return rule for one item variant
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct PenaltyRuleConfig {
    pub grace_days: u32,
    pub daily_rate: Decimal,
}

impl From<PenaltyRule> for PenaltyRuleConfig {
    fn from(rule: PenaltyRule) -> Self {
        Self { grace_days: rule.grace_days, daily_rate: rule.daily_rate }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LendingConfig {
    pub max_active_loans: usize,
    pub max_penalty: Decimal,
    pub book: PenaltyRuleConfig,
    pub periodical: PenaltyRuleConfig,
    pub media: PenaltyRuleConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    /// Argon2 PHC string of the admin password
    pub admin_password_hash: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// JSON file with items and members registered at startup
    pub seed_file: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub lending: LendingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (e.g. LENDING__LENDING__MAX_ACTIVE_LOANS=3)
            .add_source(
                Environment::with_prefix("LENDING")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option(
                "auth.admin_password_hash",
                env::var("ADMIN_PASSWORD_HASH").ok(),
            )?
            .build()?;

        config.try_deserialize()
    }
}

/// Lending rules the ledger enforces, resolved from configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LendingPolicy {
    pub limits: BorrowingLimits,
    pub book: PenaltyRule,
    pub periodical: PenaltyRule,
    pub media: PenaltyRule,
}

impl LendingPolicy {
    pub fn rule_for(&self, item_type: ItemType) -> &PenaltyRule {
        match item_type {
            ItemType::Book => &self.book,
            ItemType::Periodical => &self.periodical,
            ItemType::Media => &self.media,
        }
    }

    /// Reject rules the ledger cannot apply sensibly
    pub fn validate(&self) -> LedgerResult<()> {
        if self.limits.max_active_loans == 0 {
            return Err(LedgerError::Validation(
                "max_active_loans must be at least 1".to_string(),
            ));
        }
        if self.limits.max_penalty <= Decimal::ZERO {
            return Err(LedgerError::Validation("max_penalty must be positive".to_string()));
        }
        for item_type in ItemType::ALL {
            if self.rule_for(item_type).daily_rate < Decimal::ZERO {
                return Err(LedgerError::Validation(format!(
                    "daily_rate for {} must not be negative",
                    item_type
                )));
            }
        }
        Ok(())
    }
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            limits: BorrowingLimits::default(),
            book: ItemType::Book.default_penalty_rule(),
            periodical: ItemType::Periodical.default_penalty_rule(),
            media: ItemType::Media.default_penalty_rule(),
        }
    }
}

impl From<&LendingConfig> for LendingPolicy {
    fn from(config: &LendingConfig) -> Self {
        let rule = |c: &PenaltyRuleConfig| PenaltyRule::new(c.grace_days, c.daily_rate);
        Self {
            limits: BorrowingLimits {
                max_active_loans: config.max_active_loans,
                max_penalty: config.max_penalty,
            },
            book: rule(&config.book),
            periodical: rule(&config.periodical),
            media: rule(&config.media),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for LendingConfig {
    fn default() -> Self {
        let limits = BorrowingLimits::default();
        Self {
            max_active_loans: limits.max_active_loans,
            max_penalty: limits.max_penalty,
            book: ItemType::Book.default_penalty_rule().into(),
            periodical: ItemType::Periodical.default_penalty_rule().into(),
            media: ItemType::Media.default_penalty_rule().into(),
        }
    }
}
