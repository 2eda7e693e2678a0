//! Admin access for operations that replace registered entries

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::{
    config::AuthConfig,
    error::{LedgerError, LedgerResult},
};

/// Proof that the caller passed the admin check. Only [`AdminGate`] creates one.
#[derive(Debug)]
pub struct AdminAccess {
    _private: (),
}

/// Verifies the admin password against the configured argon2 hash
#[derive(Debug, Clone, Default)]
pub struct AdminGate {
    password_hash: Option<String>,
}

impl AdminGate {
    /// Gate with no credential configured; every attempt is denied
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AuthConfig) -> LedgerResult<Self> {
        match &config.admin_password_hash {
            Some(hash) => Self::with_hash(hash.clone()),
            None => Ok(Self::disabled()),
        }
    }

    /// Gate checking against a PHC hash string; malformed hashes are rejected up front
    pub fn with_hash(hash: String) -> LedgerResult<Self> {
        PasswordHash::new(&hash)
            .map_err(|e| LedgerError::Validation(format!("Invalid admin password hash: {}", e)))?;
        Ok(Self { password_hash: Some(hash) })
    }

    pub fn is_enabled(&self) -> bool {
        self.password_hash.is_some()
    }

    pub fn authorize(&self, password: &str) -> LedgerResult<AdminAccess> {
        let Some(hash) = &self.password_hash else {
            tracing::warn!("Admin access requested but no admin credential is configured");
            return Err(LedgerError::AccessDenied("admin access is not configured".to_string()));
        };

        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| LedgerError::Validation(format!("Invalid admin password hash: {}", e)))?;
        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
        {
            tracing::info!("Admin access granted");
            Ok(AdminAccess { _private: () })
        } else {
            tracing::warn!("Admin access denied: wrong password");
            Err(LedgerError::AccessDenied("invalid admin password".to_string()))
        }
    }
}

/// Hash a password using Argon2, producing the PHC string stored in configuration
pub fn hash_password(password: &str) -> LedgerResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| LedgerError::Validation(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

#[cfg(test)]
pub(crate) fn test_access() -> AdminAccess {
    AdminAccess { _private: () }
}
