//! Hashing and verification of staff account passwords.

use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};

pub mod argon2_hasher;
pub mod bcrypt_hasher;

pub use argon2_hasher::Argon2idHasher;
pub use bcrypt_hasher::BcryptHasher;

/// Algorithm used when hashing new passwords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordAlgorithm {
    Bcrypt,
    #[default]
    Argon2id,
}

impl std::fmt::Display for PasswordAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bcrypt => write!(f, "bcrypt"),
            Self::Argon2id => write!(f, "argon2id"),
        }
    }
}

pub trait PasswordHasher: Send + Sync {
    fn hash_password(&self, password: &str) -> AppResult<String>;

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;

    /// Check if a stored value was produced by this algorithm
    fn is_hash(&self, value: &str) -> bool;

    fn algorithm(&self) -> PasswordAlgorithm;
}

/// Hashes new passwords with the configured algorithm and verifies stored
/// hashes of any supported format, so switching algorithms keeps existing
/// accounts working.
pub struct PasswordManager {
    current_algorithm: PasswordAlgorithm,
    hashers: Vec<Box<dyn PasswordHasher>>,
}

impl Default for PasswordManager {
    fn default() -> Self {
        Self::new(PasswordAlgorithm::default())
    }
}

impl PasswordManager {
    pub fn new(algorithm: PasswordAlgorithm) -> Self {
        Self::with_hashers(
            algorithm,
            vec![Box::new(BcryptHasher::new()), Box::new(Argon2idHasher::new())],
        )
    }

    /// Build from `auth.password_algorithm` and the configured hashing costs
    pub fn from_config(config: &AuthConfig) -> AppResult<Self> {
        Ok(Self::with_hashers(
            config.password_algorithm,
            vec![
                Box::new(BcryptHasher::with_cost(config.bcrypt_cost)?),
                Box::new(Argon2idHasher::with_params(
                    config.argon2_memory_kib,
                    config.argon2_iterations,
                )?),
            ],
        ))
    }

    pub fn with_hashers(
        algorithm: PasswordAlgorithm,
        hashers: Vec<Box<dyn PasswordHasher>>,
    ) -> Self {
        Self {
            current_algorithm: algorithm,
            hashers,
        }
    }

    /// Check the strength policy, then hash with the current algorithm
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        self.validate_password_strength(password)?;

        let hasher = self
            .hashers
            .iter()
            .find(|h| h.algorithm() == self.current_algorithm)
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "No hasher registered for {}",
                    self.current_algorithm
                ))
            })?;

        hasher.hash_password(password)
    }

    /// Verify a password against a stored hash.
    ///
    /// Values in no known format never match.
    pub fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        match self.hashers.iter().find(|h| h.is_hash(hash)) {
            Some(hasher) => hasher.verify_password(password, hash),
            None => {
                tracing::warn!("Stored password hash has an unknown format");
                Ok(false)
            }
        }
    }

    pub fn detect_algorithm(&self, hash: &str) -> Option<PasswordAlgorithm> {
        self.hashers
            .iter()
            .find(|hasher| hasher.is_hash(hash))
            .map(|hasher| hasher.algorithm())
    }

    /// Password policy for staff accounts
    pub fn validate_password_strength(&self, password: &str) -> AppResult<()> {
        if password.len() < 8 {
            return Err(AppError::BadRequest(
                "Password must be at least 8 characters long".to_string(),
            ));
        }

        if password.len() > 128 {
            return Err(AppError::BadRequest(
                "Password must be no more than 128 characters long".to_string(),
            ));
        }

        if !password.chars().any(|c| c.is_lowercase()) {
            return Err(AppError::BadRequest(
                "Password must contain at least one lowercase letter".to_string(),
            ));
        }

        if !password.chars().any(|c| c.is_uppercase()) {
            return Err(AppError::BadRequest(
                "Password must contain at least one uppercase letter".to_string(),
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::BadRequest(
                "Password must contain at least one digit".to_string(),
            ));
        }

        if !password
            .chars()
            .any(|c| "!@#$%^&*()_+-=[]{}|;:,.<>?".contains(c))
        {
            return Err(AppError::BadRequest(
                "Password must contain at least one special character (!@#$%^&*()_+-=[]{}|;:,.<>?)"
                    .to_string(),
            ));
        }

        Ok(())
    }

    pub fn current_algorithm(&self) -> PasswordAlgorithm {
        self.current_algorithm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_manager(algorithm: PasswordAlgorithm) -> PasswordManager {
        PasswordManager::with_hashers(
            algorithm,
            vec![
                Box::new(BcryptHasher::with_cost(4).unwrap()),
                Box::new(Argon2idHasher::new()),
            ],
        )
    }

    #[test]
    fn test_password_manager_default() {
        let pm = PasswordManager::default();
        assert_eq!(pm.current_algorithm(), PasswordAlgorithm::Argon2id);
    }

    #[test]
    fn test_password_strength_validation() {
        let pm = PasswordManager::default();

        assert!(pm.validate_password_strength("Curator2024!").is_ok());
        assert!(pm.validate_password_strength("Cur1!").is_err());
        assert!(pm.validate_password_strength("curator2024!").is_err());
        assert!(pm.validate_password_strength("CURATOR2024!").is_err());
        assert!(pm.validate_password_strength("CuratorPass!").is_err());
        assert!(pm.validate_password_strength("Curator2024").is_err());
    }

    #[test]
    fn test_weak_password_is_not_hashed() {
        let pm = fast_manager(PasswordAlgorithm::Bcrypt);
        assert!(matches!(
            pm.hash_password("short"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_verify_across_algorithms() {
        let bcrypt = fast_manager(PasswordAlgorithm::Bcrypt);
        let argon = fast_manager(PasswordAlgorithm::Argon2id);

        let old_hash = bcrypt.hash_password("Curator2024!").unwrap();
        assert_eq!(
            argon.detect_algorithm(&old_hash),
            Some(PasswordAlgorithm::Bcrypt)
        );
        assert!(argon.verify_password("Curator2024!", &old_hash).unwrap());
        assert!(!argon.verify_password("Curator2025!", &old_hash).unwrap());
    }

    #[test]
    fn test_from_config_applies_costs() {
        let config = AuthConfig {
            password_algorithm: PasswordAlgorithm::Bcrypt,
            bcrypt_cost: 5,
            argon2_memory_kib: 1024,
            argon2_iterations: 1,
            ..AuthConfig::default()
        };
        let pm = PasswordManager::from_config(&config).unwrap();

        let hash = pm.hash_password("Curator2024!").unwrap();
        assert!(hash.starts_with("$2b$05$"));

        let argon = PasswordManager::from_config(&AuthConfig {
            password_algorithm: PasswordAlgorithm::Argon2id,
            ..config.clone()
        })
        .unwrap();
        assert!(argon
            .hash_password("Curator2024!")
            .unwrap()
            .contains("m=1024,t=1,p=1"));
        assert!(argon.verify_password("Curator2024!", &hash).unwrap());
    }

    #[test]
    fn test_from_config_rejects_bad_costs() {
        let config = AuthConfig {
            bcrypt_cost: 2,
            ..AuthConfig::default()
        };
        assert!(matches!(
            PasswordManager::from_config(&config),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn test_unknown_hash_format_never_matches() {
        let pm = PasswordManager::default();
        assert!(!pm.verify_password("Curator2024!", "Curator2024!").unwrap());
    }

    #[test]
    fn test_algorithm_from_config_value() {
        let algorithm: PasswordAlgorithm = serde_yaml::from_str("bcrypt").unwrap();
        assert_eq!(algorithm, PasswordAlgorithm::Bcrypt);
        assert_eq!(PasswordAlgorithm::Argon2id.to_string(), "argon2id");
    }
}
