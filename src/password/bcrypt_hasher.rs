use super::{PasswordAlgorithm, PasswordHasher};
use crate::error::{AppError, AppResult};
use bcrypt::{hash, verify, DEFAULT_COST};

/// bcrypt hasher, used when `auth.password_algorithm` is `bcrypt` and for
/// staff accounts imported with bcrypt hashes
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// `auth.bcrypt_cost`, between 4 and 31
    pub fn with_cost(cost: u32) -> AppResult<Self> {
        if !(4..=31).contains(&cost) {
            return Err(AppError::Configuration(format!(
                "auth.bcrypt_cost must be between 4 and 31, got {}",
                cost
            )));
        }

        Ok(Self { cost })
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        hash(password, self.cost)
            .map_err(|e| AppError::Internal(format!("Failed to hash password with bcrypt: {}", e)))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        verify(password, hash)
            .map_err(|e| AppError::Internal(format!("Stored bcrypt hash is corrupt: {}", e)))
    }

    fn is_hash(&self, value: &str) -> bool {
        // $2$, $2a$, $2b$, $2x$ or $2y$, always 60 characters
        value.starts_with("$2") && value.len() == 60 && value.matches('$').count() == 3
    }

    fn algorithm(&self) -> PasswordAlgorithm {
        PasswordAlgorithm::Bcrypt
    }
}
