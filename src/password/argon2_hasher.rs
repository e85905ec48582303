use super::{PasswordAlgorithm, PasswordHasher};
use crate::error::{AppError, AppResult};
use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash,
    PasswordHasher as Argon2PasswordHasher, PasswordVerifier, Version,
};

/// Argon2id hasher for staff passwords. Memory and iteration costs come from
/// `auth.argon2_memory_kib` and `auth.argon2_iterations`, with a single lane.
pub struct Argon2idHasher {
    argon2: Argon2<'static>,
}

impl Argon2idHasher {
    /// 19 MiB of memory and 2 iterations
    pub fn new() -> Self {
        Self::from_params(Params::DEFAULT)
    }

    pub fn with_params(memory_kib: u32, iterations: u32) -> AppResult<Self> {
        let params = Params::new(memory_kib, iterations, Params::DEFAULT_P_COST, None).map_err(
            |e| {
                AppError::Configuration(format!(
                    "Invalid Argon2id cost (memory {} KiB, {} iterations): {}",
                    memory_kib, iterations, e
                ))
            },
        )?;

        Ok(Self::from_params(params))
    }

    fn from_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl Default for Argon2idHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2idHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut rand::thread_rng());

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password with Argon2id: {}", e)))
    }

    /// Costs are read from the stored hash, so accounts created before a cost
    /// change keep verifying.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Stored Argon2id hash is corrupt: {}", e)))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::Internal(format!(
                "Failed to verify Argon2id password: {}",
                e
            ))),
        }
    }

    fn is_hash(&self, value: &str) -> bool {
        value.starts_with("$argon2id$") && PasswordHash::new(value).is_ok()
    }

    fn algorithm(&self) -> PasswordAlgorithm {
        PasswordAlgorithm::Argon2id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light_hasher() -> Argon2idHasher {
        Argon2idHasher::with_params(1024, 1).unwrap()
    }

    #[test]
    fn test_registrar_password_round_trip() {
        let hasher = light_hasher();

        let hash = hasher.hash_password("Registrar!42").unwrap();

        assert!(hash.starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));
        assert!(hasher.is_hash(&hash));
        assert!(hasher.verify_password("Registrar!42", &hash).unwrap());
        assert!(!hasher.verify_password("registrar!42", &hash).unwrap());
    }

    #[test]
    fn test_raising_cost_keeps_existing_accounts() {
        let before = light_hasher().hash_password("Registrar!42").unwrap();

        let after = Argon2idHasher::with_params(2048, 2).unwrap();
        assert!(after.verify_password("Registrar!42", &before).unwrap());
        assert!(after
            .hash_password("Registrar!42")
            .unwrap()
            .contains("m=2048,t=2,p=1"));
    }

    #[test]
    fn test_rejects_unusable_costs() {
        assert!(matches!(
            Argon2idHasher::with_params(4, 1),
            Err(AppError::Configuration(_))
        ));
        assert!(matches!(
            Argon2idHasher::with_params(1024, 0),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn test_is_hash_only_accepts_argon2id() {
        let hasher = light_hasher();

        assert!(!hasher.is_hash("Curator2024!"));
        assert!(!hasher.is_hash("$2b$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW"));
        assert!(!hasher.is_hash("$argon2id$garbage"));
    }

    #[test]
    fn test_salts_differ_per_account() {
        let hasher = light_hasher();

        let curator = hasher.hash_password("Curator2024!").unwrap();
        let docent = hasher.hash_password("Curator2024!").unwrap();

        assert_ne!(curator, docent);
    }
}
