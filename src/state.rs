use std::sync::Arc;

use crate::backend::Gateway;
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::password::PasswordManager;
use crate::token::TokenService;

/// Shared handles injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn Gateway>,
    pub tokens: Arc<TokenService>,
    pub passwords: Arc<PasswordManager>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn Gateway>, config: &AppConfig) -> AppResult<Self> {
        let tokens = TokenService::from_config(&config.auth);
        let passwords = PasswordManager::from_config(&config.auth)?;

        Ok(Self {
            gateway,
            tokens: Arc::new(tokens),
            passwords: Arc::new(passwords),
        })
    }
}
