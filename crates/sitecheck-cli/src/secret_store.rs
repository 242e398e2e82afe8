//! Safe Browsing API key persistence in the OS keychain.

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Mutex, OnceLock};

#[cfg(not(test))]
use keyring::Entry;

use sitecheck_core::config::API_KEY_VAR;
use sitecheck_core::util::normalize_text_option;

use crate::error::CliError;

#[cfg(not(test))]
const KEYRING_SERVICE_NAME: &str = "sitecheck";
const API_KEY_USERNAME: &str = "api_key";

#[derive(Clone)]
pub struct ApiKeyStore {
    username: String,
}

impl Default for ApiKeyStore {
    fn default() -> Self {
        Self::new(API_KEY_USERNAME)
    }
}

impl ApiKeyStore {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
        }
    }

    #[cfg(test)]
    fn test_store() -> &'static Mutex<HashMap<String, String>> {
        static STORE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
        STORE.get_or_init(|| Mutex::new(HashMap::new()))
    }

    #[cfg(not(test))]
    fn entry(&self) -> Result<Entry, CliError> {
        Entry::new(KEYRING_SERVICE_NAME, &self.username)
            .map_err(|error| CliError::SecureStorage(error.to_string()))
    }

    #[cfg(not(test))]
    pub fn load(&self) -> Result<Option<String>, CliError> {
        let entry = self.entry()?;
        match entry.get_password() {
            Ok(raw) => Ok(normalize_text_option(Some(raw))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(CliError::SecureStorage(error.to_string())),
        }
    }

    #[cfg(test)]
    pub fn load(&self) -> Result<Option<String>, CliError> {
        let guard = Self::test_store()
            .lock()
            .map_err(|error| CliError::SecureStorage(error.to_string()))?;
        Ok(normalize_text_option(guard.get(&self.username).cloned()))
    }

    /// Stores the key, then reads it back through a fresh entry so a backend
    /// that silently drops credentials is reported instead of trusted.
    #[cfg(not(test))]
    pub fn save(&self, api_key: &str) -> Result<(), CliError> {
        let api_key = validated_key(api_key)?;
        self.entry()?
            .set_password(&api_key)
            .map_err(|error| CliError::SecureStorage(error.to_string()))?;
        ensure_retained(&api_key, self.load()?.as_deref())
    }

    #[cfg(test)]
    pub fn save(&self, api_key: &str) -> Result<(), CliError> {
        let api_key = validated_key(api_key)?;
        let mut guard = Self::test_store()
            .lock()
            .map_err(|error| CliError::SecureStorage(error.to_string()))?;
        guard.insert(self.username.clone(), api_key);
        Ok(())
    }

    #[cfg(not(test))]
    pub fn clear(&self) -> Result<(), CliError> {
        let entry = self.entry()?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(CliError::SecureStorage(error.to_string())),
        }
    }

    #[cfg(test)]
    pub fn clear(&self) -> Result<(), CliError> {
        let mut guard = Self::test_store()
            .lock()
            .map_err(|error| CliError::SecureStorage(error.to_string()))?;
        guard.remove(&self.username);
        Ok(())
    }
}

fn validated_key(api_key: &str) -> Result<String, CliError> {
    normalize_text_option(Some(api_key.to_string()))
        .ok_or_else(|| CliError::InvalidInput("kunci API tidak boleh kosong".to_string()))
}

fn ensure_retained(expected: &str, stored: Option<&str>) -> Result<(), CliError> {
    if stored == Some(expected) {
        Ok(())
    } else {
        Err(CliError::SecureStorage(format!(
            "keychain tidak menyimpan kunci API; gunakan {API_KEY_VAR}"
        )))
    }
}

/// Show only the last four characters of a key.
pub fn mask_api_key(api_key: &str) -> String {
    let chars: Vec<char> = api_key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{visible}", "*".repeat(chars.len() - 4))
}
