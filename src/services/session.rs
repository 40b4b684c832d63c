use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::models::User;

pub const USER_KEY: &str = "user";

/// Browser-session scoped key-value storage.
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn with_user(user: &User) -> AppResult<Self> {
        let storage = MemoryStorage::default();
        storage.set_item(USER_KEY, &serde_json::to_string(user)?);
        Ok(storage)
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
    }

    fn remove_item(&self, key: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.remove(key);
        }
    }
}

/// Reads the logged-in user. `Ok(None)` when nobody is logged in.
pub fn current_user(storage: &dyn SessionStorage) -> AppResult<Option<User>> {
    match storage.get_item(USER_KEY) {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| AppError::Session(format!("Malformed user entry: {}", e))),
    }
}

pub fn current_email(storage: &dyn SessionStorage) -> String {
    current_user(storage)
        .ok()
        .flatten()
        .map(|u| u.email)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserType;

    #[test]
    fn reads_stored_user() {
        let user = User {
            user_type: UserType::Employee,
            email: "a@a".into(),
        };
        let storage = MemoryStorage::with_user(&user).unwrap();
        assert_eq!(current_user(&storage).unwrap(), Some(user));
        assert_eq!(current_email(&storage), "a@a");
    }

    #[test]
    fn missing_user_is_none() {
        let storage = MemoryStorage::default();
        assert_eq!(current_user(&storage).unwrap(), None);
        assert_eq!(current_email(&storage), "");
    }

    #[test]
    fn malformed_user_is_session_error() {
        let storage = MemoryStorage::default();
        storage.set_item(USER_KEY, "{not json");
        assert!(matches!(current_user(&storage), Err(AppError::Session(_))));
        assert_eq!(current_email(&storage), "");
    }

    #[test]
    fn remove_item_clears_key() {
        let storage = MemoryStorage::default();
        storage.set_item("k", "v");
        storage.remove_item("k");
        assert_eq!(storage.get_item("k"), None);
    }
}
