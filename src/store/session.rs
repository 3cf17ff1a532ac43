use tracing::info;

use super::{SharedStore, StoreError};
use crate::models::User;

const TOKEN_KEY: &str = "auth:token";
const USER_KEY: &str = "auth:user";

/// Сессия пользователя поверх KV-порта: bearer-токен и профиль.
///
/// Исходная система раскладывала эти значения то в sessionStorage, то в
/// localStorage в зависимости от экрана. Здесь одна согласованная схема
/// ключей `auth:*` в одном хранилище.
#[derive(Clone)]
pub struct SessionStore {
    store: SharedStore,
}

impl SessionStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn login(&self, token: &str, user: &User) -> Result<(), StoreError> {
        self.store.put(TOKEN_KEY, token)?;
        self.store.put(USER_KEY, &serde_json::to_string(user)?)?;
        info!(user = %user.username, "session started");
        Ok(())
    }

    pub fn logout(&self) -> Result<(), StoreError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        info!("session cleared");
        Ok(())
    }

    pub fn bearer_token(&self) -> Result<Option<String>, StoreError> {
        self.store.get(TOKEN_KEY)
    }

    pub fn current_user(&self) -> Result<Option<User>, StoreError> {
        match self.store.get(USER_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;
    use std::sync::Arc;

    fn user() -> User {
        User {
            id: 1,
            username: "demo".to_string(),
            email: SafeEmail().fake(),
            is_admin: false,
            is_active: true,
            created_at: None,
        }
    }

    #[test]
    fn login_then_logout_round_trip() {
        let session = SessionStore::new(Arc::new(MemoryStore::new()));
        assert!(session.current_user().unwrap().is_none());
        assert!(session.bearer_token().unwrap().is_none());

        let user = user();
        session.login("tok-123", &user).unwrap();
        assert_eq!(session.bearer_token().unwrap().as_deref(), Some("tok-123"));
        assert_eq!(session.current_user().unwrap().unwrap().email, user.email);

        session.logout().unwrap();
        assert!(session.current_user().unwrap().is_none());
        assert!(session.bearer_token().unwrap().is_none());
    }
}
