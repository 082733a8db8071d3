//! In-memory user repository

use crate::auth::models::User;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// User store backed by an in-memory map keyed by user id.
///
/// Holds the one piece of server-side session state: each user's current
/// refresh token. All session updates happen inside a single write-lock
/// critical section so concurrent rotations cannot interleave.
pub struct UserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl UserStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a new user, failing if the email is already registered
    pub async fn insert(&self, user: User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(Error::DuplicateIdentity(user.email));
        }
        users.insert(user.id.clone(), user);
        Ok(())
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned()
    }

    /// Find a user by id
    pub async fn find_by_id(&self, id: &str) -> Option<User> {
        self.users.read().await.get(id).cloned()
    }

    /// Record `token` as the user's current refresh token, replacing any
    /// prior one unconditionally. Login path.
    pub async fn set_refresh_token(&self, id: &str, token: &str) -> Result<()> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or(Error::UnknownIdentity)?;
        user.refresh_token = Some(token.to_string());
        Ok(())
    }

    /// Replace the stored refresh token with `next` only if the stored value
    /// still equals `presented`. Returns false on mismatch, which covers
    /// stale, replayed and already-rotated tokens.
    pub async fn swap_refresh_token(&self, id: &str, presented: &str, next: &str) -> bool {
        let mut users = self.users.write().await;
        match users.get_mut(id) {
            Some(user) if user.refresh_token.as_deref() == Some(presented) => {
                user.refresh_token = Some(next.to_string());
                true
            }
            _ => false,
        }
    }

    /// Clear the user's stored refresh token, ending the session
    pub async fn clear_refresh_token(&self, id: &str) {
        if let Some(user) = self.users.write().await.get_mut(id) {
            user.refresh_token = None;
        }
    }

    /// Number of registered users
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for UserStore {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;

    fn test_user(email: &str) -> User {
        User::new(email.to_string(), "hash".to_string(), Role::User)
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = UserStore::new();
        let user = test_user("a@x.com");
        let id = user.id.clone();
        store.insert(user).await.expect("Failed to insert user");

        assert!(store.find_by_email("a@x.com").await.is_some());
        assert!(store.find_by_id(&id).await.is_some());
        assert!(store.find_by_email("b@x.com").await.is_none());
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = UserStore::new();
        store
            .insert(test_user("a@x.com"))
            .await
            .expect("Failed to insert user");

        let result = store.insert(test_user("a@x.com")).await;
        assert!(matches!(result, Err(Error::DuplicateIdentity(_))));
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_set_refresh_token_unknown_user() {
        let store = UserStore::new();
        let result = store.set_refresh_token("missing-id", "token").await;
        assert!(matches!(result, Err(Error::UnknownIdentity)));
    }

    #[tokio::test]
    async fn test_swap_refresh_token() {
        let store = UserStore::new();
        let user = test_user("a@x.com");
        let id = user.id.clone();
        store.insert(user).await.expect("Failed to insert user");
        store
            .set_refresh_token(&id, "first")
            .await
            .expect("Failed to set token");

        // Swap succeeds only against the current value
        assert!(store.swap_refresh_token(&id, "first", "second").await);
        assert!(!store.swap_refresh_token(&id, "first", "third").await);

        let user = store.find_by_id(&id).await.expect("User disappeared");
        assert_eq!(user.refresh_token.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_clear_refresh_token() {
        let store = UserStore::new();
        let user = test_user("a@x.com");
        let id = user.id.clone();
        store.insert(user).await.expect("Failed to insert user");
        store
            .set_refresh_token(&id, "token")
            .await
            .expect("Failed to set token");

        store.clear_refresh_token(&id).await;
        let user = store.find_by_id(&id).await.expect("User disappeared");
        assert!(user.refresh_token.is_none());
        assert!(!store.swap_refresh_token(&id, "token", "next").await);
    }
}
