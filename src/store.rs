use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::RwLock;

/// User record held by the in-memory store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

/// Returned by [`UserStore::create`] when the email is already registered.
#[derive(Debug, Error)]
#[error("email already registered")]
pub struct EmailTaken;

struct StoreInner {
    users: Vec<User>,
    next_id: u64,
}

/// Process-lifetime user store. No persistence across restarts; a real
/// deployment swaps this for a durable keyed store behind the same API.
///
/// Ids start at 1 and are assigned in insertion order. Email lookup is
/// a case-sensitive exact match.
pub struct UserStore {
    inner: RwLock<StoreInner>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                users: Vec::new(),
                next_id: 1,
            }),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let inner = self.inner.read().await;
        inner.users.iter().find(|u| u.email == email).cloned()
    }

    pub async fn find_by_id(&self, id: u64) -> Option<User> {
        let inner = self.inner.read().await;
        inner.users.iter().find(|u| u.id == id).cloned()
    }

    /// Append a new user. The duplicate-email check and the insert happen
    /// under one write lock, so concurrent registrations with the same email
    /// cannot both succeed.
    pub async fn create(
        &self,
        full_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, EmailTaken> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.email == email) {
            return Err(EmailTaken);
        }
        let user = User {
            id: inner.next_id,
            full_name: full_name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        inner.next_id += 1;
        inner.users.push(user.clone());
        Ok(user)
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_sequential_from_one() {
        let store = UserStore::new();
        let a = store.create("Ada", "ada@example.com", "hash-a").await.unwrap();
        let b = store.create("Bob", "bob@example.com", "hash-b").await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_and_store_unchanged() {
        let store = UserStore::new();
        store
            .create("Ada", "ada@example.com", "hash-a")
            .await
            .unwrap();
        let err = store.create("Imposter", "ada@example.com", "hash-b").await;
        assert!(err.is_err());

        let found = store.find_by_email("ada@example.com").await.unwrap();
        assert_eq!(found.id, 1);
        assert_eq!(found.full_name, "Ada");
    }

    #[tokio::test]
    async fn email_lookup_is_case_sensitive() {
        let store = UserStore::new();
        store
            .create("Ada", "ada@example.com", "hash-a")
            .await
            .unwrap();
        assert!(store.find_by_email("Ada@example.com").await.is_none());
        // Differing only in case counts as a distinct email
        let other = store
            .create("Other Ada", "Ada@example.com", "hash-b")
            .await
            .unwrap();
        assert_eq!(other.id, 2);
    }

    #[tokio::test]
    async fn find_by_id_misses_unknown_ids() {
        let store = UserStore::new();
        assert!(store.find_by_id(1).await.is_none());
        let user = store
            .create("Ada", "ada@example.com", "hash-a")
            .await
            .unwrap();
        assert_eq!(store.find_by_id(user.id).await.unwrap().email, "ada@example.com");
        assert!(store.find_by_id(99).await.is_none());
    }
}
