use std::collections::BTreeMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::users::{
    repo::{StoreError, UserStore},
    repo_types::{NewUser, User},
};

const EMAIL_CONSTRAINT: &str = "users_email_key";

/// In-process store with the same id and email-uniqueness rules as the `users` table.
#[derive(Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i64,
    rows: BTreeMap<i64, User>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }
}

impl Inner {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().find(|u| u.email == email).cloned())
    }

    async fn find_first_by_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .values()
            .find(|u| u.email == email && u.password == password)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.email_taken(&user.email, None) {
            return Err(StoreError::UniqueViolation(EMAIL_CONSTRAINT.into()));
        }
        inner.last_id += 1;
        let row = User {
            id: inner.last_id,
            email: user.email,
            name: user.name,
            password: user.password,
            password_hash: user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, user: NewUser) -> Result<Option<User>, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.email_taken(&user.email, Some(id)) {
            return Err(StoreError::UniqueViolation(EMAIL_CONSTRAINT.into()));
        }
        let Some(row) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };
        row.email = user.email;
        if let Some(name) = user.name {
            row.name = Some(name);
        }
        row.password = user.password;
        row.password_hash = user.password_hash;
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.inner.write().await.rows.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.into(),
            name: None,
            password: "hash".into(),
            password_hash: "salt".into(),
        }
    }

    #[tokio::test]
    async fn assigns_sequential_ids() {
        let store = InMemoryUserStore::new();
        let a = store.create(new_user("a@example.com")).await.unwrap();
        let b = store.create(new_user("b@example.com")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[tokio::test]
    async fn rejects_duplicate_email_on_create_and_update() {
        let store = InMemoryUserStore::new();
        store.create(new_user("a@example.com")).await.unwrap();
        let b = store.create(new_user("b@example.com")).await.unwrap();

        let err = store.create(new_user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));

        let err = store.update(b.id, new_user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_id_return_none() {
        let store = InMemoryUserStore::new();
        assert!(store.update(42, new_user("x@example.com")).await.unwrap().is_none());
        assert!(store.delete(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_without_name_keeps_it() {
        let store = InMemoryUserStore::new();
        let mut named = new_user("a@example.com");
        named.name = Some("Ada".into());
        let created = store.create(named).await.unwrap();
        let updated = store.update(created.id, new_user("a@example.com")).await.unwrap().unwrap();
        assert_eq!(updated.name.as_deref(), Some("Ada"));
    }
}
