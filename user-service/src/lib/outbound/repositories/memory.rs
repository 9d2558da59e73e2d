use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::MutexGuard;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// In-process credential store.
///
/// Used by tests and local runs without Postgres. The email uniqueness check
/// and the insert happen under one lock, matching the database's unique
/// constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    last_id: i64,
    users: BTreeMap<i64, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, UserError> {
        self.state
            .lock()
            .map_err(|_| UserError::DatabaseError("user store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut state = self.lock()?;

        if state
            .users
            .values()
            .any(|existing| existing.email == user.email)
        {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        state.last_id += 1;
        let created = User {
            id: UserId(state.last_id),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        state.users.insert(created.id.0, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.lock()?.users.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError> {
        Ok(self
            .lock()?
            .users
            .values()
            .any(|user| user.email.as_str() == email))
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        Ok(self.lock()?.users.values().cloned().collect())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.lock()?
            .users
            .remove(&id.0)
            .map(|_| ())
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::user::models::DisplayName;
    use crate::domain::user::models::EmailAddress;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: DisplayName::new("Someone".to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            role: "ROLE_USER".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repository = InMemoryUserRepository::new();

        let first = repository.create(new_user("a@example.com")).await.unwrap();
        let second = repository.create(new_user("b@example.com")).await.unwrap();

        assert_eq!(first.id, UserId(1));
        assert_eq!(second.id, UserId(2));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repository = InMemoryUserRepository::new();

        repository.create(new_user("a@example.com")).await.unwrap();
        let result = repository.create(new_user("a@example.com")).await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
        assert_eq!(repository.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_by_email() {
        let repository = InMemoryUserRepository::new();
        repository.create(new_user("a@example.com")).await.unwrap();

        assert!(repository.exists_by_email("a@example.com").await.unwrap());
        assert!(!repository.exists_by_email("b@example.com").await.unwrap());
        assert!(repository
            .find_by_email("b@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let repository = InMemoryUserRepository::new();
        let user = repository.create(new_user("a@example.com")).await.unwrap();

        repository.delete(&user.id).await.unwrap();

        assert!(repository.find_by_id(&user.id).await.unwrap().is_none());
        assert!(matches!(
            repository.delete(&user.id).await,
            Err(UserError::NotFound(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_store_one_user() {
        let repository = Arc::new(InMemoryUserRepository::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let repository = Arc::clone(&repository);
                tokio::spawn(async move { repository.create(new_user("race@example.com")).await })
            })
            .collect();

        let mut successes = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(UserError::EmailAlreadyExists(_)) => duplicates += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(duplicates, 15);
    }
}
