//! In-memory user store.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use super::{StoreError, UserStore};
use crate::auth::AuthError;
use crate::auth::password::{BCRYPT_COST, hash_password_with_cost};
use crate::models::user::{CreateUser, User, UserStatus, UserWithPassword};

/// Both maps are only ever mutated together, under one write guard.
#[derive(Debug, Default)]
struct Tables {
    /// User ID → record.
    users: HashMap<String, UserWithPassword>,
    /// Email → user ID.
    email_index: HashMap<String, String>,
}

impl Tables {
    fn by_email(&self, email: &str) -> Option<&UserWithPassword> {
        self.email_index
            .get(email)
            .and_then(|id| self.users.get(id))
    }
}

/// [`UserStore`] backed by two hash maps behind a reader/writer lock.
#[derive(Debug)]
pub struct MemoryUserStore {
    tables: RwLock<Tables>,
    bcrypt_cost: u32,
}

impl MemoryUserStore {
    /// Create an empty store hashing passwords at the default bcrypt cost.
    pub fn new() -> Self {
        Self::with_bcrypt_cost(BCRYPT_COST)
    }

    /// Create an empty store with an explicit bcrypt cost (4..=31).
    pub fn with_bcrypt_cost(bcrypt_cost: u32) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            bcrypt_cost,
        }
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for MemoryUserStore {
    fn create(&self, cmd: CreateUser) -> Result<User, StoreError> {
        // Cheap rejection for the common duplicate case. Not authoritative.
        if self.tables.read().email_index.contains_key(&cmd.email) {
            return Err(StoreError::AlreadyExists(cmd.email));
        }

        // Hash outside the lock; bcrypt is deliberately slow.
        let password_hash =
            hash_password_with_cost(&cmd.password, self.bcrypt_cost).map_err(|e| match e {
                AuthError::PasswordTooLong => StoreError::PasswordTooLong,
                e => StoreError::Internal(e.to_string()),
            })?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            first_name: cmd.first_name,
            last_name: cmd.last_name,
            email: cmd.email,
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        };

        let mut tables = self.tables.write();
        if tables.email_index.contains_key(&user.email) {
            return Err(StoreError::AlreadyExists(user.email));
        }
        tables
            .email_index
            .insert(user.email.clone(), user.id.clone());
        tables.users.insert(
            user.id.clone(),
            UserWithPassword {
                user: user.clone(),
                password_hash,
            },
        );

        Ok(user)
    }

    fn query_by_id(&self, id: &str) -> Result<User, StoreError> {
        self.tables
            .read()
            .users
            .get(id)
            .map(|record| record.user.clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn query_by_email(&self, email: &str) -> Result<User, StoreError> {
        self.tables
            .read()
            .by_email(email)
            .map(|record| record.user.clone())
            .ok_or_else(|| StoreError::NotFound(email.to_string()))
    }

    fn query_credentials_by_email(&self, email: &str) -> Result<UserWithPassword, StoreError> {
        self.tables
            .read()
            .by_email(email)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(email.to_string()))
    }

    fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self
            .tables
            .read()
            .users
            .values()
            .map(|record| record.user.clone())
            .collect())
    }

    fn count(&self) -> usize {
        self.tables.read().users.len()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;
    use crate::auth::password::{MAX_PASSWORD_BYTES, verify_password};

    fn store() -> MemoryUserStore {
        MemoryUserStore::with_bcrypt_cost(4)
    }

    fn cmd(email: &str) -> CreateUser {
        CreateUser {
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: email.into(),
            password: "pw123456".into(),
        }
    }

    #[test]
    fn create_sets_defaults() {
        let store = store();
        let user = store.create(cmd("john@example.com")).unwrap();
        assert!(Uuid::parse_str(&user.id).is_ok());
        assert_eq!(user.first_name, "John");
        assert_eq!(user.last_name, "Doe");
        assert_eq!(user.email, "john@example.com");
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.created_at, user.updated_at);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn create_rejects_duplicate_email() {
        let store = store();
        store.create(cmd("john@example.com")).unwrap();
        assert_eq!(
            store.create(cmd("john@example.com")),
            Err(StoreError::AlreadyExists("john@example.com".into()))
        );
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn queries_agree_with_create() {
        let store = store();
        let user = store.create(cmd("john@example.com")).unwrap();
        assert_eq!(store.query_by_id(&user.id).unwrap(), user);
        assert_eq!(store.query_by_email("john@example.com").unwrap(), user);
    }

    #[test]
    fn queries_report_not_found() {
        let store = store();
        assert_eq!(
            store.query_by_id("missing"),
            Err(StoreError::NotFound("missing".into()))
        );
        assert_eq!(
            store.query_by_email("nobody@example.com"),
            Err(StoreError::NotFound("nobody@example.com".into()))
        );
        assert!(store.query_credentials_by_email("nobody@example.com").is_err());
    }

    #[test]
    fn dangling_index_entry_is_not_found() {
        let store = store();
        store
            .tables
            .write()
            .email_index
            .insert("ghost@example.com".into(), "no-such-id".into());
        assert_eq!(
            store.query_by_email("ghost@example.com"),
            Err(StoreError::NotFound("ghost@example.com".into()))
        );
    }

    #[test]
    fn password_is_stored_hashed() {
        let store = store();
        store.create(cmd("john@example.com")).unwrap();
        let creds = store.query_credentials_by_email("john@example.com").unwrap();
        assert_ne!(creds.password_hash, "pw123456");
        assert!(verify_password("pw123456", &creds.password_hash).unwrap());
    }

    #[test]
    fn overlong_password_is_refused_without_inserting() {
        let store = store();
        let mut long = cmd("john@example.com");
        long.password = "x".repeat(MAX_PASSWORD_BYTES + 1);
        assert_eq!(store.create(long), Err(StoreError::PasswordTooLong));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn list_returns_all_users() {
        let store = store();
        assert!(store.list().unwrap().is_empty());
        let a = store.create(cmd("a@example.com")).unwrap();
        let b = store.create(cmd("b@example.com")).unwrap();
        let ids: HashSet<String> = store.list().unwrap().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, HashSet::from([a.id, b.id]));
    }

    #[test]
    fn list_is_a_snapshot() {
        let store = store();
        store.create(cmd("a@example.com")).unwrap();

        let mut snapshot = store.list().unwrap();
        snapshot[0].email = "mutated@example.com".into();
        snapshot.clear();

        store.create(cmd("b@example.com")).unwrap();
        assert!(snapshot.is_empty());

        let fresh = store.list().unwrap();
        assert_eq!(fresh.len(), 2);
        assert!(fresh.iter().all(|u| u.email != "mutated@example.com"));
    }

    #[test]
    fn concurrent_create_same_email_has_one_winner() {
        let store = Arc::new(store());
        let results: Vec<Result<User, StoreError>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(|_| {
                    let store = Arc::clone(&store);
                    s.spawn(move || store.create(cmd("race@example.com")))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);
        assert!(
            results
                .iter()
                .filter_map(|r| r.as_ref().err())
                .all(|e| *e == StoreError::AlreadyExists("race@example.com".into()))
        );
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn concurrent_create_distinct_emails_all_succeed() {
        let store = Arc::new(store());
        std::thread::scope(|s| {
            for i in 0..16 {
                let store = Arc::clone(&store);
                s.spawn(move || store.create(cmd(&format!("user{i}@example.com"))).unwrap());
            }
        });

        let users = store.list().unwrap();
        assert_eq!(users.len(), 16);
        for user in &users {
            assert_eq!(store.query_by_email(&user.email).unwrap(), *user);
            assert_eq!(store.query_by_id(&user.id).unwrap(), *user);
        }
    }
}
