//! User storage.
//!
//! [`UserStore`] is the seam the auth workflow and API layer depend on;
//! [`MemoryUserStore`] is the process-local implementation.

pub mod memory;

pub use memory::MemoryUserStore;

use thiserror::Error;

use crate::models::user::{CreateUser, User, UserWithPassword};

/// User store errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("user with email {0} already exists")]
    AlreadyExists(String),

    #[error("user {0} doesn't exist")]
    NotFound(String),

    #[error("password is longer than bcrypt can hash")]
    PasswordTooLong,

    #[error("store error: {0}")]
    Internal(String),
}

/// Storage backend for user records.
pub trait UserStore: Send + Sync {
    /// Create a user. Fails with `AlreadyExists` if the email is taken.
    fn create(&self, cmd: CreateUser) -> Result<User, StoreError>;

    /// Look up a user by ID.
    fn query_by_id(&self, id: &str) -> Result<User, StoreError>;

    /// Look up a user by email.
    fn query_by_email(&self, email: &str) -> Result<User, StoreError>;

    /// Look up a user by email along with the stored password hash.
    fn query_credentials_by_email(&self, email: &str) -> Result<UserWithPassword, StoreError>;

    /// Snapshot of all users, in no particular order.
    fn list(&self) -> Result<Vec<User>, StoreError>;

    /// Number of stored users.
    fn count(&self) -> usize;
}
