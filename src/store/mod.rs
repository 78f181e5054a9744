//! Persistence seam for users and tasks.
//!
//! Handlers only see the `UserStore` and `TaskStore` traits. Every task method
//! takes the owner id and filters on it, so a task belonging to someone else is
//! reported exactly like a missing one.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::fmt;
use uuid::Uuid;

use crate::models::{Task, TaskUpdate, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors reported by a store implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    Conflict(String),
    /// Anything else: connectivity, decoding, constraint failures we do not expect.
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::Conflict(msg) => write!(f, "conflict: {}", msg),
            StoreError::Backend(msg) => write!(f, "store failure: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

pub type StoreResult<T> = Result<T, StoreError>;

/// Credential store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts `user`; fails with `StoreError::Conflict` when the email is taken.
    async fn create_user(&self, user: User) -> StoreResult<User>;

    /// Exact, case-sensitive lookup.
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Not used by the guard, which trusts the token subject. Kept for a guard
    /// that re-fetches the caller on every request.
    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;
}

/// Task store. All reads and writes are scoped to `owner`.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Tasks of `owner`, oldest first.
    async fn list_tasks(&self, owner: Uuid) -> StoreResult<Vec<Task>>;

    async fn create_task(&self, task: Task) -> StoreResult<Task>;

    async fn find_task(&self, owner: Uuid, id: Uuid) -> StoreResult<Option<Task>>;

    async fn update_task(&self, owner: Uuid, id: Uuid, update: TaskUpdate) -> StoreResult<Option<Task>>;

    /// Returns `false` when nothing matched.
    async fn delete_task(&self, owner: Uuid, id: Uuid) -> StoreResult<bool>;

    /// Flips `completed` and returns the stored result.
    async fn toggle_task(&self, owner: Uuid, id: Uuid) -> StoreResult<Option<Task>>;
}
