use std::sync::Arc;

use crate::auth::TokenKeys;
use crate::store::{TaskStore, UserStore};

/// Shared per-application state handed to every handler through `web::Data`.
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub keys: TokenKeys,
    pub bcrypt_cost: u32,
}

impl AppState {
    /// Uses one backend for both users and tasks.
    pub fn new<S>(store: Arc<S>, keys: TokenKeys, bcrypt_cost: u32) -> Self
    where
        S: UserStore + TaskStore + 'static,
    {
        Self {
            users: store.clone(),
            tasks: store,
            keys,
            bcrypt_cost,
        }
    }
}
