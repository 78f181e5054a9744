use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, StoreResult, TaskStore, UserStore};
use crate::models::{Task, TaskUpdate, User};

/// Process-local store used when no `DATABASE_URL` is configured, and by the tests.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    /// Insertion order doubles as creation order.
    tasks: RwLock<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(StoreError::Conflict(format!("email {} already registered", user.email)));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks(&self, owner: Uuid) -> StoreResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .iter()
            .filter(|task| task.user_id == owner)
            .cloned()
            .collect())
    }

    async fn create_task(&self, task: Task) -> StoreResult<Task> {
        self.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn find_task(&self, owner: Uuid, id: Uuid) -> StoreResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .iter()
            .find(|task| task.id == id && task.user_id == owner)
            .cloned())
    }

    async fn update_task(&self, owner: Uuid, id: Uuid, update: TaskUpdate) -> StoreResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        match tasks
            .iter_mut()
            .find(|task| task.id == id && task.user_id == owner)
        {
            Some(task) => {
                task.apply(update);
                Ok(Some(task.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_task(&self, owner: Uuid, id: Uuid) -> StoreResult<bool> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|task| !(task.id == id && task.user_id == owner));
        Ok(tasks.len() < before)
    }

    async fn toggle_task(&self, owner: Uuid, id: Uuid) -> StoreResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        match tasks
            .iter_mut()
            .find(|task| task.id == id && task.user_id == owner)
        {
            Some(task) => {
                task.toggle();
                Ok(Some(task.clone()))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, TaskInput};

    fn user(email: &str) -> User {
        User::new("Test".to_string(), email.to_string(), "hash".to_string())
    }

    fn task(title: &str, owner: Uuid) -> Task {
        Task::new(
            TaskInput {
                title: title.to_string(),
                description: None,
                category: None,
            },
            owner,
        )
    }

    #[actix_rt::test]
    async fn test_duplicate_email_is_conflict() {
        let store = MemoryStore::new();
        store.create_user(user("a@x.com")).await.unwrap();

        let err = store.create_user(user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        // case-sensitive: a different spelling is a different account
        assert!(store.create_user(user("A@x.com")).await.is_ok());
    }

    #[actix_rt::test]
    async fn test_user_lookups() {
        let store = MemoryStore::new();
        let created = store.create_user(user("a@x.com")).await.unwrap();

        let by_email = store.find_user_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);
        assert!(store.find_user_by_email("b@x.com").await.unwrap().is_none());
        assert!(store.find_user_by_id(created.id).await.unwrap().is_some());
    }

    #[actix_rt::test]
    async fn test_tasks_are_owner_scoped() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let t = store.create_task(task("alice's", alice)).await.unwrap();

        assert!(store.find_task(bob, t.id).await.unwrap().is_none());
        assert!(store.toggle_task(bob, t.id).await.unwrap().is_none());
        assert!(store
            .update_task(bob, t.id, TaskUpdate { category: Some(Category::Other), ..Default::default() })
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete_task(bob, t.id).await.unwrap());
        assert!(store.list_tasks(bob).await.unwrap().is_empty());

        let still_there = store.find_task(alice, t.id).await.unwrap().unwrap();
        assert_eq!(still_there, t);
    }

    #[actix_rt::test]
    async fn test_list_is_oldest_first() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        store.create_task(task("first", owner)).await.unwrap();
        store.create_task(task("other owner", Uuid::new_v4())).await.unwrap();
        store.create_task(task("second", owner)).await.unwrap();

        let titles: Vec<String> = store
            .list_tasks(owner)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[actix_rt::test]
    async fn test_toggle_and_delete() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let t = store.create_task(task("flip", owner)).await.unwrap();

        assert!(store.toggle_task(owner, t.id).await.unwrap().unwrap().completed);
        assert!(!store.toggle_task(owner, t.id).await.unwrap().unwrap().completed);

        assert!(store.delete_task(owner, t.id).await.unwrap());
        assert!(!store.delete_task(owner, t.id).await.unwrap());
    }
}
