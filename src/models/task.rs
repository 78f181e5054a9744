use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// The fixed set of task categories.
/// Corresponds to the `task_category` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_category")]
pub enum Category {
    Work,
    Personal,
    Other,
}

impl Default for Category {
    fn default() -> Self {
        Category::Work
    }
}

/// Body of `POST /api/tasks`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// Required, between 1 and 200 characters.
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    /// Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Falls back to `Category::Work` when omitted.
    pub category: Option<Category>,
}

/// Body of `PUT /api/tasks/{id}`. Fields left out keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 200, message = "Title cannot be empty"))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub completed: Option<bool>,

    pub category: Option<Category>,
}

/// A task as stored and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Task {
    /// Serialized as `_id`, the key the browser client reads.
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub category: Category,
    /// Owner, fixed at creation.
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Builds a new, not yet completed task owned by `owner`.
    pub fn new(input: TaskInput, owner: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            completed: false,
            category: input.category.unwrap_or_default(),
            user_id: owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the fields present in `update`. Ownership is never touched.
    pub fn apply(&mut self, update: TaskUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        self.updated_at = Utc::now();
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str) -> TaskInput {
        TaskInput {
            title: title.to_string(),
            description: None,
            category: None,
        }
    }

    #[test]
    fn test_task_creation_defaults() {
        let owner = Uuid::new_v4();
        let task = Task::new(input("Test Task"), owner);

        assert_eq!(task.title, "Test Task");
        assert_eq!(task.user_id, owner);
        assert_eq!(task.category, Category::Work);
        assert!(!task.completed);
        assert!(task.description.is_none());
    }

    #[test]
    fn test_task_validation() {
        assert!(input("Valid Task").validate().is_ok());
        assert!(input("").validate().is_err());
        assert!(input(&"a".repeat(201)).validate().is_err());

        let long_description = TaskInput {
            title: "ok".to_string(),
            description: Some("b".repeat(1001)),
            category: Some(Category::Personal),
        };
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn test_update_validation() {
        assert!(TaskUpdate::default().validate().is_ok());

        let empty_title = TaskUpdate {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(empty_title.validate().is_err());
    }

    #[test]
    fn test_apply_keeps_missing_fields() {
        let owner = Uuid::new_v4();
        let mut task = Task::new(
            TaskInput {
                title: "Original".to_string(),
                description: Some("keep me".to_string()),
                category: Some(Category::Personal),
            },
            owner,
        );

        task.apply(TaskUpdate {
            completed: Some(true),
            ..Default::default()
        });

        assert_eq!(task.title, "Original");
        assert_eq!(task.description.as_deref(), Some("keep me"));
        assert_eq!(task.category, Category::Personal);
        assert!(task.completed);
        assert_eq!(task.user_id, owner);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut task = Task::new(input("Flip"), Uuid::new_v4());
        task.toggle();
        assert!(task.completed);
        task.toggle();
        assert!(!task.completed);
    }

    #[test]
    fn test_category_wire_format() {
        assert_eq!(serde_json::to_value(Category::Work).unwrap(), "Work");
        let parsed: Category = serde_json::from_str("\"Other\"").unwrap();
        assert_eq!(parsed, Category::Other);
        assert!(serde_json::from_str::<Category>("\"Chores\"").is_err());
    }

    #[test]
    fn test_task_id_wire_key() {
        let task = Task::new(input("Keyed"), Uuid::new_v4());
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["_id"], task.id.to_string());
        assert!(json.get("id").is_none());

        let mut legacy = json.clone();
        let id = legacy.as_object_mut().unwrap().remove("_id").unwrap();
        legacy["id"] = id;
        let parsed: Task = serde_json::from_value(legacy).unwrap();
        assert_eq!(parsed, task);
    }
}
