pub mod task;
pub mod user;

pub use task::{Category, Task, TaskInput, TaskUpdate};
pub use user::User;
