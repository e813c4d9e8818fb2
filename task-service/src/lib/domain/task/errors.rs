use thiserror::Error;

use crate::domain::task::models::TaskId;
use crate::domain::user::models::UserId;

/// Error type for TaskId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error type for TaskTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskTitleError {
    #[error("Title is empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error type for TaskStatus parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown status: {0} (expected todo, in_progress or done)")]
pub struct TaskStatusError(pub String);

/// Error type for TaskPriority parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown priority: {0} (expected low, medium or high)")]
pub struct TaskPriorityError(pub String);

/// Top-level error type for all task-related operations
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Invalid task ID: {0}")]
    InvalidTaskId(#[from] TaskIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TaskTitleError),

    #[error("Invalid status: {0}")]
    InvalidStatus(#[from] TaskStatusError),

    #[error("Invalid priority: {0}")]
    InvalidPriority(#[from] TaskPriorityError),

    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error("User {user_id} does not own task {task_id}")]
    Unauthorized { user_id: UserId, task_id: TaskId },

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
