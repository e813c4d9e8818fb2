use async_trait::async_trait;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskFilter;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::user::models::UserId;

/// Port for task domain service operations.
///
/// Every operation acts on behalf of `user_id`, the identity taken from a
/// validated access token.
#[async_trait]
pub trait TaskServicePort: Send + Sync + 'static {
    /// Create a task owned by `user_id`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_task(
        &self,
        command: CreateTaskCommand,
        user_id: UserId,
    ) -> Result<Task, TaskError>;

    /// Retrieve a task the caller owns.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist (checked before ownership)
    /// * `Unauthorized` - Task belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn get_task(&self, id: TaskId, user_id: UserId) -> Result<Task, TaskError>;

    /// List the caller's tasks matching `filter`, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_tasks(&self, filter: TaskFilter, user_id: UserId)
        -> Result<Vec<Task>, TaskError>;

    /// Apply a partial update to a task the caller owns.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `Unauthorized` - Task belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn update_task(
        &self,
        id: TaskId,
        command: UpdateTaskCommand,
        user_id: UserId,
    ) -> Result<Task, TaskError>;

    /// Soft-delete a task the caller owns.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `Unauthorized` - Task belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn delete_task(&self, id: TaskId, user_id: UserId) -> Result<(), TaskError>;

    /// Mark a task the caller owns as done.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `Unauthorized` - Task belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn complete_task(&self, id: TaskId, user_id: UserId) -> Result<Task, TaskError>;
}

/// Persistence operations for task aggregate.
///
/// Soft-deleted tasks are invisible to every read.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    async fn create(&self, task: Task) -> Result<Task, TaskError>;

    /// # Returns
    /// Optional task (None if absent or deleted)
    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskError>;

    /// Tasks owned by `owner` matching the status, priority and deadline
    /// criteria of `filter`, ordered by creation time descending.
    ///
    /// Free-text search is left to the caller.
    async fn find_all(&self, filter: &TaskFilter, owner: UserId) -> Result<Vec<Task>, TaskError>;

    /// # Errors
    /// * `NotFound` - Task does not exist or is deleted
    async fn update(&self, task: Task) -> Result<Task, TaskError>;

    /// Mark a task deleted, recording who deleted it.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist or is already deleted
    async fn delete(&self, id: TaskId, deleted_by: UserId) -> Result<(), TaskError>;
}
