use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::TaskError;
use super::models::CreateTaskCommand;
use super::models::Task;
use super::models::TaskFilter;
use super::models::TaskId;
use super::models::TaskStatus;
use super::models::UpdateTaskCommand;
use super::ports::TaskRepository;
use super::ports::TaskServicePort;
use crate::domain::user::models::UserId;

/// Concrete implementation of TaskServicePort.
///
/// Every operation on an existing task looks it up first, then applies the
/// ownership gate, so a missing task is reported as such to any caller.
pub struct TaskService<TR>
where
    TR: TaskRepository,
{
    task_repository: Arc<TR>,
}

impl<TR> TaskService<TR>
where
    TR: TaskRepository,
{
    pub fn new(task_repository: Arc<TR>) -> Self {
        Self { task_repository }
    }

    async fn owned_task(&self, id: TaskId, user_id: UserId) -> Result<Task, TaskError> {
        let task = self
            .task_repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        task.ensure_owned_by(&user_id).inspect_err(|_| {
            tracing::warn!(task_id = %id, user_id = %user_id, "Access to foreign task denied");
        })?;

        Ok(task)
    }
}

#[async_trait]
impl<TR> TaskServicePort for TaskService<TR>
where
    TR: TaskRepository + 'static,
{
    async fn create_task(
        &self,
        command: CreateTaskCommand,
        user_id: UserId,
    ) -> Result<Task, TaskError> {
        let task = Task {
            id: TaskId::new(),
            title: command.title,
            description: command.description,
            status: TaskStatus::Todo,
            priority: command.priority,
            deadline: command.deadline,
            user_id,
            created_at: Utc::now(),
            created_by: user_id,
            updated_at: None,
            updated_by: None,
        };

        self.task_repository.create(task).await
    }

    async fn get_task(&self, id: TaskId, user_id: UserId) -> Result<Task, TaskError> {
        self.owned_task(id, user_id).await
    }

    async fn list_tasks(
        &self,
        filter: TaskFilter,
        user_id: UserId,
    ) -> Result<Vec<Task>, TaskError> {
        let tasks = self.task_repository.find_all(&filter, user_id).await?;

        Ok(match filter.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => tasks
                .into_iter()
                .filter(|task| task.matches_search(needle))
                .collect(),
            _ => tasks,
        })
    }

    async fn update_task(
        &self,
        id: TaskId,
        command: UpdateTaskCommand,
        user_id: UserId,
    ) -> Result<Task, TaskError> {
        let mut task = self.owned_task(id, user_id).await?;

        if let Some(title) = command.title {
            task.title = title;
        }
        if let Some(description) = command.description {
            task.description = description;
        }
        if let Some(status) = command.status {
            task.status = status;
        }
        if let Some(priority) = command.priority {
            task.priority = priority;
        }
        if let Some(deadline) = command.deadline {
            task.deadline = deadline;
        }
        task.touch(user_id, Utc::now());

        self.task_repository.update(task).await
    }

    async fn delete_task(&self, id: TaskId, user_id: UserId) -> Result<(), TaskError> {
        self.owned_task(id, user_id).await?;
        self.task_repository.delete(id, user_id).await
    }

    async fn complete_task(&self, id: TaskId, user_id: UserId) -> Result<Task, TaskError> {
        let mut task = self.owned_task(id, user_id).await?;
        task.mark_completed(user_id, Utc::now());

        self.task_repository.update(task).await
    }
}
