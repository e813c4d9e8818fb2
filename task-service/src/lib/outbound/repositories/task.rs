use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::domain::task::models::Task;
use crate::domain::task::models::TaskFilter;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskPriority;
use crate::domain::task::models::TaskStatus;
use crate::domain::task::models::TaskTitle;
use crate::domain::task::ports::TaskRepository;
use crate::domain::user::models::UserId;
use crate::task::errors::TaskError;

const TASK_COLUMNS: &str = "id, title, description, status, priority, deadline, user_id, \
                            created_at, created_by, updated_at, updated_by";

pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TaskRow {
    id: Uuid,
    title: String,
    description: String,
    status: String,
    priority: String,
    deadline: Option<DateTime<Utc>>,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    created_by: Uuid,
    updated_at: Option<DateTime<Utc>>,
    updated_by: Option<Uuid>,
}

impl TryFrom<TaskRow> for Task {
    type Error = TaskError;

    fn try_from(r: TaskRow) -> Result<Self, Self::Error> {
        Ok(Task {
            id: TaskId(r.id),
            title: TaskTitle::new(r.title)?,
            description: r.description,
            status: r.status.parse::<TaskStatus>()?,
            priority: r.priority.parse::<TaskPriority>()?,
            deadline: r.deadline,
            user_id: UserId(r.user_id),
            created_at: r.created_at,
            created_by: UserId(r.created_by),
            updated_at: r.updated_at,
            updated_by: r.updated_by.map(UserId),
        })
    }
}

fn database_error(e: sqlx::Error) -> TaskError {
    TaskError::DatabaseError(e.to_string())
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: Task) -> Result<Task, TaskError> {
        sqlx::query(
            r#"
            INSERT INTO tasks (id, title, description, status, priority, deadline,
                               user_id, created_at, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(task.id.0)
        .bind(task.title.as_str())
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .bind(task.deadline)
        .bind(task.user_id.0)
        .bind(task.created_at)
        .bind(task.created_by.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(task)
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM tasks WHERE id = $1 AND deleted_at IS NULL",
            TASK_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Task::try_from).transpose()
    }

    async fn find_all(&self, filter: &TaskFilter, owner: UserId) -> Result<Vec<Task>, TaskError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        query.push(TASK_COLUMNS);
        query.push(" FROM tasks WHERE deleted_at IS NULL AND user_id = ");
        query.push_bind(owner.0);

        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(priority) = filter.priority {
            query.push(" AND priority = ").push_bind(priority.as_str());
        }
        if let Some(deadline) = filter.deadline {
            query.push(" AND deadline <= ").push_bind(deadline);
        }
        query.push(" ORDER BY created_at DESC");

        let rows = query
            .build_query_as::<TaskRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn update(&self, task: Task) -> Result<Task, TaskError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $2, description = $3, status = $4, priority = $5, deadline = $6,
                updated_at = $7, updated_by = $8
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(task.id.0)
        .bind(task.title.as_str())
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .bind(task.deadline)
        .bind(task.updated_at)
        .bind(task.updated_by.map(|u| u.0))
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound(task.id));
        }

        Ok(task)
    }

    async fn delete(&self, id: TaskId, deleted_by: UserId) -> Result<(), TaskError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET deleted_at = $2, deleted_by = $3
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .bind(Utc::now())
        .bind(deleted_by.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound(id));
        }

        Ok(())
    }
}
