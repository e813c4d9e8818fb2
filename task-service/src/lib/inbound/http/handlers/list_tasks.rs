use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TaskData;
use crate::domain::task::models::TaskFilter;
use crate::domain::task::models::TaskPriority;
use crate::domain::task::models::TaskStatus;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Query(query): Query<ListTasksQuery>,
) -> Result<ApiSuccess<Vec<TaskData>>, ApiError> {
    let filter = query.try_into_filter()?;

    state
        .task_service
        .list_tasks(filter, caller.user_id)
        .await
        .map_err(ApiError::from)
        .map(|tasks| ApiSuccess::new(StatusCode::OK, tasks.iter().map(TaskData::from).collect()))
}

/// Query string for task listing; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListTasksQuery {
    status: Option<String>,
    priority: Option<String>,
    /// RFC 3339 upper bound on the deadline
    deadline: Option<String>,
    search: Option<String>,
}

impl ListTasksQuery {
    fn try_into_filter(self) -> Result<TaskFilter, ApiError> {
        let status = non_empty(self.status)
            .map(|s| s.parse::<TaskStatus>())
            .transpose()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let priority = non_empty(self.priority)
            .map(|p| p.parse::<TaskPriority>())
            .transpose()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let deadline = non_empty(self.deadline)
            .map(|d| DateTime::parse_from_rfc3339(&d).map(|d| d.with_timezone(&Utc)))
            .transpose()
            .map_err(|e| ApiError::BadRequest(format!("Invalid deadline: {}", e)))?;

        Ok(TaskFilter {
            status,
            priority,
            deadline,
            search: non_empty(self.search),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
