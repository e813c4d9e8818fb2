#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;
use task_service::domain::auth::service::AuthService;
use task_service::domain::task::errors::TaskError;
use task_service::domain::task::models::Task;
use task_service::domain::task::models::TaskFilter;
use task_service::domain::task::models::TaskId;
use task_service::domain::task::ports::TaskRepository;
use task_service::domain::task::service::TaskService;
use task_service::domain::user::errors::UserError;
use task_service::domain::user::models::User;
use task_service::domain::user::models::UserId;
use task_service::domain::user::ports::UserRepository;
use task_service::inbound::http::router::create_router;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub users: Arc<InMemoryUserRepository>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let users = Arc::new(InMemoryUserRepository::default());
        let tasks = Arc::new(InMemoryTaskRepository::default());
        let authenticator = Arc::new(Authenticator::new(JWT_SECRET));

        let auth_service = Arc::new(AuthService::new(users.clone(), authenticator.clone()));
        let task_service = Arc::new(TaskService::new(tasks));

        let router = create_router(auth_service, task_service);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            authenticator,
            users,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user, asserting success; returns the response body.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/auth/register")
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in, asserting success; returns the `data` payload.
    pub async fn login(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Register and log in a fresh user; returns its access token.
    pub async fn access_token_for(&self, name: &str, email: &str) -> String {
        self.register(name, email, "pass_word!").await;
        let data = self.login(email, "pass_word!").await;
        data["tokens"]["access_token"]
            .as_str()
            .expect("access token missing")
            .to_string()
    }

    /// Create a task as the bearer of `token`; returns the task id.
    pub async fn create_task(&self, token: &str, body: Value) -> String {
        let response = self
            .post_authenticated("/api/tasks", token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_str().expect("task id missing").to_string()
    }
}

/// Credential store kept in memory; enforces email uniqueness like the
/// `users_email_key` constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn remove_by_email(&self, email: &str) {
        self.users
            .lock()
            .unwrap()
            .retain(|_, user| user.email.as_str() != email);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }
}

/// Task store kept in memory with soft deletion.
#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: Mutex<Vec<(Task, bool)>>,
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: Task) -> Result<Task, TaskError> {
        self.tasks.lock().unwrap().push((task.clone(), false));
        Ok(task)
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskError> {
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .find(|(t, deleted)| t.id == id && !deleted)
            .map(|(t, _)| t.clone()))
    }

    async fn find_all(&self, filter: &TaskFilter, owner: UserId) -> Result<Vec<Task>, TaskError> {
        let mut found: Vec<Task> = self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, deleted)| !deleted && t.user_id == owner)
            .filter(|(t, _)| filter.status.map_or(true, |s| t.status == s))
            .filter(|(t, _)| filter.priority.map_or(true, |p| t.priority == p))
            .filter(|(t, _)| {
                filter
                    .deadline
                    .map_or(true, |bound| t.deadline.is_some_and(|d| d <= bound))
            })
            .map(|(t, _)| t.clone())
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn update(&self, task: Task) -> Result<Task, TaskError> {
        let mut tasks = self.tasks.lock().unwrap();
        match tasks.iter_mut().find(|(t, deleted)| t.id == task.id && !deleted) {
            Some(entry) => {
                entry.0 = task.clone();
                Ok(task)
            }
            None => Err(TaskError::NotFound(task.id)),
        }
    }

    async fn delete(&self, id: TaskId, deleted_by: UserId) -> Result<(), TaskError> {
        let mut tasks = self.tasks.lock().unwrap();
        match tasks.iter_mut().find(|(t, deleted)| t.id == id && !deleted) {
            Some(entry) => {
                entry.0.touch(deleted_by, Utc::now());
                entry.1 = true;
                Ok(())
            }
            None => Err(TaskError::NotFound(id)),
        }
    }
}
