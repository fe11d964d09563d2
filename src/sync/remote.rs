use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::core::task::{Task, TaskOwner};

/// A todo as the demo API speaks it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedTodo {
    pub id: i64,
    pub todo: String,
    pub completed: bool,
    pub user_id: u32,
}

impl SeedTodo {
    /// Convert a pool entry into a seed-owned task. The pool carries no
    /// scheduling metadata.
    pub fn into_task(self) -> Task {
        Task {
            id: self.id,
            owner: TaskOwner::Seed(self.user_id),
            title: self.todo,
            date: None,
            time: None,
            important: false,
            category_id: None,
            completed: self.completed,
            created: chrono::Local::now().naive_local(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PoolResponse {
    todos: Vec<SeedTodo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddBody<'a> {
    todo: &'a str,
    completed: bool,
    user_id: u32,
}

#[derive(Debug, Serialize)]
struct UpdateBody {
    completed: bool,
}

/// Client for the public demo todos API.
///
/// The service echoes mutations without persisting them, so every call
/// here is advisory: callers log failures and never feed responses back
/// into local state.
#[derive(Clone)]
pub struct RemoteClient {
    base_url: String,
    http: Client,
}

impl RemoteClient {
    pub fn new(base_url: &str) -> Result<Self, String> {
        let http = Client::builder()
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// GET /todos — the full seed pool.
    pub async fn fetch_pool(&self) -> Result<Vec<SeedTodo>, String> {
        let url = format!("{}/todos", self.base_url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("GET /todos failed: {}", e))?;

        if !resp.status().is_success() {
            return Err(format!("GET /todos returned {}", resp.status()));
        }

        let pool: PoolResponse = resp
            .json()
            .await
            .map_err(|e| format!("Failed to parse /todos response: {}", e))?;

        Ok(pool.todos)
    }

    /// POST /todos/add — mirror a locally-created task.
    pub async fn add_todo(
        &self,
        title: &str,
        completed: bool,
        bucket: u32,
    ) -> Result<SeedTodo, String> {
        let url = format!("{}/todos/add", self.base_url);
        let body = AddBody {
            todo: title,
            completed,
            user_id: bucket,
        };
        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("POST /todos/add failed: {}", e))?;

        if !resp.status().is_success() {
            return Err(format!("POST /todos/add returned {}", resp.status()));
        }

        resp.json()
            .await
            .map_err(|e| format!("Failed to parse add response: {}", e))
    }

    /// PUT /todos/{id} — mirror an edit. Partial body; the service only
    /// simulates the write.
    pub async fn update_todo(&self, id: i64, completed: bool) -> Result<(), String> {
        let url = format!("{}/todos/{}", self.base_url, id);
        let resp = self
            .http
            .put(&url)
            .json(&UpdateBody { completed })
            .send()
            .await
            .map_err(|e| format!("PUT /todos/{} failed: {}", id, e))?;

        match resp.status() {
            s if s.is_success() => Ok(()),
            // Locally-created ids are unknown to the pool
            StatusCode::NOT_FOUND => Ok(()),
            s => Err(format!("PUT /todos/{} returned {}", id, s)),
        }
    }

    /// DELETE /todos/{id} — mirror a deletion.
    pub async fn delete_todo(&self, id: i64) -> Result<(), String> {
        let url = format!("{}/todos/{}", self.base_url, id);
        let resp = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| format!("DELETE /todos/{} failed: {}", id, e))?;

        match resp.status() {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Ok(()),
            s => Err(format!("DELETE /todos/{} returned {}", id, s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_entry_becomes_seed_task() {
        let todo = SeedTodo {
            id: 42,
            todo: "Water the office plants".to_string(),
            completed: true,
            user_id: 7,
        };
        let task = todo.into_task();
        assert_eq!(task.id, 42);
        assert_eq!(task.owner, TaskOwner::Seed(7));
        assert_eq!(task.title, "Water the office plants");
        assert!(task.completed);
        assert!(task.is_seed());
    }

    #[test]
    fn wire_shape_uses_camel_case() {
        let parsed: SeedTodo = serde_json::from_str(
            r#"{"id":1,"todo":"Do something nice","completed":false,"userId":26}"#,
        )
        .unwrap();
        assert_eq!(parsed.user_id, 26);

        let body = serde_json::to_value(AddBody {
            todo: "Buy milk",
            completed: false,
            user_id: 7,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"todo": "Buy milk", "completed": false, "userId": 7})
        );
    }
}
