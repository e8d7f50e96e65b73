//! REST client for `/api/todos`.

use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Todo as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    pub due_date: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of a create request.
#[derive(Debug, Clone, Serialize)]
pub struct TodoInput {
    pub title: String,
    pub description: String,
    pub due_date: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn todos_url(&self) -> String {
        format!("{}/api/todos", self.base_url)
    }

    pub async fn list(&self, status: Option<&str>) -> Result<Vec<Todo>, ClientError> {
        let mut request = self.http.get(self.todos_url());
        if let Some(status) = status {
            request = request.query(&[("status", status)]);
        }
        let response = check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    pub async fn get(&self, id: i64) -> Result<Todo, ClientError> {
        let response = self
            .http
            .get(format!("{}/{}", self.todos_url(), id))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn create(&self, input: &TodoInput) -> Result<Todo, ClientError> {
        let response = self.http.post(self.todos_url()).json(input).send().await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn update_status(&self, id: i64, status: &str) -> Result<Todo, ClientError> {
        let response = self
            .http
            .put(format!("{}/{}", self.todos_url(), id))
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(format!("{}/{}", self.todos_url(), id))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

/// Turn a non-success response into `ClientError::Status`.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        message: error_message(status, &text),
    })
}

fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    }
}
