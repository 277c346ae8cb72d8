/// ToDo CRUDハンドラー
///
/// API Gatewayプロキシイベントを受け取り、TodoRepositoryの操作結果を
/// `{statusCode, body}`に整形する。
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info, warn};

use super::request::{json_body, path_parameter, RequestError};
use super::response::ApiResponse;
use crate::infrastructure::{RepositoryError, TodoRepository};

/// `POST /todos` の本文
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub text: String,
}

/// `PUT /todos/{id}` の本文
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub text: String,
    pub checked: bool,
}

/// ToDoアイテムのCRUDを処理するハンドラー
pub struct TodoHandler<R>
where
    R: TodoRepository,
{
    repository: R,
}

impl<R> TodoHandler<R>
where
    R: TodoRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// `POST /todos`
    pub async fn create(&self, event: &Value) -> ApiResponse {
        let request: CreateTodoRequest = match json_body(event) {
            Ok(request) => request,
            Err(err) => return Self::bad_request(err),
        };

        match self.repository.create(&request.text).await {
            Ok(item) => ApiResponse::ok(&item),
            Err(err) => Self::repository_failure("create", err),
        }
    }

    /// `GET /todos/{id}`
    pub async fn get(&self, event: &Value) -> ApiResponse {
        let id = match path_parameter(event, "id") {
            Ok(id) => id,
            Err(err) => return Self::bad_request(err),
        };

        match self.repository.get(id).await {
            Ok(Some(item)) => ApiResponse::ok(&item),
            Ok(None) => ApiResponse::not_found(),
            Err(err) => Self::repository_failure("get", err),
        }
    }

    /// `GET /todos`
    pub async fn list(&self, _event: &Value) -> ApiResponse {
        match self.repository.list_all().await {
            Ok(items) => {
                info!(count = items.len(), "ToDo一覧を取得");
                ApiResponse::ok(&items)
            }
            Err(err) => Self::repository_failure("list", err),
        }
    }

    /// `PUT /todos/{id}`
    pub async fn update(&self, event: &Value) -> ApiResponse {
        let id = match path_parameter(event, "id") {
            Ok(id) => id,
            Err(err) => return Self::bad_request(err),
        };
        let request: UpdateTodoRequest = match json_body(event) {
            Ok(request) => request,
            Err(err) => return Self::bad_request(err),
        };

        match self
            .repository
            .update(id, &request.text, request.checked)
            .await
        {
            Ok(Some(item)) => ApiResponse::ok(&item),
            Ok(None) => ApiResponse::not_found(),
            Err(err) => Self::repository_failure("update", err),
        }
    }

    /// `DELETE /todos/{id}`
    ///
    /// 存在しないIDでも200を返す。
    pub async fn delete(&self, event: &Value) -> ApiResponse {
        let id = match path_parameter(event, "id") {
            Ok(id) => id,
            Err(err) => return Self::bad_request(err),
        };

        match self.repository.delete(id).await {
            Ok(()) => ApiResponse::ok_empty(),
            Err(err) => Self::repository_failure("delete", err),
        }
    }

    fn bad_request(err: RequestError) -> ApiResponse {
        warn!(error = %err, "バリデーション失敗");
        ApiResponse::bad_request(err)
    }

    fn repository_failure(operation: &str, err: RepositoryError) -> ApiResponse {
        error!(operation = %operation, error = %err, "リポジトリ操作に失敗");
        ApiResponse::internal_error()
    }
}
