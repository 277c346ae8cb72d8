// API Gatewayプロキシ統合のレスポンス
//
// 全ハンドラーは {"statusCode": <int>, "body": <JSON文字列>} の形で返す。

use serde::Serialize;
use serde_json::{json, Value};
use tracing::error;

/// HTTPレスポンスエンベロープ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status_code: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    /// 値をJSON本文にした200レスポンス
    pub fn ok<T: Serialize>(value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self::new(200, body),
            Err(err) => {
                error!(error = %err, "レスポンスのシリアライズに失敗");
                Self::internal_error()
            }
        }
    }

    /// 本文なしの200レスポンス
    pub fn ok_empty() -> Self {
        Self::new(200, "")
    }

    /// 本文なしの404レスポンス
    pub fn not_found() -> Self {
        Self::new(404, "")
    }

    /// エラーメッセージ付きの400レスポンス
    pub fn bad_request(message: impl std::fmt::Display) -> Self {
        Self::new(400, json!({ "error": message.to_string() }).to_string())
    }

    /// 500レスポンス（内部情報は本文に含めない）
    pub fn internal_error() -> Self {
        Self::new(500, json!({ "error": "Internal server error" }).to_string())
    }

    /// Lambdaの戻り値に変換
    pub fn into_value(self) -> Value {
        json!({
            "statusCode": self.status_code,
            "body": self.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TodoItem;

    #[test]
    fn test_ok_serializes_body() {
        let item = TodoItem::new("buy milk", 7);
        let response = ApiResponse::ok(&item);

        assert_eq!(response.status_code, 200);
        let parsed: TodoItem = serde_json::from_str(&response.body).unwrap();
        assert_eq!(parsed, item);
    }

    #[test]
    fn test_not_found_has_empty_body() {
        let response = ApiResponse::not_found();
        assert_eq!(response.status_code, 404);
        assert!(response.body.is_empty());
    }

    #[test]
    fn test_bad_request_body() {
        let response = ApiResponse::bad_request("Missing path parameter: id");
        assert_eq!(response.status_code, 400);

        let parsed: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(parsed["error"], "Missing path parameter: id");
    }

    #[test]
    fn test_into_value_envelope() {
        let value = ApiResponse::new(200, "[]").into_value();

        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["body"], "[]");
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_internal_error_hides_details() {
        let response = ApiResponse::internal_error();
        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, r#"{"error":"Internal server error"}"#);
    }
}
