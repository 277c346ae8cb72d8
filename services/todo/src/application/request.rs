/// API Gatewayプロキシイベントからの入力取り出し
///
/// パスパラメーターは`pathParameters`、本文は`body`（JSON文字列）から読む。
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// リクエスト検証のエラー型（400として返す）
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RequestError {
    /// 必須パスパラメーターが欠落または空
    #[error("Missing path parameter: {0}")]
    MissingPathParameter(String),

    /// 本文が欠落、またはJSONとして不正
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

/// 必須パスパラメーターを取得
pub fn path_parameter<'a>(event: &'a Value, name: &str) -> Result<&'a str, RequestError> {
    event
        .get("pathParameters")
        .and_then(|params| params.get(name))
        .and_then(|v| v.as_str())
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| RequestError::MissingPathParameter(name.to_string()))
}

/// JSON本文をデシリアライズ
pub fn json_body<T: DeserializeOwned>(event: &Value) -> Result<T, RequestError> {
    let body = event
        .get("body")
        .and_then(|v| v.as_str())
        .ok_or_else(|| RequestError::InvalidBody("missing body".to_string()))?;

    serde_json::from_str(body).map_err(|e| RequestError::InvalidBody(e.to_string()))
}
