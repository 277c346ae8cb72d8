/// 翻訳ハンドラー
///
/// `GET /todos/{id}/translate/{language}` のLambdaイベントを処理する。
use serde_json::Value;
use tracing::{error, warn};

use super::request::path_parameter;
use super::response::ApiResponse;
use super::translate_service::TranslateService;
use crate::infrastructure::{LanguageDetector, TodoRepository, Translator};

/// 翻訳リクエストを処理するハンドラー
pub struct TranslateHandler<R, D, T>
where
    R: TodoRepository,
    D: LanguageDetector,
    T: Translator,
{
    service: TranslateService<R, D, T>,
}

impl<R, D, T> TranslateHandler<R, D, T>
where
    R: TodoRepository,
    D: LanguageDetector,
    T: Translator,
{
    pub fn new(service: TranslateService<R, D, T>) -> Self {
        Self { service }
    }

    /// 翻訳リクエストを処理
    ///
    /// # レスポンス
    /// * 200 - 翻訳済みアイテムのJSON
    /// * 400 - `id`または`language`パスパラメーターが欠落
    /// * 404 - アイテムが存在しない（本文は空）
    /// * 500 - ストアまたは翻訳サービスのエラー
    pub async fn handle(&self, event: &Value) -> ApiResponse {
        let params = path_parameter(event, "id")
            .and_then(|id| path_parameter(event, "language").map(|language| (id, language)));

        let (id, language) = match params {
            Ok(params) => params,
            Err(err) => {
                warn!(error = %err, "バリデーション失敗");
                return ApiResponse::bad_request(err);
            }
        };

        match self.service.translate_item(id, language).await {
            Ok(Some(item)) => ApiResponse::ok(&item),
            Ok(None) => ApiResponse::not_found(),
            Err(err) => {
                error!(id = %id, language = %language, error = %err, "翻訳に失敗");
                ApiResponse::internal_error()
            }
        }
    }
}
