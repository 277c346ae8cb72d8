/// DELETE /todos/{id} ハンドラー
///
/// アイテムを削除する。存在しないIDでも200。
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use todo::application::{ApiResponse, TodoHandler};
use todo::infrastructure::{init_logging, request_span, AppContext};
use tracing::{error, Instrument};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    lambda_runtime::run(service_fn(handler)).await
}

async fn handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let span = request_span("delete", &event.context.request_id);

    async move {
        let context = match AppContext::get_or_init().await {
            Ok(context) => context,
            Err(err) => {
                error!(error = %err, "設定の読み込みに失敗");
                return Ok(ApiResponse::internal_error().into_value());
            }
        };

        let handler = TodoHandler::new(context.repository());
        Ok(handler.delete(&event.payload).await.into_value())
    }
    .instrument(span)
    .await
}
