/// GET /todos/{id}/translate/{language} ハンドラー
///
/// アイテムの本文を言語検出したうえで指定言語に翻訳して返す。
/// 翻訳結果はテーブルに保存しない。
///
/// # 処理フロー
/// 1. 設定とAWSクライアントを取得（プロセス内で1回だけ初期化）
/// 2. DynamoDB/Comprehend/TranslateからTranslateServiceを組み立て
/// 3. TranslateHandlerでレスポンスを生成
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use todo::application::{ApiResponse, TranslateHandler, TranslateService};
use todo::infrastructure::{init_logging, request_span, AppContext};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("翻訳Lambda関数を初期化");

    lambda_runtime::run(service_fn(handler)).await
}

async fn handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let span = request_span("translate", &event.context.request_id);

    async move {
        let context = match AppContext::get_or_init().await {
            Ok(context) => context,
            Err(err) => {
                error!(error = %err, "設定の読み込みに失敗");
                return Ok(ApiResponse::internal_error().into_value());
            }
        };

        let service = TranslateService::new(
            context.repository(),
            context.language_detector(),
            context.translator(),
        );
        let handler = TranslateHandler::new(service);

        Ok(handler.handle(&event.payload).await.into_value())
    }
    .instrument(span)
    .await
}
