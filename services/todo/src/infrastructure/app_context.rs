/// Lambdaプロセス単位で共有する依存関係
///
/// 設定とAWSクライアントはコールドスタート時に一度だけ初期化し、
/// warm start時は静的インスタンスを再利用する。
use tokio::sync::OnceCell;
use tracing::info;

use super::{
    AwsClients, AwsTranslator, ComprehendLanguageDetector, ConfigError, DynamoTodoRepository,
    TodoConfig,
};

static APP_CONTEXT: OnceCell<AppContext> = OnceCell::const_new();

/// 設定とクライアントの組
#[derive(Debug, Clone)]
pub struct AppContext {
    config: TodoConfig,
    clients: AwsClients,
}

impl AppContext {
    /// 明示的な設定からコンテキストを作成
    pub async fn from_config(config: TodoConfig) -> Self {
        let clients = AwsClients::from_config(&config).await;
        Self { config, clients }
    }

    /// 静的コンテキストを取得（初期化されていなければ環境変数から初期化）
    pub async fn get_or_init() -> Result<&'static AppContext, ConfigError> {
        APP_CONTEXT
            .get_or_try_init(|| async {
                let config = TodoConfig::from_env()?;
                info!(
                    table_name = %config.table_name(),
                    endpoint_override = ?config.endpoint_override(),
                    "設定読み込み完了"
                );
                Ok(Self::from_config(config).await)
            })
            .await
    }

    /// DynamoDBリポジトリを作成
    pub fn repository(&self) -> DynamoTodoRepository {
        DynamoTodoRepository::new(self.clients.dynamodb.clone(), self.config.table_name())
    }

    /// Comprehend言語検出を作成
    pub fn language_detector(&self) -> ComprehendLanguageDetector {
        ComprehendLanguageDetector::new(self.clients.comprehend.clone())
    }

    /// Translate翻訳を作成
    pub fn translator(&self) -> AwsTranslator {
        AwsTranslator::new(self.clients.translate.clone())
    }
}
