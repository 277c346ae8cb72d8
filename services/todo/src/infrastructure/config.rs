/// ToDoテーブル接続設定
///
/// 環境変数はプロセス起動時に一度だけ読み込み、
/// 以降は`TodoConfig`/`AwsClients`として各コンポーネントに注入する。
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_comprehend::Client as ComprehendClient;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_translate::Client as TranslateClient;
use thiserror::Error;
use tracing::info;
use url::Url;

/// テーブル名を指定する環境変数（必須）
pub const TABLE_NAME_ENV: &str = "DYNAMODB_TABLE";

/// ローカル/テスト用エンドポイントを指定する環境変数（任意）
pub const ENDPOINT_OVERRIDE_ENV: &str = "ENDPOINT_OVERRIDE";

/// リージョンが解決できない場合のフォールバック
const DEFAULT_REGION: &str = "us-east-1";

/// 設定読み込みのエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
}

/// ToDoサービスの設定
///
/// - DYNAMODB_TABLE: ToDoアイテム用テーブル名
/// - ENDPOINT_OVERRIDE: DynamoDB Local等へ向けるエンドポイント（空文字は未設定扱い）
#[derive(Debug, Clone, PartialEq)]
pub struct TodoConfig {
    /// テーブル名
    table_name: String,
    /// エンドポイント上書き
    endpoint_override: Option<String>,
}

impl TodoConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー検索関数から設定を読み込む
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let table_name = lookup(TABLE_NAME_ENV)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(TABLE_NAME_ENV.to_string()))?;

        let endpoint_override = lookup(ENDPOINT_OVERRIDE_ENV).filter(|v| !v.is_empty());

        Self::new(table_name, endpoint_override)
    }

    /// 明示的な値で設定を作成
    ///
    /// # エラー
    /// - `InvalidEndpoint`: エンドポイントがhttp/httpsのURLでない
    pub fn new(
        table_name: impl Into<String>,
        endpoint_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(endpoint) = &endpoint_override {
            Self::validate_endpoint(endpoint)?;
        }

        Ok(Self {
            table_name: table_name.into(),
            endpoint_override,
        })
    }

    fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
        let url = Url::parse(endpoint)
            .map_err(|e| ConfigError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ConfigError::InvalidEndpoint(format!(
                "{}: scheme must be http or https",
                endpoint
            )));
        }

        Ok(())
    }

    /// テーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// エンドポイント上書きを取得
    pub fn endpoint_override(&self) -> Option<&str> {
        self.endpoint_override.as_deref()
    }

    /// AWS SDK共通設定を読み込む
    ///
    /// エンドポイント上書きはここでは適用しない（`dynamodb_config`を参照）。
    pub async fn load_sdk_config(&self) -> SdkConfig {
        let region = RegionProviderChain::default_provider().or_else(DEFAULT_REGION);
        aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .load()
            .await
    }

    /// DynamoDBクライアント用の設定を作成
    ///
    /// エンドポイント上書きはDynamoDBだけに適用する。
    /// ComprehendとTranslateは常にリージョンの実サービスへ接続する。
    pub fn dynamodb_config(&self, sdk_config: &SdkConfig) -> aws_sdk_dynamodb::Config {
        let mut builder = aws_sdk_dynamodb::config::Builder::from(sdk_config);

        if let Some(endpoint) = &self.endpoint_override {
            info!(endpoint = %endpoint, "DynamoDBエンドポイントを上書き");
            builder = builder.endpoint_url(endpoint.as_str());
        }

        builder.build()
    }
}

/// 1プロセスで共有するAWSクライアント群
#[derive(Debug, Clone)]
pub struct AwsClients {
    pub dynamodb: DynamoDbClient,
    pub comprehend: ComprehendClient,
    pub translate: TranslateClient,
}

impl AwsClients {
    /// 設定からクライアントを生成
    pub async fn from_config(config: &TodoConfig) -> Self {
        let sdk_config = config.load_sdk_config().await;

        Self {
            dynamodb: DynamoDbClient::from_conf(config.dynamodb_config(&sdk_config)),
            comprehend: ComprehendClient::new(&sdk_config),
            translate: TranslateClient::new(&sdk_config),
        }
    }
}
