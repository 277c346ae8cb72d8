//! ToDoテーブル管理モジュール
//!
//! DynamoDB Localや検証環境向けに、`id`をパーティションキーとする
//! ToDoテーブルを作成し、ACTIVEになるまで待機する。

use aws_sdk_dynamodb::types::{
    AttributeDefinition, KeySchemaElement, KeyType, ProvisionedThroughput, ScalarAttributeType,
    TableStatus,
};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, warn};

/// テーブル管理操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TableAdminError {
    /// テーブル定義の構築に失敗
    #[error("Invalid table definition: {0}")]
    InvalidDefinition(String),

    /// AWS DynamoDB APIエラー
    #[error("DynamoDB API error: {0}")]
    AwsSdkError(String),

    /// ACTIVEになるまでにタイムアウト
    #[error("Table {0} did not become active within {1} seconds")]
    Timeout(String, u64),
}

/// テーブル作成結果
#[derive(Debug, Clone, PartialEq)]
pub enum CreateTableOutcome {
    /// 新規作成した
    Created,
    /// 既に存在していた
    AlreadyExists,
}

/// ToDoテーブル管理
pub struct TableAdmin {
    client: DynamoDbClient,
    /// ACTIVE待機のタイムアウト秒数
    timeout_seconds: u64,
    /// ポーリング間隔秒数
    poll_interval_seconds: u64,
}

impl TableAdmin {
    pub fn new(client: DynamoDbClient) -> Self {
        Self {
            client,
            timeout_seconds: 60,
            poll_interval_seconds: 1,
        }
    }

    /// タイムアウトを設定
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// `id`(S)をHASHキーとするキースキーマ
    fn key_schema() -> Result<(KeySchemaElement, AttributeDefinition), TableAdminError> {
        let key = KeySchemaElement::builder()
            .attribute_name("id")
            .key_type(KeyType::Hash)
            .build()
            .map_err(|e| TableAdminError::InvalidDefinition(e.to_string()))?;

        let attribute = AttributeDefinition::builder()
            .attribute_name("id")
            .attribute_type(ScalarAttributeType::S)
            .build()
            .map_err(|e| TableAdminError::InvalidDefinition(e.to_string()))?;

        Ok((key, attribute))
    }

    fn throughput(capacity_units: i64) -> Result<ProvisionedThroughput, TableAdminError> {
        ProvisionedThroughput::builder()
            .read_capacity_units(capacity_units)
            .write_capacity_units(capacity_units)
            .build()
            .map_err(|e| TableAdminError::InvalidDefinition(e.to_string()))
    }

    /// テーブルを作成してACTIVEになるまで待機する
    ///
    /// 既に存在する場合も`AlreadyExists`として待機まで行う。
    pub async fn create_table(
        &self,
        table_name: &str,
        capacity_units: i64,
    ) -> Result<CreateTableOutcome, TableAdminError> {
        let (key, attribute) = Self::key_schema()?;
        let throughput = Self::throughput(capacity_units)?;

        info!(table_name = %table_name, capacity_units, "テーブル作成開始");

        let outcome = match self
            .client
            .create_table()
            .table_name(table_name)
            .key_schema(key)
            .attribute_definitions(attribute)
            .provisioned_throughput(throughput)
            .send()
            .await
        {
            Ok(_) => CreateTableOutcome::Created,
            Err(err) => {
                let service_error = err.into_service_error();
                if service_error.is_resource_in_use_exception() {
                    warn!(table_name = %table_name, "テーブルは既に存在する");
                    CreateTableOutcome::AlreadyExists
                } else {
                    return Err(TableAdminError::AwsSdkError(service_error.to_string()));
                }
            }
        };

        self.wait_until_active(table_name).await?;
        Ok(outcome)
    }

    /// テーブルがACTIVEになるまでポーリングする
    async fn wait_until_active(&self, table_name: &str) -> Result<(), TableAdminError> {
        let start_time = Instant::now();
        let timeout = Duration::from_secs(self.timeout_seconds);
        let poll_interval = Duration::from_secs(self.poll_interval_seconds);

        loop {
            if start_time.elapsed() > timeout {
                return Err(TableAdminError::Timeout(
                    table_name.to_string(),
                    self.timeout_seconds,
                ));
            }

            let response = self
                .client
                .describe_table()
                .table_name(table_name)
                .send()
                .await
                .map_err(|e| TableAdminError::AwsSdkError(e.into_service_error().to_string()))?;

            let status = response.table().and_then(|t| t.table_status());
            info!(table_name = %table_name, status = ?status, "テーブルステータス確認");

            if status == Some(&TableStatus::Active) {
                return Ok(());
            }

            tokio::time::sleep(poll_interval).await;
        }
    }
}
