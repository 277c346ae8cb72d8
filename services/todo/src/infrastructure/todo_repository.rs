/// DynamoDBでToDoアイテムを管理するためのリポジトリ
use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{current_timestamp_millis, TodoItem};

/// パーティションキーの属性名
const ID_ATTRIBUTE: &str = "id";

/// 更新式（`text`はDynamoDBの予約語なので属性名プレースホルダーを使う）
const UPDATE_EXPRESSION: &str = "SET #todo_text = :text, checked = :checked, updatedAt = :updatedAt";

/// リポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    /// DynamoDBへの書き込みに失敗
    #[error("Write error: {0}")]
    WriteError(String),

    /// DynamoDBからの読み取りに失敗
    #[error("Read error: {0}")]
    ReadError(String),

    /// データのシリアライズ/デシリアライズに失敗
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// スキャン1ページ分の結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPage {
    /// このページのアイテム
    pub items: Vec<TodoItem>,
    /// 次ページの開始キー（最終ページならNone）
    pub next_key: Option<String>,
}

/// ToDoアイテム永続化用トレイト
///
/// 実際のDynamoDB実装とテスト用モックを差し替えられるように抽象化する。
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// 新しいアイテムを作成して保存
    ///
    /// IDと作成/更新日時はリポジトリ側で採番する。
    async fn create(&self, text: &str) -> Result<TodoItem, RepositoryError>;

    /// IDでアイテムを取得
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(Some(TodoItem))`
    /// * 見つからなかった場合は`Ok(None)`
    async fn get(&self, id: &str) -> Result<Option<TodoItem>, RepositoryError>;

    /// テーブルを1ページ分スキャン
    ///
    /// # 引数
    /// * `start_key` - 前ページの`next_key`（Noneなら先頭から）
    /// * `limit` - 1ページで評価する最大アイテム数
    async fn list_page(
        &self,
        start_key: Option<&str>,
        limit: Option<u32>,
    ) -> Result<ItemPage, RepositoryError>;

    /// 全ページを辿って全アイテムを取得
    async fn list_all(&self) -> Result<Vec<TodoItem>, RepositoryError> {
        let mut items = Vec::new();
        let mut start_key: Option<String> = None;

        loop {
            let page = self.list_page(start_key.as_deref(), None).await?;
            items.extend(page.items);

            match page.next_key {
                Some(key) => start_key = Some(key),
                None => break,
            }
        }

        Ok(items)
    }

    /// 本文と完了フラグを更新し、`updatedAt`を現在時刻にする
    ///
    /// # 戻り値
    /// * 更新後のアイテムを`Ok(Some(TodoItem))`
    /// * アイテムが存在しない場合は`Ok(None)`（部分的なアイテムは作らない）
    async fn update(
        &self,
        id: &str,
        text: &str,
        checked: bool,
    ) -> Result<Option<TodoItem>, RepositoryError>;

    /// アイテムを削除
    ///
    /// 存在しないIDの削除も成功として扱う。
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}

/// TodoRepositoryのDynamoDB実装
#[derive(Debug, Clone)]
pub struct DynamoTodoRepository {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// ToDoテーブル名
    table_name: String,
}

impl DynamoTodoRepository {
    /// 新しいDynamoTodoRepositoryを作成
    pub fn new(client: DynamoDbClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    fn id_key(id: &str) -> AttributeValue {
        AttributeValue::S(id.to_string())
    }

    /// 属性マップをTodoItemに変換
    fn decode_item(item: HashMap<String, AttributeValue>) -> Result<TodoItem, RepositoryError> {
        serde_dynamo::from_item(item).map_err(|e| RepositoryError::SerializationError(e.to_string()))
    }

    /// 継続トークンをExclusiveStartKeyに変換
    fn start_key_attributes(start_key: &str) -> HashMap<String, AttributeValue> {
        HashMap::from([(ID_ATTRIBUTE.to_string(), Self::id_key(start_key))])
    }

    /// LastEvaluatedKeyから継続トークンを取り出す
    fn next_key_from(last_evaluated_key: Option<HashMap<String, AttributeValue>>) -> Option<String> {
        last_evaluated_key
            .as_ref()
            .and_then(|key| key.get(ID_ATTRIBUTE))
            .and_then(|v| v.as_s().ok())
            .cloned()
    }
}

#[async_trait]
impl TodoRepository for DynamoTodoRepository {
    async fn create(&self, text: &str) -> Result<TodoItem, RepositoryError> {
        let item = TodoItem::new(text, current_timestamp_millis());
        let attributes: HashMap<String, AttributeValue> = serde_dynamo::to_item(&item)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(attributes))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(e.into_service_error().to_string()))?;

        info!(table_name = %self.table_name, id = %item.id, "ToDoアイテムを作成");

        Ok(item)
    }

    async fn get(&self, id: &str) -> Result<Option<TodoItem>, RepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(ID_ATTRIBUTE, Self::id_key(id))
            .send()
            .await
            .map_err(|e| RepositoryError::ReadError(e.into_service_error().to_string()))?;

        debug!(id = %id, found = result.item.is_some(), "GetItem完了");

        result.item.map(Self::decode_item).transpose()
    }

    async fn list_page(
        &self,
        start_key: Option<&str>,
        limit: Option<u32>,
    ) -> Result<ItemPage, RepositoryError> {
        let response = self
            .client
            .scan()
            .table_name(&self.table_name)
            .set_exclusive_start_key(start_key.map(Self::start_key_attributes))
            .set_limit(limit.map(|l| l as i32))
            .send()
            .await
            .map_err(|e| RepositoryError::ReadError(e.into_service_error().to_string()))?;

        let items: Vec<TodoItem> = serde_dynamo::from_items(response.items.unwrap_or_default())
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let next_key = Self::next_key_from(response.last_evaluated_key);

        debug!(
            count = items.len(),
            has_next = next_key.is_some(),
            "Scanページ取得"
        );

        Ok(ItemPage { items, next_key })
    }

    async fn update(
        &self,
        id: &str,
        text: &str,
        checked: bool,
    ) -> Result<Option<TodoItem>, RepositoryError> {
        let updated_at = current_timestamp_millis();

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(ID_ATTRIBUTE, Self::id_key(id))
            .update_expression(UPDATE_EXPRESSION)
            .condition_expression("attribute_exists(id)")
            .expression_attribute_names("#todo_text", "text")
            .expression_attribute_values(":text", AttributeValue::S(text.to_string()))
            .expression_attribute_values(":checked", AttributeValue::Bool(checked))
            .expression_attribute_values(":updatedAt", AttributeValue::N(updated_at.to_string()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await;

        match result {
            Ok(output) => {
                let attributes = output.attributes.ok_or_else(|| {
                    RepositoryError::SerializationError("Missing attributes in response".to_string())
                })?;
                Self::decode_item(attributes).map(Some)
            }
            Err(err) => {
                let service_error = err.into_service_error();

                // 条件式の失敗 = 対象アイテムが存在しない
                if service_error.is_conditional_check_failed_exception() {
                    debug!(id = %id, "更新対象のアイテムが存在しない");
                    return Ok(None);
                }

                Err(RepositoryError::WriteError(service_error.to_string()))
            }
        }
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(ID_ATTRIBUTE, Self::id_key(id))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(e.into_service_error().to_string()))?;

        Ok(())
    }
}
