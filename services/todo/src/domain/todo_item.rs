/// ToDoアイテムのドメインモデル
///
/// DynamoDBテーブルに保存される唯一のエンティティ。
/// JSON/DynamoDB上のフィールド名はcamelCase（createdAt, updatedAt）を使用する。
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ToDoアイテム
///
/// タイムスタンプは作成・更新ともにUnixエポックミリ秒で統一する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// アイテムID（UUIDv7、作成後は不変）
    pub id: String,
    /// 本文
    pub text: String,
    /// 完了フラグ
    pub checked: bool,
    /// 作成日時（エポックミリ秒、不変）
    pub created_at: i64,
    /// 更新日時（エポックミリ秒、更新ごとに上書き）
    pub updated_at: i64,
}

impl TodoItem {
    /// 新しいアイテムを作成
    ///
    /// IDは時刻順のUUIDv7で採番し、`checked`は常に`false`で始まる。
    /// `created_at`と`updated_at`には同じ値を設定する。
    pub fn new(text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            text: text.into(),
            checked: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// 翻訳済みテキストで本文を置き換えたコピーを返す
    ///
    /// 永続化はしない（呼び出し側に返すだけのビュー）。
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// 現在時刻をエポックミリ秒で取得
pub fn current_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_defaults() {
        let item = TodoItem::new("Aprender DevOps y Cloud en la UNIR", 1_700_000_000_000);

        assert_eq!(item.text, "Aprender DevOps y Cloud en la UNIR");
        assert!(!item.checked);
        assert_eq!(item.created_at, 1_700_000_000_000);
        assert_eq!(item.updated_at, item.created_at);
        assert!(Uuid::parse_str(&item.id).is_ok());
    }

    #[test]
    fn test_new_item_ids_are_unique() {
        let a = TodoItem::new("a", 0);
        let b = TodoItem::new("b", 0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_ids_are_time_ordered() {
        let first = TodoItem::new("first", 0);
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = TodoItem::new("second", 0);

        // UUIDv7は先頭48bitがミリ秒タイムスタンプなので文字列比較で順序が保たれる
        assert!(first.id < second.id);
    }

    #[test]
    fn test_serializes_with_camel_case_fields() {
        let item = TodoItem {
            id: "123e4567-e89b-12d3-a456-426614174000".to_string(),
            text: "buy milk".to_string(),
            checked: true,
            created_at: 1,
            updated_at: 2,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "123e4567-e89b-12d3-a456-426614174000");
        assert_eq!(json["text"], "buy milk");
        assert_eq!(json["checked"], true);
        assert_eq!(json["createdAt"], 1);
        assert_eq!(json["updatedAt"], 2);
        assert_eq!(json.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_with_text_keeps_other_fields() {
        let item = TodoItem::new("hola", 10);
        let translated = item.clone().with_text("ciao");

        assert_eq!(translated.text, "ciao");
        assert_eq!(translated.id, item.id);
        assert_eq!(translated.created_at, item.created_at);
        assert_eq!(translated.updated_at, item.updated_at);
    }

    #[test]
    fn test_current_timestamp_millis_is_reasonable() {
        let now = current_timestamp_millis();
        // 2020年1月1日以降、3000年より前
        assert!(now > 1_577_836_800_000);
        assert!(now < 32_503_680_000_000);
    }
}
