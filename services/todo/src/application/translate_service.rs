/// ToDoアイテム翻訳サービス
///
/// アイテム取得 → 言語検出 → 翻訳 を順に実行し、翻訳済みのアイテムを返す。
/// 翻訳結果はテーブルに書き戻さない（ストアには原文が残る）。
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::TodoItem;
use crate::infrastructure::{
    LanguageDetectionError, LanguageDetector, RepositoryError, TodoRepository, TranslationError,
    Translator,
};

/// 翻訳フローのエラー型
///
/// どの外部サービスで失敗したかを区別できるように元のエラーを保持する。
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TranslateError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Language detection error: {0}")]
    LanguageDetection(#[from] LanguageDetectionError),

    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),
}

/// 翻訳サービス
pub struct TranslateService<R, D, T>
where
    R: TodoRepository,
    D: LanguageDetector,
    T: Translator,
{
    repository: R,
    detector: D,
    translator: T,
}

impl<R, D, T> TranslateService<R, D, T>
where
    R: TodoRepository,
    D: LanguageDetector,
    T: Translator,
{
    pub fn new(repository: R, detector: D, translator: T) -> Self {
        Self {
            repository,
            detector,
            translator,
        }
    }

    /// アイテムを指定言語に翻訳して返す
    ///
    /// # 処理フロー
    /// 1. IDでアイテムを取得（存在しなければ`Ok(None)`）
    /// 2. 本文から元の言語を検出
    /// 3. 検出した言語から`target_language`へ翻訳
    /// 4. メモリ上のアイテムの本文を訳文で置き換えて返す
    pub async fn translate_item(
        &self,
        id: &str,
        target_language: &str,
    ) -> Result<Option<TodoItem>, TranslateError> {
        let Some(item) = self.repository.get(id).await? else {
            debug!(id = %id, "翻訳対象のアイテムが存在しない");
            return Ok(None);
        };

        let source_language = self.detector.detect(&item.text).await?;

        let translated = self
            .translator
            .translate(&item.text, &source_language, target_language)
            .await?;

        info!(
            id = %id,
            source_language = %source_language,
            target_language = %target_language,
            "アイテムを翻訳"
        );

        Ok(Some(item.with_text(translated)))
    }
}
