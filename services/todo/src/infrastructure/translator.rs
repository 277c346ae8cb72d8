//! 機械翻訳モジュール
//!
//! Amazon TranslateのTranslateTextを1回呼び出すだけの薄いラッパー。
//! 長文の分割や再試行は行わない。

use async_trait::async_trait;
use aws_sdk_translate::Client as TranslateClient;
use thiserror::Error;
use tracing::{debug, warn};

/// 翻訳のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TranslationError {
    /// AWS Translate APIエラー
    #[error("Translation service error: {0}")]
    ServiceError(String),
}

/// 翻訳トレイト（テスト用の抽象化）
#[async_trait]
pub trait Translator: Send + Sync {
    /// テキストを`source_language`から`target_language`へ翻訳する
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError>;
}

/// Amazon Translateを使用した翻訳実装
#[derive(Debug, Clone)]
pub struct AwsTranslator {
    client: TranslateClient,
}

impl AwsTranslator {
    pub fn new(client: TranslateClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Translator for AwsTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        debug!(
            source_language = %source_language,
            target_language = %target_language,
            "TranslateText呼び出し"
        );

        let response = self
            .client
            .translate_text()
            .text(text)
            .source_language_code(source_language)
            .target_language_code(target_language)
            .send()
            .await
            .map_err(|err| {
                let service_error = err.into_service_error();
                warn!(
                    source_language = %source_language,
                    target_language = %target_language,
                    error = %service_error,
                    "TranslateTextエラー"
                );
                TranslationError::ServiceError(service_error.to_string())
            })?;

        Ok(response.translated_text().to_string())
    }
}
