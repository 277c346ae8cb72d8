//! 言語検出モジュール
//!
//! Amazon ComprehendのDetectDominantLanguageで本文の言語を判定する。

use async_trait::async_trait;
use aws_sdk_comprehend::types::DominantLanguage;
use aws_sdk_comprehend::Client as ComprehendClient;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{select_dominant_language, LanguageCandidate};

/// 言語検出のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LanguageDetectionError {
    /// AWS Comprehend APIエラー
    #[error("Language detection service error: {0}")]
    ServiceError(String),

    /// 候補が1件も返らなかった
    #[error("No language detected")]
    NoLanguageDetected,
}

/// 言語検出トレイト（テスト用の抽象化）
#[async_trait]
pub trait LanguageDetector: Send + Sync {
    /// テキストの主要言語コードを返す
    async fn detect(&self, text: &str) -> Result<String, LanguageDetectionError>;
}

/// Amazon Comprehendを使用した言語検出実装
#[derive(Debug, Clone)]
pub struct ComprehendLanguageDetector {
    client: ComprehendClient,
}

impl ComprehendLanguageDetector {
    pub fn new(client: ComprehendClient) -> Self {
        Self { client }
    }
}

/// DetectDominantLanguageの結果を候補一覧に変換
///
/// 言語コードのない要素は除外し、スコアがない場合は0とする。
fn candidates_from(languages: &[DominantLanguage]) -> Vec<LanguageCandidate> {
    languages
        .iter()
        .filter_map(|language| {
            language
                .language_code()
                .map(|code| LanguageCandidate::new(code, language.score().unwrap_or_default()))
        })
        .collect()
}

#[async_trait]
impl LanguageDetector for ComprehendLanguageDetector {
    async fn detect(&self, text: &str) -> Result<String, LanguageDetectionError> {
        let response = self
            .client
            .detect_dominant_language()
            .text(text)
            .send()
            .await
            .map_err(|err| {
                let service_error = err.into_service_error();
                warn!(error = %service_error, "DetectDominantLanguageエラー");
                LanguageDetectionError::ServiceError(service_error.to_string())
            })?;

        let candidates = candidates_from(response.languages());

        debug!(count = candidates.len(), "言語候補を取得");

        select_dominant_language(&candidates)
            .map(|dominant| dominant.language_code.clone())
            .ok_or(LanguageDetectionError::NoLanguageDetected)
    }
}
