// 言語検出結果のドメインロジック
//
// 言語検出サービスが返す候補一覧から、最も信頼度の高い言語を選ぶ。

/// 言語検出の候補
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageCandidate {
    /// 言語コード（例: "es", "it"）
    pub language_code: String,
    /// 信頼度スコア（0.0〜1.0）
    pub score: f32,
}

impl LanguageCandidate {
    pub fn new(language_code: impl Into<String>, score: f32) -> Self {
        Self {
            language_code: language_code.into(),
            score,
        }
    }
}

/// 最もスコアの高い候補を選択
///
/// 同点の場合はサービスが返した順序で最初の候補を採用する。
/// 候補が空の場合は`None`。
pub fn select_dominant_language(candidates: &[LanguageCandidate]) -> Option<&LanguageCandidate> {
    candidates.iter().fold(None, |best, candidate| match best {
        Some(current) if candidate.score <= current.score => Some(current),
        _ => Some(candidate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selects_highest_score() {
        let candidates = vec![
            LanguageCandidate::new("pt", 0.12),
            LanguageCandidate::new("es", 0.85),
            LanguageCandidate::new("ca", 0.03),
        ];

        let dominant = select_dominant_language(&candidates).unwrap();
        assert_eq!(dominant.language_code, "es");
    }

    #[test]
    fn test_tie_goes_to_first_candidate() {
        let candidates = vec![
            LanguageCandidate::new("it", 0.5),
            LanguageCandidate::new("es", 0.5),
        ];

        let dominant = select_dominant_language(&candidates).unwrap();
        assert_eq!(dominant.language_code, "it");
    }

    #[test]
    fn test_single_candidate() {
        let candidates = vec![LanguageCandidate::new("en", 0.99)];
        assert_eq!(
            select_dominant_language(&candidates).unwrap().language_code,
            "en"
        );
    }

    #[test]
    fn test_empty_candidates() {
        assert!(select_dominant_language(&[]).is_none());
    }
}
