//! 表記ゆれ候補の抽出
//!
//! キーワードごとに語彙の全トークンを採点し、上位候補から閾値を
//! 満たすものを提案する。提案をどう採否するかは承認側に任せる。

use crate::similarity::ratio;
use crate::threshold::threshold_for;
use serde::Serialize;
use std::collections::BTreeSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// 閾値判定の前に残す上位候補数
pub const DEFAULT_CANDIDATE_LIMIT: usize = 15;

/// 候補抽出の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// スコア上位から何件を閾値判定に回すか
    pub candidate_limit: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }
}

/// 候補トークンとスコア
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyMatch {
    pub token: String,
    pub score: f64,
}

/// 1キーワード分の提案
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordMatches {
    pub keyword: String,
    pub threshold: u8,
    /// 候補なしの場合は空（未処理とは区別される）
    pub matches: Vec<FuzzyMatch>,
}

/// 全キーワード分の提案（キーワード順）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchProposal {
    entries: Vec<KeywordMatches>,
}

impl MatchProposal {
    pub fn entries(&self) -> &[KeywordMatches] {
        &self.entries
    }

    /// 未処理のキーワードは `None`
    pub fn get(&self, keyword: &str) -> Option<&[FuzzyMatch]> {
        self.entries
            .iter()
            .find(|e| e.keyword == keyword)
            .map(|e| e.matches.as_slice())
    }

    /// 候補が1件以上あるキーワードのみ
    pub fn with_candidates(&self) -> impl Iterator<Item = &KeywordMatches> {
        self.entries.iter().filter(|e| !e.matches.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.matches.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// 既定設定で候補を抽出
pub fn fuzzy_matches(keyword: &str, vocabulary: &BTreeSet<String>) -> Vec<FuzzyMatch> {
    fuzzy_matches_with(keyword, vocabulary, &MatchOptions::default())
}

/// 候補を抽出
///
/// 全トークンを採点してスコア降順に安定ソートし（同点は語彙順）、
/// 上位 `candidate_limit` 件に絞ってから閾値未満とキーワード自身
/// （大文字小文字無視）を除く。絞り込み後は並べ替えない。
pub fn fuzzy_matches_with(
    keyword: &str,
    vocabulary: &BTreeSet<String>,
    options: &MatchOptions,
) -> Vec<FuzzyMatch> {
    let threshold = f64::from(threshold_for(keyword));
    let keyword_lower = keyword.to_lowercase();

    let mut scored: Vec<(&String, f64)> = vocabulary
        .iter()
        .map(|token| (token, ratio(keyword, token)))
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(options.candidate_limit);

    scored
        .into_iter()
        .filter(|(_, score)| *score >= threshold)
        .filter(|(token, _)| token.to_lowercase() != keyword_lower)
        .map(|(token, score)| FuzzyMatch {
            token: token.clone(),
            score,
        })
        .collect()
}

/// 全キーワードの提案を作る
pub fn propose(
    keywords: &[String],
    vocabulary: &BTreeSet<String>,
    options: &MatchOptions,
) -> MatchProposal {
    let extract = |keyword: &String| KeywordMatches {
        keyword: keyword.clone(),
        threshold: threshold_for(keyword),
        matches: fuzzy_matches_with(keyword, vocabulary, options),
    };

    #[cfg(feature = "parallel")]
    let entries = keywords.par_iter().map(extract).collect();
    #[cfg(not(feature = "parallel"))]
    let entries = keywords.iter().map(extract).collect();

    MatchProposal { entries }
}
