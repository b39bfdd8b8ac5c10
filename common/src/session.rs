//! 展開パイプライン
//!
//! キーワード・区切り文字・抽出設定を1つの状態にまとめ、
//! トークン分割 → 候補抽出 → 承認 → 検索語リスト の順に進める。
//! 承認は `ApprovalPolicy` として外から差し込む。

use crate::error::Result;
use crate::matcher::{propose, FuzzyMatch, MatchOptions, MatchProposal};
use crate::term_set::{build_term_set, Approvals, TermSet};
use crate::tokenizer::{tokenize_with, TOKEN_DELIMITER};
use std::collections::BTreeSet;

/// 提案された候補から採用するトークンを選ぶ
pub trait ApprovalPolicy {
    /// 候補が1件以上あるキーワードに対してのみ、キーワード順に呼ばれる
    fn approve(
        &mut self,
        keyword: &str,
        threshold: u8,
        candidates: &[FuzzyMatch],
    ) -> Result<Vec<String>>;
}

/// 全候補を採用
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl ApprovalPolicy for AcceptAll {
    fn approve(&mut self, _keyword: &str, _threshold: u8, candidates: &[FuzzyMatch]) -> Result<Vec<String>> {
        Ok(candidates.iter().map(|m| m.token.clone()).collect())
    }
}

/// 何も採用しない（キーワードのみで検索）
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectAll;

impl ApprovalPolicy for RejectAll {
    fn approve(&mut self, _keyword: &str, _threshold: u8, _candidates: &[FuzzyMatch]) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

/// 事前に用意した承認リストを使う
///
/// 提案に含まれないトークンは採用しない。
#[derive(Debug, Clone, Default)]
pub struct PresetApprovals {
    approvals: Approvals,
    rejected: Vec<(String, String)>,
}

impl PresetApprovals {
    pub fn new(approvals: Approvals) -> Self {
        Self {
            approvals,
            rejected: Vec::new(),
        }
    }

    /// 提案に無かったため採用しなかった (キーワード, トークン)
    pub fn rejected(&self) -> &[(String, String)] {
        &self.rejected
    }
}

impl ApprovalPolicy for PresetApprovals {
    fn approve(&mut self, keyword: &str, _threshold: u8, candidates: &[FuzzyMatch]) -> Result<Vec<String>> {
        let Some(preset) = self.approvals.get(keyword) else {
            return Ok(Vec::new());
        };

        let mut accepted = Vec::new();
        for token in preset {
            if candidates.iter().any(|m| &m.token == token) {
                accepted.push(token.clone());
            } else {
                self.rejected.push((keyword.to_string(), token.clone()));
            }
        }
        Ok(accepted)
    }
}

/// 展開結果
#[derive(Debug, Clone)]
pub struct Expansion {
    pub proposal: MatchProposal,
    pub approvals: Approvals,
    pub terms: TermSet,
}

/// 展開パイプラインの状態
#[derive(Debug, Clone)]
pub struct Pipeline {
    keywords: Vec<String>,
    delimiter: char,
    options: MatchOptions,
}

impl Pipeline {
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            keywords,
            delimiter: TOKEN_DELIMITER,
            options: MatchOptions::default(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// 列の値から語彙を作る
    pub fn vocabulary<S: AsRef<str>>(&self, values: impl IntoIterator<Item = Option<S>>) -> BTreeSet<String> {
        tokenize_with(values, self.delimiter)
    }

    /// 語彙からキーワードごとの候補を提案
    pub fn propose_from(&self, vocabulary: &BTreeSet<String>) -> MatchProposal {
        propose(&self.keywords, vocabulary, &self.options)
    }

    /// 列の値から候補を提案
    pub fn propose<S: AsRef<str>>(&self, values: impl IntoIterator<Item = Option<S>>) -> MatchProposal {
        self.propose_from(&self.vocabulary(values))
    }

    /// 提案を承認側に渡して承認リストを作る
    pub fn approve<P: ApprovalPolicy + ?Sized>(
        &self,
        proposal: &MatchProposal,
        policy: &mut P,
    ) -> Result<Approvals> {
        let mut approvals = Approvals::new();
        for entry in proposal.with_candidates() {
            let accepted = policy.approve(&entry.keyword, entry.threshold, &entry.matches)?;
            approvals.insert(entry.keyword.clone(), accepted);
        }
        Ok(approvals)
    }

    /// 承認リストから検索語リストを作る
    pub fn terms(&self, approvals: &Approvals) -> TermSet {
        build_term_set(&self.keywords, approvals)
    }

    /// 提案から検索語リストまでを一括実行
    pub fn expand<S, P>(
        &self,
        values: impl IntoIterator<Item = Option<S>>,
        policy: &mut P,
    ) -> Result<Expansion>
    where
        S: AsRef<str>,
        P: ApprovalPolicy + ?Sized,
    {
        let proposal = self.propose(values);
        let approvals = self.approve(&proposal, policy)?;
        let terms = self.terms(&approvals);
        Ok(Expansion {
            proposal,
            approvals,
            terms,
        })
    }
}
