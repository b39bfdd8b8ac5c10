//! 対話式の表記ゆれ承認モジュール
//!
//! キーワードごとに候補を一覧表示し、採用するトークンを選んでもらう。
//! 初期状態では全候補を選択済みにする。

use crate::error::{Result, TaggerError};
use dialoguer::MultiSelect;
use term_tagger_common::{ApprovalPolicy, FuzzyMatch};

/// 候補の表示ラベル
pub fn candidate_label(candidate: &FuzzyMatch) -> String {
    format!("{} (score: {:.1})", candidate.token, candidate.score)
}

/// 選択されたインデックスをトークンに変換（範囲外は無視）
pub fn selected_tokens(candidates: &[FuzzyMatch], selected: &[usize]) -> Vec<String> {
    selected
        .iter()
        .filter_map(|&i| candidates.get(i))
        .map(|m| m.token.clone())
        .collect()
}

/// 端末でMultiSelectを表示する承認
#[derive(Debug, Default)]
pub struct InteractiveApproval;

impl InteractiveApproval {
    fn prompt(&self, keyword: &str, threshold: u8, candidates: &[FuzzyMatch]) -> Result<Vec<String>> {
        let labels: Vec<String> = candidates.iter().map(candidate_label).collect();
        let defaults = vec![true; candidates.len()];

        let selected = MultiSelect::new()
            .with_prompt(format!(
                "'{}' の表記ゆれ候補 (score ≥ {}) [Space:切替 Enter:確定]",
                keyword, threshold
            ))
            .items(&labels)
            .defaults(&defaults)
            .interact()
            .map_err(|e| TaggerError::Prompt(e.to_string()))?;

        Ok(selected_tokens(candidates, &selected))
    }
}

impl ApprovalPolicy for InteractiveApproval {
    fn approve(
        &mut self,
        keyword: &str,
        threshold: u8,
        candidates: &[FuzzyMatch],
    ) -> term_tagger_common::Result<Vec<String>> {
        self.prompt(keyword, threshold, candidates)
            .map_err(|e| term_tagger_common::Error::Approval(e.to_string()))
    }
}
