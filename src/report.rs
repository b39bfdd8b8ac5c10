//! 端末表示

use crate::table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use term_tagger_common::MatchProposal;

/// 処理中スピナー
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// キーワードごとの候補一覧
pub fn format_proposal(proposal: &MatchProposal) -> String {
    let mut out = String::new();
    for entry in proposal.entries() {
        if entry.matches.is_empty() {
            out.push_str(&format!(
                "'{}' の表記ゆれ候補なし (閾値 {})\n",
                entry.keyword, entry.threshold
            ));
            continue;
        }

        out.push_str(&format!(
            "'{}' の表記ゆれ候補 (score ≥ {}):\n",
            entry.keyword, entry.threshold
        ));
        for m in &entry.matches {
            out.push_str(&format!("  {} (score: {:.1})\n", m.token, m.score));
        }
    }
    out
}

/// 検索語の一覧（キーワードは * 付き）
pub fn format_terms(terms: &[String], keywords: &[String]) -> String {
    terms
        .iter()
        .map(|t| {
            if keywords.contains(t) {
                format!("*{}*", t)
            } else {
                t.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// 指定行を表形式で表示用に整形
pub fn format_rows(table: &Table, rows: &[usize]) -> String {
    let mut out = String::new();
    out.push_str(&table.headers().join(" | "));
    out.push('\n');
    for &i in rows {
        if let Some(row) = table.rows().get(i) {
            let line = row
                .iter()
                .map(|c| c.as_deref().unwrap_or(""))
                .collect::<Vec<_>>()
                .join(" | ");
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}
