//! キーワード入力の正規化
//!
//! カンマ区切り・改行区切りの生入力をキーワードリストに変換する。

use std::collections::HashSet;

/// 生入力をキーワードリストに変換
///
/// 前後の空白を除去して小文字化し、重複は最初の出現のみ残す。
/// 空入力は空リストを返す（エラーにはしない）。
pub fn parse_keywords(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(|c: char| c == ',' || c == '\n' || c == '\r')
        .map(|piece| piece.trim().to_lowercase())
        .filter(|piece| !piece.is_empty())
        .filter(|piece| seen.insert(piece.clone()))
        .collect()
}
