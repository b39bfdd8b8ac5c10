//! 文字列類似度（編集距離ベース）
//!
//! 挿入・削除のみの編集距離（InDel距離）を長さの合計で正規化し、
//! 0〜100のスコアにする。大文字小文字はそのまま比較する。

/// 類似度スコアを計算（0.0〜100.0）
///
/// `100 * (1 - indel / (len_a + len_b))`。入れ替えに対して対称。
pub fn ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let total = a_chars.len() + b_chars.len();

    if total == 0 {
        return 100.0;
    }

    let lcs = lcs_length(&a_chars, &b_chars);
    let distance = total - 2 * lcs;

    100.0 * (1.0 - distance as f64 / total as f64)
}

/// 最長共通部分列の長さ
fn lcs_length(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // 2行だけ保持するDP
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
