//! キーワード長に応じた類似度の閾値

/// キーワードの文字数から最低スコアを決める
///
/// 短いキーワードほど閾値を下げて変種を拾いやすくする。
/// 内容には依存せず文字数（Unicodeスカラー値の数）のみで決まる。
pub fn threshold_for(keyword: &str) -> u8 {
    match keyword.chars().count() {
        0..=2 => 50,
        3 => 60,
        4..=5 => 70,
        _ => 80,
    }
}
