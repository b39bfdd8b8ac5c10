//! トークン分割
//!
//! 列の値を区切り文字で分割し、表記ゆれ候補の語彙を作る。

use std::collections::BTreeSet;

/// 既定の区切り文字（命名規則の `_` 区切り）
pub const TOKEN_DELIMITER: char = '_';

/// 既定の区切り文字でトークン集合を作る
pub fn tokenize<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    tokenize_with(values, TOKEN_DELIMITER)
}

/// 指定の区切り文字でトークン集合を作る
///
/// null は読み飛ばす。`"a__b"` のような連続区切りで生じる空トークンも
/// そのまま語彙に含める（類似度が0になるため候補には上がらない）。
pub fn tokenize_with<I, S>(values: I, delimiter: char) -> BTreeSet<String>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut tokens = BTreeSet::new();
    for value in values.into_iter().flatten() {
        for piece in value.as_ref().split(delimiter) {
            if !tokens.contains(piece) {
                tokens.insert(piece.to_string());
            }
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_collapses_duplicates() {
        let tokens = tokenize(vec![Some("a_b_c"), Some("b_d")]);
        let expected: BTreeSet<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_tokenize_skips_null() {
        let tokens = tokenize(vec![None, Some("pump_motor"), None]);
        assert_eq!(tokens.len(), 2);
        assert!(tokens.contains("pump"));
        assert!(tokens.contains("motor"));
    }

    #[test]
    fn test_tokenize_keeps_empty_pieces() {
        let tokens = tokenize(vec![Some("a__b_")]);
        assert!(tokens.contains(""));
        assert!(tokens.contains("a"));
        assert!(tokens.contains("b"));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_tokenize_without_delimiter_is_whole_value() {
        let tokens = tokenize(vec![Some("big motor unit")]);
        assert_eq!(tokens.into_iter().collect::<Vec<_>>(), vec!["big motor unit"]);
    }

    #[test]
    fn test_tokenize_with_custom_delimiter() {
        let tokens = tokenize_with(vec![Some("pump-motor"), Some("fan")], '-');
        assert_eq!(tokens.len(), 3);
        assert!(tokens.contains("fan"));
    }

    #[test]
    fn test_tokenize_empty_input() {
        let values: Vec<Option<String>> = Vec::new();
        assert!(tokenize(values).is_empty());
    }
}
