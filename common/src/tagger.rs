//! 行タグ付け
//!
//! 検索語を部分文字列として含むかを大文字小文字を無視して判定し、
//! 見つかった語を検索語リストの順に連結する。

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// タグ文字列の区切り
pub const TAG_SEPARATOR: &str = ", ";

/// 小文字化済みの検索語を保持する照合器
#[derive(Debug, Clone)]
pub struct TermMatcher {
    /// (元の表記, 小文字化した語)
    terms: Vec<(String, String)>,
}

impl TermMatcher {
    pub fn new(terms: &[String]) -> Self {
        Self {
            terms: terms
                .iter()
                .map(|t| (t.clone(), t.to_lowercase()))
                .collect(),
        }
    }

    /// 1セル分のタグ文字列（nullや一致なしは空文字）
    pub fn tag(&self, cell: Option<&str>) -> String {
        let Some(cell) = cell else {
            return String::new();
        };
        let cell_lower = cell.to_lowercase();

        self.terms
            .iter()
            .filter(|(_, lower)| cell_lower.contains(lower.as_str()))
            .map(|(original, _)| original.as_str())
            .collect::<Vec<_>>()
            .join(TAG_SEPARATOR)
    }

    /// 行順を保ったまま全行をタグ付け
    pub fn tag_all(&self, rows: &[Option<&str>]) -> Vec<String> {
        #[cfg(feature = "parallel")]
        {
            rows.par_iter().map(|cell| self.tag(*cell)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            rows.iter().map(|cell| self.tag(*cell)).collect()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// 検索語リストで全行をタグ付け
pub fn tag_rows(rows: &[Option<&str>], terms: &[String]) -> Vec<String> {
    TermMatcher::new(terms).tag_all(rows)
}
