//! 検索語リストの構築
//!
//! キーワードと承認済みの表記ゆれを、大文字小文字を無視して重複除去する。
//! 判定は小文字化したキーで行い、保存・出力は最初に現れた表記を使う。

use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;

/// キーワード → 承認済みトークン（挿入順を保持）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Approvals {
    entries: Vec<(String, Vec<String>)>,
}

impl Approvals {
    pub fn new() -> Self {
        Self::default()
    }

    /// 同じキーワードへの再登録は置き換え（位置は維持）
    pub fn insert(&mut self, keyword: impl Into<String>, tokens: Vec<String>) {
        let keyword = keyword.into();
        match self.entries.iter_mut().find(|(k, _)| *k == keyword) {
            Some(entry) => entry.1 = tokens,
            None => self.entries.push((keyword, tokens)),
        }
    }

    pub fn get(&self, keyword: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, tokens)| tokens.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// JSON `{ "keyword": ["token", ...] }` から読み込み
    ///
    /// JSONオブジェクトは順序を持たないため、キーの並びはキー名順になる。
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let object = value
            .as_object()
            .ok_or_else(|| Error::InvalidInput("承認リストはJSONオブジェクトで指定してください".into()))?;

        let mut approvals = Self::new();
        for (keyword, tokens) in object {
            let tokens = tokens
                .as_array()
                .ok_or_else(|| Error::InvalidInput(format!("'{}' の値が配列ではありません", keyword)))?
                .iter()
                .map(|t| {
                    t.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| Error::InvalidInput(format!("'{}' に文字列以外の要素があります", keyword)))
                })
                .collect::<Result<Vec<_>>>()?;
            approvals.insert(keyword.trim().to_lowercase(), tokens);
        }
        Ok(approvals)
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for Approvals {
    fn from_iter<T: IntoIterator<Item = (K, Vec<String>)>>(iter: T) -> Self {
        let mut approvals = Self::new();
        for (keyword, tokens) in iter {
            approvals.insert(keyword, tokens);
        }
        approvals
    }
}

/// 重複のない検索語リスト
#[derive(Debug, Clone, Default)]
pub struct TermSet {
    terms: Vec<String>,
    /// 小文字化した語 → `terms` の位置
    index: HashMap<String, usize>,
}

impl TermSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 未登録なら末尾に追加して `true`
    pub fn insert(&mut self, term: &str) -> bool {
        let key = term.to_lowercase();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.terms.len());
        self.terms.push(term.to_string());
        true
    }

    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(&term.to_lowercase())
    }

    /// 大文字小文字を無視して登録済みの表記を引く
    pub fn canonical(&self, term: &str) -> Option<&str> {
        self.index
            .get(&term.to_lowercase())
            .map(|&i| self.terms[i].as_str())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.terms
    }

    pub fn into_vec(self) -> Vec<String> {
        self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl PartialEq for TermSet {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms
    }
}

/// キーワード（元の順）に承認済みトークンを追加した検索語リストを作る
pub fn build_term_set(keywords: &[String], approvals: &Approvals) -> TermSet {
    let mut set = TermSet::new();
    for keyword in keywords {
        set.insert(keyword);
    }
    for (_, tokens) in approvals.iter() {
        for token in tokens {
            set.insert(token);
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_term_set_case_insensitive_dedup() {
        let keywords = strings(&["Cat", "dog"]);
        let approvals: Approvals = vec![("Cat", strings(&["CAT", "kat"])), ("dog", vec![])]
            .into_iter()
            .collect();

        let terms = build_term_set(&keywords, &approvals);
        assert_eq!(terms.as_slice(), &strings(&["Cat", "dog", "kat"])[..]);
    }

    #[test]
    fn test_build_term_set_keywords_always_present() {
        let keywords = strings(&["moter", "pump"]);
        let terms = build_term_set(&keywords, &Approvals::new());
        assert_eq!(terms.into_vec(), keywords);
    }

    #[test]
    fn test_build_term_set_idempotent() {
        let keywords = strings(&["moter", "pump"]);
        let approvals: Approvals = vec![("moter", strings(&["motor", "Motor"]))].into_iter().collect();
        let first = build_term_set(&keywords, &approvals);
        let second = build_term_set(first.as_slice(), &Approvals::new());
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_term_set_variant_shared_between_keywords() {
        let keywords = strings(&["moter", "motr"]);
        let approvals: Approvals = vec![
            ("moter", strings(&["motor"])),
            ("motr", strings(&["MOTOR", "motors"])),
        ]
        .into_iter()
        .collect();

        let terms = build_term_set(&keywords, &approvals);
        assert_eq!(terms.as_slice(), &strings(&["moter", "motr", "motor", "motors"])[..]);
        assert_eq!(terms.canonical("MoToR"), Some("motor"));
    }

    #[test]
    fn test_build_term_set_empty() {
        let terms = build_term_set(&[], &Approvals::new());
        assert!(terms.is_empty());
    }

    #[test]
    fn test_term_set_insert() {
        let mut set = TermSet::new();
        assert!(set.insert("Pump"));
        assert!(!set.insert("PUMP"));
        assert!(set.contains("pump"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_approvals_insert_replaces() {
        let mut approvals = Approvals::new();
        approvals.insert("a", strings(&["x"]));
        approvals.insert("b", strings(&["y"]));
        approvals.insert("a", strings(&["z"]));
        let keys: Vec<_> = approvals.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(approvals.get("a"), Some(&strings(&["z"])[..]));
    }

    #[test]
    fn test_approvals_from_json() {
        let approvals = Approvals::from_json(r#"{"moter": ["motor", "MOTOR"], "pump": []}"#).unwrap();
        assert_eq!(approvals.len(), 2);
        assert_eq!(approvals.get("moter"), Some(&strings(&["motor", "MOTOR"])[..]));
        assert_eq!(approvals.get("pump"), Some(&[][..]));

        let approvals = Approvals::from_json(r#"{" Moter ": ["motor"]}"#).unwrap();
        assert_eq!(approvals.get("moter"), Some(&strings(&["motor"])[..]));
    }

    #[test]
    fn test_approvals_from_json_rejects_bad_shape() {
        assert!(matches!(Approvals::from_json("[]"), Err(Error::InvalidInput(_))));
        assert!(matches!(Approvals::from_json(r#"{"a": "b"}"#), Err(Error::InvalidInput(_))));
        assert!(matches!(Approvals::from_json(r#"{"a": [1]}"#), Err(Error::InvalidInput(_))));
        assert!(matches!(Approvals::from_json("{"), Err(Error::Json(_))));
    }
}
