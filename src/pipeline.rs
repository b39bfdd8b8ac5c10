//! CLIから使う処理の組み立て
//!
//! 表の読み込み・キーワード収集・タグ列の書き込みなど、
//! コアの純粋関数と入出力をつなぐ部分。

use crate::cli::KeywordArgs;
use crate::config::Config;
use crate::error::{Result, TaggerError};
use crate::table::Table;
use std::path::Path;
use term_tagger_common::{build_term_set, parse_keywords, Approvals, MatchOptions, Pipeline, TermMatcher};

/// `-k` と `--keywords-file` からキーワードを集める（空ならエラー）
pub fn collect_keywords(args: &KeywordArgs) -> Result<Vec<String>> {
    let mut raw = args.keywords.join("\n");

    if let Some(path) = &args.keywords_file {
        if !path.exists() {
            return Err(TaggerError::FileNotFound(path.display().to_string()));
        }
        raw.push('\n');
        raw.push_str(&std::fs::read_to_string(path)?);
    }

    let keywords = parse_keywords(&raw);
    if keywords.is_empty() {
        return Err(TaggerError::NoKeywords);
    }
    Ok(keywords)
}

/// `-t` の検索語を集める（表記はそのまま、大文字小文字を無視して重複除去）
pub fn collect_terms(raw: &[String]) -> Result<Vec<String>> {
    let pieces: Vec<String> = raw
        .iter()
        .flat_map(|r| r.split(|c: char| c == ',' || c == '\n'))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    let terms = build_term_set(&pieces, &Approvals::new()).into_vec();
    if terms.is_empty() {
        return Err(TaggerError::NoKeywords);
    }
    Ok(terms)
}

/// 承認リストJSONを読み込む
pub fn load_approvals(path: &Path) -> Result<Approvals> {
    if !path.exists() {
        return Err(TaggerError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(Approvals::from_json(&content)?)
}

/// 設定とCLI指定から展開パイプラインを作る
pub fn build_pipeline(keywords: Vec<String>, limit: Option<usize>, config: &Config) -> Result<Pipeline> {
    let candidate_limit = limit.unwrap_or(config.candidate_limit);
    if candidate_limit == 0 {
        return Err(TaggerError::Config("--limit は1以上にしてください".into()));
    }

    Ok(Pipeline::new(keywords)
        .with_delimiter(config.token_delimiter)
        .with_options(MatchOptions { candidate_limit }))
}

/// 検索列を確認する（null のみの列は警告して続行）
pub fn search_column(table: &Table, column: &str) -> Result<usize> {
    let index = table.column_index(column)?;
    if table.non_null_count(index) == 0 {
        tracing::warn!(column, "検索列に値がありません");
        println!("⚠ 列 '{}' は空です", column);
    }
    Ok(index)
}

/// タグ列を書き込み、一致した行数を返す
pub fn tag_table(
    table: &mut Table,
    column: usize,
    terms: &[String],
    output_column: &str,
    overwrite: bool,
) -> Result<usize> {
    let matcher = TermMatcher::new(terms);
    let tags = matcher.tag_all(&table.column(column));
    let matched = tags.iter().filter(|t| !t.is_empty()).count();

    table.set_column(output_column, tags, overwrite)?;
    Ok(matched)
}

/// タグが付いた行のインデックス（先頭から最大 `limit` 件）
pub fn matched_rows(table: &Table, output_column: usize, limit: usize) -> Vec<usize> {
    table
        .column(output_column)
        .iter()
        .enumerate()
        .filter(|(_, tag)| matches!(tag, Some(t) if !t.trim().is_empty()))
        .map(|(i, _)| i)
        .take(limit)
        .collect()
}
