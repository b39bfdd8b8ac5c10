//! 展開からタグ付けまでの統合テスト
//!
//! CSV読み込み → 候補抽出 → 承認 → タグ付け → 出力 を一通り検証

use std::collections::BTreeSet;
use tempfile::tempdir;
use term_tagger::config::Config;
use term_tagger::export::csv::write_csv;
use term_tagger::pipeline;
use term_tagger::table::{read_csv_str, read_table};
use term_tagger_common::{
    build_term_set, fuzzy_matches, tag_rows, threshold_for, tokenize, AcceptAll, Approvals,
    PresetApprovals, RejectAll,
};

const PARTS_CSV: &str = "id,name\n\
1,PUMP_MOTOR_A\n\
2,big_moter_unit\n\
3,\n\
4,valve_VLAVE\n\
5,fan_motr\n";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// 閾値は長さの帯で単調に増える
#[test]
fn test_threshold_band_boundaries() {
    let thresholds: Vec<u8> = ["ab", "abc", "abcde", "abcdef"].iter().map(|k| threshold_for(k)).collect();
    assert_eq!(thresholds, vec![50, 60, 70, 80]);
}

/// 候補にはキーワード自身が含まれず、全スコアが閾値以上
#[test]
fn test_fuzzy_matches_properties() {
    let table = read_csv_str(PARTS_CSV, b',').unwrap();
    let vocabulary = tokenize(table.column(1));

    for keyword in ["motor", "moter", "valve", "fan", "a"] {
        let threshold = f64::from(threshold_for(keyword));
        for m in fuzzy_matches(keyword, &vocabulary) {
            assert!(m.score >= threshold, "{} -> {} ({})", keyword, m.token, m.score);
            assert_ne!(m.token.to_lowercase(), keyword.to_lowercase());
        }
    }
}

#[test]
fn test_tokenize_skips_nulls() {
    let tokens = tokenize(vec![Some("a_b_c"), Some("b_d")]);
    let expected: BTreeSet<String> = strings(&["a", "b", "c", "d"]).into_iter().collect();
    assert_eq!(tokens, expected);
}

#[test]
fn test_build_term_set_case_insensitive() {
    let approvals: Approvals = vec![("Cat", strings(&["CAT", "kat"])), ("dog", vec![])]
        .into_iter()
        .collect();
    let terms = build_term_set(&strings(&["Cat", "dog"]), &approvals);
    assert_eq!(terms.into_vec(), strings(&["Cat", "dog", "kat"]));
}

#[test]
fn test_tag_rows_substring() {
    let tags = tag_rows(&[Some("The CAT sat"), None, Some("a DOGhouse")], &strings(&["cat", "dog"]));
    assert_eq!(tags, vec!["cat", "", "dog"]);
}

/// 打ち間違いのキーワードから正しい表記を見つけてタグ付けする
#[test]
fn test_typo_keyword_end_to_end() {
    let table = read_csv_str("name\nbig_motor_unit\n", b',').unwrap();
    let expander = pipeline::build_pipeline(strings(&["moter"]), None, &Config::default()).unwrap();

    let proposal = expander.propose(table.column(0));
    let candidates = proposal.get("moter").unwrap();
    assert!(candidates.iter().any(|m| m.token == "motor" && m.score >= 70.0));

    let preset: Approvals = vec![("moter", strings(&["motor"]))].into_iter().collect();
    let approvals = expander.approve(&proposal, &mut PresetApprovals::new(preset)).unwrap();
    let terms = expander.terms(&approvals).into_vec();
    assert_eq!(terms, strings(&["moter", "motor"]));

    let tags = tag_rows(&[Some("big motor unit")], &terms);
    assert_eq!(tags, vec!["motor"]);
}

/// 全候補採用でCSVを読み込みから書き出しまで通す
#[test]
fn test_run_accept_all_through_files() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("parts.csv");
    std::fs::write(&input, PARTS_CSV).unwrap();

    let mut table = read_table(&input, None).unwrap();
    let column = pipeline::search_column(&table, "name").unwrap();
    let expander = pipeline::build_pipeline(strings(&["motor", "valve"]), None, &Config::default()).unwrap();

    let expansion = expander.expand(table.column(column), &mut AcceptAll).unwrap();
    let terms = expansion.terms.into_vec();
    assert_eq!(&terms[..2], &strings(&["motor", "valve"])[..]);
    assert!(terms.contains(&"moter".to_string()));
    assert!(terms.contains(&"motr".to_string()));
    // "MOTOR" はキーワードと同一視され候補に出ない
    assert!(!terms.iter().any(|t| t == "MOTOR"));

    let matched = pipeline::tag_table(&mut table, column, &terms, "search_result", false).unwrap();
    assert_eq!(matched, 4);

    let output = dir.path().join("out.csv");
    write_csv(&table, &output).unwrap();

    let reloaded = read_table(&output, None).unwrap();
    let out = reloaded.column_index("search_result").unwrap();
    let tags = reloaded.column(out);
    assert_eq!(tags[0], Some("motor"));
    assert_eq!(tags[2], None);
    assert!(tags[1].unwrap().contains("moter"));
    assert!(tags[3].unwrap().starts_with("valve"));
}

/// 承認なしならキーワードのみで検索する
#[test]
fn test_reject_all_searches_keywords_only() {
    let table = read_csv_str(PARTS_CSV, b',').unwrap();
    let expander = pipeline::build_pipeline(strings(&["motor"]), None, &Config::default()).unwrap();

    let expansion = expander.expand(table.column(1), &mut RejectAll).unwrap();
    assert_eq!(expansion.terms.as_slice(), &strings(&["motor"])[..]);

    let tags = tag_rows(&table.column(1), expansion.terms.as_slice());
    assert_eq!(tags, vec!["motor", "", "", "", ""]);
}
