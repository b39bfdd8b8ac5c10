use anyhow::Context;
use clap::Parser;
use std::time::Instant;
use term_tagger::{approval, cli, config, export, logging, pipeline, report, table};
use cli::{Cli, Commands, ExportFormat, OutputArgs};
use config::Config;
use term_tagger_common::{AcceptAll, Approvals, PresetApprovals};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Columns { input, sheet } => {
            let table = load_table(&input, sheet.as_deref())?;
            let text_columns = table.text_columns();

            if text_columns.is_empty() {
                println!("⚠ 文字列の列がありません。文字列の列を含むファイルを指定してください");
                return Ok(());
            }

            println!("検索対象にできる列:");
            for name in text_columns {
                let index = table.column_index(name)?;
                println!("  {} ({}件)", name, table.non_null_count(index));
            }
        }

        Commands::Suggest { input, keywords, json } => {
            let keywords_list = pipeline::collect_keywords(&keywords)?;
            let table = load_table(&input.input, input.sheet.as_deref())?;
            let column = pipeline::search_column(&table, &input.column)?;

            let expander = pipeline::build_pipeline(keywords_list, keywords.limit, &config)?;
            let proposal = expander.propose(table.column(column));

            if json {
                println!("{}", serde_json::to_string_pretty(&proposal)?);
            } else {
                print!("{}", report::format_proposal(&proposal));
            }
        }

        Commands::Run { input, keywords, output, yes, approvals } => {
            println!("🔎 term-tagger - 表記ゆれ展開とタグ付け\n");

            // 1. 読み込み
            println!("[1/4] 表データを読み込み中...");
            let keywords_list = pipeline::collect_keywords(&keywords)?;
            let mut table = load_table(&input.input, input.sheet.as_deref())?;
            let column = pipeline::search_column(&table, &input.column)?;
            println!("✔ {}行を読み込み（検索列: {}）", table.len(), input.column);
            println!("  キーワード: {}\n", keywords_list.join(", "));

            // 2. 候補抽出
            println!("[2/4] 表記ゆれ候補を抽出中...");
            let expander = pipeline::build_pipeline(keywords_list, keywords.limit, &config)?;
            let started = Instant::now();
            let bar = report::spinner("トークンを採点中...");
            let vocabulary = expander.vocabulary(table.column(column));
            let proposal = expander.propose_from(&vocabulary);
            bar.finish_and_clear();
            tracing::debug!(
                tokens = vocabulary.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "候補抽出完了"
            );
            print!("{}", report::format_proposal(&proposal));
            println!();

            // 3. 承認
            println!("[3/4] 候補を承認中...");
            // 候補がなくても承認リストの形式は確認する
            let preset = match &approvals {
                Some(path) => Some(
                    pipeline::load_approvals(path)
                        .with_context(|| format!("承認リストを読み込めません: {}", path.display()))?,
                ),
                None => None,
            };

            let accepted = if proposal.is_empty() {
                println!("  表記ゆれ候補は見つかりませんでした");
                if let Some(path) = &approvals {
                    tracing::warn!(path = %path.display(), "候補がないため承認リストは使われません");
                    println!("  ⚠ 候補がないため承認リストは使用しません");
                }
                Approvals::new()
            } else if let Some(preset) = preset {
                let mut policy = PresetApprovals::new(preset);
                let accepted = expander.approve(&proposal, &mut policy)?;
                for (keyword, token) in policy.rejected() {
                    tracing::warn!(keyword = %keyword, token = %token, "候補にないトークンを除外");
                    println!("  ⚠ '{}' の候補に '{}' はないため除外しました", keyword, token);
                }
                accepted
            } else if yes {
                expander.approve(&proposal, &mut AcceptAll)?
            } else {
                println!("  キーワード自体は常に検索語に含まれます");
                expander.approve(&proposal, &mut approval::InteractiveApproval)?
            };
            let terms = expander.terms(&accepted).into_vec();
            println!(
                "✔ 検索語 {}件: {}\n",
                terms.len(),
                report::format_terms(&terms, expander.keywords())
            );

            // 4. タグ付け・出力
            println!("[4/4] タグ付け・出力中...");
            write_output(&mut table, column, &terms, &output, &config)?;

            println!("\n✅ 完了");
        }

        Commands::Tag { input, terms, output } => {
            println!("🏷 term-tagger - タグ付け\n");

            let terms = pipeline::collect_terms(&terms)?;
            let mut table = load_table(&input.input, input.sheet.as_deref())?;
            let column = pipeline::search_column(&table, &input.column)?;
            println!("✔ {}行を読み込み（検索列: {}）", table.len(), input.column);
            println!("  検索語: {}\n", terms.join(", "));

            write_output(&mut table, column, &terms, &output, &config)?;

            println!("\n✅ 完了");
        }

        Commands::Config { set_candidate_limit, set_output_column, set_file_prefix, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(limit) = set_candidate_limit {
                config.candidate_limit = limit;
                changed = true;
            }
            if let Some(column) = set_output_column {
                config.output_column = column.trim().to_string();
                changed = true;
            }
            if let Some(prefix) = set_file_prefix {
                config.file_prefix = prefix;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  上位候補数: {}", config.candidate_limit);
                println!("  出力列名: {}", config.output_column);
                println!("  ファイル名接頭辞: {}", config.file_prefix);
                println!("  区切り文字: '{}'", config.token_delimiter);
                println!("  プレビュー行数: {}", config.preview_rows);
            }
        }
    }

    Ok(())
}

fn load_table(path: &std::path::Path, sheet: Option<&str>) -> anyhow::Result<table::Table> {
    let table = table::read_table(path, sheet)
        .with_context(|| format!("表データを読み込めません: {}", path.display()))?;
    Ok(table)
}

/// タグ列を書き込み、プレビューを表示して保存する
fn write_output(
    table: &mut table::Table,
    column: usize,
    terms: &[String],
    output: &OutputArgs,
    config: &Config,
) -> anyhow::Result<()> {
    let output_column = output
        .output_column
        .clone()
        .unwrap_or_else(|| config.output_column.clone());
    let output_column = output_column.trim();

    let bar = report::spinner("タグ付け中...");
    let started = Instant::now();
    let matched = pipeline::tag_table(table, column, terms, output_column, output.overwrite)?;
    bar.finish_and_clear();
    tracing::debug!(rows = table.len(), matched, elapsed_ms = started.elapsed().as_millis() as u64, "タグ付け完了");

    if matched == 0 {
        println!("⚠ 一致する行はありませんでした");
    } else {
        let preview_limit = output.preview.unwrap_or(config.preview_rows);
        let out_index = table.column_index(output_column)?;
        let rows = pipeline::matched_rows(table, out_index, preview_limit);
        println!("✔ {}行に一致（列 '{}'、先頭{}行を表示）", matched, output_column, rows.len());
        print!("{}", report::format_rows(table, &rows));
    }

    let format = output
        .format
        .clone()
        .or_else(|| output.output.as_deref().and_then(ExportFormat::from_path))
        .unwrap_or_default();
    let now = chrono::Local::now().naive_local();
    let output_path = export::resolve_output_path(output.output.as_deref(), &format, &config.file_prefix, &now);

    export::export_table(table, &format, &output_path)?;
    println!("✔ {}出力: {}", format, output_path.display());
    Ok(())
}
