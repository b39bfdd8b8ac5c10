use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "term-tagger")]
#[command(about = "キーワードの表記ゆれを展開して表データの行にタグ付けするツール", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 入力ファイルと検索列
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// 入力ファイル（csv/tsv/xlsx/xls/ods）
    #[arg(required = true)]
    pub input: PathBuf,

    /// 検索する列名
    #[arg(short, long)]
    pub column: String,

    /// シート名（Excelのみ、省略時は先頭シート）
    #[arg(long)]
    pub sheet: Option<String>,
}

/// キーワード指定
#[derive(Args, Debug, Clone, Default)]
pub struct KeywordArgs {
    /// キーワード（カンマ区切り、複数回指定可）
    #[arg(short, long = "keywords")]
    pub keywords: Vec<String>,

    /// キーワードファイル（カンマ・改行区切り）
    #[arg(long)]
    pub keywords_file: Option<PathBuf>,

    /// 閾値判定の前に残す上位候補数（省略時は設定値）
    #[arg(long)]
    pub limit: Option<usize>,
}

/// 出力指定
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// 出力列名（省略時は設定値）
    #[arg(short = 'O', long)]
    pub output_column: Option<String>,

    /// 既存の列を上書きする
    #[arg(long)]
    pub overwrite: bool,

    /// 出力ファイル/ディレクトリ（省略時はカレントに既定名で保存）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 出力形式 (csv/excel)（省略時は出力ファイルの拡張子、なければcsv）
    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// プレビュー表示する行数（省略時は設定値）
    #[arg(long)]
    pub preview: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 検索対象にできる文字列列を一覧表示
    Columns {
        /// 入力ファイル
        #[arg(required = true)]
        input: PathBuf,

        /// シート名（Excelのみ）
        #[arg(long)]
        sheet: Option<String>,
    },

    /// 表記ゆれ候補を表示（承認・出力はしない）
    Suggest {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        keywords: KeywordArgs,

        /// JSON出力
        #[arg(long)]
        json: bool,
    },

    /// 候補の承認からタグ付け・出力まで一括実行
    Run {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        keywords: KeywordArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// 全候補を確認なしで採用
        #[arg(short, long, conflicts_with = "approvals")]
        yes: bool,

        /// 承認リストJSON（{"keyword": ["token", ...]}）
        #[arg(long)]
        approvals: Option<PathBuf>,
    },

    /// 指定した検索語でそのままタグ付け
    Tag {
        #[command(flatten)]
        input: InputArgs,

        /// 検索語（カンマ区切り、複数回指定可）
        #[arg(short, long = "terms", required = true)]
        terms: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// 設定を表示/編集
    Config {
        /// 上位候補数を設定
        #[arg(long)]
        set_candidate_limit: Option<usize>,

        /// 既定の出力列名を設定
        #[arg(long)]
        set_output_column: Option<String>,

        /// 既定の出力ファイル名の接頭辞を設定
        #[arg(long)]
        set_file_prefix: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
        }
    }

    /// 出力ファイルの拡張子から推定
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        ext.parse().ok()
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            _ => Err(format!("Unknown format: {}. Use csv or excel", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Excel => write!(f, "excel"),
        }
    }
}
