use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaggerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("未対応のファイル形式です: {0}（csv/tsv/xlsx/xls/ods に対応）")]
    UnsupportedFormat(String),

    #[error("列が見つかりません: '{column}'（利用可能: {available}）")]
    ColumnNotFound { column: String, available: String },

    #[error("シートが見つかりません: '{sheet}'（利用可能: {available}）")]
    SheetNotFound { sheet: String, available: String },

    #[error("表データが不正です: {0}")]
    InvalidTable(String),

    #[error("キーワードを1つ以上指定してください（-k または --keywords-file）")]
    NoKeywords,

    #[error("出力列名が空です")]
    InvalidOutputColumn,

    #[error("出力列 '{0}' は既に存在します。別の名前を指定するか --overwrite を付けてください")]
    OutputColumnExists(String),

    #[error("CSVエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel読み込みエラー: {0}")]
    Excel(#[from] calamine::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelExport(#[from] rust_xlsxwriter::XlsxError),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] term_tagger_common::Error),
}

pub type Result<T> = std::result::Result<T, TaggerError>;
