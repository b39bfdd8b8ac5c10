//! 表データ読み込みモジュール
//!
//! CSV/Excelを読み込み、null を `None` とした矩形の表に揃える。

mod csv;
mod excel;

use crate::error::{Result, TaggerError};
use regex::Regex;
use std::path::Path;

pub use self::csv::{read_csv, read_csv_str};
pub use self::excel::read_excel;

/// null とみなす文字列（pandas の既定の欠損値表記）
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// 欠損値表記なら `None`
pub fn parse_cell(raw: &str) -> Option<String> {
    if NA_VALUES.contains(&raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// 数値・真偽値として読めるセルか
fn is_numeric_like(value: &str) -> bool {
    lazy_static::lazy_static! {
        static ref NUMBER_RE: Regex =
            Regex::new(r"^\s*[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?\s*$").unwrap();
    }
    NUMBER_RE.is_match(value) || matches!(value, "True" | "False" | "TRUE" | "FALSE" | "true" | "false")
}

/// 読み込んだ表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// 空のヘッダーは `Unnamed: i` にし、それ以外は書かれたまま残す。
    /// 短い行は末尾を null で埋める。ヘッダーより長い行はエラー
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        let headers: Vec<String> = headers
            .into_iter()
            .enumerate()
            .map(|(i, h)| if h.is_empty() { format!("Unnamed: {}", i) } else { h })
            .collect();

        let width = headers.len();
        let mut normalized = Vec::with_capacity(rows.len());
        for (i, mut row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(TaggerError::InvalidTable(format!(
                    "{}行目の列数 {} がヘッダーの列数 {} を超えています",
                    i + 2,
                    row.len(),
                    width
                )));
            }
            row.resize(width, None);
            normalized.push(row);
        }

        Ok(Self {
            headers,
            rows: normalized,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TaggerError::ColumnNotFound {
                column: name.to_string(),
                available: self.headers.join(", "),
            })
    }

    /// 列の値（null は `None`）
    pub fn column(&self, index: usize) -> Vec<Option<&str>> {
        self.rows
            .iter()
            .map(|row| row.get(index).and_then(|c| c.as_deref()))
            .collect()
    }

    pub fn non_null_count(&self, index: usize) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row.get(index), Some(Some(_))))
            .count()
    }

    /// 文字列の値を1つ以上含む列名
    pub fn text_columns(&self) -> Vec<&str> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                self.rows.iter().any(|row| {
                    row.get(*i)
                        .and_then(|c| c.as_deref())
                        .map(|v| !is_numeric_like(v))
                        .unwrap_or(false)
                })
            })
            .map(|(_, h)| h.as_str())
            .collect()
    }

    /// 列を追加、または `overwrite` 時に既存列を置き換える
    pub fn set_column(&mut self, name: &str, values: Vec<String>, overwrite: bool) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TaggerError::InvalidOutputColumn);
        }
        if values.len() != self.rows.len() {
            return Err(TaggerError::InvalidTable(format!(
                "列の値の数 {} が行数 {} と一致しません",
                values.len(),
                self.rows.len()
            )));
        }

        match self.headers.iter().position(|h| h == name) {
            Some(_) if !overwrite => Err(TaggerError::OutputColumnExists(name.to_string())),
            Some(index) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[index] = Some(value);
                }
                Ok(())
            }
            None => {
                self.headers.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(Some(value));
                }
                Ok(())
            }
        }
    }
}

/// 拡張子に応じて表を読み込む
pub fn read_table(path: &Path, sheet: Option<&str>) -> Result<Table> {
    if !path.exists() {
        return Err(TaggerError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" | "txt" => read_csv(path, b','),
        "tsv" => read_csv(path, b'\t'),
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => read_excel(path, sheet),
        _ => Err(TaggerError::UnsupportedFormat(path.display().to_string())),
    }
}
