pub mod csv;
pub mod excel;

use crate::cli::ExportFormat;
use crate::error::Result;
use crate::table::Table;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// 既定の出力ファイル名（例: namingconvention_output_20260118_0905.csv）
pub fn default_file_name(prefix: &str, format: &ExportFormat, now: &NaiveDateTime) -> String {
    format!("{}_{}.{}", prefix, now.format("%Y%m%d_%H%M"), format.extension())
}

/// 出力先を決める（未指定・ディレクトリなら既定のファイル名を付ける）
pub fn resolve_output_path(
    output: Option<&Path>,
    format: &ExportFormat,
    prefix: &str,
    now: &NaiveDateTime,
) -> PathBuf {
    match output {
        None => PathBuf::from(default_file_name(prefix, format, now)),
        Some(path) if path.is_dir() || path.extension().is_none() => {
            path.join(default_file_name(prefix, format, now))
        }
        Some(path) => path.to_path_buf(),
    }
}

pub fn export_table(table: &Table, format: &ExportFormat, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match format {
        ExportFormat::Csv => csv::write_csv(table, output_path),
        ExportFormat::Excel => excel::write_excel(table, output_path),
    }
}
