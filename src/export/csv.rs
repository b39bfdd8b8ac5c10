//! CSV出力

use crate::error::Result;
use crate::table::Table;
use ::csv::Writer;
use std::io::Write;
use std::path::Path;

pub fn write_csv(table: &Table, output_path: &Path) -> Result<()> {
    let file = std::fs::File::create(output_path)?;
    write_csv_to(table, file)
}

/// null は空欄として書き出す
pub fn write_csv_to<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
}
