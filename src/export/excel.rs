//! Excel出力

use crate::error::Result;
use crate::table::Table;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// 1行目を太字のヘッダーにして書き出す（null は空セル）
pub fn write_excel(table: &Table, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    for (col, header) in table.headers().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    for (i, row) in table.rows().iter().enumerate() {
        let row_index = (i + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            if let Some(value) = cell {
                worksheet.write_string(row_index, col as u16, value)?;
            }
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    workbook.save(output_path)?;
    Ok(())
}
