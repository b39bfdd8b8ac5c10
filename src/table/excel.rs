use super::{parse_cell, Table};
use crate::error::{Result, TaggerError};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Excel/ODSを読み込む（シート未指定時は先頭シート、1行目はヘッダー）
pub fn read_excel(path: &Path, sheet: Option<&str>) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names();

    let sheet_name = match sheet {
        Some(name) if sheet_names.iter().any(|s| s == name) => name.to_string(),
        Some(name) => {
            return Err(TaggerError::SheetNotFound {
                sheet: name.to_string(),
                available: sheet_names.join(", "),
            })
        }
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| TaggerError::InvalidTable("シートがありません".into()))?,
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();

    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(|c| cell_to_value(c).unwrap_or_default()).collect(),
        None => Vec::new(),
    };

    let rows: Vec<Vec<Option<String>>> = rows
        .map(|row| row.iter().take(headers.len()).map(cell_to_value).collect())
        .collect();

    tracing::debug!(sheet = %sheet_name, columns = headers.len(), rows = rows.len(), "シートを読み込みました");
    Table::new(headers, rows)
}

/// セルを文字列化（空セル・エラーセルは null）
fn cell_to_value(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => parse_cell(s),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(true) => Some("True".into()),
        Data::Bool(false) => Some("False".into()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn test_cell_to_value() {
        assert_eq!(cell_to_value(&Data::Empty), None);
        assert_eq!(cell_to_value(&Data::String("NA".into())), None);
        assert_eq!(cell_to_value(&Data::String("pump_a".into())), Some("pump_a".into()));
        assert_eq!(cell_to_value(&Data::Float(3.0)), Some("3".into()));
        assert_eq!(cell_to_value(&Data::Float(2.5)), Some("2.5".into()));
        assert_eq!(cell_to_value(&Data::Int(7)), Some("7".into()));
        assert_eq!(cell_to_value(&Data::Bool(true)), Some("True".into()));
    }

    #[test]
    fn test_read_excel_roundtrip_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet().set_name("parts").unwrap();
        sheet.write_string(0, 0, "id").unwrap();
        sheet.write_string(0, 1, "name").unwrap();
        sheet.write_number(1, 0, 1.0).unwrap();
        sheet.write_string(1, 1, "PUMP_MOTER").unwrap();
        sheet.write_number(2, 0, 2.0).unwrap();
        workbook.save(&path).unwrap();

        let table = read_excel(&path, None).unwrap();
        assert_eq!(table.headers(), &["id".to_string(), "name".to_string()]);
        assert_eq!(table.column(0), vec![Some("1"), Some("2")]);
        assert_eq!(table.column(1), vec![Some("PUMP_MOTER"), None]);

        let table = read_excel(&path, Some("parts")).unwrap();
        assert_eq!(table.len(), 2);

        let result = read_excel(&path, Some("other"));
        assert!(matches!(result, Err(TaggerError::SheetNotFound { .. })));
    }
}
