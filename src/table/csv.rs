use super::{parse_cell, Table};
use crate::error::Result;
use ::csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::Path;

const UTF8_BOM: char = '\u{feff}';

/// 区切り文字付きテキストを読み込む（1行目はヘッダー）
pub fn read_csv(path: &Path, delimiter: u8) -> Result<Table> {
    let file = std::fs::File::open(path)?;
    read_csv_from(file, delimiter)
}

/// CSV文字列から読み込み
pub fn read_csv_str(content: &str, delimiter: u8) -> Result<Table> {
    read_csv_from(content.as_bytes(), delimiter)
}

fn read_csv_from<R: Read>(reader: R, delimiter: u8) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches(UTF8_BOM).to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record_to_row(&record?));
    }

    tracing::debug!(columns = headers.len(), rows = rows.len(), "CSVを読み込みました");
    Table::new(headers, rows)
}

fn record_to_row(record: &StringRecord) -> Vec<Option<String>> {
    record.iter().map(parse_cell).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaggerError;

    #[test]
    fn test_read_csv_str() {
        let table = read_csv_str("id,name\n1,PUMP_A\n2,\n3,NaN\n4,\"big, motor\"\n", b',').unwrap();
        assert_eq!(table.headers(), &["id".to_string(), "name".to_string()]);
        assert_eq!(table.len(), 4);
        assert_eq!(
            table.column(1),
            vec![Some("PUMP_A"), None, None, Some("big, motor")]
        );
    }

    #[test]
    fn test_bom_stripped() {
        let table = read_csv_str("\u{feff}name\nmotor\n", b',').unwrap();
        assert_eq!(table.headers(), &["name".to_string()]);
    }

    #[test]
    fn test_tab_delimited() {
        let table = read_csv_str("a\tb\nx_y\tz\n", b'\t').unwrap();
        assert_eq!(table.column(0), vec![Some("x_y")]);
    }

    #[test]
    fn test_short_record_padded() {
        let table = read_csv_str("a,b,c\n1\n", b',').unwrap();
        assert_eq!(table.rows()[0], vec![Some("1".to_string()), None, None]);
    }

    #[test]
    fn test_invalid_utf8() {
        let bytes: &[u8] = b"name\n\xff\xfe\n";
        assert!(matches!(read_csv_from(bytes, b','), Err(TaggerError::Csv(_))));
    }
}
