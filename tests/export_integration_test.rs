// ==========================================
// 申领清单导出集成测试
// ==========================================
// 测试目标: 导出的 xlsx 可被重新读取,列顺序与数值正确
// ==========================================

use calamine::{open_workbook, Data, Reader, Xlsx};
use spare_parts_finder::domain::{RequestLine, StockRecord};
use spare_parts_finder::export::{export_columns, ExportError, RequestExporter, EXPORT_SHEET_NAME};
use tempfile::TempDir;

fn sample_lines() -> Vec<RequestLine> {
    let mut blade = RequestLine::from_record(&StockRecord {
        model: "M100".to_string(),
        material_description: "Blade".to_string(),
        shrm: "3".to_string(),
        home: "2".to_string(),
        stock: 5,
        used_spares: 1,
        price: 12.5,
    });
    blade.qty = 4;

    let guard = RequestLine::from_record(&StockRecord {
        model: "M101".to_string(),
        material_description: "Guard".to_string(),
        price: 7.0,
        ..StockRecord::default()
    });
    vec![blade, guard]
}

#[test]
fn test_xlsx_export_reads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("requests.xlsx");
    RequestExporter
        .write_to_path(&sample_lines(), &path)
        .expect("export");

    let mut workbook: Xlsx<_> = open_workbook(&path).expect("open export");
    assert_eq!(workbook.sheet_names(), vec![EXPORT_SHEET_NAME.to_string()]);

    let range = workbook.worksheet_range(EXPORT_SHEET_NAME).expect("sheet");
    let rows: Vec<&[Data]> = range.rows().collect();
    assert_eq!(rows.len(), 3);

    let header: Vec<String> = rows[0].iter().map(|c| c.to_string()).collect();
    assert_eq!(header, export_columns());

    assert_eq!(rows[1][0], Data::String("M100".to_string()));
    assert_eq!(rows[1][7], Data::Float(4.0));
    assert_eq!(rows[1][8], Data::Float(50.0));

    assert_eq!(rows[2][2], Data::String("N-A".to_string()));
    assert_eq!(rows[2][7], Data::Float(1.0));
    assert_eq!(rows[2][8], Data::Float(7.0));
}

#[test]
fn test_csv_export_to_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("requests.csv");
    RequestExporter
        .write_to_path(&sample_lines(), &path)
        .expect("export");

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], "M101,Guard,N-A,N-A,0,0,7.00,1,7.00");
}

#[test]
fn test_export_rejects_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let result = RequestExporter.write_to_path(&sample_lines(), dir.path().join("requests.pdf"));
    assert!(matches!(result, Err(ExportError::UnsupportedFormat(_))));
}
