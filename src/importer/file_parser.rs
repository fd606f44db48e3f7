// ==========================================
// 备件查询工具 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx/.xls) / CSV (.csv)，首行为表头
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use crate::importer::raw_sheet::{RawCell, RawSheet};
use calamine::{open_workbook, Data, Reader, Xls, Xlsx};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

// ==========================================
// FileFormat - 文件格式（按扩展名识别）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Xlsx,
    Xls,
    Csv,
}

impl FileFormat {
    /// 按扩展名识别（大小写不敏感）
    pub fn from_extension(ext: &str) -> ImportResult<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "xlsx" => Ok(FileFormat::Xlsx),
            "xls" => Ok(FileFormat::Xls),
            "csv" => Ok(FileFormat::Csv),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        Self::from_extension(ext)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Xlsx => "xlsx",
            FileFormat::Xls => "xls",
            FileFormat::Csv => "csv",
        }
    }

    /// 对应的解析器
    pub fn parser(&self) -> Box<dyn FileParser> {
        match self {
            FileFormat::Csv => Box::new(CsvParser),
            FileFormat::Xlsx | FileFormat::Xls => Box::new(ExcelParser::for_format(*self)),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<RawSheet> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut sheet = RawSheet::new(headers);
        for result in reader.records() {
            let record = result?;
            let row: Vec<RawCell> = record.iter().map(RawCell::from_text).collect();
            sheet.push_row(row);
        }

        Ok(sheet)
    }
}

impl FileParser for CsvParser {
    fn parse_path(&self, file_path: &Path) -> ImportResult<RawSheet> {
        ensure_exists(file_path)?;
        let file = File::open(file_path)?;
        self.parse_reader(file)
    }

    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawSheet> {
        self.parse_reader(bytes)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser {
    format: FileFormat,
}

impl ExcelParser {
    pub fn for_format(format: FileFormat) -> Self {
        Self { format }
    }
}

impl FileParser for ExcelParser {
    fn parse_path(&self, file_path: &Path) -> ImportResult<RawSheet> {
        ensure_exists(file_path)?;

        match self.format {
            FileFormat::Xlsx => {
                let mut workbook: Xlsx<_> = open_workbook(file_path)
                    .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;
                read_first_sheet(&mut workbook)
            }
            FileFormat::Xls => {
                let mut workbook: Xls<_> = open_workbook(file_path)
                    .map_err(|e: calamine::XlsError| ImportError::ExcelParseError(e.to_string()))?;
                read_first_sheet(&mut workbook)
            }
            FileFormat::Csv => Err(ImportError::UnsupportedFormat(
                self.format.extension().to_string(),
            )),
        }
    }

    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawSheet> {
        match self.format {
            FileFormat::Xlsx => {
                let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
                    .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;
                read_first_sheet(&mut workbook)
            }
            FileFormat::Xls => {
                let mut workbook: Xls<_> = Xls::new(Cursor::new(bytes))
                    .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;
                read_first_sheet(&mut workbook)
            }
            FileFormat::Csv => Err(ImportError::UnsupportedFormat(
                self.format.extension().to_string(),
            )),
        }
    }
}

/// 读取第一个工作表
fn read_first_sheet<RS, R>(workbook: &mut R) -> ImportResult<RawSheet>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: fmt::Display,
{
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

    // 提取表头（第一行）
    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无表头行".to_string()))?;

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let mut sheet = RawSheet::new(headers);
    for data_row in rows {
        sheet.push_row(data_row.iter().map(convert_cell).collect());
    }

    Ok(sheet)
}

fn convert_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::String(s) => RawCell::from_text(s),
        Data::Int(i) => RawCell::Int(*i),
        Data::Float(f) => RawCell::Float(*f),
        Data::Bool(b) => RawCell::Bool(*b),
        other => RawCell::from_text(&other.to_string()),
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawSheet> {
        let path = file_path.as_ref();
        let format = FileFormat::from_path(path)?;
        format.parser().parse_path(path)
    }

    /// 按上传文件名识别格式后解析内容
    pub fn parse_upload(&self, file_name: &str, bytes: &[u8]) -> ImportResult<RawSheet> {
        let format = FileFormat::from_path(file_name)?;
        format.parser().parse_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(content: &str) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    #[test]
    fn test_file_format_detection() {
        assert_eq!(FileFormat::from_path("stocks1.XLSX").unwrap(), FileFormat::Xlsx);
        assert_eq!(FileFormat::from_path("a/b/old.xls").unwrap(), FileFormat::Xls);
        assert_eq!(FileFormat::from_extension(".csv").unwrap(), FileFormat::Csv);
        assert!(matches!(
            FileFormat::from_path("notes.txt"),
            Err(ImportError::UnsupportedFormat(_))
        ));
        assert!(FileFormat::from_path("no_extension").is_err());
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let temp_file = csv_file("Part No., Description ,Price\nM100,Blade,12.5\nM101,Guard,7\n");

        let sheet = CsvParser.parse_path(temp_file.path()).unwrap();

        assert_eq!(sheet.headers, vec!["Part No.", "Description", "Price"]);
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.cell(0, 0), &RawCell::Text("M100".to_string()));
        assert_eq!(sheet.cell(1, 2), &RawCell::Text("7".to_string()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_path(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows_and_short_rows() {
        let sheet = CsvParser
            .parse_bytes(b"model,desc,price\nM100,Blade,1\n,,\nM101\n")
            .unwrap();

        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.cell(1, 0), &RawCell::Text("M101".to_string()));
        assert_eq!(sheet.cell(1, 2), &RawCell::Empty);
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let result = UniversalFileParser.parse_upload("stock.ods", b"whatever");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "ods"));
    }

    #[test]
    fn test_excel_parser_rejects_garbage_bytes() {
        let parser = ExcelParser::for_format(FileFormat::Xlsx);
        let result = parser.parse_bytes(b"model,desc\nM1,x\n");
        assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
    }
}
