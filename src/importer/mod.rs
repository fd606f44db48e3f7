// ==========================================
// 备件查询工具 - 导入层
// ==========================================
// 职责: 外部表格导入,生成内存库存表
// 支持: Excel (.xlsx/.xls), CSV
// ==========================================

// 模块声明
pub mod column_resolver;
pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod importer_trait;
pub mod raw_sheet;
pub mod row_normalizer;
pub mod stock_importer;

// 重导出核心类型
pub use column_resolver::{normalize_header, ColumnResolver};
pub use data_cleaner::{clean_text, parse_float_or_zero, parse_int_or_zero};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileFormat, UniversalFileParser};
pub use importer_trait::FileParser;
pub use raw_sheet::{RawCell, RawSheet};
pub use row_normalizer::RowNormalizer;
pub use stock_importer::StockImporter;
