// ==========================================
// 备件查询工具 - 导出层
// ==========================================
// 职责: 申领清单 → 表格文件（供下载）
// ==========================================

pub mod error;
pub mod request_exporter;

pub use error::{ExportError, ExportResult};
pub use request_exporter::{
    export_columns, ExportFormat, RequestExporter, DEFAULT_EXPORT_FILE_NAME, EXPORT_SHEET_NAME,
};
