// ==========================================
// 备件查询工具 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约定: 数值单元格解析失败不属于错误（静默取 0）
// ==========================================

use crate::domain::types::CanonicalField;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件格式不一致: 主库存文件为 .{expected}，上传文件为 .{actual}")]
    FormatMismatch { expected: String, actual: String },

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("文件写入失败: {0}")]
    FileWriteError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 表头映射错误 =====
    /// 必需列无法解析（SchemaError）
    #[error("{}", schema_message(.missing))]
    MissingRequiredColumns { missing: Vec<CanonicalField> },
}

impl ImportError {
    /// 是否为表头结构错误
    pub fn is_schema_error(&self) -> bool {
        matches!(self, ImportError::MissingRequiredColumns { .. })
    }
}

/// 表头错误提示: 始终列出两个必需字段及其可接受的别名
fn schema_message(missing: &[CanonicalField]) -> String {
    let missing_keys: Vec<&str> = missing.iter().map(|f| f.key()).collect();
    let mut message = format!(
        "缺少必需列 [{}]。表格必须包含型号列和描述列（可使用以下任一表头）:",
        missing_keys.join(", ")
    );
    for field in CanonicalField::REQUIRED {
        message.push_str(&format!("\n{}: {:?}", field.key(), field.aliases()));
    }
    message
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ImportError::FileNotFound(err.to_string()),
            _ => ImportError::FileReadError(err.to_string()),
        }
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
