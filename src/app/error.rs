// ==========================================
// 备件查询工具 - 会话层错误类型
// ==========================================
// 职责: 汇总各层错误,提供稳定的错误代码
// 约定: 加载类错误中止加载并保留原状态; 操作类错误仅影响当次操作
// ==========================================

use crate::engine::error::{CartError, SearchError};
use crate::export::ExportError;
use crate::importer::error::ImportError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("尚未加载主库存文件")]
    NoMasterLoaded,

    #[error("管理员口令错误")]
    AccessDenied,

    #[error("查询内容为空")]
    EmptyQuery,

    #[error("当前没有待选择的候选记录")]
    NoPendingSelection,

    #[error(transparent)]
    Import(#[from] ImportError),

    /// 文件已覆盖但重新加载失败: 内存表已失效,需要重新上传
    #[error("主库存文件已覆盖,但重新加载失败: {0}")]
    ReloadAfterReplace(#[source] ImportError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl SessionError {
    /// 错误代码（供 JSON 输出）
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::NoMasterLoaded => "NO_MASTER_LOADED",
            SessionError::AccessDenied => "ACCESS_DENIED",
            SessionError::EmptyQuery => "EMPTY_QUERY",
            SessionError::NoPendingSelection => "NO_PENDING_SELECTION",
            SessionError::Import(ImportError::MissingRequiredColumns { .. }) => "SCHEMA_ERROR",
            SessionError::Import(ImportError::UnsupportedFormat(_)) => "UNSUPPORTED_FORMAT",
            SessionError::Import(ImportError::FormatMismatch { .. }) => "FORMAT_MISMATCH",
            SessionError::Import(_) => "IMPORT_ERROR",
            SessionError::ReloadAfterReplace(_) => "RELOAD_AFTER_REPLACE",
            SessionError::Search(SearchError::IndexOutOfRange { .. }) => "INDEX_OUT_OF_RANGE",
            SessionError::Cart(CartError::LineOutOfRange { .. }) => "LINE_OUT_OF_RANGE",
            SessionError::Export(_) => "EXPORT_ERROR",
        }
    }
}

/// 错误响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<&SessionError> for ErrorResponse {
    fn from(err: &SessionError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
