// ==========================================
// 备件查询工具 - 引擎层错误类型
// ==========================================
// 说明: 均为单次操作内的局部错误,不影响会话其他状态
// ==========================================

use thiserror::Error;

/// 查询/匹配错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("选择序号越界: {index}（候选共 {count} 条,有效范围 0..{count}）")]
    IndexOutOfRange { index: usize, count: usize },
}

/// 申领清单错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("清单行号越界: {index}（当前共 {len} 行）")]
    LineOutOfRange { index: usize, len: usize },
}
