// ==========================================
// 备件查询工具 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件读写逻辑,不含查询逻辑
// ==========================================

pub mod request;
pub mod stock;
pub mod types;

// 重导出核心类型
pub use request::{RequestLine, RequestTotals};
pub use stock::{ColumnMap, MasterInfo, ResolvedColumn, StockRecord, StockTable, NOT_AVAILABLE};
pub use types::{CanonicalField, ViewMode};
