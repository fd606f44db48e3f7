// ==========================================
// 备件查询工具 - 引擎层
// ==========================================
// 职责: 查询匹配规则 + 申领清单规则
// 红线: 引擎只读库存表,不做文件读写
// ==========================================

pub mod error;
pub mod request_cart;
pub mod search;

// 重导出核心引擎
pub use error::{CartError, SearchError};
pub use request_cart::RequestCart;
pub use search::{AddResolution, SearchEngine, DEFAULT_SUGGESTION_LIMIT, QUERY_SEPARATOR};
