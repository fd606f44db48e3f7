// ==========================================
// 备件查询工具 - 核心库
// ==========================================
// 功能: 库存表查询 + 申领清单 + 导出
// 数据流: 表格文件 → 表头解析 → 行归一化 → 查询 → 申领清单 → 导出
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 外部表格
pub mod importer;

// 引擎层 - 查询与清单规则
pub mod engine;

// 导出层
pub mod export;

// 配置层
pub mod config;

// 应用层 - 会话与命令行
pub mod app;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    CanonicalField, ColumnMap, MasterInfo, RequestLine, RequestTotals, StockRecord, StockTable,
    ViewMode,
};
pub use engine::{AddResolution, RequestCart, SearchEngine};
pub use importer::{ColumnResolver, ImportError, RowNormalizer, StockImporter};
pub use export::{ExportFormat, RequestExporter};
pub use config::AppConfig;
pub use app::{AddOutcome, FsMasterStore, MasterStore, SessionError, Shell, StockSession};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "spare-parts-finder";
