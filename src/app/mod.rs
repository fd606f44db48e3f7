// ==========================================
// 备件查询工具 - 应用层
// ==========================================
// 职责: 会话上下文、主库存文件存储、管理员校验、命令行交互
// ==========================================

pub mod admin;
pub mod error;
pub mod master_store;
pub mod render;
pub mod session;
pub mod shell;

// 重导出
pub use admin::AdminGate;
pub use error::{ErrorResponse, SessionError, SessionResult};
pub use master_store::{FsMasterStore, MasterStore};
pub use render::{format_amount, render_lines, render_records, render_totals};
pub use session::{AddOutcome, SearchView, StockSession};
pub use shell::{Shell, ShellReply};
