// ==========================================
// 备件查询工具 - 配置层
// ==========================================
// 职责: 应用配置加载,支持文件与环境变量覆写
// ==========================================

pub mod app_config;

// 重导出
pub use app_config::{config_keys, get_default_master_path, AppConfig, ConfigError};
