// ==========================================
// 备件查询工具 - 应用配置
// ==========================================
// 职责: 配置加载与覆写
// 优先级: 默认值 < JSON 配置文件 < 环境变量 < 命令行参数（由 main 处理）
// ==========================================

use crate::domain::types::ViewMode;
use crate::engine::search::DEFAULT_SUGGESTION_LIMIT;
use crate::export::DEFAULT_EXPORT_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置键（环境变量名与默认值）
pub mod config_keys {
    // 环境变量
    pub const ENV_CONFIG_FILE: &str = "SPARE_PARTS_CONFIG";
    pub const ENV_MASTER_FILE: &str = "SPARE_PARTS_MASTER_FILE";
    pub const ENV_ADMIN_PASSWORD: &str = "SPARE_PARTS_ADMIN_PASSWORD";
    pub const ENV_LOCALE: &str = "SPARE_PARTS_LOCALE";

    // 默认值
    pub const DEFAULT_MASTER_FILE_NAME: &str = "stocks1.xlsx";
    /// 部署时必须修改
    pub const DEFAULT_ADMIN_PASSWORD: &str = "makita123";
    pub const DEFAULT_LOCALE: &str = "en";
    pub const DEFAULT_PAGE_TITLE: &str = "Makita Spare Parts Finder";
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },
}

// ==========================================
// AppConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 主库存文件路径（固定位置,管理员上传时整体覆盖）
    pub master_file: PathBuf,

    /// 管理员口令（精确字符串比较）
    pub admin_password: String,

    /// 输入联想条数上限
    pub suggestion_limit: usize,

    /// 默认展示模式
    pub default_view: ViewMode,

    /// 导出默认文件名
    pub export_file_name: String,

    /// 界面语言（en / zh-CN）
    pub locale: String,

    pub page_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            master_file: get_default_master_path(),
            admin_password: config_keys::DEFAULT_ADMIN_PASSWORD.to_string(),
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            default_view: ViewMode::default(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            locale: config_keys::DEFAULT_LOCALE.to_string(),
            page_title: config_keys::DEFAULT_PAGE_TITLE.to_string(),
        }
    }
}

impl AppConfig {
    /// 加载配置: 默认值 → 配置文件（若指定） → 环境变量
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let env_file = std::env::var(config_keys::ENV_CONFIG_FILE)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let mut config = match config_file.map(Path::to_path_buf).or(env_file) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        info!(
            master_file = %config.master_file.display(),
            locale = %config.locale,
            "配置加载完成"
        );
        Ok(config)
    }

    /// 从 JSON 文件读取（缺省字段取默认值）
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 环境变量覆写（空值忽略）
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = get(config_keys::ENV_MASTER_FILE) {
            debug!(key = config_keys::ENV_MASTER_FILE, "覆写主库存文件路径");
            self.master_file = PathBuf::from(path.trim());
        }
        if let Some(password) = get(config_keys::ENV_ADMIN_PASSWORD) {
            debug!(key = config_keys::ENV_ADMIN_PASSWORD, "覆写管理员口令");
            self.admin_password = password;
        }
        if let Some(locale) = get(config_keys::ENV_LOCALE) {
            self.locale = locale.trim().to_string();
        }
    }
}

/// 默认主库存文件路径
///
/// 优先使用用户数据目录,获取失败时回退到当前目录
pub fn get_default_master_path() -> PathBuf {
    let file_name = config_keys::DEFAULT_MASTER_FILE_NAME;
    match dirs::data_dir() {
        Some(data_dir) => data_dir.join("spare-parts-finder").join(file_name),
        None => PathBuf::from(".").join(file_name),
    }
}
