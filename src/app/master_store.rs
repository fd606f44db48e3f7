// ==========================================
// 备件查询工具 - 主库存文件存储
// ==========================================
// 职责: 主库存文件的读取与整体覆盖
// 红线: 覆盖必须原子化（临时文件 + rename）,失败时旧文件保持不变
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

// ==========================================
// MasterStore Trait
// ==========================================
// 实现者: FsMasterStore（测试中使用内存实现）
#[async_trait]
pub trait MasterStore: Send + Sync {
    /// 主库存文件的固定位置
    fn master_path(&self) -> &Path;

    /// 文件是否存在（无法判断时返回错误,不视为不存在）
    async fn exists(&self) -> ImportResult<bool>;

    /// 读取主库存文件全部内容
    async fn read(&self) -> ImportResult<Vec<u8>>;

    /// 以上传内容整体覆盖主库存文件
    async fn replace(&self, bytes: &[u8]) -> ImportResult<()>;

    /// 主库存文件名（用于识别格式）
    fn file_name(&self) -> String {
        self.master_path()
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string()
    }
}

// ==========================================
// FsMasterStore - 本地文件系统实现
// ==========================================
pub struct FsMasterStore {
    path: PathBuf,
}

impl FsMasterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let name = format!(".{}.{}.tmp", self.file_name(), Uuid::new_v4().simple());
        match self.path.parent() {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }
}

#[async_trait]
impl MasterStore for FsMasterStore {
    fn master_path(&self) -> &Path {
        &self.path
    }

    async fn exists(&self) -> ImportResult<bool> {
        tokio::fs::try_exists(&self.path).await.map_err(|e| {
            ImportError::FileReadError(format!("{}: {}", self.path.display(), e))
        })
    }

    async fn read(&self) -> ImportResult<Vec<u8>> {
        debug!(file = %self.path.display(), "读取主库存文件");
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ImportError::FileNotFound(self.path.display().to_string()))
            }
            Err(e) => Err(ImportError::FileReadError(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn replace(&self, bytes: &[u8]) -> ImportResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| ImportError::FileWriteError(format!("{}: {}", dir.display(), e)))?;
        }

        let temp_path = self.temp_path();
        if let Err(e) = tokio::fs::write(&temp_path, bytes).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(ImportError::FileWriteError(format!(
                "{}: {}",
                temp_path.display(),
                e
            )));
        }

        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(ImportError::FileWriteError(format!(
                "{}: {}",
                self.path.display(),
                e
            )));
        }

        info!(file = %self.path.display(), size = bytes.len(), "主库存文件已覆盖");
        Ok(())
    }
}
