// ==========================================
// 备件查询工具 - 管理员口令校验
// ==========================================
// 仅控制一项能力: 覆盖主库存文件
// 精确字符串比较; 不做哈希/限流/锁定
// ==========================================

use crate::app::error::{SessionError, SessionResult};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AdminGate {
    secret: String,
}

impl AdminGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// 口令是否正确（未配置口令时一律拒绝）
    pub fn verify(&self, attempt: &str) -> bool {
        !self.secret.is_empty() && attempt == self.secret
    }

    pub fn authorize(&self, attempt: &str) -> SessionResult<()> {
        if self.verify(attempt) {
            Ok(())
        } else {
            warn!("管理员口令校验失败");
            Err(SessionError::AccessDenied)
        }
    }
}
