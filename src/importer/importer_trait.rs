// ==========================================
// 备件查询工具 - 导入层 Trait
// ==========================================
// 职责: 定义导入接口（不包含实现）
// ==========================================

use crate::importer::error::ImportResult;
use crate::importer::raw_sheet::RawSheet;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析磁盘文件为原始表格
    ///
    /// # 返回
    /// - Ok(RawSheet): 表头 + 数据行（已跳过整行空白）
    /// - Err: 文件不存在、读取失败、格式错误
    fn parse_path(&self, file_path: &Path) -> ImportResult<RawSheet>;

    /// 解析内存中的文件内容（管理员上传）
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawSheet>;
}
