// ==========================================
// 备件查询工具 - 库存表导入器
// ==========================================
// 流程: 解析 → 表头解析 → 行归一化 → StockTable
// 红线: 失败时不产生任何部分结果,由调用方保留旧表
// ==========================================

use crate::domain::stock::{MasterInfo, StockTable};
use crate::importer::column_resolver::ColumnResolver;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::raw_sheet::RawSheet;
use crate::importer::row_normalizer::RowNormalizer;
use chrono::Utc;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct StockImporter {
    file_parser: UniversalFileParser,
    column_resolver: ColumnResolver,
    row_normalizer: RowNormalizer,
}

impl Default for StockImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StockImporter {
    pub fn new() -> Self {
        Self {
            file_parser: UniversalFileParser,
            column_resolver: ColumnResolver,
            row_normalizer: RowNormalizer,
        }
    }

    /// 从磁盘文件导入
    pub fn import_path<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<StockTable> {
        let path = file_path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        debug!(file = %path.display(), "步骤 1: 解析文件");
        let sheet = self.file_parser.parse(path)?;
        self.build_table(sheet, &file_name)
    }

    /// 从上传内容导入（文件名仅用于识别格式与展示）
    pub fn import_bytes(&self, file_name: &str, bytes: &[u8]) -> ImportResult<StockTable> {
        debug!(file = %file_name, size = bytes.len(), "步骤 1: 解析上传内容");
        let sheet = self.file_parser.parse_upload(file_name, bytes)?;
        self.build_table(sheet, file_name)
    }

    /// 表头解析 + 行归一化
    pub fn build_table(&self, sheet: RawSheet, file_name: &str) -> ImportResult<StockTable> {
        let start_time = Instant::now();
        let load_id = Uuid::new_v4().to_string();
        info!(load_id = %load_id, file = %file_name, rows = sheet.row_count(), "开始加载库存表");

        debug!("步骤 2: 表头解析");
        let column_map = match self.column_resolver.resolve(&sheet.headers) {
            Ok(map) => map,
            Err(e) => {
                warn!(load_id = %load_id, headers = ?sheet.headers, error = %e, "表头解析失败");
                return Err(e);
            }
        };
        info!(resolved = column_map.len(), "表头解析完成");

        debug!("步骤 3: 行归一化");
        let records = self.row_normalizer.normalize(&sheet, &column_map);

        let info = MasterInfo {
            load_id: load_id.clone(),
            file_name: file_name.to_string(),
            total_rows: records.len(),
            loaded_at: Utc::now(),
        };

        info!(
            load_id = %load_id,
            rows = records.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "库存表加载完成"
        );

        Ok(StockTable::new(records, column_map, info))
    }
}
