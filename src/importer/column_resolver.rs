// ==========================================
// 备件查询工具 - 表头解析器
// ==========================================
// 职责: 任意表头 → 标准字段映射（ColumnMap）
// 规则: 表头归一化后与别名逐个比对,先命中者胜出
// ==========================================

use crate::domain::stock::{ColumnMap, ResolvedColumn};
use crate::domain::types::CanonicalField;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashMap;
use tracing::debug;

/// 表头归一化: 小写 + 去首尾空白 + 仅保留 [a-z0-9]
///
/// "Part No." / "PartNumber" / "part_number" 归一化结果相同
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

pub struct ColumnResolver;

impl ColumnResolver {
    /// 构建 ColumnMap
    ///
    /// # 返回
    /// - Ok(ColumnMap): 可选字段未命中时不出现在映射中
    /// - Err(MissingRequiredColumns): model 或 material_description 无法解析
    pub fn resolve<S: AsRef<str>>(&self, headers: &[S]) -> ImportResult<ColumnMap> {
        // 归一化表头 → 源列；同名归一化时后出现的列覆盖先出现的列
        let mut normalized: HashMap<String, ResolvedColumn> = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            let header = header.as_ref();
            normalized.insert(
                normalize_header(header),
                ResolvedColumn {
                    header: header.to_string(),
                    index,
                },
            );
        }

        let mut column_map = ColumnMap::new();
        for field in CanonicalField::ALL {
            let hit = field
                .aliases()
                .iter()
                .find_map(|alias| normalized.get(&normalize_header(alias)));

            if let Some(column) = hit {
                debug!(field = %field, header = %column.header, index = column.index, "表头命中");
                column_map.insert(field, column.clone());
            }
        }

        let missing: Vec<CanonicalField> = CanonicalField::REQUIRED
            .into_iter()
            .filter(|field| !column_map.contains(*field))
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingRequiredColumns { missing });
        }

        Ok(column_map)
    }
}
