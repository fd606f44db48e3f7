// ==========================================
// 备件查询工具 - 库存领域模型
// ==========================================
// 用途: 导入层写入,查询引擎只读
// 红线: 加载后不可变; 不强制唯一键,重复行均视为独立候选
// ==========================================

use crate::domain::types::CanonicalField;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 展厅/仓库字段缺失时的默认值
pub const NOT_AVAILABLE: &str = "N-A";

// ==========================================
// StockRecord - 库存记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub model: String,                // 型号
    pub material_description: String, // 物料描述
    pub shrm: String,                 // 展厅（默认 "N-A"）
    pub home: String,                 // 仓库（默认 "N-A"）
    pub stock: i64,                   // 库存数（非负,默认 0）
    pub used_spares: i64,             // 已用备件（非负,默认 0）
    pub price: f64,                   // 单价（非负,默认 0.0）
}

impl StockRecord {
    /// 可用数量 = stock - used_spares
    ///
    /// 派生值,不落库; 可能为负,不做截断
    pub fn available_quantity(&self) -> i64 {
        self.stock - self.used_spares
    }

    /// 联想项文本: "型号 - 描述"
    pub fn suggestion_label(&self) -> String {
        format!("{} - {}", self.model, self.material_description)
    }
}

impl Default for StockRecord {
    fn default() -> Self {
        Self {
            model: String::new(),
            material_description: String::new(),
            shrm: NOT_AVAILABLE.to_string(),
            home: NOT_AVAILABLE.to_string(),
            stock: 0,
            used_spares: 0,
            price: 0.0,
        }
    }
}

// ==========================================
// ColumnMap - 标准字段 → 源列
// ==========================================
/// 源表中已解析的列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedColumn {
    pub header: String, // 源表头原文
    pub index: usize,   // 列序号（0 起）
}

/// 每次加载文件时构建一次
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    columns: BTreeMap<CanonicalField, ResolvedColumn>,
}

impl ColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: CanonicalField, column: ResolvedColumn) {
        self.columns.insert(field, column);
    }

    pub fn get(&self, field: CanonicalField) -> Option<&ResolvedColumn> {
        self.columns.get(&field)
    }

    pub fn contains(&self, field: CanonicalField) -> bool {
        self.columns.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// 按字段顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&CanonicalField, &ResolvedColumn)> {
        self.columns.iter()
    }
}

// ==========================================
// MasterInfo - 主库存文件元信息
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterInfo {
    pub load_id: String,          // 加载批次 ID
    pub file_name: String,        // 文件名
    pub total_rows: usize,        // 数据行数
    pub loaded_at: DateTime<Utc>, // 加载时间
}

// ==========================================
// StockTable - 内存库存表
// ==========================================
#[derive(Debug, Clone)]
pub struct StockTable {
    records: Vec<StockRecord>,
    column_map: ColumnMap,
    info: MasterInfo,
}

impl StockTable {
    pub fn new(records: Vec<StockRecord>, column_map: ColumnMap, info: MasterInfo) -> Self {
        Self {
            records,
            column_map,
            info,
        }
    }

    pub fn records(&self) -> &[StockRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&StockRecord> {
        self.records.get(index)
    }

    pub fn column_map(&self) -> &ColumnMap {
        &self.column_map
    }

    pub fn info(&self) -> &MasterInfo {
        &self.info
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
