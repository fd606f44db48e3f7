// ==========================================
// 备件查询工具 - 行归一化
// ==========================================
// 职责: 原始行 + ColumnMap → StockRecord
// 规则: 缺失的可选列对每一行统一取默认值; 单元格转换静默降级
// ==========================================

use crate::domain::stock::{ColumnMap, StockRecord, NOT_AVAILABLE};
use crate::domain::types::CanonicalField;
use crate::importer::data_cleaner::{clean_text, parse_float_or_zero, parse_int_or_zero};
use crate::importer::raw_sheet::RawSheet;

pub struct RowNormalizer;

impl RowNormalizer {
    /// 归一化整张表
    pub fn normalize(&self, sheet: &RawSheet, column_map: &ColumnMap) -> Vec<StockRecord> {
        (0..sheet.row_count())
            .map(|row| self.normalize_row(sheet, row, column_map))
            .collect()
    }

    /// 归一化单行
    pub fn normalize_row(&self, sheet: &RawSheet, row: usize, column_map: &ColumnMap) -> StockRecord {
        let cell = move |field: CanonicalField| {
            sheet.cell_at(row, column_map.get(field).map(|column| column.index))
        };

        StockRecord {
            model: clean_text(cell(CanonicalField::Model), ""),
            material_description: clean_text(cell(CanonicalField::MaterialDescription), ""),
            shrm: clean_text(cell(CanonicalField::Shrm), NOT_AVAILABLE),
            home: clean_text(cell(CanonicalField::Home), NOT_AVAILABLE),
            stock: parse_int_or_zero(cell(CanonicalField::Stock)),
            used_spares: parse_int_or_zero(cell(CanonicalField::UsedSpares)),
            price: parse_float_or_zero(cell(CanonicalField::Price)),
        }
    }
}
