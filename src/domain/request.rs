// ==========================================
// 备件查询工具 - 申领清单领域模型
// ==========================================
// 红线: 明细为加入时刻的库存快照,主库存变更不回写
// 红线: line_total / 合计值一律现算,不独立存储
// ==========================================

use crate::domain::stock::StockRecord;
use serde::{Deserialize, Serialize};

// ==========================================
// RequestLine - 申领明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestLine {
    pub model: String,
    pub material_description: String,
    pub shrm: String,
    pub home: String,
    pub stock: i64,
    pub used_spares: i64,
    pub price: f64,
    pub qty: u32, // 申领数量（>= 0,新增时为 1）
}

impl RequestLine {
    /// 从库存记录生成明细（qty = 1）
    pub fn from_record(record: &StockRecord) -> Self {
        Self {
            model: record.model.clone(),
            material_description: record.material_description.clone(),
            shrm: record.shrm.clone(),
            home: record.home.clone(),
            stock: record.stock,
            used_spares: record.used_spares,
            price: record.price,
            qty: 1,
        }
    }

    /// 行金额 = price × qty
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.qty)
    }
}

// ==========================================
// RequestTotals - 清单合计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestTotals {
    pub total_items: usize, // 明细行数
    pub total_qty: u64,     // 数量合计
    pub total_amount: f64,  // 金额合计
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record_snapshot() {
        let record = StockRecord {
            model: "M100".to_string(),
            material_description: "Blade".to_string(),
            stock: 3,
            price: 12.5,
            ..StockRecord::default()
        };

        let line = RequestLine::from_record(&record);
        assert_eq!(line.model, "M100");
        assert_eq!(line.qty, 1);
        assert_eq!(line.line_total(), 12.5);
    }

    #[test]
    fn test_line_total_zero_qty() {
        let mut line = RequestLine::from_record(&StockRecord {
            price: 7.0,
            ..StockRecord::default()
        });
        line.qty = 0;
        assert_eq!(line.line_total(), 0.0);
    }
}
