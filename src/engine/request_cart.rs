// ==========================================
// 备件查询工具 - 申领清单
// ==========================================
// 职责: 有序明细集合,支持新增/改数量/删除/清空/合计
// 红线: 卡片视图与表格视图共用同一组变更接口
// ==========================================

use crate::domain::request::{RequestLine, RequestTotals};
use crate::domain::stock::StockRecord;
use crate::engine::error::CartError;
use crate::importer::data_cleaner::parse_int_or_zero;
use crate::importer::raw_sheet::RawCell;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestCart {
    lines: Vec<RequestLine>,
}

impl RequestCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加明细（qty = 1,字段按当前记录快照复制）
    pub fn add(&mut self, record: &StockRecord) -> &RequestLine {
        self.lines.push(RequestLine::from_record(record));
        debug!(model = %record.model, lines = self.lines.len(), "加入申领清单");
        &self.lines[self.lines.len() - 1]
    }

    /// 修改数量: 负数截断为 0,不报错
    pub fn set_quantity(&mut self, line_index: usize, qty: i64) -> Result<&RequestLine, CartError> {
        let len = self.lines.len();
        let line = self
            .lines
            .get_mut(line_index)
            .ok_or(CartError::LineOutOfRange {
                index: line_index,
                len,
            })?;

        line.qty = u32::try_from(qty.max(0)).unwrap_or(u32::MAX);
        debug!(line = line_index, qty = line.qty, "修改申领数量");
        Ok(line)
    }

    /// 按用户输入修改数量: 空白/非数字按 0 处理
    pub fn set_quantity_from_input(
        &mut self,
        line_index: usize,
        input: &str,
    ) -> Result<&RequestLine, CartError> {
        let qty = parse_int_or_zero(&RawCell::from_text(input));
        self.set_quantity(line_index, qty)
    }

    /// 删除明细
    pub fn remove(&mut self, line_index: usize) -> Result<RequestLine, CartError> {
        if line_index >= self.lines.len() {
            return Err(CartError::LineOutOfRange {
                index: line_index,
                len: self.lines.len(),
            });
        }
        Ok(self.lines.remove(line_index))
    }

    /// 清空（无需确认）
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// 合计（每次现算）
    pub fn totals(&self) -> RequestTotals {
        RequestTotals {
            total_items: self.lines.len(),
            total_qty: self.lines.iter().map(|l| u64::from(l.qty)).sum(),
            total_amount: self.lines.iter().map(RequestLine::line_total).sum(),
        }
    }

    pub fn lines(&self) -> &[RequestLine] {
        &self.lines
    }

    pub fn get(&self, line_index: usize) -> Option<&RequestLine> {
        self.lines.get(line_index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
