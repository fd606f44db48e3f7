// ==========================================
// 备件查询工具 - 原始表格结构
// ==========================================
// 职责: 文件解析输出,保留 Excel 单元格的原始类型
// ==========================================

use std::fmt;

/// 原始单元格
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl RawCell {
    /// 由文本构造（去首尾空白; 空串视为 Empty）
    pub fn from_text(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            RawCell::Empty
        } else {
            RawCell::Text(trimmed.to_string())
        }
    }

    /// 去空白后为空
    pub fn is_blank(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for RawCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawCell::Empty => Ok(()),
            RawCell::Text(s) => f.write_str(s.trim()),
            RawCell::Int(i) => write!(f, "{}", i),
            // Excel 数字型型号（如 6410）按整数显示,不带 ".0"
            RawCell::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", *v as i64)
            }
            RawCell::Float(v) => write!(f, "{}", v),
            RawCell::Bool(true) => f.write_str("TRUE"),
            RawCell::Bool(false) => f.write_str("FALSE"),
        }
    }
}

static EMPTY_CELL: RawCell = RawCell::Empty;

/// 原始表格（单个工作表）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

impl RawSheet {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// 追加数据行（整行空白则跳过）
    pub fn push_row(&mut self, row: Vec<RawCell>) {
        if row.iter().all(RawCell::is_blank) {
            return;
        }
        self.rows.push(row);
    }

    /// 取单元格（行长度不足时视为 Empty）
    pub fn cell(&self, row: usize, col: usize) -> &RawCell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// 按可选列号取单元格（列未映射时视为 Empty）
    pub fn cell_at(&self, row: usize, col: Option<usize>) -> &RawCell {
        match col {
            Some(col) => self.cell(row, col),
            None => &EMPTY_CELL,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
