// ==========================================
// 备件查询工具 - 单元格清洗与类型转换
// ==========================================
// 职责: TRIM / 空值默认 / 数值转换
// 约定: 所有转换均为全函数,解析失败返回零值,从不报错
// ==========================================

use crate::importer::raw_sheet::RawCell;

/// 文本转换: 任意单元格转字符串,空白时取默认值
pub fn clean_text(cell: &RawCell, default: &str) -> String {
    let text = cell.to_string();
    if text.is_empty() {
        default.to_string()
    } else {
        text
    }
}

/// 整数转换（stock / used_spares）
///
/// - 文本按十进制数解析后向零截断（"3.0" → 3, "7.9" → 7）
/// - 千分位逗号不被接受（"1,000" → 0）
/// - 空值、非数字、非有限值 → 0
/// - 负数 → 0（数量非负）
pub fn parse_int_or_zero(cell: &RawCell) -> i64 {
    let value = match cell {
        RawCell::Empty | RawCell::Bool(_) => return 0,
        RawCell::Int(i) => return (*i).max(0),
        RawCell::Float(f) => *f,
        RawCell::Text(s) => match s.trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => return 0,
        },
    };

    if !value.is_finite() {
        return 0;
    }
    // `as` 转换在越界时饱和
    (value.trunc() as i64).max(0)
}

/// 浮点数转换（price）
///
/// - 解析前去除千分位逗号（"1,234.50" → 1234.5）
/// - 空值、非数字、非有限值 → 0.0
/// - 负数 → 0.0
pub fn parse_float_or_zero(cell: &RawCell) -> f64 {
    let value = match cell {
        RawCell::Empty | RawCell::Bool(_) => return 0.0,
        RawCell::Int(i) => *i as f64,
        RawCell::Float(f) => *f,
        RawCell::Text(s) => match s.trim().replace(',', "").parse::<f64>() {
            Ok(v) => v,
            Err(_) => return 0.0,
        },
    };

    if !value.is_finite() || value < 0.0 {
        return 0.0;
    }
    value
}
