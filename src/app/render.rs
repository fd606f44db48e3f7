// ==========================================
// 备件查询工具 - 文本渲染
// ==========================================
// 两种布局: compact（卡片）/ table（表格）
// 只负责展示; 清单修改统一走 StockSession
// ==========================================

use crate::domain::request::{RequestLine, RequestTotals};
use crate::domain::stock::StockRecord;
use crate::domain::types::ViewMode;
use crate::i18n::{t, t_with_args};

/// 金额统一保留两位小数
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// 渲染库存记录（带 0 起序号）
pub fn render_records(records: &[StockRecord], mode: ViewMode) -> String {
    match mode {
        ViewMode::Compact => records
            .iter()
            .enumerate()
            .map(|(idx, r)| {
                format!(
                    "[{}] {}\n    {} {} | {} {} | {} {} | {} {} | {} {}",
                    idx,
                    r.suggestion_label(),
                    t("field.shrm"),
                    r.shrm,
                    t("field.home"),
                    r.home,
                    t("field.stock"),
                    r.stock,
                    t("field.used_spares"),
                    r.used_spares,
                    t("field.price"),
                    format_amount(r.price),
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        ViewMode::Table => {
            let headers = [
                "field.index",
                "field.model",
                "field.material_description",
                "field.shrm",
                "field.home",
                "field.stock",
                "field.used_spares",
                "field.price",
            ];
            let rows = records
                .iter()
                .enumerate()
                .map(|(idx, r)| {
                    vec![
                        idx.to_string(),
                        r.model.clone(),
                        r.material_description.clone(),
                        r.shrm.clone(),
                        r.home.clone(),
                        r.stock.to_string(),
                        r.used_spares.to_string(),
                        format_amount(r.price),
                    ]
                })
                .collect::<Vec<_>>();
            render_table(&headers, &rows)
        }
    }
}

/// 渲染申领清单
pub fn render_lines(lines: &[RequestLine], mode: ViewMode) -> String {
    if lines.is_empty() {
        return t("cart.empty");
    }

    match mode {
        ViewMode::Compact => lines
            .iter()
            .enumerate()
            .map(|(idx, l)| {
                format!(
                    "[{}] {} - {}\n    {} {} x {} = {}",
                    idx,
                    l.model,
                    l.material_description,
                    t("field.qty"),
                    l.qty,
                    format_amount(l.price),
                    format_amount(l.line_total()),
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        ViewMode::Table => {
            let headers = [
                "field.index",
                "field.model",
                "field.material_description",
                "field.shrm",
                "field.home",
                "field.price",
                "field.qty",
                "field.line_total",
            ];
            let rows = lines
                .iter()
                .enumerate()
                .map(|(idx, l)| {
                    vec![
                        idx.to_string(),
                        l.model.clone(),
                        l.material_description.clone(),
                        l.shrm.clone(),
                        l.home.clone(),
                        format_amount(l.price),
                        l.qty.to_string(),
                        format_amount(l.line_total()),
                    ]
                })
                .collect::<Vec<_>>();
            render_table(&headers, &rows)
        }
    }
}

pub fn render_totals(totals: &RequestTotals) -> String {
    t_with_args(
        "cart.totals",
        &[
            ("items", &totals.total_items.to_string()),
            ("qty", &totals.total_qty.to_string()),
            ("amount", &format_amount(totals.total_amount)),
        ],
    )
}

/// 左对齐表格（列宽按字符数计算）
fn render_table(header_keys: &[&str], rows: &[Vec<String>]) -> String {
    let headers: Vec<String> = header_keys.iter().map(|k| t(k)).collect();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (col, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(col) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let separator = widths
        .iter()
        .map(|&w| "-".repeat(w))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut out = vec![format_row(&headers), separator];
    out.extend(rows.iter().map(|row| format_row(row)));
    out.join("\n")
}
