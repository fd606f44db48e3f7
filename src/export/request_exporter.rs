// ==========================================
// 备件查询工具 - 申领清单导出
// ==========================================
// 列顺序: 库存记录字段顺序 + qty + line_total
// 格式: .xlsx（工作表 "Requests"）/ .csv
// ==========================================

use crate::domain::request::RequestLine;
use crate::domain::types::CanonicalField;
use crate::export::error::{ExportError, ExportResult};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// 默认下载文件名
pub const DEFAULT_EXPORT_FILE_NAME: &str = "requests.xlsx";

/// Excel 工作表名
pub const EXPORT_SHEET_NAME: &str = "Requests";

/// 导出列（表头）
pub fn export_columns() -> Vec<&'static str> {
    let mut columns: Vec<&'static str> = CanonicalField::ALL.iter().map(|f| f.key()).collect();
    columns.push("qty");
    columns.push("line_total");
    columns
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn from_path<P: AsRef<Path>>(path: P) -> ExportResult<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

pub struct RequestExporter;

impl RequestExporter {
    /// 导出为内存内容（供下载）
    pub fn to_bytes(&self, lines: &[RequestLine], format: ExportFormat) -> ExportResult<Vec<u8>> {
        match format {
            ExportFormat::Xlsx => self.to_xlsx(lines),
            ExportFormat::Csv => self.to_csv(lines),
        }
    }

    /// 导出到文件（按扩展名选择格式）
    pub fn write_to_path<P: AsRef<Path>>(&self, lines: &[RequestLine], path: P) -> ExportResult<()> {
        let path = path.as_ref();
        let format = ExportFormat::from_path(path)?;
        let bytes = self.to_bytes(lines, format)?;
        std::fs::write(path, bytes)?;

        info!(file = %path.display(), lines = lines.len(), "申领清单已导出");
        Ok(())
    }

    pub fn to_xlsx(&self, lines: &[RequestLine]) -> ExportResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(EXPORT_SHEET_NAME)?;

        write_header(worksheet)?;

        let money = Format::new().set_num_format("0.00");
        for (idx, line) in lines.iter().enumerate() {
            let row = (idx + 1) as u32;
            worksheet.write_string(row, 0, &line.model)?;
            worksheet.write_string(row, 1, &line.material_description)?;
            worksheet.write_string(row, 2, &line.shrm)?;
            worksheet.write_string(row, 3, &line.home)?;
            worksheet.write_number(row, 4, line.stock as f64)?;
            worksheet.write_number(row, 5, line.used_spares as f64)?;
            worksheet.write_number_with_format(row, 6, line.price, &money)?;
            worksheet.write_number(row, 7, f64::from(line.qty))?;
            worksheet.write_number_with_format(row, 8, line.line_total(), &money)?;
        }

        Ok(workbook.save_to_buffer()?)
    }

    pub fn to_csv(&self, lines: &[RequestLine]) -> ExportResult<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(export_columns())?;

        for line in lines {
            writer.write_record([
                line.model.clone(),
                line.material_description.clone(),
                line.shrm.clone(),
                line.home.clone(),
                line.stock.to_string(),
                line.used_spares.to_string(),
                format!("{:.2}", line.price),
                line.qty.to_string(),
                format!("{:.2}", line.line_total()),
            ])?;
        }

        writer
            .into_inner()
            .map_err(|e| ExportError::CsvWriteError(e.to_string()))
    }
}

fn write_header(ws: &mut Worksheet) -> ExportResult<()> {
    for (col, name) in export_columns().into_iter().enumerate() {
        ws.write_string(0, col as u16, name)?;
    }
    Ok(())
}
