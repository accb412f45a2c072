//! CSV 匯出

use invperf_core::PerfError;
use serde::Serialize;
use std::io::Write;

/// 分析結果 CSV 匯出器
///
/// 標題列為欄位名稱，每個品項一列；含逗號或引號的欄位會依 CSV 規則加上引號。
pub struct CsvExporter;

impl CsvExporter {
    /// 匯出為字串
    pub fn to_csv<T: Serialize>(rows: &[T]) -> invperf_core::Result<String> {
        let mut buffer = Vec::new();
        Self::write_csv(&mut buffer, rows)?;
        String::from_utf8(buffer).map_err(|e| PerfError::Export(format!("UTF-8 轉換錯誤: {}", e)))
    }

    /// 寫入任意輸出
    pub fn write_csv<W: Write, T: Serialize>(writer: W, rows: &[T]) -> invperf_core::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in rows {
            wtr.serialize(row)
                .map_err(|e| PerfError::Export(format!("CSV 序列化錯誤: {}", e)))?;
        }
        wtr.flush()
            .map_err(|e| PerfError::Export(format!("CSV 寫入錯誤: {}", e)))?;

        tracing::debug!("CSV 匯出 {} 列", rows.len());
        Ok(())
    }
}
