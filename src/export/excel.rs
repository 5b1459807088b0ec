//! Excel出力（CLI版）

use crate::error::{DashboardError, Result};
use std::path::Path;
use survey_insight_common::export::excel_core::generate_dashboard_buffer;
use survey_insight_common::Record;
use tracing::info;

/// レコードと感情集計をExcelに書き出す
pub fn export_dashboard(records: &[Record], selected_survey: Option<&str>, output_path: &Path) -> Result<()> {
    let buffer = generate_dashboard_buffer(records, selected_survey)
        .map_err(|e| DashboardError::Export(e.to_string()))?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, &buffer)?;

    info!("wrote {} bytes to {}", buffer.len(), output_path.display());
    Ok(())
}
