//! `--local` で指定したJSONの読み込み

use crate::error::{DashboardError, Result};
use std::path::Path;
use survey_insight_common::api::records_from_json;
use survey_insight_common::Record;

/// レコード配列・アップロード結果・ファイル詳細のいずれかのJSONを読む
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    if !path.is_file() {
        return Err(DashboardError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(records_from_json(&content)?)
}
