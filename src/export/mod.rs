pub mod excel;

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use survey_insight_common::api::decode_filename;

pub use excel::export_dashboard;

/// `<stem>_<YYYYmmddHHMMSS>_dashboard.xlsx`
pub fn default_file_name(filename: &str, now: DateTime<Local>) -> String {
    let display = decode_filename(filename);
    let stem = Path::new(&display)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("survey");
    format!("{}_{}_dashboard.xlsx", stem, now.format("%Y%m%d%H%M%S"))
}

/// 出力先がディレクトリ（または拡張子なし）ならその中に既定名で作る
pub fn output_path(output: Option<&Path>, filename: &str, now: DateTime<Local>) -> PathBuf {
    let default_name = default_file_name(filename, now);
    match output {
        None => PathBuf::from(default_name),
        Some(path) if path.is_dir() || path.extension().is_none() => path.join(default_name),
        Some(path) => path.to_path_buf(),
    }
}
