//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `status: "error"` など、正しい形式で失敗が返ってきた場合
    #[error("Backend error: {0}")]
    BackendStatus(String),

    /// テキスト埋め込みの要約データが解釈できない場合
    #[error("Failed to parse summary data: {0}")]
    SummaryParse(String),

    #[cfg(feature = "excel")]
    #[error("Excel error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
