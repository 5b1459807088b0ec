use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("Please upload a CSV or Excel file: {0}")]
    UnsupportedFile(String),

    #[error("通信エラー: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    HttpStatus(String),

    #[error(transparent)]
    Core(#[from] survey_insight_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel出力エラー: {0}")]
    Export(String),

    #[error("入力エラー: {0}")]
    Interactive(String),
}

impl From<dialoguer::Error> for DashboardError {
    fn from(e: dialoguer::Error) -> Self {
        DashboardError::Interactive(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
