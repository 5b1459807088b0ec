//! バックエンドAPIの入出力型とURL組み立て
//!
//! 形式はバックエンド側と完全に一致させる（フィールド名・値の変更不可）。

use crate::error::{Error, Result};
use crate::sentiment::BadgeVariant;
use crate::types::{Record, WordFrequencyEntry};
use crate::wordcloud::SentimentFilter;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const STATUS_SUCCESS: &str = "success";

/// アップロード可能な拡張子
pub const UPLOAD_EXTENSIONS: &[&str] = &["csv", "xlsx"];

/// `POST /upload/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<Record>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzed_file: Option<String>,
}

impl UploadResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// 成功時のレコード（結果なしは空）
    pub fn into_records(self) -> Result<Vec<Record>> {
        if !self.is_success() {
            return Err(Error::BackendStatus(self.message));
        }
        Ok(self.results.unwrap_or_default())
    }
}

/// `GET /files/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileListResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub files: Vec<String>,
}

impl FileListResponse {
    pub fn into_files(self) -> Result<Vec<String>> {
        if self.status != STATUS_SUCCESS {
            return Err(Error::BackendStatus("Failed to fetch files".into()));
        }
        Ok(self.files)
    }
}

/// `GET /files/{filename}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileDataResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub data: Vec<Record>,
    #[serde(default)]
    pub total_records: u64,
    /// 感情ラベル → 件数（バックエンドの順序のまま）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predictions_summary: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FileDataResponse {
    pub fn ensure_success(self) -> Result<Self> {
        if self.status != STATUS_SUCCESS {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| "Failed to load file data".to_string());
            return Err(Error::BackendStatus(message));
        }
        Ok(self)
    }

    /// ヘッダ表示用の統計
    pub fn stats(&self, filename: &str) -> FileStats {
        FileStats {
            display_name: decode_filename(filename),
            total_records: self.total_records,
            predictions_summary: self
                .predictions_summary
                .as_ref()
                .map(|m| m.iter().map(|(k, v)| (k.clone(), v.as_u64().unwrap_or(0))).collect()),
        }
    }
}

/// `GET /files/{filename}/wordcloud`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordCloudResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub wordcloud_data: Option<Vec<WordFrequencyEntry>>,
    #[serde(default)]
    pub message: Option<String>,
}

impl WordCloudResponse {
    pub fn into_words(self) -> Result<Vec<WordFrequencyEntry>> {
        match (self.status.as_str(), self.wordcloud_data) {
            (STATUS_SUCCESS, Some(words)) => Ok(words),
            _ => Err(Error::BackendStatus(
                self.message
                    .unwrap_or_else(|| "Failed to load word cloud data".to_string()),
            )),
        }
    }
}

/// ファイルのヘッダ情報
#[derive(Debug, Clone, PartialEq)]
pub struct FileStats {
    pub display_name: String,
    pub total_records: u64,
    /// (感情ラベル, 件数)
    pub predictions_summary: Option<Vec<(String, u64)>>,
}

impl FileStats {
    /// 件数表示（0件なら非表示）
    pub fn total_line(&self) -> Option<String> {
        (self.total_records > 0).then(|| format!("Total records: {}", self.total_records))
    }

    /// 感情ラベルごとのバッジ
    pub fn badges(&self) -> Vec<(BadgeVariant, String)> {
        self.predictions_summary
            .iter()
            .flatten()
            .map(|(label, count)| (BadgeVariant::for_label(label), format!("{}: {}", label, count)))
            .collect()
    }
}

/// `--local` などで読み込んだJSONからレコードを取り出す
///
/// レコード配列、アップロード結果（`results`）、ファイル詳細（`data`）のいずれも受け付ける。
pub fn records_from_json(content: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(content)?;
    let records = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => map
            .remove("data")
            .or_else(|| map.remove("results"))
            .unwrap_or(Value::Array(Vec::new())),
        _ => Value::Array(Vec::new()),
    };
    Ok(serde_json::from_value(records)?)
}

/// ファイル名をURLパス用にエンコード
pub fn encode_filename(filename: &str) -> String {
    urlencoding::encode(filename).into_owned()
}

/// エンコード済みファイル名を表示用に戻す（不正な場合はそのまま）
pub fn decode_filename(filename: &str) -> String {
    urlencoding::decode(filename)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| filename.to_string())
}

/// アップロード対象として受け付ける拡張子か
pub fn is_uploadable(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| UPLOAD_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// エンドポイントURLの組み立て
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn upload(&self) -> String {
        format!("{}/upload/", self.base)
    }

    pub fn files(&self) -> String {
        format!("{}/files/", self.base)
    }

    pub fn file(&self, filename: &str) -> String {
        format!("{}/files/{}", self.base, encode_filename(filename))
    }

    pub fn summary(&self, filename: &str) -> String {
        format!("{}/summary", self.file(filename))
    }

    pub fn wordcloud(&self, filename: &str, filter: SentimentFilter) -> String {
        format!("{}/wordcloud?sentiment_filter={}", self.file(filename), filter.as_str())
    }
}
