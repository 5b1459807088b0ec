//! バックエンドAPIクライアント

use crate::error::{DashboardError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use survey_insight_common::api::{
    is_uploadable, Endpoints, FileDataResponse, FileListResponse, UploadResponse, WordCloudResponse,
};
use survey_insight_common::{SentimentFilter, SummaryRequest, SummaryResponse, WordFrequencyEntry};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: Client,
    endpoints: Endpoints,
}

/// 非2xxを `HttpStatus` にする
fn check_status(resp: Response, what: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let reason = status.canonical_reason().unwrap_or("Unknown error");
    Err(DashboardError::HttpStatus(format!("Failed to fetch {}: {}", what, reason)))
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}

impl DashboardClient {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(timeout_seconds.min(15)))
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            endpoints: Endpoints::new(base_url),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// CSV/Excelをアップロードして解析結果を受け取る
    ///
    /// エラーステータスでもJSONボディを読んでメッセージを返す。
    pub async fn upload(&self, path: &Path) -> Result<UploadResponse> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DashboardError::FileNotFound(path.display().to_string()))?
            .to_string();

        if !is_uploadable(&file_name) {
            return Err(DashboardError::UnsupportedFile(file_name));
        }
        if !path.is_file() {
            return Err(DashboardError::FileNotFound(path.display().to_string()));
        }

        let bytes = tokio::fs::read(path).await?;
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.clone()));

        info!("uploading {} to {}", file_name, self.endpoints.upload());
        let resp = self.http.post(self.endpoints.upload()).multipart(form).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        match serde_json::from_str::<UploadResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) if !status.is_success() => {
                debug!("upload error body is not JSON: {}", e);
                Err(DashboardError::HttpStatus(format!(
                    "Failed to upload file: {}",
                    status.canonical_reason().unwrap_or("Unknown error")
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 解析済みファイル一覧
    pub async fn list_files(&self) -> Result<Vec<String>> {
        info!("GET {}", self.endpoints.files());
        let resp = self.http.get(self.endpoints.files()).send().await?;
        let resp = check_status(resp, "files")?;
        let list: FileListResponse = read_json(resp).await?;
        Ok(list.into_files()?)
    }

    /// ファイルのレコードと統計
    pub async fn file_data(&self, filename: &str) -> Result<FileDataResponse> {
        let url = self.endpoints.file(filename);
        info!("GET {}", url);
        let resp = check_status(self.http.get(&url).send().await?, "file data")?;
        let data: FileDataResponse = read_json(resp).await?;
        Ok(data.ensure_success()?)
    }

    /// AI要約（正規化前のレスポンス）
    pub async fn summary(&self, filename: &str, request: &SummaryRequest) -> Result<SummaryResponse> {
        let url = self.endpoints.summary(filename);
        info!("POST {} (focus: {})", url, request.focus);
        let resp = check_status(self.http.post(&url).json(request).send().await?, "summary")?;
        read_json(resp).await
    }

    /// ワードクラウド用の単語頻度
    pub async fn wordcloud(&self, filename: &str, filter: SentimentFilter) -> Result<Vec<WordFrequencyEntry>> {
        let url = self.endpoints.wordcloud(filename, filter);
        info!("GET {}", url);
        let resp = check_status(self.http.get(&url).send().await?, "word cloud data")?;
        let cloud: WordCloudResponse = read_json(resp).await?;
        Ok(cloud.into_words()?)
    }
}
