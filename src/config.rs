use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use survey_insight_common::DEFAULT_PAGE_SIZE;

pub const API_URL_ENV: &str = "SURVEY_INSIGHT_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub page_size: usize,
    pub timeout_seconds: u64,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.into(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_seconds: 30,
            canvas_width: 800.0,
            canvas_height: 320.0,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DashboardError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("survey-insight").join("config.json"))
    }

    /// バックエンドのURL
    ///
    /// 優先順: 引数 > 環境変数 > 設定ファイル
    pub fn api_base_url(&self, override_url: Option<&str>) -> String {
        if let Some(url) = override_url.filter(|u| !u.trim().is_empty()) {
            return url.trim().to_string();
        }
        // 環境変数を優先
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                return url.trim().to_string();
            }
        }
        self.api_base_url.clone()
    }

    pub fn set_api_url(&mut self, url: &str) -> Result<()> {
        self.api_base_url = validate_api_url(url)?;
        self.save()
    }
}

/// URLの形式チェック（末尾の `/` は除去）
pub fn validate_api_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(DashboardError::Config(format!(
            "URLは http:// または https:// で始めてください: {}",
            url
        )));
    }
    Ok(url.to_string())
}
