//! AI要約の正規化
//!
//! 要約APIは構造化データをそのまま返す場合と、`raw_response` にテキストで
//! 埋め込んで返す場合がある。どちらで届いても `SummaryData` 1種類に揃える。

use crate::error::{Error, Result};
use crate::generation::{Generation, Resolution, ViewState};
use crate::parser::parse_embedded_summary;
use crate::types::SummaryData;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// 1回の要約で取り上げる課題数の上限
pub const MAX_ISSUES: u32 = 5;

const SUMMARY_FALLBACK_MESSAGE: &str = "Failed to load summary";

/// 要約の対象範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFocus {
    #[default]
    All,
    Negative,
    Positive,
    Neutral,
}

impl SummaryFocus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryFocus::All => "all",
            SummaryFocus::Negative => "negative",
            SummaryFocus::Positive => "positive",
            SummaryFocus::Neutral => "neutral",
        }
    }
}

impl std::str::FromStr for SummaryFocus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(SummaryFocus::All),
            "negative" => Ok(SummaryFocus::Negative),
            "positive" => Ok(SummaryFocus::Positive),
            "neutral" => Ok(SummaryFocus::Neutral),
            _ => Err(format!("Unknown focus: {}. Use all, negative, positive, or neutral", s)),
        }
    }
}

impl std::fmt::Display for SummaryFocus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `POST /files/{filename}/summary` のリクエスト本文
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub focus: SummaryFocus,
    pub max_issues: u32,
}

impl SummaryRequest {
    pub fn new(focus: SummaryFocus) -> Self {
        Self { focus, max_issues: MAX_ISSUES }
    }
}

/// `POST /files/{filename}/summary` のレスポンス（受信したまま）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub analysis: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `analysis` の形
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisPayload {
    /// 構造化済み
    Structured(SummaryData),
    /// `raw_response` にテキストとして埋め込まれている
    Embedded(String),
}

impl AnalysisPayload {
    /// `analysis` の形を判定する
    ///
    /// - `key_themes` を持つ → 構造化データ
    /// - `raw_response` 文字列を持つ → テキスト埋め込み
    /// - それ以外のオブジェクト → 構造化データとして読む（欠けた項目は空）
    pub fn classify(analysis: Value) -> Result<Self> {
        let Value::Object(map) = analysis else {
            return Err(Error::SummaryParse("analysis is not an object".into()));
        };

        if !map.contains_key("key_themes") {
            if let Some(Value::String(raw)) = map.get("raw_response") {
                return Ok(AnalysisPayload::Embedded(raw.clone()));
            }
        }

        serde_json::from_value(Value::Object(map))
            .map(AnalysisPayload::Structured)
            .map_err(|e| Error::SummaryParse(e.to_string()))
    }

    pub fn into_summary(self) -> Result<SummaryData> {
        match self {
            AnalysisPayload::Structured(data) => Ok(data),
            AnalysisPayload::Embedded(raw) => parse_embedded_summary(&raw),
        }
    }
}

/// 要約レスポンスを正規化する
///
/// # Returns
/// * `Ok(SummaryData)` - 構造化・テキスト埋め込みのどちらでも同じ形で返す
/// * `Err(Error::BackendStatus)` - `status` が `"success"` 以外
/// * `Err(Error::SummaryParse)` - `analysis` が欠落、または埋め込みテキストが解釈できない
pub fn normalize_summary(response: SummaryResponse) -> Result<SummaryData> {
    if response.status != "success" {
        let message = response
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| SUMMARY_FALLBACK_MESSAGE.to_string());
        warn!("summary request failed: {}", message);
        return Err(Error::BackendStatus(message));
    }

    let analysis = response
        .analysis
        .ok_or_else(|| Error::SummaryParse("analysis is missing".into()))?;

    AnalysisPayload::classify(analysis)?.into_summary()
}

/// 要約表示のタブ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryTab {
    #[default]
    MainIssues,
    KeyThemes,
    ActionableInsights,
    PositiveHighlights,
}

impl SummaryTab {
    pub fn title(&self) -> &'static str {
        match self {
            SummaryTab::MainIssues => "Main Issues",
            SummaryTab::KeyThemes => "Key Themes",
            SummaryTab::ActionableInsights => "Actionable Insights",
            SummaryTab::PositiveHighlights => "Positive Highlights",
        }
    }
}

impl SummaryData {
    /// 表示するタブ（良い点タブは項目がある場合のみ）
    pub fn tabs(&self) -> Vec<SummaryTab> {
        let mut tabs = vec![
            SummaryTab::MainIssues,
            SummaryTab::KeyThemes,
            SummaryTab::ActionableInsights,
        ];
        if !self.positive_highlights.is_empty() {
            tabs.push(SummaryTab::PositiveHighlights);
        }
        tabs
    }
}

/// 要約ビューの状態
///
/// 対象範囲を変えても再取得はしない。`regenerate` で明示的にリクエストを発行する。
/// 取得・解析に失敗しても直前の要約は保持する（`reset` でのみ破棄）。
#[derive(Debug, Clone, Default)]
pub struct SummaryPanel {
    focus: SummaryFocus,
    view: ViewState<SummaryData>,
}

impl SummaryPanel {
    pub fn focus(&self) -> SummaryFocus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: SummaryFocus) {
        self.focus = focus;
    }

    /// 要約の再生成を開始し、送信するリクエストを返す
    pub fn regenerate(&mut self) -> (Generation, SummaryRequest) {
        (self.view.begin(), SummaryRequest::new(self.focus))
    }

    /// レスポンスを反映する（古い世代のレスポンスは破棄）
    pub fn receive(&mut self, generation: Generation, response: Result<SummaryResponse>) -> Resolution {
        let result = response.and_then(normalize_summary);
        self.view.resolve(generation, result)
    }

    /// 通信失敗などレスポンスを得られなかった場合
    pub fn fail(&mut self, generation: Generation, error: impl std::fmt::Display) -> Resolution {
        self.view.resolve(generation, Err::<SummaryData, _>(error))
    }

    pub fn summary(&self) -> Option<&SummaryData> {
        self.view.data()
    }

    pub fn error(&self) -> Option<&str> {
        self.view.error()
    }

    pub fn is_loading(&self) -> bool {
        self.view.is_loading()
    }

    /// 要約を破棄し、生成中のリクエストも無効にする
    pub fn reset(&mut self) {
        self.view.reset();
    }
}
