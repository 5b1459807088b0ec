//! アンケートごとの感情集計
//!
//! `SurveyID` で絞り込んだレコードの `PredictedSentiment` を5区分で数える。
//! 5区分のいずれにも完全一致しないラベルは集計から除外する（「その他」区分は作らない）。

use crate::types::{scalar_text, Record};
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use tracing::debug;

pub const SURVEY_ID_FIELD: &str = "SurveyID";
pub const PREDICTED_SENTIMENT_FIELD: &str = "PredictedSentiment";
pub const SENTIMENT_FIELD: &str = "Sentiment";

/// 感情区分（表示順固定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentimentBucket {
    VeryNegative,
    Negative,
    Neutral,
    Positive,
    VeryPositive,
}

impl SentimentBucket {
    pub const ALL: [SentimentBucket; 5] = [
        SentimentBucket::VeryNegative,
        SentimentBucket::Negative,
        SentimentBucket::Neutral,
        SentimentBucket::Positive,
        SentimentBucket::VeryPositive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SentimentBucket::VeryNegative => "Very Negative",
            SentimentBucket::Negative => "Negative",
            SentimentBucket::Neutral => "Neutral",
            SentimentBucket::Positive => "Positive",
            SentimentBucket::VeryPositive => "Very Positive",
        }
    }

    /// 大文字小文字を区別した完全一致
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }

    /// 棒グラフの色（0xRRGGBB）
    pub fn color(&self) -> u32 {
        match self {
            SentimentBucket::VeryNegative => 0xEF4444,
            SentimentBucket::Negative => 0xF87171,
            SentimentBucket::Neutral => 0x9CA3AF,
            SentimentBucket::Positive => 0x22C55E,
            SentimentBucket::VeryPositive => 0x16A34A,
        }
    }

    /// "#rrggbb" 形式
    pub fn color_hex(&self) -> String {
        format!("#{:06x}", self.color())
    }

    fn index(&self) -> usize {
        match self {
            SentimentBucket::VeryNegative => 0,
            SentimentBucket::Negative => 1,
            SentimentBucket::Neutral => 2,
            SentimentBucket::Positive => 3,
            SentimentBucket::VeryPositive => 4,
        }
    }
}

impl std::fmt::Display for SentimentBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SentimentBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// バッジの表示種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Default,
    Destructive,
    Outline,
    Secondary,
}

impl BadgeVariant {
    /// 感情ラベルからバッジ種別を決める（未知のラベルは Default）
    pub fn for_label(label: &str) -> Self {
        match SentimentBucket::from_label(label) {
            Some(SentimentBucket::VeryNegative | SentimentBucket::Negative) => BadgeVariant::Destructive,
            Some(SentimentBucket::Neutral) => BadgeVariant::Secondary,
            Some(SentimentBucket::Positive | SentimentBucket::VeryPositive) => BadgeVariant::Outline,
            None => BadgeVariant::Default,
        }
    }
}

/// グラフ1本分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartSeriesPoint {
    pub name: SentimentBucket,
    pub value: u64,
}

/// レコードのSurveyIDを文字列として取得
fn survey_id_of(record: &Record) -> Option<String> {
    match record.get(SURVEY_ID_FIELD) {
        None | Some(serde_json::Value::Null) => None,
        Some(value) => Some(scalar_text(value)),
    }
}

/// 指定アンケートの感情分布を集計
///
/// 常に5区分を固定順で返す（0件の区分も含む）。
pub fn aggregate(records: &[Record], survey_id: &str) -> [ChartSeriesPoint; 5] {
    SentimentChart::build(records, survey_id).series
}

/// データセット中のSurveyID（初出順、重複除去）
pub fn survey_ids(records: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(survey_id_of)
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// 1アンケート分の集計結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentimentChart {
    pub survey_id: String,
    pub series: [ChartSeriesPoint; 5],
    /// SurveyIDが一致したレコード数
    pub matched_records: usize,
    /// 一致したが感情ラベルが5区分外だったレコード数
    pub unrecognized: usize,
}

impl SentimentChart {
    pub fn build(records: &[Record], survey_id: &str) -> Self {
        let mut counts = [0u64; 5];
        let mut matched_records = 0;
        let mut unrecognized = 0;

        for record in records {
            if survey_id_of(record).as_deref() != Some(survey_id) {
                continue;
            }
            matched_records += 1;

            let bucket = record
                .get(PREDICTED_SENTIMENT_FIELD)
                .map(scalar_text)
                .and_then(|label| SentimentBucket::from_label(&label));

            match bucket {
                Some(b) => counts[b.index()] += 1,
                None => unrecognized += 1,
            }
        }

        if unrecognized > 0 {
            debug!(
                "survey {}: {} records with unrecognized sentiment label excluded",
                survey_id, unrecognized
            );
        }

        let series = SentimentBucket::ALL.map(|name| ChartSeriesPoint {
            name,
            value: counts[name.index()],
        });

        Self {
            survey_id: survey_id.to_string(),
            series,
            matched_records,
            unrecognized,
        }
    }

    /// 集計対象になったレコード数
    pub fn total(&self) -> u64 {
        self.series.iter().map(|p| p.value).sum()
    }

    pub fn max_value(&self) -> u64 {
        self.series.iter().map(|p| p.value).max().unwrap_or(0)
    }
}

/// アンケートIDの入力と選択状態
///
/// 入力欄の値と、確定済みの選択を別々に持つ。
#[derive(Debug, Clone, Default)]
pub struct SurveySelection {
    input: String,
    selected: Option<String>,
}

impl SurveySelection {
    /// まだ何も選ばれていなければ先頭のIDを既定値にする
    pub fn sync(&mut self, ids: &[String]) {
        if self.selected.is_none() && self.input.is_empty() {
            if let Some(first) = ids.first() {
                self.input = first.clone();
                self.selected = Some(first.clone());
            }
        }
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// 入力値で確定する
    pub fn submit(&mut self) {
        self.selected = Some(self.input.clone());
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}
