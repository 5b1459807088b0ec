//! ダッシュボードで扱うデータ型
//!
//! - Record: スキーマを持たないアンケート回答1行
//! - WordFrequencyEntry: ワードクラウド用の単語頻度（サーバ側で集計済み）
//! - SummaryData: AI要約の正規化済み形式

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// アンケート回答1行
///
/// フィールド構成はデータセットごとに異なるため固定の構造体にはしない。
/// `preserve_order` によりキー順はアップロード元の列順を保つ。
/// 同一データセットの全レコードは先頭レコードと同じキー構成である前提。
pub type Record = serde_json::Map<String, Value>;

/// 数値を表示用テキストに変換
///
/// 整数値は小数部なしで出力する（`3.0` → `"3"`）。
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// スカラー値を表示用テキストに変換
///
/// `null` は空文字列、配列・オブジェクトはJSON文字列として扱う。
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().map(format_number).unwrap_or_default()
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// ワードクラウド用の単語頻度
///
/// `text` の一意性は保証されない。重複はそれぞれ別の単語として配置する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordFrequencyEntry {
    pub text: String,
    pub value: f64,
}

/// AI要約（正規化済み）
///
/// 配列フィールドは欠落・`null` のいずれも空として扱う。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub key_themes: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub main_issues: Vec<MainIssue>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub actionable_insights: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub positive_highlights: Vec<String>,
}

/// 主要な課題
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainIssue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub issue: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub sentiment: String,

    /// "high" / "medium" / "low"（数値で返る場合もある）
    #[serde(default, deserialize_with = "text_or_number")]
    pub frequency: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub quotes: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(scalar_text).unwrap_or_default())
}
