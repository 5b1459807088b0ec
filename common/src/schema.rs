//! 表の列定義をレコードから推定する
//!
//! 先頭レコードのキー構成がデータセット全体のスキーマになる。
//! 2件目以降にしか存在しないキーは表示されない（既知の制約）。
//!
//! 列順はブラウザでのキー列挙と同じ: 整数キー（"0", "12" など）を昇順で先に並べ、
//! 残りは出現順。

use crate::types::{scalar_text, Record};
use serde::Serialize;

/// 感情ラベルとしてバッジ表示する列
pub const SENTIMENT_COLUMNS: &[&str] = &["PredictedSentiment", "Sentiment"];

/// 見出しの表記
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderStyle {
    /// アップロード結果の表: キーを大文字化
    Upper,
    /// ファイル詳細の表: キーをそのまま使う
    #[default]
    Raw,
}

/// 表の列
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub key: String,
    pub header: String,
}

impl Column {
    /// 感情ラベル列か
    pub fn is_sentiment(&self) -> bool {
        SENTIMENT_COLUMNS.contains(&self.key.as_str())
    }
}

/// レコード列から列定義を推定
///
/// 空の場合は空の列定義を返す（呼び出し側で「データなし」表示にする）。
pub fn infer_columns(records: &[Record], style: HeaderStyle) -> Vec<Column> {
    let Some(first) = records.first() else {
        return Vec::new();
    };

    let mut indexed: Vec<(u32, &String)> = first
        .keys()
        .filter_map(|key| array_index(key).map(|i| (i, key)))
        .collect();
    indexed.sort_by_key(|(i, _)| *i);

    let named = first.keys().filter(|key| array_index(key).is_none());

    indexed
        .into_iter()
        .map(|(_, key)| key)
        .chain(named)
        .map(|key| Column {
            key: key.clone(),
            header: match style {
                HeaderStyle::Upper => key.to_uppercase(),
                HeaderStyle::Raw => key.clone(),
            },
        })
        .collect()
}

/// 配列添字として扱われるキー（先頭ゼロなしの 0〜2^32-2）
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    key.parse::<u32>().ok().filter(|i| *i != u32::MAX)
}

/// セルの表示テキスト
///
/// フィールドが欠けている場合は `None`（空セルとして描画する）。
pub fn cell_text(record: &Record, column: &Column) -> Option<String> {
    record.get(&column.key).map(scalar_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_infer_columns_empty() {
        assert!(infer_columns(&[], HeaderStyle::Upper).is_empty());
    }

    #[test]
    fn test_infer_columns_follows_first_record_order() {
        let records = vec![
            record(json!({"ID": 1, "SurveyID": "7", "SurveyAnswer": "ok", "PredictedSentiment": "Neutral"})),
            record(json!({"ID": 2, "Extra": "never shown"})),
        ];

        let columns = infer_columns(&records, HeaderStyle::Raw);
        let keys: Vec<&str> = columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["ID", "SurveyID", "SurveyAnswer", "PredictedSentiment"]);
        assert_eq!(columns.len(), records[0].len());
        assert_eq!(columns[1].header, "SurveyID");
    }

    #[test]
    fn test_infer_columns_integer_keys_first() {
        let records = vec![record(json!({"Question": "Q1", "10": "b", "2": "a", "02": "c", "ID": 1}))];

        let keys: Vec<String> = infer_columns(&records, HeaderStyle::Raw)
            .into_iter()
            .map(|c| c.key)
            .collect();
        assert_eq!(keys, vec!["2", "10", "Question", "02", "ID"]);
    }

    #[test]
    fn test_infer_columns_upper_headers() {
        let records = vec![record(json!({"SurveyAnswer": "great", "Sentiment": "Positive"}))];

        let columns = infer_columns(&records, HeaderStyle::Upper);
        assert_eq!(columns[0].header, "SURVEYANSWER");
        assert_eq!(columns[0].key, "SurveyAnswer");
        assert_eq!(columns[1].header, "SENTIMENT");
    }

    #[test]
    fn test_cell_text_missing_field() {
        let records = vec![
            record(json!({"ID": 1, "Question": "Q1"})),
            record(json!({"ID": 2})),
        ];
        let columns = infer_columns(&records, HeaderStyle::Raw);

        assert_eq!(cell_text(&records[0], &columns[1]).as_deref(), Some("Q1"));
        assert_eq!(cell_text(&records[1], &columns[1]), None);
        assert_eq!(cell_text(&records[1], &columns[0]).as_deref(), Some("2"));
    }

    #[test]
    fn test_sentiment_columns() {
        let records = vec![record(json!({"ID": 1, "Sentiment": "Positive", "PredictedSentiment": "Neutral"}))];
        let columns = infer_columns(&records, HeaderStyle::Raw);

        assert!(!columns[0].is_sentiment());
        assert!(columns[1].is_sentiment());
        assert!(columns[2].is_sentiment());
    }
}
