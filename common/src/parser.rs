//! AI要約レスポンスパーサー
//!
//! 要約モデルが構造化データではなくテキストを返した場合に、
//! ```json ... ``` で囲まれた本文を取り出してパースする

use crate::error::{Error, Result};
use crate::types::SummaryData;
use regex::Regex;

lazy_static::lazy_static! {
    // 先頭のフェンス（言語タグ任意）
    static ref LEADING_FENCE: Regex = Regex::new(r"\A\s*```[A-Za-z0-9_-]*[ \t]*\r?\n?").unwrap();
    // 末尾のフェンス
    static ref TRAILING_FENCE: Regex = Regex::new(r"\r?\n?[ \t]*```\s*\z").unwrap();
}

/// 先頭と末尾のコードフェンスを取り除く
///
/// フェンスがなければ前後の空白を除いた文字列をそのまま返す。
///
/// # Examples
/// ```
/// use survey_insight_common::strip_code_fence;
///
/// let raw = "```json\n{\"summary\": \"s\"}\n```";
/// assert_eq!(strip_code_fence(raw), "{\"summary\": \"s\"}");
/// ```
pub fn strip_code_fence(raw: &str) -> &str {
    let start = LEADING_FENCE.find(raw).map(|m| m.end()).unwrap_or(0);
    let body = &raw[start..];
    let end = TRAILING_FENCE.find(body).map(|m| m.start()).unwrap_or(body.len());
    body[..end].trim()
}

/// テキスト埋め込みの要約をパース
///
/// # Arguments
/// * `raw_response` - 要約モデルの生テキスト
///
/// # Returns
/// * `Ok(SummaryData)` - パース成功
/// * `Err(Error::SummaryParse)` - JSONとして解釈できない場合（部分的な結果は返さない）
pub fn parse_embedded_summary(raw_response: &str) -> Result<SummaryData> {
    let json_str = strip_code_fence(raw_response);
    serde_json::from_str(json_str).map_err(|e| Error::SummaryParse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // strip_code_fence テスト
    // =============================================

    #[test]
    fn test_strip_code_fence_json_block() {
        let raw = "```json\n{\"summary\":\"s\",\"key_themes\":[]}\n```";
        assert_eq!(strip_code_fence(raw), r#"{"summary":"s","key_themes":[]}"#);
    }

    #[test]
    fn test_strip_code_fence_plain_block() {
        let raw = "```\n[1, 2]\n```\n";
        assert_eq!(strip_code_fence(raw), "[1, 2]");
    }

    #[test]
    fn test_strip_code_fence_crlf() {
        let raw = "```json\r\n{\"a\": 1}\r\n```";
        assert_eq!(strip_code_fence(raw), r#"{"a": 1}"#);
    }

    #[test]
    fn test_strip_code_fence_without_fence() {
        let raw = "  {\"summary\": \"plain\"}  ";
        assert_eq!(strip_code_fence(raw), r#"{"summary": "plain"}"#);
    }

    #[test]
    fn test_strip_code_fence_keeps_inner_backticks() {
        let raw = "```json\n{\"summary\": \"use `code` here\"}\n```";
        assert_eq!(strip_code_fence(raw), r#"{"summary": "use `code` here"}"#);
    }

    // =============================================
    // parse_embedded_summary テスト
    // =============================================

    #[test]
    fn test_parse_embedded_summary() {
        let raw = r#"```json
{
  "summary": "Customers like the staff but dislike wait times.",
  "key_themes": ["staff", "wait times"],
  "main_issues": [
    {"issue": "Long queues", "sentiment": "Negative", "frequency": "high", "quotes": ["waited an hour"]}
  ],
  "actionable_insights": ["Add a second counter"],
  "positive_highlights": ["Friendly staff"]
}
```"#;

        let data = parse_embedded_summary(raw).unwrap();
        assert_eq!(data.key_themes, vec!["staff", "wait times"]);
        assert_eq!(data.main_issues.len(), 1);
        assert_eq!(data.main_issues[0].frequency, "high");
        assert_eq!(data.main_issues[0].quotes, vec!["waited an hour"]);
        assert_eq!(data.positive_highlights, vec!["Friendly staff"]);
    }

    #[test]
    fn test_parse_embedded_summary_partial_fields() {
        let raw = "```json\n{\"summary\":\"s\",\"key_themes\":[]}\n```";

        let data = parse_embedded_summary(raw).unwrap();
        assert_eq!(data.summary, "s");
        assert!(data.key_themes.is_empty());
        assert!(data.main_issues.is_empty());
    }

    #[test]
    fn test_parse_embedded_summary_malformed() {
        let raw = "```json\n{\"summary\": \"s\", \"key_themes\": [\n```";

        let result = parse_embedded_summary(raw);
        assert!(matches!(result, Err(Error::SummaryParse(_))));
    }

    #[test]
    fn test_parse_embedded_summary_prose() {
        let result = parse_embedded_summary("Sorry, I could not summarize this file.");
        assert!(matches!(result, Err(Error::SummaryParse(_))));
    }
}
