//! AI要約のタブ表示

use survey_insight_common::{SummaryData, SummaryTab};

fn bullets(items: &[String], empty: &str) -> Vec<String> {
    if items.is_empty() {
        return vec![format!("  {}", empty)];
    }
    items.iter().map(|item| format!("  • {}", item)).collect()
}

/// 1タブ分の本文
pub fn render_tab(data: &SummaryData, tab: SummaryTab) -> String {
    let mut out = vec![format!("── {} ──", tab.title())];
    match tab {
        SummaryTab::MainIssues => {
            if data.main_issues.is_empty() {
                out.push("  No issues identified".to_string());
            }
            for (i, issue) in data.main_issues.iter().enumerate() {
                let mut head = format!("  {}. {}", i + 1, issue.issue);
                if !issue.sentiment.is_empty() {
                    head.push_str(&format!(" [{}]", issue.sentiment));
                }
                if !issue.frequency.is_empty() {
                    head.push_str(&format!(" (frequency: {})", issue.frequency));
                }
                out.push(head);
                out.extend(issue.quotes.iter().map(|q| format!("     \"{}\"", q)));
            }
        }
        SummaryTab::KeyThemes => out.extend(bullets(&data.key_themes, "No key themes")),
        SummaryTab::ActionableInsights => {
            out.extend(bullets(&data.actionable_insights, "No actionable insights"))
        }
        SummaryTab::PositiveHighlights => out.extend(bullets(&data.positive_highlights, "None")),
    }
    out.join("\n")
}

/// 要約本文と全タブ（`only` 指定時はそのタブのみ）
pub fn render_summary(data: &SummaryData, only: Option<SummaryTab>) -> String {
    let mut sections = Vec::new();
    if !data.summary.is_empty() {
        sections.push(data.summary.clone());
    }

    let tabs = data.tabs();
    let titles: Vec<&str> = tabs.iter().map(|t| t.title()).collect();
    sections.push(format!("Tabs: {}", titles.join(" | ")));

    match only {
        Some(tab) => sections.push(render_tab(data, tab)),
        None => sections.extend(tabs.into_iter().map(|tab| render_tab(data, tab))),
    }
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_insight_common::MainIssue;

    fn sample() -> SummaryData {
        SummaryData {
            summary: "Mostly positive.".into(),
            key_themes: vec!["staff".into()],
            main_issues: vec![MainIssue {
                issue: "Long queues".into(),
                sentiment: "Negative".into(),
                frequency: "high".into(),
                quotes: vec!["waited an hour".into()],
            }],
            actionable_insights: vec![],
            positive_highlights: vec![],
        }
    }

    #[test]
    fn test_render_summary_hides_empty_highlights() {
        let text = render_summary(&sample(), None);
        assert!(text.starts_with("Mostly positive."));
        assert!(text.contains("Tabs: Main Issues | Key Themes | Actionable Insights\n"));
        assert!(!text.contains("Positive Highlights"));
        assert!(text.contains("  1. Long queues [Negative] (frequency: high)"));
        assert!(text.contains("     \"waited an hour\""));
        assert!(text.contains("  No actionable insights"));
    }

    #[test]
    fn test_render_single_tab() {
        let text = render_summary(&sample(), Some(SummaryTab::KeyThemes));
        assert!(text.contains("── Key Themes ──\n  • staff"));
        assert!(!text.contains("Long queues"));
    }
}
