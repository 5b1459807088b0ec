//! 端末表示とSVG出力

pub mod table;
pub mod chart;
pub mod cloud;
pub mod summary;

pub use table::{render_table, render_stats, NO_DATA};
pub use chart::{render_bar_chart, chart_svg};
pub use cloud::{render_placements, wordcloud_svg, NO_WORDS};
pub use summary::{render_summary, render_tab};

/// SVG/XML用のエスケープ
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// 表示幅で切り詰める（超過分は `…`）
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// 右側を空白で埋める
pub(crate) fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}
