//! レコード表とファイル統計

use super::{pad, truncate};
use survey_insight_common::api::FileStats;
use survey_insight_common::{cell_text, infer_columns, BadgeVariant, HeaderStyle, Paginator, Record};

pub const NO_DATA: &str = "No data available";

const MAX_CELL_CHARS: usize = 40;
const COLUMN_GAP: &str = "  ";

fn badge(variant: BadgeVariant, text: &str) -> String {
    match variant {
        BadgeVariant::Destructive => format!("[!{}]", text),
        BadgeVariant::Outline => format!("({})", text),
        BadgeVariant::Secondary => format!("<{}>", text),
        BadgeVariant::Default => format!("[{}]", text),
    }
}

/// 現在ページの表を描画
///
/// 列は先頭レコードから推定する。空なら「No data available」のみ。
pub fn render_table(records: &[Record], style: HeaderStyle, paginator: &Paginator) -> String {
    let columns = infer_columns(records, style);
    if columns.is_empty() {
        return NO_DATA.to_string();
    }

    let rows: Vec<Vec<String>> = paginator
        .page(records)
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| {
                    let text = cell_text(record, column).unwrap_or_default();
                    let text = truncate(&text, MAX_CELL_CHARS);
                    if column.is_sentiment() && !text.is_empty() {
                        badge(BadgeVariant::for_label(&text), &text)
                    } else {
                        text
                    }
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad(cell, *w))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP)
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 4);
    out.push(line(columns.iter().map(|c| c.header.as_str()).collect()));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP),
    );
    for row in &rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.push(String::new());
    out.push(format!("{} ({} records)", paginator.label(records.len()), records.len()));

    out.join("\n")
}

/// ファイル名・件数・感情別件数
pub fn render_stats(stats: &FileStats) -> String {
    let mut out = vec![format!("File: {}", stats.display_name)];
    if let Some(total) = stats.total_line() {
        out.push(total);
    }
    let badges: Vec<String> = stats
        .badges()
        .iter()
        .map(|(variant, text)| badge(*variant, text))
        .collect();
    if !badges.is_empty() {
        out.push(badges.join(" "));
    }
    out.join("\n")
}
