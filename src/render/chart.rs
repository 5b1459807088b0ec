//! 感情分布の棒グラフ

use super::{escape_xml, pad, NO_DATA};
use std::fmt::Write;
use survey_insight_common::SentimentChart;

const BAR_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 13;

pub fn chart_title(chart: &SentimentChart) -> String {
    format!("Sentiment Analysis for Survey {}", chart.survey_id)
}

/// テキストの横棒グラフ
pub fn render_bar_chart(chart: &SentimentChart) -> String {
    let mut out = vec![chart_title(chart)];
    if chart.matched_records == 0 {
        out.push(NO_DATA.to_string());
        return out.join("\n");
    }

    let max = chart.max_value().max(1);
    for point in &chart.series {
        let len = (point.value as usize * BAR_WIDTH).div_ceil(max as usize);
        out.push(format!(
            "{} {} {}",
            pad(point.name.label(), LABEL_WIDTH),
            "█".repeat(len),
            point.value
        ));
    }
    if chart.unrecognized > 0 {
        out.push(format!("({} records with other labels not shown)", chart.unrecognized));
    }
    out.join("\n")
}

/// SVGの縦棒グラフ
pub fn chart_svg(chart: &SentimentChart, width: f64, height: f64) -> String {
    let margin = (40.0, 20.0, 50.0, 40.0); // left, top, bottom, right
    let plot_w = (width - margin.0 - margin.3).max(1.0);
    let plot_h = (height - margin.1 - margin.2).max(1.0);
    let slot = plot_w / chart.series.len() as f64;
    let bar_w = slot * 0.7;
    let max = chart.max_value().max(1) as f64;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );
    let _ = writeln!(
        svg,
        r#"  <text x="{}" y="14" text-anchor="middle" font-size="14" font-weight="bold">{}</text>"#,
        width / 2.0,
        escape_xml(&chart_title(chart))
    );

    // 軸
    let base_y = margin.1 + plot_h;
    let _ = writeln!(
        svg,
        r##"  <line x1="{x}" y1="{t}" x2="{x}" y2="{b}" stroke="#9ca3af"/>"##,
        x = margin.0,
        t = margin.1,
        b = base_y
    );
    let _ = writeln!(
        svg,
        r##"  <line x1="{l}" y1="{y}" x2="{r}" y2="{y}" stroke="#9ca3af"/>"##,
        l = margin.0,
        r = margin.0 + plot_w,
        y = base_y
    );

    for (i, point) in chart.series.iter().enumerate() {
        let bar_h = point.value as f64 / max * plot_h;
        let x = margin.0 + slot * i as f64 + (slot - bar_w) / 2.0;
        let _ = writeln!(
            svg,
            r#"  <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"><title>{}: {}</title></rect>"#,
            x,
            base_y - bar_h,
            bar_w,
            bar_h,
            point.name.color_hex(),
            point.name.label(),
            point.value
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11">{}</text>"#,
            x + bar_w / 2.0,
            base_y + 16.0,
            point.name.label()
        );
    }

    svg.push_str("</svg>\n");
    svg
}
