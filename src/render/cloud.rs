//! ワードクラウドのSVG出力

use super::escape_xml;
use std::fmt::Write;
use survey_insight_common::wordcloud::FONT_FAMILY;
use survey_insight_common::{format_number, Canvas, HoverState, PlacedWord, SentimentFilter, Tooltip, WordPalette};

pub const NO_WORDS: &str = "No word data available for the selected filter";

const TOOLTIP_FONT_SIZE: f64 = 12.0;

/// 配置結果の一覧（大きい順）
pub fn render_placements(words: &[PlacedWord]) -> String {
    if words.is_empty() {
        return NO_WORDS.to_string();
    }
    words
        .iter()
        .map(|w| {
            format!(
                "{:<20} value={:<6} size={:>5.1}px  at ({:>7.1}, {:>7.1})  rotate {:>3}°",
                w.text,
                format_number(w.value),
                w.font_size_px,
                w.x,
                w.y,
                w.rotation_degrees
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 配置済みの単語をSVGに描画
///
/// 座標はキャンバス中心基準なので全体を中心へ平行移動する。
/// ホバー中の単語は拡大し、ツールチップがあれば重ねて描く。
pub fn wordcloud_svg(
    words: &[PlacedWord],
    canvas: Canvas,
    filter: SentimentFilter,
    hover: &HoverState,
    tooltip: Option<&Tooltip>,
) -> String {
    let palette = WordPalette::for_filter(filter);
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width,
        h = canvas.height
    );

    if words.is_empty() {
        let _ = writeln!(
            svg,
            r##"  <text x="{}" y="{}" text-anchor="middle" dominant-baseline="central" fill="#6b7280">{}</text>"##,
            canvas.width / 2.0,
            canvas.height / 2.0,
            NO_WORDS
        );
        svg.push_str("</svg>\n");
        return svg;
    }

    let _ = writeln!(svg, r#"  <g transform="translate({},{})">"#, canvas.width / 2.0, canvas.height / 2.0);
    for (i, word) in words.iter().enumerate() {
        let _ = writeln!(
            svg,
            r#"    <text text-anchor="middle" dominant-baseline="central" transform="translate({:.1},{:.1}) rotate({})" font-family="{}" font-size="{:.1}px" fill="{}" style="cursor: pointer"><title>{}</title>{}</text>"#,
            word.x,
            word.y,
            word.rotation_degrees,
            FONT_FAMILY,
            hover.font_size(i, word),
            palette.color(i),
            escape_xml(&word.tooltip_text()),
            escape_xml(&word.text)
        );
    }
    svg.push_str("  </g>\n");

    if let Some(tip) = tooltip {
        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" font-size="{}" fill="black">{}</text>"#,
            tip.left,
            tip.top,
            TOOLTIP_FONT_SIZE,
            escape_xml(&tip.text)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(text: &str, value: f64) -> PlacedWord {
        PlacedWord {
            text: text.to_string(),
            value,
            font_size_px: 20.0,
            x: 0.0,
            y: 0.0,
            rotation_degrees: 30,
        }
    }

    #[test]
    fn test_wordcloud_svg_empty() {
        let svg = wordcloud_svg(&[], Canvas::new(800.0, 320.0), SentimentFilter::All, &HoverState::default(), None);
        assert!(svg.contains(NO_WORDS));
        assert!(!svg.contains("<g "));
    }

    #[test]
    fn test_wordcloud_svg_words() {
        let words = vec![placed("R&D", 3.0), placed("staff", 1.5)];
        let svg = wordcloud_svg(&words, Canvas::new(800.0, 320.0), SentimentFilter::Negative, &HoverState::default(), None);

        assert!(svg.contains(r#"<g transform="translate(400,160)">"#));
        assert!(svg.contains(r#"font-family="Impact""#));
        assert!(svg.contains(r#"dominant-baseline="central""#));
        assert!(svg.contains("rotate(30)"));
        assert!(svg.contains("<title>R&amp;D: 3</title>R&amp;D</text>"));
        assert!(svg.contains("<title>staff: 1.5</title>"));
        assert!(svg.contains(r##"fill="#ff9999""##));
        assert!(svg.contains(r##"fill="#ff6666""##));
    }

    #[test]
    fn test_wordcloud_svg_hover() {
        let words = vec![placed("staff", 4.0)];
        let mut hover = HoverState::default();
        let tip = hover.enter(0, &words[0], (100.0, 50.0));

        let svg = wordcloud_svg(&words, Canvas::new(400.0, 200.0), SentimentFilter::All, &hover, Some(&tip));
        assert!(svg.contains(r#"font-size="22.0px""#));
        assert!(svg.contains(r#"<text x="110.0" y="40.0""#));
        assert!(svg.contains(">staff: 4</text>"));
    }

    #[test]
    fn test_render_placements_empty() {
        assert_eq!(render_placements(&[]), NO_WORDS);
    }
}
