//! ワードクラウド配置
//!
//! 単語頻度をフォントサイズに変換し、キャンバス中心からのアルキメデス螺旋で
//! 重ならない位置を探して配置する。
//!
//! ## 処理フロー
//! 1. 頻度の最小〜最大を 15〜60px に線形変換
//! 2. 単語ごとに -90°〜90° の30°刻みから回転角を抽選
//! 3. フォントサイズの大きい順に螺旋上を探索し、既存の単語と重ならない最初の位置に確定
//!
//! 螺旋を探索し尽くしても置けない単語は黙って捨てる（高密度時の正常動作）。
//! 座標はキャンバス中心を (0, 0) とする。

use crate::types::{format_number, WordFrequencyEntry};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// フォントサイズ下限（px）
pub const FONT_SIZE_MIN: f64 = 15.0;
/// フォントサイズ上限（px）
pub const FONT_SIZE_MAX: f64 = 60.0;
/// 単語の周囲余白（px）
pub const WORD_PADDING: f64 = 5.0;
/// ホバー時の拡大率
pub const HOVER_SCALE: f64 = 1.1;
/// 回転角の候補（度）
pub const ROTATIONS: [i32; 7] = [-90, -60, -30, 0, 30, 60, 90];
/// 描画フォント
pub const FONT_FAMILY: &str = "Impact";

/// Impact の平均字幅（フォントサイズ比）
const GLYPH_WIDTH_RATIO: f64 = 0.55;
/// 螺旋の角度・半径の刻み
const SPIRAL_STEP: f64 = 0.1;
/// 1単語あたりの螺旋探索の上限（極端に縦長のキャンバス対策）
const MAX_SPIRAL_STEPS: usize = 20_000;

/// 描画キャンバス
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// 螺旋探索の上限ステップ
    ///
    /// 半径が (高さ/2)·√2 を超えると螺旋上の点はすべてキャンバス外になる。
    /// `MAX_SPIRAL_STEPS` で頭打ち。
    fn max_spiral_steps(&self) -> usize {
        let steps = (self.height / 2.0 * std::f64::consts::SQRT_2 / SPIRAL_STEP).ceil();
        (steps as usize).min(MAX_SPIRAL_STEPS)
    }
}

/// 頻度 → フォントサイズの線形変換
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontScale {
    min: f64,
    max: f64,
}

impl FontScale {
    /// 空の場合は `None`
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a WordFrequencyEntry>) -> Option<Self> {
        entries.into_iter().fold(None, |acc, entry| match acc {
            None => Some(FontScale { min: entry.value, max: entry.value }),
            Some(scale) => Some(FontScale {
                min: scale.min.min(entry.value),
                max: scale.max.max(entry.value),
            }),
        })
    }

    /// 最小頻度と最大頻度が等しい場合はすべて中間サイズ
    pub fn size(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            return (FONT_SIZE_MIN + FONT_SIZE_MAX) / 2.0;
        }
        FONT_SIZE_MIN + (value - self.min) / span * (FONT_SIZE_MAX - FONT_SIZE_MIN)
    }
}

/// 配置済みの単語
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedWord {
    pub text: String,
    /// 元の頻度（ツールチップ表示用）
    pub value: f64,
    pub font_size_px: f64,
    pub x: f64,
    pub y: f64,
    pub rotation_degrees: i32,
}

impl PlacedWord {
    /// 余白込みの外接矩形 (left, top, right, bottom)
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        let b = Bounds::for_word(&self.text, self.font_size_px, self.rotation_degrees, self.x, self.y);
        (b.left, b.top, b.right, b.bottom)
    }

    /// "text: value"
    pub fn tooltip_text(&self) -> String {
        format!("{}: {}", self.text, format_number(self.value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl Bounds {
    fn for_word(text: &str, font_size: f64, rotation: i32, x: f64, y: f64) -> Self {
        let (half_w, half_h) = rotated_half_extent(text, font_size, rotation);
        Bounds {
            left: x - half_w,
            top: y - half_h,
            right: x + half_w,
            bottom: y + half_h,
        }
    }

    fn intersects(&self, other: &Bounds) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    fn inside(&self, canvas: &Canvas) -> bool {
        let (half_w, half_h) = (canvas.width / 2.0, canvas.height / 2.0);
        self.left >= -half_w && self.right <= half_w && self.top >= -half_h && self.bottom <= half_h
    }
}

/// 回転後の外接矩形の半幅・半高（余白込み）
fn rotated_half_extent(text: &str, font_size: f64, rotation: i32) -> (f64, f64) {
    let width = text.chars().count() as f64 * font_size * GLYPH_WIDTH_RATIO + WORD_PADDING * 2.0;
    let height = font_size + WORD_PADDING * 2.0;
    let theta = (rotation as f64).to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    ((width * cos + height * sin) / 2.0, (width * sin + height * cos) / 2.0)
}

/// アスペクト比で横に伸ばしたアルキメデス螺旋
fn spiral_point(aspect: f64, step: usize) -> (f64, f64) {
    let t = step as f64 * SPIRAL_STEP;
    (aspect * t * t.cos(), t * t.sin())
}

struct Candidate<'a> {
    entry: &'a WordFrequencyEntry,
    font_size: f64,
    rotation: i32,
}

/// 単語を配置する（回転角はスレッドローカル乱数で抽選）
pub fn layout(words: &[WordFrequencyEntry], canvas: Canvas) -> Vec<PlacedWord> {
    layout_with_rng(words, canvas, &mut rand::thread_rng())
}

/// 単語を配置する
///
/// 同じ入力・キャンバス・乱数列なら同じ結果になる。呼び出すたびに前回の結果は
/// 破棄して作り直す想定（差分更新はしない）。
pub fn layout_with_rng<R: Rng + ?Sized>(
    words: &[WordFrequencyEntry],
    canvas: Canvas,
    rng: &mut R,
) -> Vec<PlacedWord> {
    if !canvas.is_drawable() {
        return Vec::new();
    }

    let usable: Vec<&WordFrequencyEntry> = words.iter().filter(|w| w.value.is_finite()).collect();
    let Some(scale) = FontScale::from_entries(usable.iter().copied()) else {
        return Vec::new();
    };

    let mut candidates: Vec<Candidate> = usable
        .into_iter()
        .map(|entry| Candidate {
            entry,
            font_size: scale.size(entry.value),
            rotation: ROTATIONS[rng.gen_range(0..ROTATIONS.len())],
        })
        .collect();

    // 大きい単語から（同サイズは入力順）
    candidates.sort_by(|a, b| b.font_size.partial_cmp(&a.font_size).unwrap_or(Ordering::Equal));

    let aspect = canvas.width / canvas.height;
    let max_steps = canvas.max_spiral_steps();
    let mut committed: Vec<Bounds> = Vec::with_capacity(candidates.len());
    let mut placed = Vec::with_capacity(candidates.len());

    for candidate in &candidates {
        let position = (0..=max_steps).map(|step| spiral_point(aspect, step)).find_map(|(x, y)| {
            let bounds = Bounds::for_word(&candidate.entry.text, candidate.font_size, candidate.rotation, x, y);
            let free = bounds.inside(&canvas) && !committed.iter().any(|c| c.intersects(&bounds));
            free.then_some((x, y, bounds))
        });

        match position {
            Some((x, y, bounds)) => {
                committed.push(bounds);
                placed.push(PlacedWord {
                    text: candidate.entry.text.clone(),
                    value: candidate.entry.value,
                    font_size_px: candidate.font_size,
                    x,
                    y,
                    rotation_degrees: candidate.rotation,
                });
            }
            None => debug!("word cloud: no room for {:?}", candidate.entry.text),
        }
    }

    debug!(
        "word cloud: placed {} of {} words on {}x{}",
        placed.len(),
        words.len(),
        canvas.width,
        canvas.height
    );

    placed
}

/// ワードクラウドの感情フィルタ（`sentiment_filter` クエリ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentFilter {
    #[default]
    All,
    Negative,
    Positive,
    Neutral,
}

impl SentimentFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentFilter::All => "all",
            SentimentFilter::Negative => "negative",
            SentimentFilter::Positive => "positive",
            SentimentFilter::Neutral => "neutral",
        }
    }
}

impl std::str::FromStr for SentimentFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(SentimentFilter::All),
            "negative" | "neg" => Ok(SentimentFilter::Negative),
            "positive" | "pos" => Ok(SentimentFilter::Positive),
            "neutral" => Ok(SentimentFilter::Neutral),
            _ => Err(format!("Unknown filter: {}. Use all, negative, positive, or neutral", s)),
        }
    }
}

impl std::fmt::Display for SentimentFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const NEGATIVE_RAMP: [&str; 5] = ["#ff9999", "#ff6666", "#ff3333", "#ff0000", "#cc0000"];
const POSITIVE_RAMP: [&str; 5] = ["#99ff99", "#66ff66", "#33ff33", "#00ff00", "#00cc00"];
const DEFAULT_RAMP: [&str; 5] = ["#9999ff", "#6666ff", "#3333ff", "#0000ff", "#0000cc"];

/// 単語の配色
///
/// 配置順の序数だけで色が決まる（頻度や単語には依存しない）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordPalette {
    ramp: &'static [&'static str; 5],
}

impl WordPalette {
    pub fn for_filter(filter: SentimentFilter) -> Self {
        let ramp = match filter {
            SentimentFilter::Negative => &NEGATIVE_RAMP,
            SentimentFilter::Positive => &POSITIVE_RAMP,
            SentimentFilter::All | SentimentFilter::Neutral => &DEFAULT_RAMP,
        };
        Self { ramp }
    }

    pub fn color(&self, ordinal: usize) -> &'static str {
        self.ramp[ordinal % self.ramp.len()]
    }
}

/// ツールチップ
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub left: f64,
    pub top: f64,
}

impl Tooltip {
    fn at(word: &PlacedWord, pointer: (f64, f64)) -> Self {
        Tooltip {
            text: word.tooltip_text(),
            left: pointer.0 + 10.0,
            top: pointer.1 - 10.0,
        }
    }
}

/// ホバー状態
///
/// 表示上の拡大とツールチップのみを扱い、配置結果は変更しない。
#[derive(Debug, Clone, Default)]
pub struct HoverState {
    hovered: Option<usize>,
}

impl HoverState {
    pub fn enter(&mut self, index: usize, word: &PlacedWord, pointer: (f64, f64)) -> Tooltip {
        self.hovered = Some(index);
        Tooltip::at(word, pointer)
    }

    /// 描画用フォントサイズ
    pub fn font_size(&self, index: usize, word: &PlacedWord) -> f64 {
        if self.hovered == Some(index) {
            word.font_size_px * HOVER_SCALE
        } else {
            word.font_size_px
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entry(text: &str, value: f64) -> WordFrequencyEntry {
        WordFrequencyEntry { text: text.to_string(), value }
    }

    fn sample_words(count: usize) -> Vec<WordFrequencyEntry> {
        (0..count)
            .map(|i| entry(&format!("word{}", i), (i % 17 + 1) as f64))
            .collect()
    }

    fn assert_no_overlap(words: &[PlacedWord]) {
        for (i, a) in words.iter().enumerate() {
            for b in &words[i + 1..] {
                let (al, at, ar, ab) = a.bounding_box();
                let (bl, bt, br, bb) = b.bounding_box();
                let overlap = al < br && bl < ar && at < bb && bt < ab;
                assert!(!overlap, "{} overlaps {}", a.text, b.text);
            }
        }
    }

    #[test]
    fn test_font_scale_extremes() {
        let words = vec![entry("low", 2.0), entry("mid", 6.0), entry("high", 10.0)];
        let scale = FontScale::from_entries(&words).unwrap();

        assert_eq!(scale.size(2.0), FONT_SIZE_MIN);
        assert_eq!(scale.size(10.0), FONT_SIZE_MAX);
        assert_eq!(scale.size(6.0), 37.5);
    }

    #[test]
    fn test_font_scale_degenerate() {
        let words = vec![entry("a", 4.0), entry("b", 4.0)];
        let scale = FontScale::from_entries(&words).unwrap();
        assert_eq!(scale.size(4.0), 37.5);
        assert!(FontScale::from_entries(&[]).is_none());
    }

    #[test]
    fn test_layout_min_max_sizes() {
        let words = vec![entry("rare", 1.0), entry("common", 50.0)];
        let mut rng = StdRng::seed_from_u64(7);
        let placed = layout_with_rng(&words, Canvas::new(800.0, 320.0), &mut rng);

        assert_eq!(placed.len(), 2);
        let common = placed.iter().find(|w| w.text == "common").unwrap();
        let rare = placed.iter().find(|w| w.text == "rare").unwrap();
        assert_eq!(common.font_size_px, 60.0);
        assert_eq!(rare.font_size_px, 15.0);
    }

    #[test]
    fn test_layout_first_word_at_center() {
        let words = vec![entry("only", 3.0)];
        let mut rng = StdRng::seed_from_u64(1);
        let placed = layout_with_rng(&words, Canvas::new(800.0, 320.0), &mut rng);

        assert_eq!(placed.len(), 1);
        assert_eq!((placed[0].x, placed[0].y), (0.0, 0.0));
    }

    #[test]
    fn test_layout_no_overlap_and_inside_canvas() {
        let words = sample_words(60);
        let canvas = Canvas::new(800.0, 320.0);
        let mut rng = StdRng::seed_from_u64(42);
        let placed = layout_with_rng(&words, canvas, &mut rng);

        assert!(!placed.is_empty());
        assert!(placed.len() <= words.len());
        assert_no_overlap(&placed);
        for word in &placed {
            let (l, t, r, b) = word.bounding_box();
            assert!(l >= -400.0 && r <= 400.0, "{} outside horizontally", word.text);
            assert!(t >= -160.0 && b <= 160.0, "{} outside vertically", word.text);
            assert!(ROTATIONS.contains(&word.rotation_degrees));
        }
    }

    #[test]
    fn test_layout_largest_first() {
        let words = vec![entry("small", 1.0), entry("big", 9.0)];
        let mut rng = StdRng::seed_from_u64(3);
        let placed = layout_with_rng(&words, Canvas::new(800.0, 320.0), &mut rng);

        assert_eq!(placed[0].text, "big");
    }

    #[test]
    fn test_layout_duplicates_placed_separately() {
        let words = vec![entry("same", 5.0), entry("same", 5.0)];
        let mut rng = StdRng::seed_from_u64(9);
        let placed = layout_with_rng(&words, Canvas::new(800.0, 320.0), &mut rng);

        assert_eq!(placed.len(), 2);
        assert_ne!((placed[0].x, placed[0].y), (placed[1].x, placed[1].y));
    }

    #[test]
    fn test_layout_drops_words_that_do_not_fit() {
        let words = vec![entry("supercalifragilisticexpialidocious", 10.0), entry("ok", 1.0)];
        let mut rng = StdRng::seed_from_u64(5);
        let placed = layout_with_rng(&words, Canvas::new(60.0, 40.0), &mut rng);

        assert!(placed.iter().all(|w| w.text != "supercalifragilisticexpialidocious"));
        assert_no_overlap(&placed);
    }

    #[test]
    fn test_layout_degenerate_inputs() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(layout_with_rng(&[], Canvas::new(800.0, 320.0), &mut rng).is_empty());
        assert!(layout_with_rng(&sample_words(3), Canvas::new(0.0, 320.0), &mut rng).is_empty());
        assert!(layout_with_rng(&[entry("nan", f64::NAN)], Canvas::new(800.0, 320.0), &mut rng).is_empty());
    }

    #[test]
    fn test_layout_reproducible_with_same_seed() {
        let words = sample_words(30);
        let canvas = Canvas::new(640.0, 320.0);

        let first = layout_with_rng(&words, canvas, &mut StdRng::seed_from_u64(11));
        let second = layout_with_rng(&words, canvas, &mut StdRng::seed_from_u64(11));
        assert_eq!(first, second);
    }

    #[test]
    fn test_filter_parse_and_palette() {
        assert_eq!("negative".parse::<SentimentFilter>().unwrap(), SentimentFilter::Negative);
        assert_eq!("ALL".parse::<SentimentFilter>().unwrap(), SentimentFilter::All);
        assert!("mixed".parse::<SentimentFilter>().is_err());

        let negative = WordPalette::for_filter(SentimentFilter::Negative);
        assert_eq!(negative.color(0), "#ff9999");
        assert_eq!(negative.color(5), "#ff9999");
        assert_eq!(WordPalette::for_filter(SentimentFilter::Positive).color(4), "#00cc00");
        assert_eq!(WordPalette::for_filter(SentimentFilter::Neutral).color(1), "#6666ff");
    }

    #[test]
    fn test_spiral_steps_are_capped() {
        assert_eq!(Canvas::new(800.0, 320.0).max_spiral_steps(), 2263);
        assert_eq!(Canvas::new(10.0, 1e9).max_spiral_steps(), MAX_SPIRAL_STEPS);

        // 幅10pxには置けないが、探索は上限で打ち切られる
        let mut rng = StdRng::seed_from_u64(3);
        let placed = layout_with_rng(&sample_words(3), Canvas::new(10.0, 1e9), &mut rng);
        assert!(placed.is_empty());
    }

    #[test]
    fn test_hover_enlarges_and_shows_tooltip() {
        let word = PlacedWord {
            text: "service".to_string(),
            value: 12.0,
            font_size_px: 40.0,
            x: 0.0,
            y: 0.0,
            rotation_degrees: 0,
        };
        let mut hover = HoverState::default();

        let tooltip = hover.enter(0, &word, (100.0, 50.0));
        assert_eq!(tooltip.text, "service: 12");
        assert_eq!((tooltip.left, tooltip.top), (110.0, 40.0));
        assert!((hover.font_size(0, &word) - 44.0).abs() < 1e-9);
        assert_eq!(hover.font_size(1, &word), 40.0);
        assert_eq!(word.font_size_px, 40.0);
    }
}
