//! ファイル1件分のダッシュボード
//!
//! レコード・要約・ワードクラウドはそれぞれ独立したビューとして取得し、
//! 1つのビューの失敗が他のビューに影響しないようにする。

use crate::client::DashboardClient;
use crate::error::Result;
use crate::render::{self, NO_DATA};
use survey_insight_common::api::FileDataResponse;
use survey_insight_common::{
    layout_with_rng, survey_ids, Canvas, DatasetKey, Generation, HeaderStyle, HoverState, Paginator, PlacedWord,
    Resolution, SentimentChart, SentimentFilter, SummaryPanel, SummaryRequest, SummaryResponse, SurveySelection,
    ViewState, WordFrequencyEntry,
};
use tracing::debug;

/// 発行済みリクエストの世代
#[derive(Debug, Clone, Copy)]
pub struct Pending {
    records: Generation,
    summary: Generation,
    words: Generation,
    pub summary_request: SummaryRequest,
    pub filter: SentimentFilter,
}

/// 取得結果（ビューごと）
pub struct Fetched {
    pub records: Result<FileDataResponse>,
    pub summary: Result<SummaryResponse>,
    pub words: Result<Vec<WordFrequencyEntry>>,
}

#[derive(Debug, Default)]
pub struct Dashboard {
    filename: String,
    records: ViewState<FileDataResponse>,
    summary: SummaryPanel,
    words: ViewState<Vec<WordFrequencyEntry>>,
    paginator: Paginator,
    selection: SurveySelection,
}

impl Dashboard {
    pub fn new(filename: &str, page_size: usize) -> Self {
        Self {
            filename: filename.to_string(),
            paginator: Paginator::new(page_size),
            ..Default::default()
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// 表示対象のファイルを切り替える（表は先頭ページに戻る）
    ///
    /// 切り替え前に発行したリクエストの結果は以後すべて破棄される。
    pub fn switch_file(&mut self, filename: &str) {
        self.filename = filename.to_string();
        self.records.reset();
        self.words.reset();
        self.summary.reset();
        self.selection = SurveySelection::default();
        self.paginator.sync_dataset(DatasetKey::of(filename));
    }

    /// 3ビュー分のリクエストを開始する
    pub fn begin(&mut self, filter: SentimentFilter) -> Pending {
        let (summary, summary_request) = self.summary.regenerate();
        Pending {
            records: self.records.begin(),
            summary,
            words: self.words.begin(),
            summary_request,
            filter,
        }
    }

    /// 取得結果を反映する（古い世代の結果は各ビューで破棄される）
    pub fn apply(&mut self, pending: Pending, fetched: Fetched) -> [Resolution; 3] {
        let records = self.records.resolve(pending.records, fetched.records);
        let summary = match fetched.summary {
            Ok(response) => self.summary.receive(pending.summary, Ok(response)),
            Err(e) => self.summary.fail(pending.summary, e),
        };
        let words = self.words.resolve(pending.words, fetched.words);

        if let Some(data) = self.records.data() {
            self.paginator.sync_dataset(DatasetKey::of(self.filename.as_str()));
            self.selection.sync(&survey_ids(&data.data));
        }

        debug!("dashboard views: records={:?} summary={:?} words={:?}", records, summary, words);
        [records, summary, words]
    }

    /// 3ビューを並行して取得する
    pub async fn refresh(&mut self, client: &DashboardClient, filter: SentimentFilter) {
        let pending = self.begin(filter);
        let filename = self.filename.clone();

        let (records, summary, words) = tokio::join!(
            client.file_data(&filename),
            client.summary(&filename, &pending.summary_request),
            client.wordcloud(&filename, pending.filter),
        );

        self.apply(pending, Fetched { records, summary, words });
    }

    pub fn records(&self) -> &ViewState<FileDataResponse> {
        &self.records
    }

    pub fn summary(&self) -> &SummaryPanel {
        &self.summary
    }

    pub fn words(&self) -> &ViewState<Vec<WordFrequencyEntry>> {
        &self.words
    }

    pub fn selection(&self) -> &SurveySelection {
        &self.selection
    }

    /// 選択中アンケートの集計（レコード未取得なら `None`）
    pub fn chart(&self) -> Option<SentimentChart> {
        let data = self.records.data()?;
        let survey_id = self.selection.selected()?;
        Some(SentimentChart::build(&data.data, survey_id))
    }

    pub fn layout_words<R: rand::Rng + ?Sized>(&self, canvas: Canvas, rng: &mut R) -> Vec<PlacedWord> {
        self.words
            .data()
            .map(|words| layout_with_rng(words, canvas, rng))
            .unwrap_or_default()
    }

    /// 端末表示用のテキスト
    pub fn render_text(&self, placed: &[PlacedWord]) -> String {
        let mut sections = Vec::new();

        // 統計と表
        let records_section = match (self.records.data(), self.records.error()) {
            (_, Some(e)) => format!("⚠ {}", e),
            (Some(data), None) => format!(
                "{}\n\n{}",
                render::render_stats(&data.stats(&self.filename)),
                render::render_table(&data.data, HeaderStyle::Raw, &self.paginator)
            ),
            (None, None) => NO_DATA.to_string(),
        };
        sections.push(records_section);

        if let Some(chart) = self.chart() {
            sections.push(render::render_bar_chart(&chart));
        }

        let summary_section = match (self.summary.summary(), self.summary.error()) {
            (_, Some(e)) => format!("AI Summary ({})\n⚠ {}", self.summary.focus(), e),
            (Some(data), None) => format!(
                "AI Summary ({})\n{}",
                self.summary.focus(),
                render::render_summary(data, None)
            ),
            (None, None) => "AI Summary: not generated".to_string(),
        };
        sections.push(summary_section);

        let words_section = match self.words.error() {
            Some(e) => format!("Word Cloud\n⚠ {}", e),
            None => format!("Word Cloud\n{}", render::render_placements(placed)),
        };
        sections.push(words_section);

        sections.join("\n\n")
    }

    /// ワードクラウドのSVG
    pub fn wordcloud_svg(&self, placed: &[PlacedWord], canvas: Canvas, filter: SentimentFilter) -> String {
        render::wordcloud_svg(placed, canvas, filter, &HoverState::default(), None)
    }
}
