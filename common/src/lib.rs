//! Survey Insight Common Library
//!
//! CLIとダッシュボード表示で共有されるデータ整形・可視化ロジック

pub mod types;
pub mod error;
pub mod schema;
pub mod pagination;
pub mod sentiment;
pub mod wordcloud;
pub mod parser;
pub mod summary;
pub mod api;
pub mod generation;
pub mod export;

pub use types::{Record, WordFrequencyEntry, SummaryData, MainIssue, format_number};
pub use error::{Error, Result};
pub use schema::{Column, HeaderStyle, infer_columns, cell_text};
pub use pagination::{Paginator, DatasetKey, paginate, total_pages, DEFAULT_PAGE_SIZE};
pub use sentiment::{
    SentimentBucket, ChartSeriesPoint, SentimentChart, SurveySelection, BadgeVariant,
    aggregate, survey_ids,
};
pub use wordcloud::{
    Canvas, PlacedWord, SentimentFilter, WordPalette, HoverState, Tooltip, FontScale,
    layout, layout_with_rng,
};
pub use parser::{strip_code_fence, parse_embedded_summary};
pub use summary::{
    AnalysisPayload, SummaryFocus, SummaryPanel, SummaryRequest, SummaryResponse, SummaryTab,
    normalize_summary, MAX_ISSUES,
};
pub use generation::{Generation, RequestTracker, ViewState, Resolution};
