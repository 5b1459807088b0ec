//! リクエスト世代管理
//!
//! ビューごとに発行したリクエストへ単調増加の世代番号を振り、
//! 最新でない世代のレスポンスは状態を変更せずに破棄する。

use std::fmt::Display;
use tracing::debug;

/// リクエスト世代
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// 世代番号の発行元（ビューごとに1つ）
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn issue(&mut self) -> Generation {
        self.latest += 1;
        Generation(self.latest)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.latest
    }
}

/// レスポンスの反映結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Stale,
}

/// 取得系ビューの状態
///
/// 失敗時はインラインのエラーメッセージを設定し、直前のデータは保持する。
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    tracker: RequestTracker,
    data: Option<T>,
    error: Option<String>,
    loading: bool,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            tracker: RequestTracker::default(),
            data: None,
            error: None,
            loading: false,
        }
    }
}

impl<T> ViewState<T> {
    /// リクエスト開始
    pub fn begin(&mut self) -> Generation {
        self.loading = true;
        self.error = None;
        self.tracker.issue()
    }

    /// レスポンスを反映する
    pub fn resolve<E: Display>(&mut self, generation: Generation, result: Result<T, E>) -> Resolution {
        if !self.tracker.is_current(generation) {
            debug!("discarding stale response (generation {})", generation.value());
            return Resolution::Stale;
        }

        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        Resolution::Applied
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 表示内容を破棄し、発行済みのリクエストをすべて古い世代にする
    pub fn reset(&mut self) {
        self.tracker.issue();
        self.data = None;
        self.error = None;
        self.loading = false;
    }
}
