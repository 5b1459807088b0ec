//! ページ分割
//!
//! 表示系はすべて `Paginator` を通してページ位置を管理する。
//! データセットが変わった場合のリセットは `sync_dataset` で明示的に行う。

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// 1ページあたりの既定件数
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// 総ページ数（空の場合も1ページ）
pub fn total_pages(len: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    len.div_ceil(page_size).max(1)
}

/// 指定ページを切り出す
///
/// 範囲外のページは空スライスを返す。
pub fn paginate<T>(items: &[T], page_index: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page_index.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// データセットの同一性を表すキー
///
/// ファイル名やフィルタ条件など、表示対象を特定する値から作る。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatasetKey(u64);

impl DatasetKey {
    pub fn of<T: Hash + ?Sized>(identity: &T) -> Self {
        let mut hasher = DefaultHasher::new();
        identity.hash(&mut hasher);
        DatasetKey(hasher.finish())
    }
}

/// ページ位置の管理
#[derive(Debug, Clone)]
pub struct Paginator {
    page_index: usize,
    page_size: usize,
    dataset: Option<DatasetKey>,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// 0件指定は1件として扱う
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
            dataset: None,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, len: usize) -> usize {
        total_pages(len, self.page_size)
    }

    /// 表示対象のデータセットを通知する
    ///
    /// 前回と異なるデータセットなら先頭ページに戻し `true` を返す。
    pub fn sync_dataset(&mut self, key: DatasetKey) -> bool {
        if self.dataset == Some(key) {
            return false;
        }
        let changed = self.dataset.is_some();
        self.dataset = Some(key);
        self.page_index = 0;
        changed
    }

    /// 現在ページの要素
    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let index = self.page_index.min(self.total_pages(items.len()) - 1);
        paginate(items, index, self.page_size)
    }

    pub fn has_prev(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.page_index + 1 < self.total_pages(len)
    }

    /// 次のページへ（最終ページでは何もしない）
    pub fn next(&mut self, len: usize) {
        let last = self.total_pages(len) - 1;
        self.page_index = (self.page_index + 1).min(last);
    }

    /// 前のページへ（先頭ページでは何もしない）
    pub fn prev(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    pub fn first(&mut self) {
        self.page_index = 0;
    }

    /// 指定ページへ（範囲外は端に丸める）
    pub fn go_to(&mut self, index: usize, len: usize) {
        self.page_index = index.min(self.total_pages(len) - 1);
    }

    /// "Page X of Y"
    pub fn label(&self, len: usize) -> String {
        let total = self.total_pages(len);
        format!("Page {} of {}", self.page_index.min(total - 1) + 1, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
    }

    #[test]
    fn test_paginate_slices() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(paginate(&items, 0, 10), &items[0..10]);
        assert_eq!(paginate(&items, 2, 10), &items[20..25]);
        assert!(paginate(&items, 3, 10).is_empty());
        assert!(paginate(&items, usize::MAX, 10).is_empty());
    }

    #[test]
    fn test_pages_partition_items() {
        for len in [0usize, 1, 9, 10, 11, 37] {
            for page_size in [1usize, 3, 10] {
                let items: Vec<usize> = (0..len).collect();
                let pages = total_pages(len, page_size);
                let collected: Vec<usize> = (0..pages)
                    .flat_map(|p| paginate(&items, p, page_size).iter().copied())
                    .collect();
                assert_eq!(collected, items);

                let last = paginate(&items, pages - 1, page_size).len();
                let expected = if len == 0 {
                    0
                } else if len % page_size == 0 {
                    page_size
                } else {
                    len % page_size
                };
                assert_eq!(last, expected);
            }
        }
    }

    #[test]
    fn test_navigation_clamps() {
        let mut paginator = Paginator::new(10);
        paginator.prev();
        assert_eq!(paginator.page_index(), 0);
        assert!(!paginator.has_prev());

        paginator.next(25);
        paginator.next(25);
        paginator.next(25);
        assert_eq!(paginator.page_index(), 2);
        assert!(!paginator.has_next(25));

        paginator.go_to(99, 25);
        assert_eq!(paginator.page_index(), 2);
        paginator.first();
        assert_eq!(paginator.page_index(), 0);
    }

    #[test]
    fn test_empty_label() {
        let mut paginator = Paginator::default();
        paginator.next(0);
        assert_eq!(paginator.label(0), "Page 1 of 1");
        assert!(paginator.page::<u8>(&[]).is_empty());
    }

    #[test]
    fn test_page_clamps_to_shrunken_items() {
        let items: Vec<u32> = (0..30).collect();
        let mut paginator = Paginator::new(10);
        paginator.go_to(2, items.len());

        // 同じデータセットのまま件数が減った場合でも範囲外を描画しない
        let shrunk = &items[..5];
        assert_eq!(paginator.page(shrunk), shrunk);
        assert_eq!(paginator.label(shrunk.len()), "Page 1 of 1");
    }

    #[test]
    fn test_sync_dataset_resets_on_change() {
        let mut paginator = Paginator::new(10);
        assert!(!paginator.sync_dataset(DatasetKey::of("a.csv")));

        paginator.next(50);
        paginator.next(50);
        assert!(!paginator.sync_dataset(DatasetKey::of("a.csv")));
        assert_eq!(paginator.page_index(), 2);

        assert!(paginator.sync_dataset(DatasetKey::of(&("a.csv", "negative"))));
        assert_eq!(paginator.page_index(), 0);
    }
}
