//! 出力処理のうちCLI以外でも使えるもの

#[cfg(feature = "excel")]
pub mod excel_core;
