use clap::{Parser, Subcommand};
use std::path::PathBuf;
use survey_insight_common::{SentimentFilter, SummaryFocus};

#[derive(Parser)]
#[command(name = "survey-insight")]
#[command(about = "アンケート感情分析ダッシュボード", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// バックエンドURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// CSV/Excelをアップロードして感情分析する
    Upload {
        /// アップロードするファイル（.csv / .xlsx）
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 解析済みファイルの一覧
    Files,

    /// 解析済みファイルのレコードを表で表示
    Table {
        /// 解析済みファイル名
        #[arg(required = true)]
        filename: String,

        /// 表示するページ（1始まり）
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// 1ページの行数（省略時は設定値）
        #[arg(long)]
        page_size: Option<usize>,

        /// 対話的にページ移動
        #[arg(short, long)]
        interactive: bool,

        /// バックエンドの代わりにローカルJSONを読む
        #[arg(long)]
        local: Option<PathBuf>,
    },

    /// アンケートごとの感情分布グラフ
    Chart {
        /// 解析済みファイル名
        #[arg(required = true)]
        filename: String,

        /// SurveyID（省略時は先頭のアンケート）
        #[arg(short, long)]
        survey: Option<String>,

        /// 対話的にSurveyIDを選択
        #[arg(short, long)]
        interactive: bool,

        /// SVGの出力先
        #[arg(long)]
        svg: Option<PathBuf>,

        /// バックエンドの代わりにローカルJSONを読む
        #[arg(long)]
        local: Option<PathBuf>,
    },

    /// AI要約を生成
    Summary {
        /// 解析済みファイル名
        #[arg(required = true)]
        filename: String,

        /// 対象 (all/negative/positive/neutral)
        #[arg(short, long, default_value = "all")]
        focus: SummaryFocus,

        /// 正規化済みの要約をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// ワードクラウドを生成
    Wordcloud {
        /// 解析済みファイル名
        #[arg(required = true)]
        filename: String,

        /// 感情フィルタ (all/negative/positive/neutral)
        #[arg(short, long, default_value = "all")]
        filter: SentimentFilter,

        /// キャンバス幅（省略時は設定値）
        #[arg(long)]
        width: Option<f64>,

        /// キャンバス高さ（省略時は設定値）
        #[arg(long)]
        height: Option<f64>,

        /// 回転角の乱数シード（同じシードなら同じ配置）
        #[arg(long)]
        seed: Option<u64>,

        /// ホバー表示する単語（拡大とツールチップ）
        #[arg(long)]
        highlight: Option<String>,

        /// SVGの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 統計・表・グラフ・要約・ワードクラウドをまとめて取得
    Dashboard {
        /// 解析済みファイル名（複数指定時は順に切り替えて表示）
        #[arg(required = true, num_args = 1..)]
        filenames: Vec<String>,

        /// SVGの出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// レコードと感情集計をExcelに出力
    Export {
        /// 解析済みファイル名
        #[arg(required = true)]
        filename: String,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// グラフにするSurveyID
        #[arg(short, long)]
        survey: Option<String>,

        /// バックエンドの代わりにローカルJSONを読む
        #[arg(long)]
        local: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// バックエンドURLを設定
        #[arg(long)]
        set_api_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
