use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use survey_insight::client::DashboardClient;
use survey_insight::dashboard::Dashboard;
use survey_insight::{cli, config, export, interactive, local, progress, render};
use survey_insight_common::api::decode_filename;
use survey_insight_common::{
    layout_with_rng, survey_ids, Canvas, DatasetKey, HeaderStyle, HoverState, Paginator, Record, SentimentChart,
    SentimentFilter, SummaryPanel, SurveySelection,
};
use cli::{Cli, Commands};
use config::Config;
use progress::with_spinner;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// `--local` 指定時はJSONから、なければバックエンドから取得
async fn load_records(client: &DashboardClient, filename: &str, local_path: Option<&Path>) -> Result<Vec<Record>> {
    if let Some(path) = local_path {
        return local::load_records(path).with_context(|| format!("{} の読み込みに失敗", path.display()));
    }

    let data = with_spinner("Loading file data...", client.file_data(filename)).await?;
    println!("{}\n", render::render_stats(&data.stats(filename)));
    Ok(data.data)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content).with_context(|| format!("{} に書き込めません", path.display()))
}

fn file_stem(filename: &str) -> String {
    let display = decode_filename(filename);
    Path::new(&display)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("survey")
        .to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load().context("設定ファイルの読み込みに失敗")?;
    let api_url = config.api_base_url(cli.api_url.as_deref());
    let client = DashboardClient::new(&api_url, config.timeout_seconds)?;

    match cli.command {
        Commands::Upload { file } => {
            println!("📤 survey-insight - アップロード\n");

            println!("[1/2] {} を解析中...", file.display());
            let response = with_spinner("Analyzing...", client.upload(&file)).await?;
            if !response.is_success() {
                bail!("{}", response.message);
            }
            println!("✔ {}\n", response.message);

            let records = response.into_records()?;
            println!("[2/2] 解析結果 ({}件)", records.len());
            let paginator = Paginator::new(config.page_size);
            println!("{}", render::render_table(&records, HeaderStyle::Upper, &paginator));
        }

        Commands::Files => {
            let files = with_spinner("Loading files...", client.list_files()).await?;
            if files.is_empty() {
                println!("No files available");
            }
            for (i, name) in files.iter().enumerate() {
                println!("{:>3}. {}", i + 1, decode_filename(name));
            }
        }

        Commands::Table { filename, page, page_size, interactive, local } => {
            let records = load_records(&client, &filename, local.as_deref()).await?;

            let mut paginator = Paginator::new(page_size.unwrap_or(config.page_size));
            paginator.sync_dataset(DatasetKey::of(filename.as_str()));
            paginator.go_to(page.saturating_sub(1), records.len());

            if interactive {
                interactive::browse_table(&records, HeaderStyle::Raw, &mut paginator)?;
            } else {
                println!("{}", render::render_table(&records, HeaderStyle::Raw, &paginator));
            }
        }

        Commands::Chart { filename, survey, interactive, svg, local } => {
            let records = load_records(&client, &filename, local.as_deref()).await?;
            let ids = survey_ids(&records);

            let mut selection = SurveySelection::default();
            selection.sync(&ids);
            if let Some(id) = survey {
                selection.set_input(id);
                selection.submit();
            }
            if interactive {
                interactive::prompt_survey(&ids, &mut selection)?;
            }

            let Some(survey_id) = selection.selected() else {
                println!("{}", render::NO_DATA);
                return Ok(());
            };

            let chart = SentimentChart::build(&records, survey_id);
            println!("{}", render::render_bar_chart(&chart));

            if let Some(path) = svg {
                write_file(&path, &render::chart_svg(&chart, config.canvas_width, config.canvas_height))?;
                println!("\n✔ SVG出力: {}", path.display());
            }
        }

        Commands::Summary { filename, focus, json } => {
            let mut panel = SummaryPanel::default();
            panel.set_focus(focus);

            let (generation, request) = panel.regenerate();
            match with_spinner("Generating summary...", client.summary(&filename, &request)).await {
                Ok(response) => panel.receive(generation, Ok(response)),
                Err(e) => panel.fail(generation, e),
            };

            if let Some(e) = panel.error() {
                bail!("{}", e);
            }
            let Some(summary) = panel.summary() else {
                bail!("Failed to load summary");
            };

            if json {
                println!("{}", serde_json::to_string_pretty(summary)?);
            } else {
                println!("AI Summary ({})\n", panel.focus());
                println!("{}", render::render_summary(summary, None));
            }
        }

        Commands::Wordcloud { filename, filter, width, height, seed, highlight, output } => {
            let words = with_spinner("Loading word cloud...", client.wordcloud(&filename, filter)).await?;

            let canvas = Canvas::new(
                width.unwrap_or(config.canvas_width),
                height.unwrap_or(config.canvas_height),
            );
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let placed = layout_with_rng(&words, canvas, &mut rng);

            println!("Word Cloud ({}): {} / {} words placed\n", filter, placed.len(), words.len());
            println!("{}", render::render_placements(&placed));

            // ポインタは単語の中心（SVG座標）に置く
            let mut hover = HoverState::default();
            let tooltip = highlight.as_deref().and_then(|text| {
                let index = placed.iter().position(|w| w.text == text)?;
                let word = &placed[index];
                let pointer = (word.x + canvas.width / 2.0, word.y + canvas.height / 2.0);
                Some(hover.enter(index, word, pointer))
            });
            if let Some(tip) = &tooltip {
                println!("\n{}", tip.text);
            }

            if let Some(path) = output {
                let svg = render::wordcloud_svg(&placed, canvas, filter, &hover, tooltip.as_ref());
                write_file(&path, &svg)?;
                println!("\n✔ SVG出力: {}", path.display());
            }
        }

        Commands::Dashboard { filenames, output } => {
            let filter = SentimentFilter::All;
            let canvas = Canvas::new(config.canvas_width, config.canvas_height);
            let mut dashboard = Dashboard::new(&filenames[0], config.page_size);

            for (i, filename) in filenames.iter().enumerate() {
                if i > 0 {
                    dashboard.switch_file(filename);
                    println!("\n");
                }
                println!("📊 survey-insight - {}\n", decode_filename(filename));

                with_spinner("Loading dashboard...", dashboard.refresh(&client, filter)).await;

                let placed = dashboard.layout_words(canvas, &mut rand::thread_rng());
                println!("{}", dashboard.render_text(&placed));

                if let Some(dir) = &output {
                    let stem = file_stem(filename);
                    if let Some(chart) = dashboard.chart() {
                        let path = dir.join(format!("{}_chart.svg", stem));
                        write_file(&path, &render::chart_svg(&chart, config.canvas_width, config.canvas_height))?;
                        println!("\n✔ SVG出力: {}", path.display());
                    }
                    if dashboard.words().data().is_some() {
                        let path = dir.join(format!("{}_wordcloud.svg", stem));
                        write_file(&path, &dashboard.wordcloud_svg(&placed, canvas, filter))?;
                        println!("✔ SVG出力: {}", path.display());
                    }
                }
            }
        }

        Commands::Export { filename, output, survey, local } => {
            println!("📄 survey-insight - エクスポート\n");

            println!("[1/2] データを取得中...");
            let records = load_records(&client, &filename, local.as_deref()).await?;
            println!("✔ {}件\n", records.len());

            println!("[2/2] Excelを生成中...");
            let path: PathBuf = export::output_path(output.as_deref(), &filename, chrono::Local::now());
            export::export_dashboard(&records, survey.as_deref(), &path)?;
            println!("✔ Excel出力: {}", path.display());

            println!("\n✅ エクスポート完了");
        }

        Commands::Config { set_api_url, show } => {
            let mut config = config;

            if let Some(url) = set_api_url {
                config.set_api_url(&url)?;
                println!("✔ バックエンドURLを設定しました: {}", config.api_base_url);
            }

            if show {
                println!("設定:");
                println!("  バックエンドURL: {}", config.api_base_url);
                println!("  使用中のURL: {}", api_url);
                println!("  1ページの行数: {}", config.page_size);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  キャンバス: {}x{}", config.canvas_width, config.canvas_height);
            }
        }
    }

    Ok(())
}
