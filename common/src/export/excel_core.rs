//! Excel生成（共通ライブラリ）
//!
//! - `Records` シート: レコードをそのまま（見出しは元のキー）
//! - `Sentiment` シート: アンケートごとの5区分集計と、選択アンケートの棒グラフ

use crate::error::Result;
use crate::schema::{infer_columns, HeaderStyle};
use crate::sentiment::{survey_ids, SentimentBucket, SentimentChart};
use crate::types::{scalar_text, Record};
use rust_xlsxwriter::*;
use serde_json::Value;

pub const RECORDS_SHEET: &str = "Records";
pub const SENTIMENT_SHEET: &str = "Sentiment";

const HEADER_COLOR: u32 = 0xF5F5F5;
const BORDER_COLOR: u32 = 0xCCCCCC;
const SURVEY_COL_WIDTH: f64 = 14.0;
const BUCKET_COL_WIDTH: f64 = 15.0;

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_COLOR))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(BORDER_COLOR))
}

/// セル値を型に応じて書き込む（null・欠損は空セル）
fn write_value(worksheet: &mut Worksheet, row: u32, col: u16, value: Option<&Value>) -> Result<()> {
    match value {
        None | Some(Value::Null) => {}
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) => {
                worksheet.write_number(row, col, f)?;
            }
            None => {
                worksheet.write_string(row, col, &n.to_string())?;
            }
        },
        Some(Value::Bool(b)) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        Some(other) => {
            worksheet.write_string(row, col, &scalar_text(other))?;
        }
    }
    Ok(())
}

fn write_records_sheet(workbook: &mut Workbook, records: &[Record]) -> Result<()> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(RECORDS_SHEET)?;

    let columns = infer_columns(records, HeaderStyle::Raw);
    let header = header_format();

    for (col, column) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, &column.header, &header)?;
    }

    for (row, record) in records.iter().enumerate() {
        for (col, column) in columns.iter().enumerate() {
            write_value(worksheet, row as u32 + 1, col as u16, record.get(&column.key))?;
        }
    }

    if !columns.is_empty() {
        worksheet.set_freeze_panes(1, 0)?;
    }
    Ok(())
}

/// 集計表と選択アンケートのグラフを書く
fn write_sentiment_sheet(
    workbook: &mut Workbook,
    records: &[Record],
    selected_survey: Option<&str>,
) -> Result<()> {
    let ids = survey_ids(records);
    let header = header_format();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SENTIMENT_SHEET)?;
    worksheet.set_column_width(0, SURVEY_COL_WIDTH)?;
    worksheet.write_string_with_format(0, 0, "SurveyID", &header)?;

    for (i, bucket) in SentimentBucket::ALL.iter().enumerate() {
        let col = i as u16 + 1;
        worksheet.set_column_width(col, BUCKET_COL_WIDTH)?;
        worksheet.write_string_with_format(0, col, bucket.label(), &header)?;
    }

    let mut chart_row = None;
    for (i, id) in ids.iter().enumerate() {
        let row = i as u32 + 1;
        let chart = SentimentChart::build(records, id);

        worksheet.write_string(row, 0, id)?;
        for (j, point) in chart.series.iter().enumerate() {
            worksheet.write_number(row, j as u16 + 1, point.value as f64)?;
        }

        if selected_survey == Some(id.as_str()) {
            chart_row = Some((row, id.clone()));
        }
    }

    // 未指定なら先頭のアンケート
    let chart_row = chart_row.or_else(|| ids.first().map(|id| (1, id.clone())));

    if let Some((row, survey_id)) = chart_row {
        let mut chart = Chart::new(ChartType::Column);
        chart.title().set_name(&format!("Sentiment Analysis: Survey {}", survey_id));
        chart.legend().set_hidden();

        let points: Vec<ChartPoint> = SentimentBucket::ALL
            .iter()
            .map(|bucket| {
                ChartPoint::new().set_format(
                    ChartFormat::new()
                        .set_solid_fill(ChartSolidFill::new().set_color(Color::RGB(bucket.color()))),
                )
            })
            .collect();

        chart
            .add_series()
            .set_categories((SENTIMENT_SHEET, 0, 1, 0, 5))
            .set_values((SENTIMENT_SHEET, row, 1, row, 5))
            .set_points(&points);

        worksheet.insert_chart(ids.len() as u32 + 2, 0, &chart)?;
    }

    Ok(())
}

/// ダッシュボードのExcelをバッファに生成
///
/// # Arguments
/// * `records` - 解析済みレコード
/// * `selected_survey` - グラフにするSurveyID（`None` なら先頭のアンケート）
pub fn generate_dashboard_buffer(records: &[Record], selected_survey: Option<&str>) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    write_records_sheet(&mut workbook, records)?;
    write_sentiment_sheet(&mut workbook, records, selected_survey)?;

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_records() -> Vec<Record> {
        json!([
            {"ID": 1, "SurveyID": "1", "SurveyAnswer": "great", "PredictedSentiment": "Positive"},
            {"ID": 2, "SurveyID": "1", "SurveyAnswer": "bad", "PredictedSentiment": "Negative"},
            {"ID": 3, "SurveyID": "2", "SurveyAnswer": null, "PredictedSentiment": "Neutral"}
        ])
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect()
    }

    #[test]
    fn test_generate_dashboard_buffer_is_zip() {
        let buffer = generate_dashboard_buffer(&sample_records(), Some("2")).unwrap();
        assert!(buffer.len() > 100);
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_generate_dashboard_buffer_unknown_survey_falls_back() {
        let buffer = generate_dashboard_buffer(&sample_records(), Some("missing")).unwrap();
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_generate_dashboard_buffer_empty() {
        let buffer = generate_dashboard_buffer(&[], None).unwrap();
        assert_eq!(&buffer[..2], b"PK");
    }
}
