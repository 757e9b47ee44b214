use google_sheets4::api::{
    BasicChartAxis, BasicChartDomain, BasicChartSeries, BasicChartSpec, CellData, ChartData,
    ChartSourceRange, ChartSpec, EmbeddedChart, EmbeddedObjectPosition, GridCoordinate, GridData,
    GridRange, OverlayPosition, RowData, Sheet, Spreadsheet, SpreadsheetProperties,
};

use crate::domain::record::MemorizationRecord;
use crate::sheets::cell::{CellDataFactory, ContractViolation};

const DATE_COLUMN: i32 = 0;
const DURATION_COLUMN: i32 = 1;

const CHART_ANCHOR_ROW: i32 = 3;
const CHART_ANCHOR_COLUMN: i32 = 3;
const CHART_WIDTH_PIXELS: i32 = 850;

pub trait SpreadsheetFactory: Sized {
    fn from_records(
        title: &str,
        records: &[MemorizationRecord],
    ) -> Result<Self, ContractViolation>;
}

impl SpreadsheetFactory for Spreadsheet {
    /// Grid with a fixed `["Date", "Time"]` header row followed by one row
    /// per record, in the given order. The factory never sorts.
    fn from_records(
        title: &str,
        records: &[MemorizationRecord],
    ) -> Result<Self, ContractViolation> {
        let header = RowData {
            values: Some(vec![
                CellData::header_cell("Date"),
                CellData::header_cell("Time"),
            ]),
        };

        let mut rows = Vec::with_capacity(records.len() + 1);
        rows.push(header);
        for record in records {
            rows.push(RowData {
                values: Some(vec![
                    CellData::date_cell(record)?,
                    CellData::duration_cell(record),
                ]),
            });
        }

        let grid = GridData {
            start_row: Some(0),
            start_column: Some(0),
            row_data: Some(rows),
            ..Default::default()
        };

        Ok(Spreadsheet {
            properties: Some(SpreadsheetProperties {
                title: Some(title.to_string()),
                ..Default::default()
            }),
            sheets: Some(vec![Sheet {
                data: Some(vec![grid]),
                ..Default::default()
            }]),
            ..Default::default()
        })
    }
}

pub trait EmbeddedChartFactory: Sized {
    fn line_chart(title: &str, sheet_id: i32, value_count: i32) -> Self;
}

impl EmbeddedChartFactory for EmbeddedChart {
    /// Line chart over the first two columns of `sheet_id`: domain is the
    /// date column, series is the duration column, both over rows
    /// `[0, value_count)`. `value_count` must match the number of data
    /// rows written to the sheet; that is the caller's contract.
    fn line_chart(title: &str, sheet_id: i32, value_count: i32) -> Self {
        EmbeddedChart {
            spec: Some(ChartSpec {
                title: Some(title.to_string()),
                basic_chart: Some(BasicChartSpec {
                    chart_type: Some("LINE".to_string()),
                    legend_position: Some("NO_LEGEND".to_string()),
                    axis: Some(vec![
                        BasicChartAxis {
                            position: Some("BOTTOM_AXIS".to_string()),
                            title: Some("Date".to_string()),
                            ..Default::default()
                        },
                        BasicChartAxis {
                            position: Some("LEFT_AXIS".to_string()),
                            title: Some("Time".to_string()),
                            ..Default::default()
                        },
                    ]),
                    domains: Some(vec![BasicChartDomain {
                        domain: Some(column_chart_data(sheet_id, DATE_COLUMN, value_count)),
                        ..Default::default()
                    }]),
                    series: Some(vec![BasicChartSeries {
                        series: Some(column_chart_data(sheet_id, DURATION_COLUMN, value_count)),
                        target_axis: Some("LEFT_AXIS".to_string()),
                        ..Default::default()
                    }]),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            position: Some(EmbeddedObjectPosition {
                overlay_position: Some(OverlayPosition {
                    anchor_cell: Some(GridCoordinate {
                        sheet_id: Some(sheet_id),
                        row_index: Some(CHART_ANCHOR_ROW),
                        column_index: Some(CHART_ANCHOR_COLUMN),
                    }),
                    width_pixels: Some(CHART_WIDTH_PIXELS),
                    height_pixels: None,
                    offset_x_pixels: Some(0),
                    offset_y_pixels: Some(0),
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

fn column_chart_data(sheet_id: i32, column: i32, value_count: i32) -> ChartData {
    ChartData {
        source_range: Some(ChartSourceRange {
            sources: Some(vec![GridRange {
                sheet_id: Some(sheet_id),
                start_row_index: Some(0),
                end_row_index: Some(value_count),
                start_column_index: Some(column),
                end_column_index: Some(column + 1),
            }]),
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<MemorizationRecord> {
        vec![
            MemorizationRecord::parse("2023-01-15", "03:45").unwrap(),
            MemorizationRecord::parse("2023-01-16", "125:07").unwrap(),
            MemorizationRecord::parse("2023-01-17", "10:00").unwrap(),
        ]
    }

    fn grid_rows(spreadsheet: &Spreadsheet) -> Vec<RowData> {
        spreadsheet.sheets.as_ref().unwrap()[0]
            .data
            .as_ref()
            .unwrap()[0]
            .row_data
            .clone()
            .unwrap()
    }

    #[test]
    fn test_sheet_has_header_plus_one_row_per_record() {
        let spreadsheet = Spreadsheet::from_records("Memorization", &sample_records()).unwrap();
        let rows = grid_rows(&spreadsheet);
        assert_eq!(rows.len(), 4);
        for row in &rows {
            assert_eq!(row.values.as_ref().unwrap().len(), 2);
        }
    }

    #[test]
    fn test_sheet_header_labels() {
        let spreadsheet = Spreadsheet::from_records("Memorization", &sample_records()).unwrap();
        let rows = grid_rows(&spreadsheet);
        let header = rows[0].values.as_ref().unwrap();
        let label = |cell: &CellData| {
            cell.user_entered_value
                .as_ref()
                .unwrap()
                .string_value
                .clone()
                .unwrap()
        };
        assert_eq!(label(&header[0]), "Date");
        assert_eq!(label(&header[1]), "Time");
    }

    #[test]
    fn test_sheet_title() {
        let spreadsheet = Spreadsheet::from_records("My title", &sample_records()).unwrap();
        assert_eq!(
            spreadsheet.properties.unwrap().title.as_deref(),
            Some("My title")
        );
    }

    #[test]
    fn test_sheet_preserves_record_order() {
        let spreadsheet = Spreadsheet::from_records("Memorization", &sample_records()).unwrap();
        let rows = grid_rows(&spreadsheet);
        let serial_dates: Vec<f64> = rows[1..]
            .iter()
            .map(|row| {
                row.values.as_ref().unwrap()[0]
                    .user_entered_value
                    .as_ref()
                    .unwrap()
                    .number_value
                    .unwrap()
            })
            .collect();
        assert!(serial_dates.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_sheet_with_undated_record_is_a_contract_violation() {
        let records = vec![MemorizationRecord::parse("", "03:45").unwrap()];
        assert!(Spreadsheet::from_records("Memorization", &records).is_err());
    }

    #[test]
    fn test_sheet_payload_is_deterministic() {
        let records = sample_records();
        let a = Spreadsheet::from_records("Memorization", &records).unwrap();
        let b = Spreadsheet::from_records("Memorization", &records).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    fn source_range(data: &ChartData) -> GridRange {
        data.source_range.as_ref().unwrap().sources.as_ref().unwrap()[0].clone()
    }

    #[test]
    fn test_chart_ranges_cover_value_count_rows() {
        let chart = EmbeddedChart::line_chart("Memorization", 7, 3);
        let basic = chart.spec.unwrap().basic_chart.unwrap();

        let domain_range = source_range(basic.domains.as_ref().unwrap()[0].domain.as_ref().unwrap());
        assert_eq!(domain_range.sheet_id, Some(7));
        assert_eq!(domain_range.start_row_index, Some(0));
        assert_eq!(domain_range.end_row_index, Some(3));
        assert_eq!(domain_range.start_column_index, Some(0));
        assert_eq!(domain_range.end_column_index, Some(1));

        let series_range = source_range(basic.series.as_ref().unwrap()[0].series.as_ref().unwrap());
        assert_eq!(series_range.start_row_index, Some(0));
        assert_eq!(series_range.end_row_index, Some(3));
        assert_eq!(series_range.start_column_index, Some(1));
        assert_eq!(series_range.end_column_index, Some(2));
    }

    #[test]
    fn test_chart_is_a_line_chart_without_legend() {
        let chart = EmbeddedChart::line_chart("Memorization", 0, 10);
        let basic = chart.spec.unwrap().basic_chart.unwrap();
        assert_eq!(basic.chart_type.as_deref(), Some("LINE"));
        assert_eq!(basic.legend_position.as_deref(), Some("NO_LEGEND"));
    }

    #[test]
    fn test_chart_axis_titles() {
        let chart = EmbeddedChart::line_chart("Memorization", 0, 10);
        let axis = chart.spec.unwrap().basic_chart.unwrap().axis.unwrap();
        assert_eq!(axis[0].position.as_deref(), Some("BOTTOM_AXIS"));
        assert_eq!(axis[0].title.as_deref(), Some("Date"));
        assert_eq!(axis[1].position.as_deref(), Some("LEFT_AXIS"));
        assert_eq!(axis[1].title.as_deref(), Some("Time"));
    }

    #[test]
    fn test_chart_overlay_anchor_and_width() {
        let chart = EmbeddedChart::line_chart("Memorization", 4, 10);
        let overlay = chart.position.unwrap().overlay_position.unwrap();
        let anchor = overlay.anchor_cell.unwrap();
        assert_eq!(anchor.sheet_id, Some(4));
        assert_eq!(anchor.row_index, Some(3));
        assert_eq!(anchor.column_index, Some(3));
        assert_eq!(overlay.width_pixels, Some(850));
        assert_eq!(overlay.offset_x_pixels, Some(0));
        assert_eq!(overlay.offset_y_pixels, Some(0));
    }
}
