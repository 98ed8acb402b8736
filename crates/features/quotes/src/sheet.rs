use crate::error::{QuoteError, QuoteErrorExt};
use bps_domain::config::QuoteConfig;
use bps_domain::quote::Quote;
use rust_xlsxwriter::{Format, Workbook};

/// Row labels of the quote table, top to bottom.
pub const ROW_LABELS: [&str; 7] =
    ["Battery Type", "Weight", "Quality", "Assessed Value", "Bonus", "Shipping", "Total"];

/// Columns that receive the configured width.
const SIZED_COLUMNS: u16 = 10;

/// One cell of the rendered table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Header(String),
    Text(String),
    Number(f64),
}

/// Renders quotes into single-sheet xlsx workbooks.
///
/// Packages run left to right, one column each, followed by a summary column;
/// attributes run top to bottom.
#[derive(Debug, Clone)]
pub struct QuoteSheet {
    sheet_name: String,
    column_width: f64,
}

impl QuoteSheet {
    #[must_use]
    pub fn new(sheet_name: impl Into<String>, column_width: f64) -> Self {
        Self { sheet_name: sheet_name.into(), column_width }
    }

    #[must_use]
    pub fn from_config(config: &QuoteConfig) -> Self {
        Self::new(config.sheet_name.clone(), config.column_width)
    }

    #[must_use]
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// The table as rows of cells, header row first.
    #[must_use]
    pub fn grid(&self, quote: &Quote) -> Vec<Vec<Cell>> {
        let columns = quote.lines.len() + 1;

        let mut header = Vec::with_capacity(columns + 1);
        header.push(Cell::Empty);
        header.extend((0..columns).map(|i| Cell::Header(i.to_string())));

        let mut rows = vec![header];
        for (row, label) in ROW_LABELS.iter().enumerate() {
            let mut cells = Vec::with_capacity(columns + 1);
            cells.push(Cell::Header((*label).to_owned()));

            for line in &quote.lines {
                cells.push(match row {
                    0 => Cell::Text(line.battery_type.clone()),
                    1 => Cell::Number(line.battery_weight),
                    2 => Cell::Number(f64::from(line.quality)),
                    3 => Cell::Number(line.assessed_value),
                    _ => Cell::Empty,
                });
            }

            cells.push(match row {
                1 => Cell::Number(quote.total_weight),
                3 => Cell::Number(quote.total_value),
                4 => Cell::Text(percent(quote.bonus_percent)),
                5 => Cell::Number(quote.shipping),
                6 => Cell::Number(quote.total),
                _ => Cell::Empty,
            });
            rows.push(cells);
        }
        rows
    }

    /// Writes `quote` as an xlsx workbook and returns its bytes.
    ///
    /// # Errors
    /// Returns [`QuoteError::Sheet`] when the workbook cannot be assembled.
    pub fn render(&self, quote: &Quote) -> Result<Vec<u8>, QuoteError> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name).context("Naming quote worksheet")?;

        for (row, cells) in self.grid(quote).iter().enumerate() {
            let row = u32::try_from(row)
                .map_err(|_| QuoteError::from("Quote sheet row index out of range"))?;
            for (col, cell) in cells.iter().enumerate() {
                let col = u16::try_from(col)
                    .map_err(|_| QuoteError::from("Too many packages for one quote sheet"))?;
                match cell {
                    Cell::Empty => {}
                    Cell::Header(text) => {
                        worksheet.write_string_with_format(row, col, text, &bold)?;
                    }
                    Cell::Text(text) => {
                        worksheet.write_string(row, col, text)?;
                    }
                    Cell::Number(value) => {
                        worksheet.write_number(row, col, *value)?;
                    }
                }
            }
        }

        for col in 0..SIZED_COLUMNS {
            worksheet.set_column_width(col, self.column_width)?;
        }

        workbook.save_to_buffer().context("Saving quote workbook")
    }
}

/// `5.0` reads `5.0%`, `2.5` reads `2.5%`: whole numbers keep one decimal place.
fn percent(value: f64) -> String {
    let mut text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text.push('%');
    text
}

impl Default for QuoteSheet {
    fn default() -> Self {
        Self::from_config(&QuoteConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bps_domain::quote::QuoteLine;

    fn quote() -> Quote {
        Quote {
            lines: vec![
                QuoteLine {
                    battery_type: "lithium-ion".to_owned(),
                    battery_weight: 12.5,
                    quality: 80,
                    assessed_value: 120.0,
                },
                QuoteLine {
                    battery_type: "lead-acid".to_owned(),
                    battery_weight: 30.0,
                    quality: 60,
                    assessed_value: 30.0,
                },
            ],
            total_weight: 42.5,
            total_value: 150.0,
            bonus_percent: 0.0,
            shipping: 75.0,
            total: 100.0,
        }
    }

    #[test]
    fn grid_is_transposed() {
        let grid = QuoteSheet::default().grid(&quote());

        assert_eq!(grid.len(), 8);
        assert!(grid.iter().all(|row| row.len() == 4));
        assert_eq!(
            grid[0],
            vec![
                Cell::Empty,
                Cell::Header("0".to_owned()),
                Cell::Header("1".to_owned()),
                Cell::Header("2".to_owned()),
            ]
        );

        let labels: Vec<_> = grid[1..].iter().map(|row| row[0].clone()).collect();
        let expected: Vec<_> = ROW_LABELS.iter().map(|l| Cell::Header((*l).to_owned())).collect();
        assert_eq!(labels, expected);

        assert_eq!(grid[1][1], Cell::Text("lithium-ion".to_owned()));
        assert_eq!(grid[3][2], Cell::Number(60.0));
        assert_eq!(grid[4][2], Cell::Number(30.0));
    }

    #[test]
    fn per_package_columns_leave_totals_blank() {
        let grid = QuoteSheet::default().grid(&quote());
        for row in 5..=7 {
            assert_eq!(grid[row][1], Cell::Empty);
            assert_eq!(grid[row][2], Cell::Empty);
        }
    }

    #[test]
    fn summary_column() {
        let grid = QuoteSheet::default().grid(&quote());
        let summary: Vec<_> = grid[1..].iter().map(|row| row[3].clone()).collect();

        assert_eq!(
            summary,
            vec![
                Cell::Empty,
                Cell::Number(42.5),
                Cell::Empty,
                Cell::Number(150.0),
                Cell::Text("0.0%".to_owned()),
                Cell::Number(75.0),
                Cell::Number(100.0),
            ]
        );
    }

    #[test]
    fn bonus_keeps_a_decimal_place() {
        assert_eq!(percent(0.0), "0.0%");
        assert_eq!(percent(5.0), "5.0%");
        assert_eq!(percent(2.5), "2.5%");
        assert_eq!(percent(12.75), "12.75%");
    }

    #[test]
    fn empty_order_still_has_a_summary() {
        let empty = Quote {
            lines: Vec::new(),
            total_weight: 0.0,
            total_value: 0.0,
            bonus_percent: 0.0,
            shipping: 5.0,
            total: 100.0,
        };
        let grid = QuoteSheet::default().grid(&empty);
        assert_eq!(grid[0].len(), 2);
        assert_eq!(grid[7][1], Cell::Number(100.0));
    }
}
