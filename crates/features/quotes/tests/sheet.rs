use bps_domain::config::QuoteConfig;
use bps_domain::quote::{Quote, QuoteLine};
use bps_quotes::{Cell, QuoteSheet};

fn quote(packages: usize) -> Quote {
    Quote {
        lines: (0..packages)
            .map(|_| QuoteLine {
                battery_type: "alkaline".to_owned(),
                battery_weight: 1.5,
                quality: 40,
                assessed_value: 2.5,
            })
            .collect(),
        total_weight: 1.5 * packages as f64,
        total_value: 2.5 * packages as f64,
        bonus_percent: 5.0,
        shipping: 17.5,
        total: 100.0,
    }
}

#[test]
fn render_produces_an_xlsx_archive() {
    let bytes = QuoteSheet::default().render(&quote(3)).expect("workbook renders");
    // xlsx is a zip container
    assert_eq!(&bytes[..4], b"PK\x03\x04");
}

#[test]
fn render_honours_configured_sheet_name() {
    let config =
        QuoteConfig { sheet_name: "Quote".to_owned(), column_width: 20.0, ..QuoteConfig::default() };
    let sheet = QuoteSheet::from_config(&config);

    assert_eq!(sheet.sheet_name(), "Quote");
    assert!(sheet.render(&quote(1)).is_ok());
}

#[test]
fn invalid_sheet_name_is_reported() {
    // Excel forbids '[' and ']' in worksheet names.
    let sheet = QuoteSheet::new("[quote]", 28.0);
    assert!(sheet.render(&quote(1)).is_err());
}

#[test]
fn bonus_is_shown_as_percentage() {
    let grid = QuoteSheet::default().grid(&quote(3));
    assert_eq!(grid[5][4], Cell::Text("5.0%".to_owned()));
}
