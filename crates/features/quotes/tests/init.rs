use bps_domain::config::{DataConfig, QuoteConfig};
use bps_domain::registry::FeatureSlice;
use bps_quotes::{QuoteError, Quotes, init, load_declarations};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/declarations.json")
}

#[test]
fn init_loads_declarations() {
    let data = DataConfig { declarations: fixture(), simulation: None };
    let slice = init(&data, &QuoteConfig::default()).expect("init should succeed");

    assert_eq!(slice.id, std::any::TypeId::of::<Quotes>());
    let quotes = slice.state.as_any().downcast_ref::<Quotes>().expect("quotes slice");
    assert_eq!(quotes.pricing.declarations().battery_base_value.len(), 4);
    assert!((quotes.pricing.minimum_total() - 100.0).abs() < f64::EPSILON);
    assert_eq!(quotes.sheet.sheet_name(), "Sheet_1");
}

#[test]
fn missing_file_is_an_io_error() {
    let data = DataConfig { declarations: PathBuf::from("does/not/exist.json"), simulation: None };
    let err = init(&data, &QuoteConfig::default()).expect_err("file is missing");
    assert!(matches!(err, QuoteError::Io { .. }));
}

#[test]
fn missing_key_is_a_format_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("declarations.json");
    let full: serde_json::Value = serde_json::from_slice(&fs::read(fixture())?)?;
    let mut partial = full.clone();
    partial.as_object_mut().map(|o| o.remove("bonus"));
    fs::write(&path, serde_json::to_vec(&partial)?)?;

    let err = load_declarations(&path).expect_err("bonus is required");
    assert!(matches!(err, QuoteError::Declarations { .. }));
    assert!(err.to_string().contains("bonus"));
    Ok(())
}
