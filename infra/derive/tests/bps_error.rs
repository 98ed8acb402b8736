use std::borrow::Cow;

#[bps_derive::bps_error]
pub enum SheetError {
    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Internal sheet error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn open_missing() -> Result<String, SheetError> {
    let text = std::fs::read_to_string("/definitely/not/here.xlsx").context("Opening quote sheet")?;
    Ok(text)
}

#[test]
fn bps_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/bps_error_pass.rs");
}

#[test]
fn context_is_attached_to_source_errors() {
    let err = open_missing().expect_err("file must not exist");
    assert!(matches!(err, SheetError::Io { context: Some(_), .. }));
    assert!(err.to_string().starts_with("I/O error (Opening quote sheet): "));
}

#[test]
fn context_can_be_added_after_conversion() {
    let res: Result<(), SheetError> = Err("column overflow".into());
    let err = res.context("Writing totals").expect_err("error expected");
    assert_eq!(err.to_string(), "Internal sheet error (Writing totals): column overflow");
}

#[test]
fn owned_strings_become_internal_errors() {
    let err = SheetError::from(format!("row {} out of range", 8));
    assert_eq!(err.to_string(), "Internal sheet error: row 8 out of range");
}
