use bps_derive::bps_error;
use std::borrow::Cow;

#[bps_error]
pub enum LoadError {
    #[error("I/O error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Missing key{}: {key}", format_context(.context))]
    MissingKey { key: &'static str, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn load() -> Result<String, LoadError> {
    Ok(std::fs::read_to_string("declarations.json").context("Loading declarations")?)
}

fn main() {
    let _ = load();
    let _ = LoadError::from("fallback");
}
