#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Attribute macros shared by the pickup service crates: error enums, feature
//! slice handles, HTTP data models and handlers, and the runtime entry point.
//!
//! The examples below are `ignore`d because a proc-macro crate cannot use its
//! own macros; the consuming crates' tests exercise them.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Turns `async fn main` into a plain `fn main` running on a `bps_runtime` profile.
///
/// # Arguments
///
/// * `high_performance` - Server profile: full worker pool, larger stacks.
/// * `default` - Worker threads detected from available parallelism.
///
/// The function must be `async` and return a `Result`.
///
/// # Examples
///
/// ```rust,ignore
/// #[bps_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Declares a request or response body for the HTTP API.
///
/// * Adds `Debug`, `Serialize` and `Deserialize` derives when missing.
/// * Adds `utoipa::ToSchema` so the model shows up in the `OpenAPI` document.
/// * Applies `rename_all = "camelCase"` and `deny_unknown_fields` unless
///   overridden through the arguments below.
///
/// # Arguments
///
/// * `rename_all = "snake_case"` - Overrides the default rename policy.
/// * `deny_unknown_fields = false` - Accepts unknown fields.
///
/// # Example
///
/// ```rust,ignore
/// use bps_derive::api_model;
///
/// #[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
/// pub struct QuoteRequest {
///     pub order_id: Option<u64>,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Registers an Axum handler with `utoipa::path`.
///
/// Accepts the usual `utoipa::path` arguments (`get`, `post`, `path = "..."`,
/// `responses(...)`, `tag = "..."`) and silences `clippy::unused_async`.
///
/// # Example
///
/// ```rust,ignore
/// use bps_derive::api_handler;
///
/// #[api_handler(
///     get,
///     path = "/health",
///     responses((status = OK, body = HealthResponse)),
///     tag = "System"
/// )]
/// pub async fn health_handler() -> impl IntoResponse {
///     // ...
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Defines a crate error enum.
///
/// # Features
///
/// * Injects `#[derive(Debug, thiserror::Error)]` when missing.
/// * Generates a companion `<Name>Ext` trait adding `.context(...)` to any
///   `Result` whose error converts into this enum.
/// * Implements `From<T>` for every variant with a `source` field (or a field
///   marked `#[source]`/`#[from]`), so `?` works on upstream errors.
/// * Implements `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists.
///
/// # Requirements
///
/// 1. Applied to an **enum** with named-field variants only.
/// 2. Variants with a source also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use bps_derive::bps_error;
/// use std::borrow::Cow;
///
/// #[bps_error]
/// pub enum LoadError {
///     #[error("I/O error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<String, LoadError> {
///     std::fs::read_to_string(path).context("Reading declarations")
/// }
/// ```
#[proc_macro_attribute]
pub fn bps_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Turns a struct into a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` wraps it in an `Arc`,
/// derefs to it and implements `bps_kernel::domain::registry::FeatureSlice`
/// so it can be registered in the API state.
///
/// # Example
/// ```rust,ignore
/// #[bps_derive::bps_slice]
/// pub struct Orders {
///     pub book: OrderBook,
/// }
///
/// fn init(book: OrderBook) -> Orders {
///     Orders::new(OrdersInner { book })
/// }
/// ```
#[proc_macro_attribute]
pub fn bps_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
