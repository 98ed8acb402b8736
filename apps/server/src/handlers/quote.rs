use super::{RequestedId, parse_body};
use crate::error::{ApiError, ApiErrorExt};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bps::domain::constants::{QUOTES_TAG, XLSX_CONTENT_TYPE};
use bps::features::orders::Orders;
use bps::features::quotes::{QuoteError, Quotes};
use bps::kernel::ApiState;
use bps_derive::{api_handler, api_model};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, info, warn};

const USAGE: &str = "\
Quotes for pickup orders. Send a JSON body with:

  order_id                 download the quote for this order as an xlsx workbook
  order_id, accept         accept (true) or reject (false) the quote
";

const NOT_A_BOOLEAN: &str = "answer was not true/false, using false";

#[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
/// Quote download, or the answer to a quote when `accept` is present.
pub struct QuoteRequest {
    #[schema(value_type = Option<u64>)]
    pub order_id: Option<RequestedId>,
    /// Any JSON value; only `true` and `false` are valid answers.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<bool>)]
    pub accept: Option<Value>,
}

/// Keeps an explicit `null` apart from a missing key.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

#[api_handler(
    method(get, post),
    path = "/quote",
    request_body(content = QuoteRequest, content_type = "application/json"),
    responses(
        (status = OK, description = "Quote workbook, confirmation of the answer, or usage text without JSON or an order id",
            content((Vec<u8> = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"), (String = "text/plain"))),
        (status = BAD_REQUEST, description = "Unknown order, or a non-boolean answer", body = String),
    ),
    tag = QUOTES_TAG,
)]
pub(super) async fn quote_handler(
    State(state): State<ApiState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let Some(QuoteRequest { order_id: Some(id), accept }) =
        parse_body::<QuoteRequest>(&headers, &body)
    else {
        return Ok((StatusCode::OK, USAGE).into_response());
    };

    match accept {
        None => download(&state, &id),
        Some(answer) => reply(&state, &id, &answer),
    }
}

fn download(state: &ApiState, requested: &RequestedId) -> Result<Response, ApiError> {
    let orders = state.try_get_slice::<Orders>().context("Quote download")?;
    let quotes = state.try_get_slice::<Quotes>().context("Quote download")?;
    let failed = || ApiError::bad_request(format!("failed to create quote for order {requested}"));

    let Some(id) = requested.order_id() else {
        warn!(order_id = %requested, "Quote requested for a non-integer order id");
        return Err(failed());
    };

    let quote = match orders.book.quote(id, |order| quotes.pricing.assess(order)) {
        Ok(Some(quote)) => quote,
        Ok(None) => {
            warn!(order_id = %id, "Quote requested for unknown order");
            return Err(failed());
        }
        Err(e) => {
            warn!(order_id = %id, error = %e, "Quote could not be priced");
            return Err(failed());
        }
    };

    let workbook = quotes.sheet.render(&quote).map_err(|e: QuoteError| {
        warn!(order_id = %id, error = %e, "Quote sheet could not be rendered");
        failed()
    })?;

    info!(order_id = %id, total = quote.total, bytes = workbook.len(), "Quote sent");
    let disposition = format!("attachment; filename=\"order_{id}_quote.xlsx\"");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        workbook,
    )
        .into_response())
}

fn reply(state: &ApiState, requested: &RequestedId, answer: &Value) -> Result<Response, ApiError> {
    let orders = state.try_get_slice::<Orders>().context("Quote reply")?;
    let record = |accepted: bool| match requested.order_id() {
        Some(id) => {
            orders.book.reply(id, accepted);
        }
        None => debug!(order_id = %requested, "Answer for a non-integer order id ignored"),
    };

    let Some(accepted) = answer.as_bool() else {
        warn!(order_id = %requested, %answer, "Quote answer is not a boolean, rejecting");
        record(false);
        return Ok((StatusCode::BAD_REQUEST, NOT_A_BOOLEAN).into_response());
    };

    record(accepted);
    info!(order_id = %requested, accepted, "Quote answered");
    Ok((StatusCode::OK, confirmation(requested, accepted)).into_response())
}

/// The reply to an answered quote, with the answer spelled `True` or `False`.
fn confirmation(requested: &RequestedId, accepted: bool) -> String {
    let answer = if accepted { "True" } else { "False" };
    format!("Order ID: {requested} set to {answer}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_answer_is_kept_apart_from_no_answer() {
        let missing: QuoteRequest = serde_json::from_str(r#"{"order_id": 4}"#).expect("valid");
        let null: QuoteRequest =
            serde_json::from_str(r#"{"order_id": 4, "accept": null}"#).expect("valid");

        assert_eq!(missing.accept, None);
        assert_eq!(null.accept, Some(Value::Null));
    }

    #[test]
    fn confirmation_spells_the_answer_capitalised() {
        assert_eq!(confirmation(&RequestedId::from(4), true), "Order ID: 4 set to True");
        assert_eq!(confirmation(&RequestedId::from(4), false), "Order ID: 4 set to False");
    }
}
