use super::{RequestedId, parse_body};
use crate::error::{ApiError, ApiErrorExt};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bps::domain::constants::ORDERS_TAG;
use bps::domain::order::{Location, OrderSummary, PickupDate};
use bps::features::orders::{OrderQuery, Orders};
use bps::kernel::ApiState;
use bps_derive::{api_handler, api_model};
use tracing::debug;

const USAGE: &str = "\
Look up pickup orders. Send a JSON body with one of:

  order_id                                  the order with this id
  state, city, street_address, zip_code     every pickup at this location
  ... plus day, month, year                 pickups at this location on that day

A date is only used when day, month and year are all given.
";

const MISSING_LOCATION: &str = "ERROR: please provide: state, city, street_address, zip_code";

#[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
/// Order lookup. `order_id` wins over the location fields.
pub struct InfoRequest {
    #[schema(value_type = Option<u64>)]
    pub order_id: Option<RequestedId>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub street_address: Option<String>,
    pub zip_code: Option<String>,
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl InfoRequest {
    /// The lookup to run; `None` when the requested id cannot name any order.
    fn into_query(self) -> Result<Option<OrderQuery>, ApiError> {
        if let Some(requested) = self.order_id {
            let id = requested.order_id();
            if id.is_none() {
                debug!(order_id = %requested, "Order id is not an integer");
            }
            return Ok(id.map(OrderQuery::ById));
        }

        let date = match (self.day, self.month, self.year) {
            (Some(day), Some(month), Some(year)) => Some(PickupDate { day, month, year }),
            (None, None, None) => None,
            _ => {
                debug!("Partial pickup date ignored");
                None
            }
        };

        match (self.state, self.city, self.street_address, self.zip_code) {
            (Some(state), Some(city), Some(street_address), Some(zip_code)) => Ok(Some(
                OrderQuery::by_location(Location { state, city, street_address, zip_code }, date),
            )),
            _ => Err(ApiError::bad_request(MISSING_LOCATION)),
        }
    }
}

#[api_model(rename_all = "snake_case")]
pub struct InfoResponse {
    pub orders: Vec<OrderSummary>,
}

#[api_handler(
    method(get, post),
    path = "/info",
    request_body(content = InfoRequest, content_type = "application/json"),
    responses(
        (status = OK, description = "Matching orders, possibly none", body = InfoResponse),
        (status = BAD_REQUEST, description = "Not JSON, or incomplete location", body = String),
    ),
    tag = ORDERS_TAG,
)]
pub(super) async fn info_handler(
    State(state): State<ApiState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request =
        parse_body::<InfoRequest>(&headers, &body).ok_or_else(|| ApiError::bad_request(USAGE))?;
    let orders = state.try_get_slice::<Orders>().context("Order lookup")?;

    let found = match request.into_query()? {
        Some(query) => {
            let found = orders.book.find(&query);
            debug!(?query, found = found.len(), "Order lookup");
            found
        }
        None => Vec::new(),
    };

    let body = InfoResponse { orders: found.iter().map(|o| o.summary()).collect() };
    let json = serde_json::to_string_pretty(&body).context("Encoding order list")?;

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], json).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bps::domain::order::OrderId;

    fn location_request() -> InfoRequest {
        InfoRequest {
            order_id: None,
            state: Some("Virginia".to_owned()),
            city: Some("Virginia Beach".to_owned()),
            street_address: Some("123 Example Street".to_owned()),
            zip_code: Some("12345".to_owned()),
            day: None,
            month: None,
            year: None,
        }
    }

    #[test]
    fn order_id_wins() {
        let request = InfoRequest { order_id: Some(RequestedId::from(4)), ..location_request() };
        assert_eq!(request.into_query().ok(), Some(Some(OrderQuery::ById(OrderId(4)))));
    }

    #[test]
    fn non_integer_order_id_matches_nothing() {
        let request: InfoRequest =
            serde_json::from_str(r#"{"order_id": "4", "state": "Virginia"}"#).expect("valid");
        assert_eq!(request.into_query().ok(), Some(None));
    }

    #[test]
    fn partial_date_is_dropped() {
        let request = InfoRequest { day: Some(20), month: Some(9), ..location_request() };
        let Ok(Some(OrderQuery::ByLocation { date, .. })) = request.into_query() else {
            panic!("expected a location query");
        };
        assert_eq!(date, None);
    }

    #[test]
    fn full_date_is_used() {
        let request =
            InfoRequest { day: Some(20), month: Some(9), year: Some(2023), ..location_request() };
        let Ok(Some(OrderQuery::ByLocation { date, .. })) = request.into_query() else {
            panic!("expected a location query");
        };
        assert_eq!(date, Some(PickupDate::new(2023, 9, 20)));
    }

    #[test]
    fn incomplete_location_is_rejected() {
        let request = InfoRequest { zip_code: None, ..location_request() };
        let err = request.into_query().expect_err("zip code is missing");
        assert_eq!(err.to_string(), MISSING_LOCATION);
    }
}
