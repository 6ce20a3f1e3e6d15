//! Room listing endpoint.
//!
//! ```text
//! GET /rooms?filter_price_min=40&filter_price_max=60
//! ```
//!
//! Every query parameter prefixed with `filter_` becomes a filter with the
//! prefix removed; other parameters are ignored.

use actix_web::{HttpRequest, HttpResponse, get, web};

use crate::domain::{ResponseFailure, ResponseType, RoomListRequest};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::status_for;

const FILTER_PREFIX: &str = "filter_";

/// Collect `filter_*` pairs from a raw query string, prefix stripped.
fn filter_pairs(query_string: &str) -> Result<Vec<(String, String)>, ResponseFailure> {
    let web::Query(pairs) = web::Query::<Vec<(String, String)>>::from_query(query_string)
        .map_err(|err| ResponseFailure::parameters_error(format!("malformed query string: {err}")))?;

    Ok(pairs
        .into_iter()
        .filter_map(|(name, value)| {
            name.strip_prefix(FILTER_PREFIX)
                .map(|filter| (filter.to_owned(), value))
        })
        .collect())
}

/// List rooms, optionally filtered.
#[utoipa::path(
    get,
    path = "/rooms",
    description = "Return the rooms matching every supplied filter. Bounds are inclusive. Example request: GET /rooms?filter_price_max=60",
    params(
        ("filter_code" = Option<String>, Query, description = "Exact room code (UUID)"),
        ("filter_size" = Option<i32>, Query, description = "Exact size"),
        ("filter_size_min" = Option<i32>, Query, description = "Minimum size"),
        ("filter_size_max" = Option<i32>, Query, description = "Maximum size"),
        ("filter_price" = Option<i32>, Query, description = "Exact price"),
        ("filter_price_min" = Option<i32>, Query, description = "Minimum price"),
        ("filter_price_max" = Option<i32>, Query, description = "Maximum price"),
        ("filter_longitude_min" = Option<f64>, Query, description = "Western bound"),
        ("filter_longitude_max" = Option<f64>, Query, description = "Eastern bound"),
        ("filter_latitude_min" = Option<f64>, Query, description = "Southern bound"),
        ("filter_latitude_max" = Option<f64>, Query, description = "Northern bound"),
    ),
    responses(
        (status = 200, description = "Matching rooms", body = [crate::domain::Room]),
        (status = 400, description = "Invalid filters", body = ResponseFailure),
        (status = 404, description = "Resource not found", body = ResponseFailure),
        (status = 500, description = "Storage failure", body = ResponseFailure)
    ),
    tags = ["rooms"],
    operation_id = "listRooms"
)]
#[get("/rooms")]
pub async fn list_rooms(
    state: web::Data<HttpState>,
    request: HttpRequest,
) -> Result<HttpResponse, ResponseFailure> {
    let filters = filter_pairs(request.query_string())?;
    let rooms = state
        .rooms
        .list_rooms(RoomListRequest::from_filters(filters))
        .await?;
    Ok(HttpResponse::build(status_for(ResponseType::Success)).json(rooms))
}

#[cfg(test)]
mod tests;
