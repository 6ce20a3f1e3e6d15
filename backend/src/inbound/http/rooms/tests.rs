//! Tests for the room listing handler.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockRoomListQuery, RoomListQuery};
use crate::domain::{Bounds, FailureType, Room, RoomCode, RoomFilters, RoomListService};
use crate::outbound::memory::InMemoryRoomRepository;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

async fn get_rooms(rooms: Arc<dyn RoomListQuery>, uri: &str) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::new(rooms)))
            .service(list_rooms),
    )
    .await;

    let request = actix_test::TestRequest::get().uri(uri).to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    assert_eq!(
        response
            .headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).expect("json body");
    (status, value)
}

fn sample_service() -> Arc<dyn RoomListQuery> {
    Arc::new(RoomListService::new(Arc::new(InMemoryRoomRepository::sample())))
}

#[rstest]
fn percent_encoded_values_are_decoded() {
    let pairs = filter_pairs("filter_code=f853578c%2Dfc0f&filter_latitude_min=51%2E5")
        .expect("well-formed query");

    assert_eq!(
        pairs,
        [
            ("code".to_owned(), "f853578c-fc0f".to_owned()),
            ("latitude_min".to_owned(), "51.5".to_owned()),
        ]
    );
}

#[rstest]
fn filter_pairs_strip_the_prefix_and_ignore_others() {
    let pairs = filter_pairs("filter_price_min=40&page=2&filter_code=abc&filter_=x")
        .expect("well-formed query");

    assert_eq!(
        pairs,
        [
            ("price_min".to_owned(), "40".to_owned()),
            ("code".to_owned(), "abc".to_owned()),
            (String::new(), "x".to_owned()),
        ]
    );
}

#[rstest]
#[actix_web::test]
async fn unfiltered_request_lists_every_room() {
    let (status, body) = get_rooms(sample_service(), "/rooms").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(4));
    assert_eq!(
        body[0],
        json!({
            "code": "f853578c-fc0f-4e65-81b8-566c5dffa35a",
            "size": 215,
            "price": 39,
            "longitude": -0.09998975,
            "latitude": 51.75436293,
        })
    );
}

#[rstest]
#[case("/rooms?filter_price_max=48", 2)]
#[case("/rooms?filter_price_min=48&filter_price_max=60", 2)]
#[case("/rooms?filter_code=913694c6-435a-4366-ba0d-da5334a611b2", 1)]
#[case("/rooms?filter_latitude_min=51.7", 2)]
#[case("/rooms?filter_size_min=1000", 0)]
#[case("/rooms?page=2&sort=price", 4)]
#[actix_web::test]
async fn filters_narrow_the_listing(#[case] uri: &str, #[case] expected: usize) {
    let (status, body) = get_rooms(sample_service(), uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(expected));
}

#[rstest]
#[actix_web::test]
async fn invalid_filters_return_bad_request() {
    let (status, body) = get_rooms(
        sample_service(),
        "/rooms?filter_price_min=abc&filter_colour=red",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["type"], "ParametersError");
    assert_eq!(
        body["message"],
        "price_min: price_min must be an integer\ncolour: filter colour cannot be used"
    );
    assert_eq!(body["details"][0]["code"], "invalid_integer");
    assert_eq!(body["details"][1]["code"], "unknown_filter");
}

#[rstest]
#[case(FailureType::ResourceError, StatusCode::NOT_FOUND)]
#[case(FailureType::SystemError, StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn failures_map_to_statuses(#[case] kind: FailureType, #[case] expected: StatusCode) {
    let mut query = MockRoomListQuery::new();
    query
        .expect_list_rooms()
        .times(1)
        .return_once(move |_| Err(ResponseFailure::new(kind, "boom")));

    let (status, body) = get_rooms(Arc::new(query), "/rooms").await;

    assert_eq!(status, expected);
    assert_eq!(body, json!({ "type": format!("{kind:?}"), "message": "boom" }));
}

#[rstest]
#[actix_web::test]
async fn handler_passes_validated_filters_to_the_use_case() {
    let room = Room::new(RoomCode::random(), 10, 10, 0.0, 0.0);
    let returned = vec![room];
    let mut query = MockRoomListQuery::new();
    query
        .expect_list_rooms()
        .withf(|request| {
            let expected = RoomFilters::none().with_size(Bounds::unbounded().with_exact(10));
            matches!(request, RoomListRequest::Valid(filters) if *filters == expected)
        })
        .times(1)
        .return_once(move |_| Ok(returned));

    let (status, body) = get_rooms(Arc::new(query), "/rooms?filter_size=10").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[rstest]
#[actix_web::test]
async fn empty_results_are_successful() {
    let (status, body) = get_rooms(
        Arc::new(RoomListService::new(Arc::new(InMemoryRoomRepository::default()))),
        "/rooms",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[rstest]
#[actix_web::test]
async fn listings_use_the_success_status() {
    let (status, _) = get_rooms(sample_service(), "/rooms?filter_price_max=60").await;

    assert_eq!(status, status_for(ResponseType::Success));
}
