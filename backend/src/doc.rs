//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the room listing endpoint and the schemas it returns.
//! The document backs Swagger UI in debug builds and is exported with
//! `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::domain::{FailureType, FilterError, FilterErrorCode, ResponseFailure, Room, RoomCode};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rentomatic API",
        description = "Read-only listing of rentable rooms with attribute filters."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(crate::inbound::http::rooms::list_rooms),
    components(schemas(Room, RoomCode, ResponseFailure, FailureType, FilterError, FilterErrorCode)),
    tags(
        (name = "rooms", description = "Room listing")
    )
)]
pub struct ApiDoc;
