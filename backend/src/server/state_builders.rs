//! Builders for HTTP state from server configuration.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use rentomatic::domain::RoomListService;
use rentomatic::domain::ports::RoomRepository;
use rentomatic::inbound::http::state::HttpState;
use rentomatic::outbound::memory::InMemoryRoomRepository;
use rentomatic::outbound::persistence::DieselRoomRepository;

use super::ServerConfig;

/// Pick the room repository: PostgreSQL when a pool is configured, the
/// in-memory sample otherwise.
fn build_room_repository(config: &ServerConfig) -> Arc<dyn RoomRepository> {
    match &config.db_pool {
        Some(pool) => {
            info!("serving rooms from PostgreSQL");
            Arc::new(DieselRoomRepository::new(pool.clone()))
        }
        None => {
            info!("no database configured; serving in-memory sample rooms");
            Arc::new(InMemoryRoomRepository::sample())
        }
    }
}

pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let rooms = RoomListService::new(build_room_repository(config));
    web::Data::new(HttpState::new(Arc::new(rooms)))
}
