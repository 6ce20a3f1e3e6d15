//! In-memory room repository.
//!
//! Backs the service when no database is configured and gives tests a
//! deterministic adapter with the same filter semantics as PostgreSQL.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{RoomRepository, RoomRepositoryError};
use crate::domain::{Room, RoomCode, RoomFilters};

const SAMPLE_ROOMS: [(Uuid, i32, i32, f64, f64); 4] = [
    (
        Uuid::from_u128(0xf853578c_fc0f_4e65_81b8_566c5dffa35a),
        215,
        39,
        -0.09998975,
        51.75436293,
    ),
    (
        Uuid::from_u128(0xfe2c3195_aeff_487a_a08f_e0bdc0ec6e9a),
        405,
        66,
        0.18228006,
        51.74640997,
    ),
    (
        Uuid::from_u128(0x913694c6_435a_4366_ba0d_da5334a611b2),
        56,
        60,
        0.27891577,
        51.45994069,
    ),
    (
        Uuid::from_u128(0xeed76e77_55c1_41ce_985d_ca49bf6c0585),
        93,
        48,
        0.33894476,
        51.39916678,
    ),
];

/// Room repository over an owned list, preserving insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoomRepository {
    rooms: Vec<Room>,
}

impl InMemoryRoomRepository {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    /// Four rooms around Oxford and London used by local development.
    pub fn sample() -> Self {
        Self::new(
            SAMPLE_ROOMS
                .into_iter()
                .map(|(code, size, price, longitude, latitude)| {
                    Room::new(RoomCode::from_uuid(code), size, price, longitude, latitude)
                })
                .collect(),
        )
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }
}

impl FromIterator<Room> for InMemoryRoomRepository {
    fn from_iter<I: IntoIterator<Item = Room>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn list(&self, filters: &RoomFilters) -> Result<Vec<Room>, RoomRepositoryError> {
        Ok(self
            .rooms
            .iter()
            .filter(|room| filters.matches(room))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bounds, RoomListRequest};
    use rstest::{fixture, rstest};

    #[fixture]
    fn repository() -> InMemoryRoomRepository {
        InMemoryRoomRepository::sample()
    }

    fn codes(rooms: &[Room]) -> Vec<String> {
        rooms.iter().map(|room| room.code().to_string()).collect()
    }

    #[rstest]
    #[tokio::test]
    async fn lists_every_room_without_filters(repository: InMemoryRoomRepository) {
        let rooms = repository
            .list(&RoomFilters::none())
            .await
            .expect("in-memory listing succeeds");

        assert_eq!(rooms, repository.rooms());
    }

    #[rstest]
    #[case(Bounds::unbounded().with_exact(60), &["913694c6-435a-4366-ba0d-da5334a611b2"])]
    #[case(
        Bounds::unbounded().with_max(48),
        &["f853578c-fc0f-4e65-81b8-566c5dffa35a", "eed76e77-55c1-41ce-985d-ca49bf6c0585"]
    )]
    #[case(
        Bounds::unbounded().with_min(60),
        &["fe2c3195-aeff-487a-a08f-e0bdc0ec6e9a", "913694c6-435a-4366-ba0d-da5334a611b2"]
    )]
    #[case(
        Bounds::unbounded().with_min(48).with_max(66),
        &[
            "fe2c3195-aeff-487a-a08f-e0bdc0ec6e9a",
            "913694c6-435a-4366-ba0d-da5334a611b2",
            "eed76e77-55c1-41ce-985d-ca49bf6c0585",
        ]
    )]
    #[tokio::test]
    async fn price_filters_keep_insertion_order(
        repository: InMemoryRoomRepository,
        #[case] price: Bounds<i32>,
        #[case] expected: &[&str],
    ) {
        let rooms = repository
            .list(&RoomFilters::none().with_price(price))
            .await
            .expect("in-memory listing succeeds");

        assert_eq!(codes(&rooms), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn code_filter_returns_the_matching_room(repository: InMemoryRoomRepository) {
        let request =
            RoomListRequest::from_filters([("code", "fe2c3195-aeff-487a-a08f-e0bdc0ec6e9a")]);
        let RoomListRequest::Valid(filters) = request else {
            panic!("code filter is valid");
        };

        let rooms = repository.list(&filters).await.expect("listing succeeds");

        assert_eq!(codes(&rooms), ["fe2c3195-aeff-487a-a08f-e0bdc0ec6e9a"]);
    }

    #[rstest]
    #[tokio::test]
    async fn no_match_is_an_empty_list(repository: InMemoryRoomRepository) {
        let filters = RoomFilters::none().with_size(Bounds::unbounded().with_min(1_000));

        let rooms = repository.list(&filters).await.expect("listing succeeds");

        assert!(rooms.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn empty_repository_lists_nothing() {
        let repository: InMemoryRoomRepository = std::iter::empty().collect();
        let rooms = repository
            .list(&RoomFilters::none())
            .await
            .expect("listing succeeds");
        assert!(rooms.is_empty());
    }
}
