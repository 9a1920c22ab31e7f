//! Random room placement
//!
//! Each attempt draws a location and size from the seeded generator and keeps
//! the room only if it stays inside the map and keeps a one tile gap to every
//! room placed before it.

use glam::{IVec2, UVec2};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::DungeonConfig;
use crate::room::Room;

/// Tiles of clearance required between rooms
const ROOM_BUFFER: u32 = 1;

/// Place up to `config.room_count` non-overlapping rooms
///
/// Rejected attempts are not retried, so fewer rooms than requested is normal.
/// Accepted rooms are numbered in placement order.
pub fn place_rooms(config: &DungeonConfig, rng: &mut ChaCha8Rng) -> Vec<Room> {
    let mut rooms: Vec<Room> = Vec::new();

    // Keep the sampling range non-empty even for a config built by hand
    let max_location = config
        .size
        .saturating_sub(config.room_min_size + UVec2::ONE)
        .max(UVec2::ONE);
    let max_size = config.room_max_size.max(config.room_min_size);

    for _ in 0..config.room_count {
        let location = IVec2::new(
            rng.gen_range(0..max_location.x) as i32,
            rng.gen_range(0..max_location.y) as i32,
        );
        let size = UVec2::new(
            rng.gen_range(config.room_min_size.x..=max_size.x),
            rng.gen_range(config.room_min_size.y..=max_size.y),
        );

        let candidate = Room::new(rooms.len(), location, size);
        let buffer = candidate.expanded(ROOM_BUFFER);

        if rooms.iter().any(|room| room.intersects(&buffer)) {
            continue;
        }

        let end = candidate.end();
        if end.x >= config.size.x as i32 || end.y >= config.size.y as i32 {
            continue;
        }

        rooms.push(candidate);
    }

    log::debug!("placed {} of {} rooms", rooms.len(), config.room_count);
    rooms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DungeonConfigBuilder;
    use rand::SeedableRng;

    #[test]
    fn test_rooms_inside_map_and_apart() {
        let config = DungeonConfigBuilder::new()
            .seed(7)
            .room_count(60)
            .unwrap()
            .build()
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let rooms = place_rooms(&config, &mut rng);

        assert!(!rooms.is_empty());
        for (i, room) in rooms.iter().enumerate() {
            assert_eq!(room.id, i);
            assert!(room.position.x >= 0 && room.position.y >= 0);
            assert!(room.end().x < config.size.x as i32);
            assert!(room.end().y < config.size.y as i32);
            assert!(room.size.x >= config.room_min_size.x && room.size.x <= config.room_max_size.x);
            assert!(room.size.y >= config.room_min_size.y && room.size.y <= config.room_max_size.y);

            for other in &rooms[i + 1..] {
                assert!(!room.expanded(ROOM_BUFFER).intersects(other));
            }
        }
    }

    #[test]
    fn test_placement_is_deterministic() {
        let config = DungeonConfigBuilder::new().seed(99).build().unwrap();

        let first = place_rooms(&config, &mut ChaCha8Rng::seed_from_u64(config.seed));
        let second = place_rooms(&config, &mut ChaCha8Rng::seed_from_u64(config.seed));

        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_attempts() {
        let config = DungeonConfigBuilder::new()
            .seed(1)
            .room_count(0)
            .unwrap()
            .build()
            .unwrap();
        let rooms = place_rooms(&config, &mut ChaCha8Rng::seed_from_u64(config.seed));
        assert!(rooms.is_empty());
    }
}
