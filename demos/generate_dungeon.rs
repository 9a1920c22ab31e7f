//! Example: Generate a dungeon
//!
//! Demonstrates the full generation pipeline and prints the map as ASCII.

use dungeon_layout::*;

fn main() -> Result<()> {
    println!("Dungeon Generation Example");
    println!("==========================\n");

    let config = DungeonConfigBuilder::new()
        .seed(42)
        .size(UVec2::new(72, 41))?
        .room_count(20)?
        .extra_hallway_chance(0.2)?
        .build()?;

    println!("Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Size: {}x{}", config.size.x, config.size.y);
    println!("  Room attempts: {}", config.room_count);
    println!("  Extra hallway chance: {}", config.extra_hallway_chance);
    println!();

    let dungeon = Dungeon::generate(config);

    println!("Statistics:");
    println!("  Rooms: {}", dungeon.rooms().len());
    println!("  Triangulation edges: {}", dungeon.triangulation_edges().len());
    println!("  Spanning tree edges: {}", dungeon.spanning_edges().len());
    println!("  Hallways routed: {}", dungeon.hallways().len());
    println!("  Hallway tiles: {}", dungeon.hallway_tile_count());
    println!("  Fully connected: {}", dungeon.is_fully_connected());
    println!();

    let size = dungeon.size();
    for y in 0..size.y as i32 {
        let row: String = (0..size.x as i32)
            .map(|x| match dungeon.cell(IVec2::new(x, y)) {
                Some(CellType::Room) => '#',
                Some(CellType::Hallway) => '+',
                _ => '.',
            })
            .collect();
        println!("{}", row);
    }

    if let Some(room) = dungeon.rooms().first() {
        println!("\nRoom 0 reaches {} rooms", dungeon.connected_rooms(room.id).len());
    }

    Ok(())
}
