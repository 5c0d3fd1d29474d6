//! Rule-level invariants checked over full planning runs.
use std::collections::HashSet;

use argosy_game::{
    plan, CargoEffect, CargoKey, Colour, Inventory, MapData, PlanConfig, Position, RouteStep,
    Tile, TileId, TileKind, TraceEvent,
};

const COLOURS: [Colour; 3] = [Colour::Pink, Colour::Blue, Colour::Green];

fn corridor_map() -> MapData {
    let mut tiles = Vec::new();
    for col in 0..=33 {
        tiles.push(Tile::new(
            TileId(100 + u32::try_from(col).unwrap()),
            TileKind::Water,
            Position::new(col, 0),
        ));
    }
    tiles.push(Tile::new(TileId(0), TileKind::Start, Position::new(0, 1)));
    let kinds = [
        TileKind::Combat,
        TileKind::Offering,
        TileKind::Temple,
        TileKind::StatueSource,
        TileKind::StatueIsland,
    ];
    let mut id = 0;
    for (zone, colour) in [(2, Colour::Pink), (14, Colour::Blue), (26, Colour::Green)] {
        for (offset, kind) in kinds.iter().enumerate() {
            id += 1;
            let col = zone + i32::try_from(offset).unwrap();
            tiles.push(
                Tile::new(TileId(id), *kind, Position::new(col, 1)).with_colours(&[colour]),
            );
        }
    }
    for (n, col) in [(50, 13), (51, 20), (52, 32)] {
        tiles.push(Tile::new(TileId(n), TileKind::Shrine, Position::new(col, 1)));
    }
    MapData::new(tiles, TileId(0))
}

/// Replay the planned steps against the cargo rules; every pickup must fit
/// and every delivery must hand over something actually held.
#[test]
fn cargo_rules_hold_along_the_whole_route() {
    let map = corridor_map();
    let config = PlanConfig::new(COLOURS);
    let result = plan(&map, &config).unwrap();

    let mut hold = Inventory::new();
    for step in &result.steps {
        let RouteStep::Task(task) = step else { continue };
        match task.kind.cargo_effect() {
            None => {}
            Some(CargoEffect::Pickup(item)) => {
                assert!(
                    hold.try_pickup(CargoKey::new(item, task.colour), config.cargo_capacity),
                    "hold overfilled at {task:?}"
                );
            }
            Some(CargoEffect::Deliver(item)) => {
                assert!(
                    hold.try_deliver(CargoKey::new(item, task.colour)),
                    "delivery without matching cargo at {task:?}"
                );
            }
        }
    }
    assert_eq!(hold.total(), 0, "route ends with cargo still held: {hold}");
}

#[test]
fn every_required_task_is_visited_exactly_once() {
    let map = corridor_map();
    let result = plan(&map, &PlanConfig::new(COLOURS)).unwrap();

    let tiles: Vec<TileId> = result
        .steps
        .iter()
        .filter_map(|step| match step {
            RouteStep::Task(task) => Some(task.tile),
            _ => None,
        })
        .collect();
    assert_eq!(tiles.len(), 15);
    let unique: HashSet<TileId> = tiles.iter().copied().collect();
    assert_eq!(unique.len(), 15);
}

#[test]
fn trace_narrates_formation_commits_and_the_return_leg() {
    let map = corridor_map();
    let result = plan(&map, &PlanConfig::new(COLOURS)).unwrap();

    let formed = result
        .trace
        .iter()
        .filter(|event| matches!(event, TraceEvent::ClusterFormed { .. }))
        .count();
    let committed: Vec<TileId> = result
        .trace
        .iter()
        .filter_map(|event| match event {
            TraceEvent::ClusterCommitted { tiles, .. } => Some(tiles.iter().copied()),
            _ => None,
        })
        .flatten()
        .collect();
    assert_eq!(formed, 3);

    // Commit events, concatenated, spell out the task route.
    let task_order: Vec<TileId> = result
        .steps
        .iter()
        .filter_map(|step| match step {
            RouteStep::Task(task) => Some(task.tile),
            _ => None,
        })
        .collect();
    assert_eq!(committed, task_order);

    assert!(matches!(
        result.trace.last(),
        Some(TraceEvent::ReturnLeg { .. })
    ));
}

#[test]
fn turn_count_follows_move_total_and_capacity() {
    let map = corridor_map();
    let config = PlanConfig::new(COLOURS);
    let result = plan(&map, &config).unwrap();
    assert_eq!(
        result.stats.total_turns,
        result.stats.total_moves.div_ceil(config.turn_capacity)
    );
}

#[test]
fn shrine_target_zero_skips_shrines_entirely() {
    let map = corridor_map();
    let mut config = PlanConfig::new(COLOURS);
    config.shrine_target = 0;
    let result = plan(&map, &config).unwrap();

    assert!(result.shrines_visited.is_empty());
    assert!(result
        .steps
        .iter()
        .all(|step| !matches!(step, RouteStep::Shrine(_))));
}

#[test]
fn shrine_target_beyond_supply_visits_each_shrine_once() {
    let map = corridor_map();
    let mut config = PlanConfig::new(COLOURS);
    config.shrine_target = 10;
    let result = plan(&map, &config).unwrap();

    assert_eq!(result.shrines_visited.len(), 3);
    let unique: HashSet<Position> = result.shrines_visited.iter().copied().collect();
    assert_eq!(unique.len(), 3);
}

#[test]
fn tight_spread_fragments_clusters_without_losing_tasks() {
    let map = corridor_map();
    let mut config = PlanConfig::new(COLOURS);
    config.cluster_spread = 2;
    let result = plan(&map, &config).unwrap();

    assert!(result.stats.clusters_formed > 3);
    let total: usize = result.stats.tasks_per_cluster.iter().sum();
    assert_eq!(total, 15);
    for spread in &result.stats.cluster_spreads {
        assert!(*spread <= 2, "cluster spread {spread} over the limit");
    }

    // Fragmented or not, the cargo rules still hold.
    let mut hold = Inventory::new();
    for step in &result.steps {
        let RouteStep::Task(task) = step else { continue };
        match task.kind.cargo_effect() {
            None => {}
            Some(CargoEffect::Pickup(item)) => {
                assert!(hold.try_pickup(CargoKey::new(item, task.colour), config.cargo_capacity));
            }
            Some(CargoEffect::Deliver(item)) => {
                assert!(hold.try_deliver(CargoKey::new(item, task.colour)));
            }
        }
    }
}
