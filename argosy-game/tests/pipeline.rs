//! End-to-end pipeline runs on a hand-built corridor map.
//!
//! The map is one long water row; the start, every task tile, and every
//! shrine hang off it at row 1, so each travel distance equals the column
//! gap and the expected totals can be checked by hand.
use argosy_game::{
    plan, Colour, MapData, MapSource, PlanConfig, PlanEngine, Position, RouteStep, TaskKind, Tile,
    TileId, TileKind, TraceEvent,
};

const COLOURS: [Colour; 3] = [Colour::Pink, Colour::Blue, Colour::Green];

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn corridor_map() -> MapData {
    let mut tiles = Vec::new();
    // Water row: columns 0..=33.
    for col in 0..=33 {
        tiles.push(Tile::new(
            TileId(100 + u32::try_from(col).unwrap()),
            TileKind::Water,
            Position::new(col, 0),
        ));
    }
    // Start anchor.
    tiles.push(Tile::new(TileId(0), TileKind::Start, Position::new(0, 1)));
    // Three colour zones, five task tiles each, eight columns apart so the
    // cluster builder splits them at the default spread of 6.
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
    // Shrines: one reachable inside a leftover budget, two requiring
    // dedicated detours.
    for (n, col) in [(50, 13), (51, 20), (52, 32)] {
        tiles.push(Tile::new(TileId(n), TileKind::Shrine, Position::new(col, 1)));
    }
    MapData::new(tiles, TileId(0))
}

#[test]
fn corridor_tour_matches_hand_computed_totals() {
    init_logging();
    let map = corridor_map();
    let result = plan(&map, &PlanConfig::new(COLOURS)).unwrap();

    // Three colour zones become three clusters of five.
    assert_eq!(result.stats.clusters_formed, 3);
    assert_eq!(result.stats.tasks_per_cluster, vec![5, 5, 5]);
    assert_eq!(result.stats.cluster_spreads, vec![4, 4, 4]);

    // 30 moves of task travel, a 2-move opportunistic shrine detour,
    // 2 + 12 dedicated shrine moves, 20 home: 66 in 22 turns.
    assert_eq!(result.stats.total_moves, 66);
    assert_eq!(result.stats.total_turns, 22);

    // The free-budget shrine is collected mid-route; the far two fall to
    // dedicated detours after the last task.
    assert_eq!(
        result.shrines_visited,
        vec![
            Position::new(13, 1),
            Position::new(32, 1),
            Position::new(20, 1),
        ]
    );
    let opportunistic: Vec<&TraceEvent> = result
        .trace
        .iter()
        .filter(|event| matches!(event, TraceEvent::ShrineInserted { opportunistic: true, .. }))
        .collect();
    assert_eq!(opportunistic.len(), 1);

    // 15 tasks, 3 shrines, 1 return.
    assert_eq!(result.steps.len(), 19);
    assert_eq!(
        result.steps.last(),
        Some(&RouteStep::Return(Position::new(0, 1)))
    );
}

#[test]
fn tour_visits_each_zone_in_corridor_order() {
    let map = corridor_map();
    let result = plan(&map, &PlanConfig::new(COLOURS)).unwrap();

    let task_colours: Vec<Colour> = result
        .steps
        .iter()
        .filter_map(|step| match step {
            RouteStep::Task(task) => Some(task.colour),
            _ => None,
        })
        .collect();
    let mut expected = Vec::new();
    expected.extend(std::iter::repeat_n(Colour::Pink, 5));
    expected.extend(std::iter::repeat_n(Colour::Blue, 5));
    expected.extend(std::iter::repeat_n(Colour::Green, 5));
    assert_eq!(task_colours, expected);

    // Within each zone the cheapest valid ordering is the monotone sweep,
    // which also respects pickup-before-delivery.
    let kinds: Vec<TaskKind> = result
        .steps
        .iter()
        .filter_map(|step| match step {
            RouteStep::Task(task) => Some(task.kind),
            _ => None,
        })
        .collect();
    assert_eq!(&kinds[0..5], TaskKind::PLANNING_ORDER.as_slice());
}

#[test]
fn repaired_path_is_fully_adjacent_and_anchored() {
    let map = corridor_map();
    let result = plan(&map, &PlanConfig::new(COLOURS)).unwrap();

    assert_eq!(result.path.first(), Some(&Position::new(0, 1)));
    assert_eq!(result.path.last(), Some(&Position::new(0, 1)));
    for pair in result.path.windows(2) {
        assert!(pair[0].is_adjacent_to(pair[1]), "gap between {pair:?}");
    }
    assert_eq!(result.stats.route_length, result.path.len());
}

#[test]
fn identical_runs_produce_byte_identical_output() {
    let map = corridor_map();
    let config = PlanConfig::new(COLOURS);
    let first = plan(&map, &config).unwrap();
    let second = plan(&map, &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn bad_start_id_is_reported() {
    let mut map = corridor_map();
    map.start = TileId(9999);
    let err = plan(&map, &PlanConfig::new(COLOURS)).unwrap_err();
    assert_eq!(err.to_string(), "start tile tile_9999 is not on the map");
}

struct StaticSource(MapData);

impl MapSource for StaticSource {
    type Error = std::convert::Infallible;

    fn load_map(&self) -> Result<MapData, Self::Error> {
        Ok(self.0.clone())
    }
}

#[test]
fn engine_seam_runs_the_pipeline_through_a_source() {
    let engine = PlanEngine::new(StaticSource(corridor_map()));
    let result = engine.solve(&PlanConfig::new(COLOURS)).unwrap();
    assert_eq!(result.stats.total_moves, 66);
}
