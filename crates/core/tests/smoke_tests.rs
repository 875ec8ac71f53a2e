use std::collections::VecDeque;

use caverns::{
    ActionError, ConfigError, Direction, DungeonConfig, FixedRandom, GameSession, SessionStatus,
    ShotOutcome, render_with_player,
};

fn fixed_scenario_config() -> DungeonConfig {
    DungeonConfig {
        rows: 5,
        columns: 5,
        wrapping: false,
        interconnectivity: 0,
        treasure_percentage: 50,
        monsters: 1,
        thieves: 0,
        pits: 0,
    }
}

#[test]
fn fixed_source_builds_the_reference_dungeon() {
    let session = GameSession::build(&fixed_scenario_config(), FixedRandom(0)).unwrap();
    let dungeon = session.dungeon();

    assert_eq!(dungeon.start(), 4);
    assert_eq!(dungeon.end(), 5);
    let monsters: Vec<usize> =
        dungeon.nodes().iter().filter(|node| node.monster.is_some()).map(|node| node.id).collect();
    assert_eq!(monsters, vec![5]);
    assert_eq!(session.available_moves(), vec![Direction::West]);
}

#[test]
fn moving_up_from_the_reference_start_is_illegal() {
    let mut session = GameSession::build(&fixed_scenario_config(), FixedRandom(0)).unwrap();

    let error = session.move_player(Direction::North).unwrap_err();
    assert_eq!(error, ActionError::IllegalMove { location: 4, direction: Direction::North });
    assert_eq!(error.to_string(), "cannot move north from location 4");
    assert_eq!(session.location(), 4);
}

#[test]
fn walking_the_reference_dungeon_to_the_end() {
    let mut session = GameSession::build(&fixed_scenario_config(), FixedRandom(0)).unwrap();

    // Breadth-first route from start to end over the realized graph.
    let dungeon = session.dungeon().clone();
    let mut previous = vec![None; dungeon.nodes().len()];
    let mut open = VecDeque::from([dungeon.start()]);
    previous[dungeon.start()] = Some(dungeon.start());
    while let Some(node) = open.pop_front() {
        for direction in dungeon.node(node).exits.directions() {
            let next = dungeon.step(node, direction);
            if previous[next].is_none() {
                previous[next] = Some(node);
                open.push_back(next);
            }
        }
    }
    let mut route = vec![dungeon.end()];
    let mut cursor = dungeon.end();
    while cursor != dungeon.start() {
        cursor = previous[cursor].unwrap();
        route.push(cursor);
    }
    route.reverse();
    assert!(route.len() > 5, "start and end are at least five moves apart");

    for pair in route.windows(2) {
        let direction = dungeon
            .node(pair[0])
            .exits
            .directions()
            .into_iter()
            .find(|&direction| dungeon.step(pair[0], direction) == pair[1])
            .unwrap();
        if pair[1] == dungeon.end() {
            // Shoot the guardian twice before stepping in.
            for monster_health in [50, 0] {
                assert_eq!(
                    session.shoot_arrow(1, direction),
                    Ok(ShotOutcome::Hit { location: dungeon.end(), monster_health })
                );
            }
        }
        session.move_player(direction).unwrap();
    }

    assert_eq!(session.location(), dungeon.end());
    assert_eq!(session.status(), SessionStatus::ReachedEnd);
    assert!(render_with_player(session.dungeon(), session.location()).contains("@05"));
}

#[test]
fn too_many_extra_edges_is_a_configuration_error() {
    let config = DungeonConfig { interconnectivity: 100, ..fixed_scenario_config() };
    let error = GameSession::build(&config, FixedRandom(0)).unwrap_err();
    assert_eq!(error, ConfigError::InterconnectivityTooHigh { requested: 100, available: 16 });
}

#[test]
fn out_of_range_counts_name_the_offending_field() {
    let config = DungeonConfig { monsters: 0, ..fixed_scenario_config() };
    let error = GameSession::build(&config, FixedRandom(0)).unwrap_err();
    assert_eq!(error.to_string(), "monsters must be between 1 and 20, got 0");
}
