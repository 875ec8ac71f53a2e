use std::time::Duration;

use super::test_support::*;
use super::*;
use crate::mapgen::Monster;
use crate::random::{FixedRandom, SeededRandom};

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
fn fixed_source_session_starts_at_node_four() {
    let session = GameSession::build(&fixed_scenario_config(), FixedRandom(0)).unwrap();
    let snapshot = session.snapshot();

    assert_eq!(snapshot.location, 4);
    assert_eq!(snapshot.end, 5);
    assert_eq!(snapshot.exits, vec![Direction::West]);
    assert_eq!(snapshot.player_health, PLAYER_FULL_HEALTH);
    assert_eq!(snapshot.player_arrows, STARTING_ARROWS);
    assert!(snapshot.player_treasure.is_empty());
    assert_eq!(snapshot.status, SessionStatus::InProgress);
}

#[test]
fn illegal_move_leaves_player_in_place() {
    let mut session = GameSession::build(&fixed_scenario_config(), FixedRandom(0)).unwrap();
    let before = session.snapshot_hash();

    assert_eq!(
        session.move_player(Direction::North),
        Err(ActionError::IllegalMove { location: 4, direction: Direction::North })
    );
    assert_eq!(session.location(), 4);
    assert_eq!(session.moves_made(), 0);
    assert_eq!(session.snapshot_hash(), before);
}

#[test]
fn moves_wrap_and_remember_previous_location() {
    let mut session = tunnel_ring();

    assert_eq!(session.move_player(Direction::West), Ok(4));
    assert_eq!(session.player().previous_location, 0);
    assert_eq!(session.move_player(Direction::East), Ok(0));
    assert_eq!(session.player().previous_location, 4);
    assert_eq!(session.moves_made(), 2);
}

#[test]
fn picked_treasure_moves_from_node_to_player() {
    let mut session = straight_corridor();
    session.dungeon.node_mut(0).treasure = vec![Treasure::Ruby, Treasure::Diamond];

    session.pick_treasure(Treasure::Ruby).unwrap();
    assert_eq!(session.dungeon().node(0).treasure, vec![Treasure::Diamond]);
    assert_eq!(session.player().treasure, vec![Treasure::Ruby]);

    assert_eq!(
        session.pick_treasure(Treasure::Ruby),
        Err(ActionError::TreasureNotFound { location: 0, treasure: Treasure::Ruby })
    );
    assert_eq!(session.player().treasure, vec![Treasure::Ruby]);
}

#[test]
fn picked_arrow_moves_from_node_to_player() {
    let mut session = straight_corridor();
    session.dungeon.node_mut(0).arrows = 1;

    session.pick_arrow().unwrap();
    assert_eq!(session.player().arrows, STARTING_ARROWS + 1);
    assert_eq!(session.dungeon().node(0).arrows, 0);
    assert_eq!(session.pick_arrow(), Err(ActionError::NoArrowsHere { location: 0 }));
    assert_eq!(session.player().arrows, STARTING_ARROWS + 1);
}

#[test]
fn two_exact_hits_kill_a_monster() {
    let mut session = straight_corridor();
    place_monster(&mut session, 2, Monster::default());

    assert_eq!(
        session.shoot_arrow(1, Direction::East),
        Ok(ShotOutcome::Hit { location: 2, monster_health: 50 })
    );
    assert_eq!(
        session.shoot_arrow(1, Direction::East),
        Ok(ShotOutcome::Hit { location: 2, monster_health: 0 })
    );
    assert_eq!(session.shoot_arrow(1, Direction::East), Ok(ShotOutcome::Missed { location: 2 }));
    assert_eq!(session.player().arrows, 0);
    assert_eq!(session.shoot_arrow(1, Direction::East), Err(ActionError::OutOfArrows));
}

#[test]
fn arrows_follow_bending_tunnels() {
    let mut session = bending_corridor();
    place_monster(&mut session, 11, Monster::default());

    assert_eq!(
        session.shoot_arrow(1, Direction::East),
        Ok(ShotOutcome::Hit { location: 11, monster_health: 50 })
    );
}

#[test]
fn arrows_stop_where_travel_is_blocked() {
    let mut session = bending_corridor();
    place_monster(&mut session, 11, Monster::default());

    assert_eq!(session.shoot_arrow(3, Direction::East), Ok(ShotOutcome::Missed { location: 16 }));
    assert_eq!(session.shoot_arrow(1, Direction::West), Ok(ShotOutcome::Missed { location: 0 }));
    assert_eq!(session.player().arrows, STARTING_ARROWS - 2);
    assert_eq!(session.dungeon().node(11).monster.map(|monster| monster.health()), Some(100));
}

#[test]
fn overshooting_a_monster_misses_it() {
    let mut session = bending_corridor();
    place_monster(&mut session, 11, Monster::default());

    assert_eq!(session.shoot_arrow(2, Direction::East), Ok(ShotOutcome::Missed { location: 16 }));
    assert!(session.dungeon().node(11).living_monster().is_some_and(|m| !m.is_injured()));
}

#[test]
fn zero_distance_shot_is_rejected_without_spending_an_arrow() {
    let mut session = straight_corridor();
    assert_eq!(
        session.shoot_arrow(0, Direction::East),
        Err(ActionError::InvalidShotDistance { distance: 0 })
    );
    assert_eq!(session.player().arrows, STARTING_ARROWS);
}

#[test]
fn arrow_in_a_closed_tunnel_loop_terminates() {
    let mut session = tunnel_ring();
    assert!(matches!(session.shoot_arrow(1, Direction::East), Ok(ShotOutcome::Missed { .. })));
}

#[test]
fn arrow_circling_a_cave_ring_lands_on_the_matching_cave() {
    let mut session = cave_ring();
    place_monster(&mut session, 2, Monster::default());

    assert_eq!(
        session.shoot_arrow(7, Direction::East),
        Ok(ShotOutcome::Hit { location: 2, monster_health: 50 })
    );
    assert_eq!(
        session.shoot_arrow(1_000_000_002, Direction::East),
        Ok(ShotOutcome::Hit { location: 2, monster_health: 0 })
    );
}

#[test]
fn healthy_monster_always_kills() {
    let mut session = straight_corridor();
    place_monster(&mut session, 0, Monster::default());

    assert!(session.is_killed());
    assert_eq!(session.player().health, 0);
    assert_eq!(session.status(), SessionStatus::Killed);
    assert_eq!(session.snapshot().status, SessionStatus::Killed);
}

#[test]
fn injured_monster_kill_roll_is_a_fair_coin() {
    let mut session =
        session_with_random(5, 5, false, &[(0, 1), (1, 2)], Box::new(SeededRandom::new(2_718)));
    place_monster(&mut session, 0, injured_monster());

    let trials = 4_000;
    let kills = (0..trials).filter(|_| session.is_killed()).count();
    assert!((1_800..=2_200).contains(&kills), "expected about half of {trials}, got {kills}");
    assert_eq!(session.player().health, PLAYER_FULL_HEALTH);
}

#[test]
fn injured_monster_roll_follows_the_random_source() {
    let mut session = session_with_random(5, 5, false, &[(0, 1)], scripted(&[1, 0]));
    place_monster(&mut session, 0, injured_monster());

    assert!(!session.is_killed());
    assert!(session.is_killed());
}

#[test]
fn absent_or_dead_monster_never_kills() {
    let mut session = straight_corridor();
    assert!(!session.is_killed());

    let mut dead = Monster::default();
    dead.take_hit();
    dead.take_hit();
    place_monster(&mut session, 0, dead);
    assert!(!session.is_killed());
    assert_eq!(session.player().health, PLAYER_FULL_HEALTH);
}

#[test]
fn full_treasure_set_carries_the_player_over_a_pit() {
    let mut session = straight_corridor();
    place_pit(&mut session, 0);
    session.dungeon.node_mut(0).treasure =
        vec![Treasure::Diamond, Treasure::Ruby, Treasure::Sapphire];

    session.pick_treasure(Treasure::Diamond).unwrap();
    session.pick_treasure(Treasure::Ruby).unwrap();
    assert!(session.is_fallen(), "sapphire is still missing");

    session.pick_treasure(Treasure::Sapphire).unwrap();
    assert!(!session.is_fallen());
}

#[test]
fn fallen_requires_a_pit() {
    let session = straight_corridor();
    assert!(!session.is_fallen());
}

#[test]
fn reaching_the_end_requires_being_alive() {
    let mut session = straight_corridor();
    session.player.location = session.dungeon().end();
    assert!(session.is_reached_end());

    session.player.health = 0;
    assert!(!session.is_reached_end());
}

#[test]
fn smell_grows_with_proximity_and_monster_count() {
    let mut session = bending_corridor();
    place_monster(&mut session, 16, Monster::default());
    session.player.location = 6;
    assert_eq!(session.smell(), Some(Smell::Pungent));

    place_monster(&mut session, 0, Monster::default());
    assert_eq!(session.smell(), Some(Smell::MorePungent));

    session.player.location = 1;
    assert_eq!(session.smell(), Some(Smell::MorePungent), "monster one move away at node 0");

    session.player.location = 12;
    assert_eq!(session.smell(), Some(Smell::Pungent), "only node 16 is two moves away");
}

#[test]
fn dead_monsters_do_not_smell() {
    let mut session = straight_corridor();
    let mut dead = Monster::default();
    dead.take_hit();
    dead.take_hit();
    place_monster(&mut session, 2, dead);
    session.player.location = 1;

    assert_eq!(session.smell(), None);
}

#[test]
fn pits_crackle_one_move_away() {
    let mut session = straight_corridor();
    place_pit(&mut session, 2);

    assert_eq!(session.sound(), None);
    session.player.location = 1;
    assert_eq!(session.sound(), Some(Sound::Crackling));
    session.player.location = 7;
    assert_eq!(session.sound(), Some(Sound::Crackling));
}

#[test]
fn thief_robs_only_after_the_grace_period() {
    let mut session = straight_corridor();
    session.dungeon.node_mut(1).thief = true;
    session.player.treasure = vec![Treasure::Sapphire];

    session.move_player(Direction::East).unwrap();
    session.move_player(Direction::East).unwrap();
    assert_eq!(session.player().previous_location, 1);

    assert!(!session.check_treasure_stolen(Duration::from_millis(5_000)));
    assert_eq!(session.player().arrows, STARTING_ARROWS);

    assert!(session.check_treasure_stolen(Duration::from_millis(5_001)));
    assert!(session.player().treasure.is_empty());
    assert_eq!(session.player().arrows, 0);
}

#[test]
fn no_thief_behind_means_no_robbery() {
    let mut session = straight_corridor();
    session.move_player(Direction::East).unwrap();
    assert!(!session.check_treasure_stolen(Duration::from_secs(60)));
    assert_eq!(session.player().arrows, STARTING_ARROWS);
}

#[test]
fn terminal_status_sticks() {
    let mut session = straight_corridor();
    assert_eq!(session.status(), SessionStatus::InProgress);
    assert!(!session.is_over());

    session.player.location = session.dungeon().end();
    assert_eq!(session.status(), SessionStatus::ReachedEnd);
    session.player.location = 0;
    assert_eq!(session.status(), SessionStatus::ReachedEnd);
    assert!(session.is_over());
}

#[test]
fn killed_takes_precedence_over_fallen() {
    let mut session = straight_corridor();
    place_pit(&mut session, 0);
    place_monster(&mut session, 0, Monster::default());
    assert_eq!(session.status(), SessionStatus::Killed);
}

#[test]
fn apply_dispatches_to_typed_actions() {
    let mut session = straight_corridor();
    session.dungeon.node_mut(1).arrows = 2;

    assert_eq!(
        session.apply(&Action::Move { direction: Direction::East }),
        Ok(ActionOutcome::Moved { from: 0, to: 1 })
    );
    assert_eq!(session.apply(&Action::PickArrow), Ok(ActionOutcome::PickedArrow));
    assert_eq!(
        session.apply(&Action::CheckTreasureStolen { elapsed_ms: 10_000 }),
        Ok(ActionOutcome::Robbery { stolen: false })
    );
    assert_eq!(
        session.apply(&Action::CheckStatus),
        Ok(ActionOutcome::Status(SessionStatus::InProgress))
    );

    let before = session.snapshot_hash();
    assert_eq!(
        session.apply(&Action::Move { direction: Direction::North }),
        Err(ActionError::IllegalMove { location: 1, direction: Direction::North })
    );
    assert_eq!(session.snapshot_hash(), before);
}

#[test]
fn snapshot_describes_the_current_node() {
    let mut session = straight_corridor();
    session.dungeon.node_mut(2).treasure = vec![Treasure::Diamond];
    session.dungeon.node_mut(2).arrows = 3;
    place_monster(&mut session, 2, injured_monster());
    place_pit(&mut session, 7);
    session.player.location = 2;

    let snapshot = session.snapshot();
    assert_eq!(snapshot.kind, NodeKind::Cave);
    assert_eq!(snapshot.position, Pos { row: 0, col: 2 });
    assert_eq!(snapshot.exits, vec![Direction::South, Direction::East, Direction::West]);
    assert_eq!(snapshot.treasure_here, vec![Treasure::Diamond]);
    assert_eq!(snapshot.arrows_here, 3);
    assert_eq!(snapshot.monster_health, Some(50));
    assert!(!snapshot.thief);
    assert!(!snapshot.pit);
    assert_eq!(snapshot.sound, Some(Sound::Crackling));
    assert_eq!(snapshot.smell, None, "the monster in the player's own cave is not a clue");
}

#[test]
fn snapshot_hash_tracks_player_progress() {
    let mut session = straight_corridor();
    let start = session.snapshot_hash();
    session.move_player(Direction::East).unwrap();
    let moved = session.snapshot_hash();
    assert_ne!(start, moved);
    session.move_player(Direction::West).unwrap();
    assert_ne!(session.snapshot_hash(), start, "move counter is part of the hash");
}
