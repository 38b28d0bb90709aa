use glam::Vec2;
use warp_adventure_core::{
    Command, Direction, Event, Heading, MazeGraph, RetireReason, RoomCoord, MAX_LIVE_PROJECTILES,
};
use warp_adventure_world::{self as world, query, World, WorldConfig};

fn world_with(maze: MazeGraph) -> World {
    World::new(
        maze,
        WorldConfig {
            collectible_chance: 0.0,
            seed: 99,
            ..WorldConfig::default()
        },
    )
}

fn east_corridor() -> MazeGraph {
    let mut maze = MazeGraph::new(10, 10);
    assert!(maze.connect(RoomCoord::START, Direction::East));
    maze
}

fn step(world: &mut World, commands: &[Command]) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command.clone(), &mut events);
    }
    events
}

fn walk(world: &mut World, heading: Heading, ticks: usize) -> Vec<Event> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        events.extend(step(
            world,
            &[Command::Tick, Command::MovePlayer { heading }],
        ));
    }
    events
}

#[test]
fn solid_wall_stops_player_at_band_edge() {
    let mut world = world_with(MazeGraph::new(10, 10));

    let events = walk(&mut world, Heading::NORTH, 100);

    let player = query::player(&world);
    assert_eq!(player.room, RoomCoord::START);
    assert_eq!(player.position, Vec2::new(300.0, 32.0));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::RoomEntered { .. })));
}

#[test]
fn door_carries_player_into_neighbor() {
    let mut world = world_with(east_corridor());

    let events = walk(&mut world, Heading::EAST, 68);

    let player = query::player(&world);
    assert_eq!(player.room, RoomCoord::new(1, 0));
    assert_eq!(player.position, Vec2::new(36.0, 300.0));
    assert!(events.contains(&Event::RoomEntered {
        from: RoomCoord::START,
        to: RoomCoord::new(1, 0),
        via: Direction::East,
    }));
    assert!(events.iter().any(|event| matches!(
        event,
        Event::AlienSpawned {
            room,
            ..
        } if *room == RoomCoord::new(1, 0)
    )));
}

#[test]
fn blocked_step_still_updates_facing() {
    let mut world = world_with(MazeGraph::new(10, 10));
    let _ = walk(&mut world, Heading::WEST, 100);
    let _ = walk(&mut world, Heading::SOUTH_WEST, 1);

    let player = query::player(&world);
    assert_eq!(player.facing, Heading::SOUTH_WEST);
    assert_eq!(player.position.x, 32.0);
}

#[test]
fn live_projectiles_never_exceed_cap() {
    let mut world = world_with(MazeGraph::new(10, 10));

    let events = step(
        &mut world,
        &[
            Command::FireProjectile,
            Command::FireProjectile,
            Command::FireProjectile,
        ],
    );

    let fired = events
        .iter()
        .filter(|event| matches!(event, Event::ProjectileFired { .. }))
        .count();
    assert_eq!(fired, MAX_LIVE_PROJECTILES);
    assert_eq!(query::live_projectiles(&world), MAX_LIVE_PROJECTILES);
}

#[test]
fn projectile_travels_along_last_heading() {
    let mut world = world_with(MazeGraph::new(10, 10));
    let _ = walk(&mut world, Heading::SOUTH, 1);

    let _ = step(
        &mut world,
        &[Command::FireProjectile, Command::AdvanceProjectiles],
    );

    let projectiles = query::projectiles(&world);
    assert_eq!(projectiles.len(), 1);
    assert_eq!(projectiles[0].position, Vec2::new(300.0, 309.0));
    assert_eq!(projectiles[0].velocity, Vec2::new(0.0, 5.0));
}

#[test]
fn projectile_retires_when_player_changes_room() {
    let mut world = world_with(east_corridor());
    let _ = walk(&mut world, Heading::EAST, 60);
    let _ = step(&mut world, &[Command::FireProjectile]);

    let mut transition_tick = Vec::new();
    for _ in 0..8 {
        transition_tick = step(
            &mut world,
            &[
                Command::Tick,
                Command::MovePlayer {
                    heading: Heading::EAST,
                },
                Command::AdvanceProjectiles,
            ],
        );
    }

    assert!(transition_tick
        .iter()
        .any(|event| matches!(event, Event::RoomEntered { .. })));
    assert!(transition_tick.iter().any(|event| matches!(
        event,
        Event::ProjectileRetired {
            reason: RetireReason::RoomMismatch,
            ..
        }
    )));
    assert_eq!(query::live_projectiles(&world), 0);
}

#[test]
fn identical_seeds_replay_identically() {
    let script = |world: &mut World| {
        let _ = walk(world, Heading::EAST, 70);
        let _ = step(
            world,
            &[
                Command::SteerAlien {
                    heading: Heading::WEST,
                    rearm: None,
                },
                Command::ResolveContacts,
            ],
        );
        query::frame_snapshot(world)
    };

    let mut first = world_with(east_corridor());
    let mut second = world_with(east_corridor());

    assert_eq!(script(&mut first), script(&mut second));
}

#[test]
fn nan_collectible_chance_builds_world_without_collectibles() {
    let mut world = World::new(
        east_corridor(),
        WorldConfig {
            collectible_chance: f64::NAN,
            seed: 3,
            ..WorldConfig::default()
        },
    );
    assert!(query::frame_snapshot(&world).collectible.is_none());

    let events = walk(&mut world, Heading::EAST, 68);
    assert_eq!(query::player(&world).room, RoomCoord::new(1, 0));
    assert!(query::frame_snapshot(&world).collectible.is_none());
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::CollectiblePlaced { .. })));
}
