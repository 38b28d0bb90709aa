#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Warp Adventure.

mod aliens;
pub mod collision;
mod projectiles;
mod registry;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use warp_adventure_core::{
    ArchetypeTable, Command, Event, Heading, MazeGraph, Outcome, ProjectileId, RetireReason,
    RoomCoord, RoomGeometry, SoundCue, ALIEN_BONUS, COLLECTIBLE_BONUS, COLLECTIBLE_HEIGHT,
    COLLECTIBLE_MARGIN, COLLECTIBLE_WIDTH, OBJECTIVE_BONUS, OBJECTIVE_SIZE, PLAYER_HIT_SCALE,
    PLAYER_STEP, PROJECTILE_SIZE,
};

use crate::{
    projectiles::ProjectileSystem,
    registry::{EntityRegistry, Objective},
};

const DEFAULT_SIDE_LENGTH: u32 = 600;
const DEFAULT_COLLECTIBLE_CHANCE: f64 = 1.0 / 3.0;
const DEFAULT_OBJECTIVE_CANDIDATES: [RoomCoord; 3] = [
    RoomCoord::new(9, 9),
    RoomCoord::new(9, 8),
    RoomCoord::new(8, 9),
];

/// Parameters used to build a world around a generated maze.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    /// Side length of every room in pixels.
    pub side_length: u32,
    /// Probability that a room receives a collectible on its first visit.
    pub collectible_chance: f64,
    /// Mapping from room coordinates to alien archetypes.
    pub archetypes: ArchetypeTable,
    /// Rooms the objective may be placed in; one is drawn at random.
    pub objective_candidates: Vec<RoomCoord>,
    /// Seed for spawn positions, collectible decisions and objective placement.
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            side_length: DEFAULT_SIDE_LENGTH,
            collectible_chance: DEFAULT_COLLECTIBLE_CHANCE,
            archetypes: ArchetypeTable::default(),
            objective_candidates: DEFAULT_OBJECTIVE_CANDIDATES.to_vec(),
            seed: 0,
        }
    }
}

/// A player step that would overlap a wall or leave the room.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[error("player step to {target} blocked in room {room:?}")]
pub struct RejectedMove {
    /// Room the player occupies.
    pub room: RoomCoord,
    /// Position the step would have reached.
    pub target: Vec2,
}

/// A shot requested while the projectile cap is reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{live} projectiles already live")]
pub struct SaturatedProjectiles {
    /// Number of projectiles live when the shot was requested.
    pub live: usize,
}

#[derive(Clone, Debug, PartialEq)]
struct Player {
    room: RoomCoord,
    position: Vec2,
    facing: Heading,
}

/// Represents the authoritative Warp Adventure world state.
#[derive(Debug)]
pub struct World {
    geometry: RoomGeometry,
    maze: MazeGraph,
    player: Player,
    projectiles: ProjectileSystem,
    registry: EntityRegistry,
    score: u32,
    outcome: Option<Outcome>,
    tick_index: u64,
    rng: ChaCha8Rng,
    retired_scratch: Vec<(ProjectileId, RetireReason)>,
}

impl World {
    /// Creates a world with the player centred in the start room.
    ///
    /// The objective room is drawn from the configured candidates that lie
    /// inside the maze, falling back to the far corner.
    #[must_use]
    pub fn new(maze: MazeGraph, config: WorldConfig) -> Self {
        let geometry = RoomGeometry::from_side_length(config.side_length);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let candidates: Vec<RoomCoord> = config
            .objective_candidates
            .iter()
            .copied()
            .filter(|room| maze.contains(*room))
            .collect();
        let objective_room = if candidates.is_empty() {
            RoomCoord::new(
                maze.columns().saturating_sub(1),
                maze.rows().saturating_sub(1),
            )
        } else {
            candidates[rng.gen_range(0..candidates.len())]
        };

        let registry = EntityRegistry::new(
            config.archetypes,
            config.collectible_chance,
            Objective {
                room: objective_room,
                position: geometry.center(),
                destroyed: false,
            },
        );

        let mut world = Self {
            player: Player {
                room: RoomCoord::START,
                position: geometry.center(),
                facing: Heading::EAST,
            },
            geometry,
            maze,
            projectiles: ProjectileSystem::new(),
            registry,
            score: 0,
            outcome: None,
            tick_index: 0,
            rng,
            retired_scratch: Vec::new(),
        };

        let mut discarded = Vec::new();
        world.registry.materialize(
            RoomCoord::START,
            &world.geometry,
            &mut world.rng,
            &mut discarded,
        );
        tracing::debug!(
            side_length = config.side_length,
            objective_x = objective_room.x(),
            objective_y = objective_room.y(),
            "world created"
        );
        world
    }

    fn step_player(&mut self, heading: Heading) -> Result<(Vec2, Vec2), RejectedMove> {
        let from = self.player.position;
        let target = from + heading.to_vec2() * PLAYER_STEP;
        let connections = self.maze.connections(self.player.room);
        if !collision::can_move_to(
            &self.geometry,
            connections,
            target,
            self.geometry.player_half_extent(),
        ) {
            return Err(RejectedMove {
                room: self.player.room,
                target,
            });
        }
        self.player.position = target;
        Ok((from, target))
    }

    fn move_player(&mut self, heading: Heading, out_events: &mut Vec<Event>) {
        if !heading.is_still() {
            self.player.facing = heading;
            match self.step_player(heading) {
                Ok((from, to)) => out_events.push(Event::PlayerMoved { from, to }),
                Err(rejected) => tracing::trace!(%rejected, "player move rejected"),
            }
        }

        let Some(transition) = collision::room_transition(
            &self.geometry,
            &self.maze,
            self.player.room,
            self.player.position,
            self.geometry.player_half_extent(),
        ) else {
            return;
        };

        let from = self.player.room;
        self.player.room = transition.to;
        self.player.position = transition.position;
        out_events.push(Event::RoomEntered {
            from,
            to: transition.to,
            via: transition.via,
        });
        tracing::debug!(
            x = transition.to.x(),
            y = transition.to.y(),
            via = ?transition.via,
            "room entered"
        );
        self.registry.materialize(
            transition.to,
            &self.geometry,
            &mut self.rng,
            out_events,
        );
    }

    fn fire(&mut self, out_events: &mut Vec<Event>) {
        let room = self.player.room;
        match self
            .projectiles
            .fire(room, self.player.position, self.player.facing)
        {
            Ok(projectile) => {
                out_events.push(Event::ProjectileFired { projectile, room });
                out_events.push(Event::SoundTriggered {
                    cue: SoundCue::ProjectileFired,
                });
            }
            Err(saturated) => tracing::trace!(%saturated, "fire ignored"),
        }
    }

    fn advance_projectiles(&mut self, out_events: &mut Vec<Event>) {
        let mut retired = std::mem::take(&mut self.retired_scratch);
        self.projectiles.advance(
            self.player.room,
            &self.geometry,
            self.maze.connections(self.player.room),
            self.geometry.player_half_extent(),
            &mut retired,
        );
        for (projectile, reason) in retired.drain(..) {
            out_events.push(Event::ProjectileRetired { projectile, reason });
        }
        self.retired_scratch = retired;
    }

    fn steer_alien(&mut self, heading: Heading, rearm: Option<u32>) {
        let geometry = self.geometry;
        if let Some(alien) = self.registry.alien_mut(self.player.room) {
            alien.steer(heading, rearm, &geometry);
        }
    }

    fn resolve_contacts(&mut self, out_events: &mut Vec<Event>) {
        let room = self.player.room;
        let player_size = self.geometry.player_size();

        if let Some(alien) = self.registry.alien(room) {
            if alien.touches(self.player.position, player_size, PLAYER_HIT_SCALE) {
                out_events.push(Event::SoundTriggered {
                    cue: SoundCue::Defeat,
                });
                self.latch(Outcome::Defeat, out_events);
                return;
            }

            let hit = self
                .projectiles
                .iter()
                .find(|projectile| alien.touches(projectile.position, PROJECTILE_SIZE, 1.0))
                .map(|projectile| projectile.id);
            if let Some(projectile) = hit {
                let _ = self.projectiles.retire(projectile);
                out_events.push(Event::ProjectileRetired {
                    projectile,
                    reason: RetireReason::HitAlien,
                });
                if let Some(alien) = self.registry.remove_alien(room) {
                    out_events.push(Event::AlienDestroyed {
                        room,
                        kind: alien.kind,
                    });
                    out_events.push(Event::SoundTriggered {
                        cue: SoundCue::AlienDestroyed,
                    });
                    self.award(ALIEN_BONUS, out_events);
                }
            }
        }

        let half_player = Vec2::splat(player_size / 2.0);
        let player_min = self.player.position - half_player;
        let player_max = self.player.position + half_player;
        if let Some(bar) = self.registry.collectible_mut(room) {
            let reach = Vec2::splat(COLLECTIBLE_MARGIN);
            let bar_min = bar.position - reach;
            let bar_max = bar.position + Vec2::new(COLLECTIBLE_WIDTH, COLLECTIBLE_HEIGHT) + reach;
            if !bar.collected && boxes_overlap(player_min, player_max, bar_min, bar_max) {
                bar.collected = true;
                out_events.push(Event::CollectibleCollected { room });
                out_events.push(Event::SoundTriggered {
                    cue: SoundCue::CollectiblePickup,
                });
                self.award(COLLECTIBLE_BONUS, out_events);
            }
        }

        let Some(objective) = self.registry.objective_in(room) else {
            return;
        };
        if objective.destroyed {
            return;
        }
        let half_core = Vec2::splat(OBJECTIVE_SIZE / 2.0);
        let half_shot = Vec2::splat(PROJECTILE_SIZE / 2.0);
        let core_min = objective.position - half_core;
        let core_max = objective.position + half_core;
        let hit = self
            .projectiles
            .iter()
            .find(|projectile| {
                boxes_overlap(
                    projectile.position - half_shot,
                    projectile.position + half_shot,
                    core_min,
                    core_max,
                )
            })
            .map(|projectile| projectile.id);
        let Some(projectile) = hit else {
            return;
        };

        let _ = self.projectiles.retire(projectile);
        out_events.push(Event::ProjectileRetired {
            projectile,
            reason: RetireReason::HitObjective,
        });
        if let Some(objective) = self.registry.objective_mut(room) {
            objective.destroyed = true;
        }
        out_events.push(Event::ObjectiveDestroyed { room });
        out_events.push(Event::SoundTriggered {
            cue: SoundCue::ObjectiveDestroyed,
        });
        self.award(OBJECTIVE_BONUS, out_events);
        self.latch(Outcome::Victory, out_events);
    }

    fn award(&mut self, delta: u32, out_events: &mut Vec<Event>) {
        self.score = self.score.saturating_add(delta);
        out_events.push(Event::ScoreChanged {
            score: self.score,
            delta,
        });
    }

    fn latch(&mut self, outcome: Outcome, out_events: &mut Vec<Event>) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(outcome);
        out_events.push(Event::OutcomeLatched { outcome });
        tracing::info!(
            ?outcome,
            score = self.score,
            tick = self.tick_index,
            "outcome latched"
        );
    }
}

fn boxes_overlap(a_min: Vec2, a_max: Vec2, b_min: Vec2, b_max: Vec2) -> bool {
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once an outcome is latched every command is ignored and the world stays frozen.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.outcome.is_some() {
        tracing::trace!(?command, "command ignored after outcome");
        return;
    }

    match command {
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced {
                tick: world.tick_index,
            });
        }
        Command::MovePlayer { heading } => world.move_player(heading, out_events),
        Command::FireProjectile => world.fire(out_events),
        Command::AdvanceProjectiles => world.advance_projectiles(out_events),
        Command::SteerAlien { heading, rearm } => world.steer_alien(heading, rearm),
        Command::ResolveContacts => world.resolve_contacts(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use warp_adventure_core::{
        AlienSnapshot, FrameSnapshot, MazeGraph, ObjectiveSnapshot, Outcome, PlayerSnapshot,
        ProjectileSnapshot, RoomCoord, RoomGeometry,
    };

    /// Provides read-only access to the geometry shared by every room.
    #[must_use]
    pub fn geometry(world: &World) -> &RoomGeometry {
        &world.geometry
    }

    /// Provides read-only access to the maze connectivity.
    #[must_use]
    pub fn maze(world: &World) -> &MazeGraph {
        &world.maze
    }

    /// Captures the player's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            room: world.player.room,
            position: world.player.position,
            facing: world.player.facing,
            size: world.geometry.player_size(),
        }
    }

    /// Captures the alien in the player's room, if one is alive.
    #[must_use]
    pub fn current_alien(world: &World) -> Option<AlienSnapshot> {
        let room = world.player.room;
        world.registry.alien(room).map(|alien| alien.snapshot(room))
    }

    /// Captures every live projectile in firing order.
    #[must_use]
    pub fn projectiles(world: &World) -> Vec<ProjectileSnapshot> {
        world
            .projectiles
            .iter()
            .map(|projectile| projectile.snapshot())
            .collect()
    }

    /// Number of live projectiles.
    #[must_use]
    pub fn live_projectiles(world: &World) -> usize {
        world.projectiles.len()
    }

    /// Captures the objective regardless of the player's room.
    #[must_use]
    pub fn objective(world: &World) -> ObjectiveSnapshot {
        world.registry.objective().snapshot()
    }

    /// Reports whether the alien of the provided room was destroyed.
    #[must_use]
    pub fn is_cleared(world: &World, room: RoomCoord) -> bool {
        world.registry.is_cleared(room)
    }

    /// Current score.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Latched outcome, if the session ended.
    #[must_use]
    pub fn outcome(world: &World) -> Option<Outcome> {
        world.outcome
    }

    /// Index of the last executed tick.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures everything a renderer needs to draw the player's room.
    #[must_use]
    pub fn frame_snapshot(world: &World) -> FrameSnapshot {
        let room = world.player.room;
        FrameSnapshot {
            tick: world.tick_index,
            room,
            connections: world.maze.connections(room),
            geometry: world.geometry,
            player: player(world),
            projectiles: projectiles(world),
            alien: current_alien(world),
            collectible: world
                .registry
                .collectible(room)
                .map(|collectible| collectible.snapshot(room)),
            objective: world
                .registry
                .objective_in(room)
                .map(|objective| objective.snapshot()),
            score: world.score,
            outcome: world.outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{aliens::Alien, registry::Collectible};
    use warp_adventure_core::{AlienKind, Direction};

    fn open_world(collectible_chance: f64) -> World {
        let mut maze = MazeGraph::new(2, 2);
        assert!(maze.connect(RoomCoord::START, Direction::East));
        assert!(maze.connect(RoomCoord::START, Direction::South));
        World::new(
            maze,
            WorldConfig {
                collectible_chance,
                objective_candidates: vec![RoomCoord::START],
                seed: 7,
                ..WorldConfig::default()
            },
        )
    }

    fn place_alien(world: &mut World, kind: AlienKind, position: Vec2) {
        let room = world.player.room;
        world.registry.insert_alien(
            room,
            Alien {
                kind,
                position,
                heading: Heading::STILL,
                ticks_since_turn: 0,
                turn_interval: 60,
            },
        );
    }

    fn run(world: &mut World, commands: &[Command]) -> Vec<Event> {
        let mut events = Vec::new();
        for command in commands {
            apply(world, command.clone(), &mut events);
        }
        events
    }

    #[test]
    fn player_starts_centred_facing_east() {
        let world = open_world(0.0);
        let player = query::player(&world);
        assert_eq!(player.room, RoomCoord::START);
        assert_eq!(player.position, Vec2::new(300.0, 300.0));
        assert_eq!(player.facing, Heading::EAST);
        assert_eq!(player.size, 12.0);
    }

    #[test]
    fn tick_advances_index() {
        let mut world = open_world(0.0);
        let events = run(&mut world, &[Command::Tick, Command::Tick]);
        assert_eq!(events.last(), Some(&Event::TimeAdvanced { tick: 2 }));
        assert_eq!(query::tick_index(&world), 2);
    }

    #[test]
    fn diagonal_move_updates_facing() {
        let mut world = open_world(0.0);
        let _ = run(
            &mut world,
            &[Command::MovePlayer {
                heading: Heading::NORTH_WEST,
            }],
        );
        let player = query::player(&world);
        assert_eq!(player.position, Vec2::new(296.0, 296.0));
        assert_eq!(player.facing, Heading::NORTH_WEST);
    }

    #[test]
    fn collectible_awards_points_once() {
        let mut world = open_world(1.0);
        let bar = world
            .registry
            .collectible(RoomCoord::START)
            .expect("collectible")
            .clone();
        world.player.position = bar.position + Vec2::new(15.0, 5.0);

        let first = run(&mut world, &[Command::ResolveContacts]);
        let second = run(&mut world, &[Command::ResolveContacts]);

        assert!(first.contains(&Event::CollectibleCollected {
            room: RoomCoord::START
        }));
        assert!(first.contains(&Event::SoundTriggered {
            cue: SoundCue::CollectiblePickup
        }));
        assert!(second.is_empty());
        assert_eq!(query::score(&world), 25);
    }

    #[test]
    fn collectible_margin_extends_reach() {
        let mut world = open_world(0.0);
        world.registry.insert_collectible(
            RoomCoord::START,
            Collectible {
                position: Vec2::new(100.0, 100.0),
                collected: false,
            },
        );
        world.player.position = Vec2::new(100.0 + 30.0 + 15.0 + 5.0, 105.0);

        let events = run(&mut world, &[Command::ResolveContacts]);
        assert!(events.contains(&Event::CollectibleCollected {
            room: RoomCoord::START
        }));
    }

    #[test]
    fn alien_contact_latches_single_defeat_and_freezes() {
        let mut world = open_world(0.0);
        place_alien(&mut world, AlienKind::Dragon, Vec2::new(310.0, 300.0));

        let events = run(&mut world, &[Command::ResolveContacts]);
        assert_eq!(
            events,
            vec![
                Event::SoundTriggered {
                    cue: SoundCue::Defeat
                },
                Event::OutcomeLatched {
                    outcome: Outcome::Defeat
                },
            ]
        );

        let before = query::player(&world);
        let later = run(
            &mut world,
            &[
                Command::Tick,
                Command::MovePlayer {
                    heading: Heading::NORTH,
                },
                Command::ResolveContacts,
            ],
        );
        assert!(later.is_empty());
        assert_eq!(query::player(&world), before);
        assert_eq!(query::outcome(&world), Some(Outcome::Defeat));
    }

    #[test]
    fn projectile_destroys_alien_for_bonus() {
        let mut world = open_world(0.0);
        place_alien(&mut world, AlienKind::Bat, Vec2::new(400.0, 300.0));
        let _ = world
            .projectiles
            .fire(RoomCoord::START, Vec2::new(395.0, 300.0), Heading::EAST)
            .expect("fire");

        let events = run(&mut world, &[Command::ResolveContacts]);

        assert!(events.contains(&Event::AlienDestroyed {
            room: RoomCoord::START,
            kind: AlienKind::Bat
        }));
        assert_eq!(query::score(&world), 50);
        assert_eq!(query::live_projectiles(&world), 0);
        assert!(query::current_alien(&world).is_none());
        assert!(query::is_cleared(&world, RoomCoord::START));
    }

    #[test]
    fn projectile_destroys_objective_and_latches_victory_once() {
        let mut world = open_world(0.0);
        let _ = world
            .projectiles
            .fire(RoomCoord::START, Vec2::new(280.0, 300.0), Heading::EAST)
            .expect("fire");

        let events = run(&mut world, &[Command::ResolveContacts]);

        assert!(events.contains(&Event::ObjectiveDestroyed {
            room: RoomCoord::START
        }));
        assert!(events.contains(&Event::ScoreChanged {
            score: 1000,
            delta: 1000
        }));
        let latches = events
            .iter()
            .filter(|event| matches!(event, Event::OutcomeLatched { .. }))
            .count();
        assert_eq!(latches, 1);
        assert!(query::objective(&world).destroyed);
        assert_eq!(query::outcome(&world), Some(Outcome::Victory));

        assert!(run(&mut world, &[Command::ResolveContacts]).is_empty());
        assert_eq!(query::score(&world), 1000);
    }

    #[test]
    fn frame_snapshot_reflects_current_room() {
        let world = open_world(0.0);
        let frame = query::frame_snapshot(&world);
        assert_eq!(frame.room, RoomCoord::START);
        assert!(frame.connections.contains(Direction::East));
        assert!(frame.alien.is_none());
        assert!(frame.objective.is_some());
        assert_eq!(frame.score, 0);
        assert_eq!(frame.outcome, None);
    }
}
