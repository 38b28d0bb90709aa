#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Warp Adventure simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems and adapters submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! that the session forwards to collaborators. Systems read immutable
//! snapshots and respond exclusively with new command batches.

mod geometry;

use std::{ops::RangeInclusive, time::Duration};

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use geometry::{RoomGeometry, Span, WallRect, WallSpan, MIN_SIDE_LENGTH};

/// Number of room columns in the maze grid.
pub const GRID_COLUMNS: u32 = 10;
/// Number of room rows in the maze grid.
pub const GRID_ROWS: u32 = 10;

/// Logical updates executed per simulated second.
pub const TICKS_PER_SECOND: u32 = 30;
/// Duration of a single logical update.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64);

/// Distance in pixels the player covers per tick along each active axis.
pub const PLAYER_STEP: f32 = 4.0;
/// Distance in pixels a projectile covers per tick along each active axis.
pub const PROJECTILE_SPEED: f32 = 5.0;
/// Edge length of a projectile's square footprint.
pub const PROJECTILE_SIZE: f32 = 10.0;
/// Maximum number of projectiles that may be live at once.
pub const MAX_LIVE_PROJECTILES: usize = 2;

/// Inset from the walls inside which aliens and collectibles spawn.
pub const SPAWN_MARGIN: f32 = 30.0;
/// Range, in ticks, from which wandering aliens draw their next turn interval.
pub const TURN_INTERVAL_TICKS: RangeInclusive<u32> = 30..=90;
/// Scale applied to the combined radii when testing alien contact with the player.
pub const PLAYER_HIT_SCALE: f32 = 1.5;

/// Width of a collectible bar.
pub const COLLECTIBLE_WIDTH: f32 = 30.0;
/// Height of a collectible bar.
pub const COLLECTIBLE_HEIGHT: f32 = 10.0;
/// Extra reach added around a collectible when testing pickups.
pub const COLLECTIBLE_MARGIN: f32 = 15.0;
/// Edge length of the objective's square footprint.
pub const OBJECTIVE_SIZE: f32 = 40.0;

/// Points awarded for picking up a collectible.
pub const COLLECTIBLE_BONUS: u32 = 25;
/// Points awarded for destroying an alien.
pub const ALIEN_BONUS: u32 = 50;
/// Points awarded for destroying the objective.
pub const OBJECTIVE_BONUS: u32 = 1_000;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Opens a new logical tick.
    Tick,
    /// Moves the player one step along the heading and resolves room transitions.
    MovePlayer {
        /// Direction of travel; a still heading only re-checks transitions.
        heading: Heading,
    },
    /// Fires a projectile along the player's last movement direction.
    FireProjectile,
    /// Advances every live projectile and retires those that left play.
    AdvanceProjectiles,
    /// Steers and moves the alien occupying the player's room.
    SteerAlien {
        /// Direction the alien travels this tick.
        heading: Heading,
        /// When present, resets the wander timer with the provided interval in ticks.
        rearm: Option<u32>,
    },
    /// Resolves contacts between the player, projectiles, alien, collectible and objective.
    ResolveContacts,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that a logical tick started.
    TimeAdvanced {
        /// Index of the tick, starting at one.
        tick: u64,
    },
    /// Confirms that the player moved inside the current room.
    PlayerMoved {
        /// Position before the move.
        from: Vec2,
        /// Position after the move.
        to: Vec2,
    },
    /// Confirms that the player passed through a door into another room.
    RoomEntered {
        /// Room the player left.
        from: RoomCoord,
        /// Room the player entered.
        to: RoomCoord,
        /// Side of the previous room the player exited through.
        via: Direction,
    },
    /// Announces that an alien was created on the first visit to a room.
    AlienSpawned {
        /// Room hosting the alien.
        room: RoomCoord,
        /// Archetype assigned to the alien.
        kind: AlienKind,
    },
    /// Announces that a collectible was placed on the first visit to a room.
    CollectiblePlaced {
        /// Room hosting the collectible.
        room: RoomCoord,
    },
    /// Confirms that a projectile was spawned.
    ProjectileFired {
        /// Identifier allocated to the projectile.
        projectile: ProjectileId,
        /// Room the projectile belongs to.
        room: RoomCoord,
    },
    /// Reports that a projectile left play.
    ProjectileRetired {
        /// Identifier of the retired projectile.
        projectile: ProjectileId,
        /// Reason the projectile was removed.
        reason: RetireReason,
    },
    /// Reports that an alien was destroyed by a projectile.
    AlienDestroyed {
        /// Room the alien occupied.
        room: RoomCoord,
        /// Archetype of the destroyed alien.
        kind: AlienKind,
    },
    /// Reports that the player picked up a collectible.
    CollectibleCollected {
        /// Room the collectible occupied.
        room: RoomCoord,
    },
    /// Reports that the objective was destroyed.
    ObjectiveDestroyed {
        /// Room hosting the objective.
        room: RoomCoord,
    },
    /// Reports a change to the player's score.
    ScoreChanged {
        /// Score after applying the award.
        score: u32,
        /// Points awarded.
        delta: u32,
    },
    /// Reports that the session reached a terminal outcome.
    OutcomeLatched {
        /// Outcome that was latched.
        outcome: Outcome,
    },
    /// Requests that the sound collaborator play a cue.
    SoundTriggered {
        /// Cue to play.
        cue: SoundCue,
    },
}

/// Reasons a projectile leaves play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RetireReason {
    /// The player is no longer in the projectile's room.
    RoomMismatch,
    /// The projectile struck a wall.
    WallImpact,
    /// The projectile left the room's pixel bounds.
    OutOfBounds,
    /// The projectile destroyed an alien.
    HitAlien,
    /// The projectile destroyed the objective.
    HitObjective,
}

/// Named sound effects emitted once per occurrence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// The player picked up a collectible.
    CollectiblePickup,
    /// The player fired a projectile.
    ProjectileFired,
    /// A projectile destroyed an alien.
    AlienDestroyed,
    /// A projectile destroyed the objective.
    ObjectiveDestroyed,
    /// An alien caught the player.
    Defeat,
}

impl SoundCue {
    /// Asset name the sound collaborator resolves the cue with.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CollectiblePickup => "dougBarCollect",
            Self::ProjectileFired => "blasterFire",
            Self::AlienDestroyed => "alienDeath",
            Self::ObjectiveDestroyed => "warpCoreDestroyed",
            Self::Defeat => "playerHit",
        }
    }
}

/// Terminal result of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The objective was destroyed.
    Victory,
    /// An alien caught the player.
    Defeat,
}

/// Location of a room within the maze grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomCoord {
    x: u32,
    y: u32,
}

impl RoomCoord {
    /// Room the player starts in. It never hosts an alien.
    pub const START: Self = Self::new(0, 0);

    /// Creates a new room coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the room.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row of the room.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Reports whether this is the start room.
    #[must_use]
    pub const fn is_start(&self) -> bool {
        self.x == Self::START.x && self.y == Self::START.y
    }

    /// Returns the adjacent room in the given direction when it lies inside the grid.
    #[must_use]
    pub fn neighbor(self, direction: Direction, columns: u32, rows: u32) -> Option<Self> {
        let (dx, dy) = direction.offset();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        (x < columns && y < rows).then_some(Self::new(x, y))
    }
}

/// Sides of a room, also used as travel directions between rooms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards decreasing row indices.
    North,
    /// Towards increasing column indices.
    East,
    /// Towards increasing row indices.
    South,
    /// Towards decreasing column indices.
    West,
}

impl Direction {
    /// All directions in clockwise order starting at north.
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Unit grid offset `(dx, dy)` of the direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::North => 1,
            Self::East => 2,
            Self::South => 4,
            Self::West => 8,
        }
    }
}

/// Set of sides through which a room connects to its neighbours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Connections(u8);

impl Connections {
    /// A room without any openings.
    pub const NONE: Self = Self(0);

    /// Builds a set from the provided directions.
    #[must_use]
    pub fn from_directions(directions: &[Direction]) -> Self {
        let mut connections = Self::NONE;
        for direction in directions {
            connections.insert(*direction);
        }
        connections
    }

    /// Reports whether the room opens towards the direction.
    #[must_use]
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Adds an opening towards the direction.
    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    /// Reports whether the room has no openings.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of openings.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates over the openings in clockwise order starting at north.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.contains(*direction))
    }
}

/// Room-to-room connectivity of the maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGraph {
    columns: u32,
    rows: u32,
    rooms: Vec<Connections>,
}

impl MazeGraph {
    /// Creates a grid of isolated rooms.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let capacity = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(0);
        Self {
            columns,
            rows,
            rooms: vec![Connections::NONE; capacity],
        }
    }

    /// Number of room columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of room rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the room lies inside the grid.
    #[must_use]
    pub fn contains(&self, room: RoomCoord) -> bool {
        self.index(room).is_some()
    }

    /// Openings of the room; rooms outside the grid have none.
    #[must_use]
    pub fn connections(&self, room: RoomCoord) -> Connections {
        self.index(room)
            .and_then(|index| self.rooms.get(index).copied())
            .unwrap_or(Connections::NONE)
    }

    /// Adjacent room reached by leaving `room` through `direction`, if connected.
    #[must_use]
    pub fn passage(&self, room: RoomCoord, direction: Direction) -> Option<RoomCoord> {
        if !self.connections(room).contains(direction) {
            return None;
        }
        room.neighbor(direction, self.columns, self.rows)
    }

    /// Opens the wall between `room` and its neighbour in `direction`, on both sides.
    ///
    /// Returns `false` without changes when either room lies outside the grid.
    pub fn connect(&mut self, room: RoomCoord, direction: Direction) -> bool {
        let Some(neighbor) = room.neighbor(direction, self.columns, self.rows) else {
            return false;
        };
        let (Some(from), Some(to)) = (self.index(room), self.index(neighbor)) else {
            return false;
        };
        self.rooms[from].insert(direction);
        self.rooms[to].insert(direction.opposite());
        true
    }

    /// Number of undirected passages in the maze.
    #[must_use]
    pub fn passage_count(&self) -> usize {
        self.rooms.iter().map(|room| room.len()).sum::<usize>() / 2
    }

    /// Iterates over every room and its openings in row-major order.
    pub fn rooms(&self) -> impl Iterator<Item = (RoomCoord, Connections)> + '_ {
        let columns = self.columns.max(1);
        self.rooms.iter().enumerate().map(move |(index, connections)| {
            let index = index as u32;
            (RoomCoord::new(index % columns, index / columns), *connections)
        })
    }

    fn index(&self, room: RoomCoord) -> Option<usize> {
        if room.x() < self.columns && room.y() < self.rows {
            let row = usize::try_from(room.y()).ok()?;
            let column = usize::try_from(room.x()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Unit movement vector with components in `{-1, 0, 1}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Heading {
    dx: i8,
    dy: i8,
}

impl Heading {
    /// No movement.
    pub const STILL: Self = Self::new(0, 0);
    /// Up the screen.
    pub const NORTH: Self = Self::new(0, -1);
    /// Right.
    pub const EAST: Self = Self::new(1, 0);
    /// Down the screen.
    pub const SOUTH: Self = Self::new(0, 1);
    /// Left.
    pub const WEST: Self = Self::new(-1, 0);
    /// Up and right.
    pub const NORTH_EAST: Self = Self::new(1, -1);
    /// Up and left.
    pub const NORTH_WEST: Self = Self::new(-1, -1);
    /// Down and right.
    pub const SOUTH_EAST: Self = Self::new(1, 1);
    /// Down and left.
    pub const SOUTH_WEST: Self = Self::new(-1, 1);

    /// Palette of wandering aliens restricted to cardinal travel, including a pause.
    pub const CARDINAL_WANDER: [Self; 5] =
        [Self::NORTH, Self::EAST, Self::SOUTH, Self::WEST, Self::STILL];
    /// Palette of wandering aliens restricted to diagonal travel.
    pub const DIAGONALS: [Self; 4] = [
        Self::SOUTH_EAST,
        Self::SOUTH_WEST,
        Self::NORTH_EAST,
        Self::NORTH_WEST,
    ];

    /// Creates a heading, reducing each component to its sign.
    #[must_use]
    pub const fn new(dx: i8, dy: i8) -> Self {
        Self {
            dx: dx.signum(),
            dy: dy.signum(),
        }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn dx(&self) -> i8 {
        self.dx
    }

    /// Vertical component.
    #[must_use]
    pub const fn dy(&self) -> i8 {
        self.dy
    }

    /// Reports whether the heading has no movement.
    #[must_use]
    pub const fn is_still(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Heading with the horizontal component inverted.
    #[must_use]
    pub const fn flip_x(self) -> Self {
        Self::new(-self.dx, self.dy)
    }

    /// Heading with the vertical component inverted.
    #[must_use]
    pub const fn flip_y(self) -> Self {
        Self::new(self.dx, -self.dy)
    }

    /// Converts the heading into a vector with the same components.
    #[must_use]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(f32::from(self.dx), f32::from(self.dy))
    }
}

/// Alien archetypes, each with its own movement model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlienKind {
    /// Fast wanderer travelling along cardinal directions.
    Bat,
    /// Pursuer that homes in on the player.
    Dragon,
    /// Slow wanderer travelling along diagonals.
    Snake,
}

impl AlienKind {
    /// Archetypes in the order the archetype table indexes them.
    pub const ALL: [AlienKind; 3] = [Self::Bat, Self::Dragon, Self::Snake];

    /// Distance in pixels covered per tick along each active axis.
    #[must_use]
    pub const fn speed(self) -> f32 {
        match self {
            Self::Bat => 9.0,
            Self::Dragon => 4.0,
            Self::Snake => 2.0,
        }
    }

    /// Diameter of the alien's circular hit area.
    #[must_use]
    pub const fn size(self) -> f32 {
        match self {
            Self::Bat => 12.0,
            Self::Dragon => 20.0,
            Self::Snake => 14.0,
        }
    }

    /// Headings a wandering alien of this kind draws from.
    ///
    /// Dragons use the cardinal palette only for their initial heading.
    #[must_use]
    pub const fn wander_palette(self) -> &'static [Heading] {
        match self {
            Self::Snake => &Heading::DIAGONALS,
            Self::Bat | Self::Dragon => &Heading::CARDINAL_WANDER,
        }
    }
}

/// Deterministic mapping from room coordinates to alien archetypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArchetypeTable {
    /// Multiplier applied to the room column.
    pub x_weight: u32,
    /// Multiplier applied to the room row.
    pub y_weight: u32,
}

impl Default for ArchetypeTable {
    fn default() -> Self {
        Self {
            x_weight: 7,
            y_weight: 11,
        }
    }
}

impl ArchetypeTable {
    /// Selects the archetype for the room: `(x * x_weight + y * y_weight) mod 3`.
    #[must_use]
    pub fn kind_for(&self, room: RoomCoord) -> AlienKind {
        let hash = u64::from(room.x()) * u64::from(self.x_weight)
            + u64::from(room.y()) * u64::from(self.y_weight);
        AlienKind::ALL[(hash % AlienKind::ALL.len() as u64) as usize]
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Room the player occupies.
    pub room: RoomCoord,
    /// Centre of the player in room-local pixels.
    pub position: Vec2,
    /// Last non-still movement heading; projectiles travel along it.
    pub facing: Heading,
    /// Edge length of the player's square footprint.
    pub size: f32,
}

/// Immutable representation of a live projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile.
    pub id: ProjectileId,
    /// Centre of the projectile in room-local pixels.
    pub position: Vec2,
    /// Displacement applied per tick.
    pub velocity: Vec2,
    /// Room the projectile was fired in.
    pub room: RoomCoord,
}

/// Immutable representation of an alien.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlienSnapshot {
    /// Room the alien lives in.
    pub room: RoomCoord,
    /// Archetype of the alien.
    pub kind: AlienKind,
    /// Centre of the alien in room-local pixels.
    pub position: Vec2,
    /// Current travel heading.
    pub heading: Heading,
    /// Distance covered per tick along each active axis.
    pub speed: f32,
    /// Diameter of the alien's hit area.
    pub size: f32,
    /// Ticks elapsed since the wander heading last changed.
    pub ticks_since_turn: u32,
    /// Ticks after which a wandering alien picks a new heading.
    pub turn_interval: u32,
}

/// Immutable representation of a collectible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollectibleSnapshot {
    /// Room hosting the collectible.
    pub room: RoomCoord,
    /// Top-left corner of the bar in room-local pixels.
    pub position: Vec2,
    /// Width and height of the bar.
    pub size: Vec2,
    /// Whether the player already picked it up.
    pub collected: bool,
}

/// Immutable representation of the objective.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectiveSnapshot {
    /// Room hosting the objective.
    pub room: RoomCoord,
    /// Centre of the objective in room-local pixels.
    pub position: Vec2,
    /// Edge length of the objective's square footprint.
    pub size: f32,
    /// Whether a projectile destroyed it.
    pub destroyed: bool,
}

/// Read-only view of everything a renderer needs for the current room.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    /// Index of the last executed tick.
    pub tick: u64,
    /// Room the player occupies.
    pub room: RoomCoord,
    /// Openings of the current room.
    pub connections: Connections,
    /// Geometry shared by every room.
    pub geometry: RoomGeometry,
    /// Player state.
    pub player: PlayerSnapshot,
    /// Live projectiles.
    pub projectiles: Vec<ProjectileSnapshot>,
    /// Alien in the current room, if one is alive.
    pub alien: Option<AlienSnapshot>,
    /// Collectible in the current room, if one was placed.
    pub collectible: Option<CollectibleSnapshot>,
    /// Objective, when it lives in the current room.
    pub objective: Option<ObjectiveSnapshot>,
    /// Current score.
    pub score: u32,
    /// Latched outcome, if the session ended.
    pub outcome: Option<Outcome>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn configuration_types_round_trip_through_bincode() {
        assert_round_trip(&RoomCoord::new(9, 8));
        assert_round_trip(&ArchetypeTable::default());
        assert_round_trip(&Outcome::Victory);
    }

    #[test]
    fn tick_duration_matches_thirty_hertz() {
        assert_eq!(TICK_DURATION.as_nanos(), 33_333_333);
    }

    #[test]
    fn neighbors_stay_inside_grid() {
        let corner = RoomCoord::new(0, 0);
        assert_eq!(corner.neighbor(Direction::North, 10, 10), None);
        assert_eq!(corner.neighbor(Direction::West, 10, 10), None);
        assert_eq!(
            corner.neighbor(Direction::East, 10, 10),
            Some(RoomCoord::new(1, 0))
        );
        let far = RoomCoord::new(9, 9);
        assert_eq!(far.neighbor(Direction::South, 10, 10), None);
        assert_eq!(far.neighbor(Direction::East, 10, 10), None);
    }

    #[test]
    fn connect_opens_both_sides() {
        let mut maze = MazeGraph::new(3, 3);
        assert!(maze.connect(RoomCoord::new(1, 1), Direction::North));
        assert!(maze
            .connections(RoomCoord::new(1, 1))
            .contains(Direction::North));
        assert!(maze
            .connections(RoomCoord::new(1, 0))
            .contains(Direction::South));
        assert_eq!(maze.passage_count(), 1);
        assert_eq!(
            maze.passage(RoomCoord::new(1, 0), Direction::South),
            Some(RoomCoord::new(1, 1))
        );
    }

    #[test]
    fn connect_rejects_edges_leaving_grid() {
        let mut maze = MazeGraph::new(2, 2);
        assert!(!maze.connect(RoomCoord::new(1, 1), Direction::East));
        assert_eq!(maze.passage_count(), 0);
    }

    #[test]
    fn rooms_iterate_in_row_major_order() {
        let maze = MazeGraph::new(3, 2);
        let rooms: Vec<_> = maze.rooms().map(|(room, _)| room).collect();
        assert_eq!(rooms.len(), 6);
        assert_eq!(rooms[1], RoomCoord::new(1, 0));
        assert_eq!(rooms[3], RoomCoord::new(0, 1));
    }

    #[test]
    fn heading_components_reduce_to_signs() {
        let heading = Heading::new(5, -3);
        assert_eq!(heading, Heading::NORTH_EAST);
        assert_eq!(heading.flip_x(), Heading::NORTH_WEST);
        assert_eq!(heading.flip_y(), Heading::SOUTH_EAST);
        assert!(Heading::new(0, 0).is_still());
    }

    #[test]
    fn archetype_table_uses_weighted_hash() {
        let table = ArchetypeTable::default();
        assert_eq!(table.kind_for(RoomCoord::new(0, 0)), AlienKind::Bat);
        assert_eq!(table.kind_for(RoomCoord::new(1, 0)), AlienKind::Dragon);
        assert_eq!(table.kind_for(RoomCoord::new(0, 1)), AlienKind::Snake);
        assert_eq!(table.kind_for(RoomCoord::new(2, 0)), AlienKind::Snake);
    }

    #[test]
    fn connections_iterate_clockwise() {
        let connections = Connections::from_directions(&[Direction::West, Direction::North]);
        let directions: Vec<_> = connections.iter().collect();
        assert_eq!(directions, vec![Direction::North, Direction::West]);
        assert_eq!(connections.len(), 2);
    }
}
