#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Procedural generation of the room connectivity graph.

use rand::Rng;
use warp_adventure_core::{Direction, MazeGraph, RoomCoord};

const DEFAULT_CONNECTION_CHANCE: f64 = 0.7;

/// Generates mazes by opening each adjacent pair of rooms independently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MazeGenerator {
    connection_chance: f64,
}

impl Default for MazeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECTION_CHANCE)
    }
}

impl MazeGenerator {
    /// Creates a generator opening each passage with the provided probability.
    ///
    /// The probability is clamped into `[0, 1]`.
    #[must_use]
    pub fn new(connection_chance: f64) -> Self {
        let connection_chance = if connection_chance.is_nan() {
            0.0
        } else {
            connection_chance.clamp(0.0, 1.0)
        };
        Self { connection_chance }
    }

    /// Probability that a passage opens between two adjacent rooms.
    #[must_use]
    pub const fn connection_chance(&self) -> f64 {
        self.connection_chance
    }

    /// Builds a maze with one independent draw per undirected adjacent pair.
    ///
    /// Draws run in row-major order, east edge before south edge. When the start
    /// room ends up without any opening, the passage to its east neighbour is
    /// forced open, or the south one on a single-column grid. Other isolated
    /// rooms are left as they are.
    ///
    /// The grid must hold at least two rooms; a lone start room has no
    /// neighbour to open towards.
    pub fn generate<R: Rng + ?Sized>(&self, columns: u32, rows: u32, rng: &mut R) -> MazeGraph {
        debug_assert!(
            u64::from(columns) * u64::from(rows) >= 2,
            "maze needs at least two rooms, got {columns}x{rows}"
        );
        let mut maze = MazeGraph::new(columns, rows);

        for y in 0..rows {
            for x in 0..columns {
                let room = RoomCoord::new(x, y);
                for direction in [Direction::East, Direction::South] {
                    if room.neighbor(direction, columns, rows).is_none() {
                        continue;
                    }
                    if rng.gen_bool(self.connection_chance) {
                        let _ = maze.connect(room, direction);
                    }
                }
            }
        }

        if maze.connections(RoomCoord::START).is_empty() {
            let repaired = maze.connect(RoomCoord::START, Direction::East)
                || maze.connect(RoomCoord::START, Direction::South);
            tracing::debug!(repaired, "start room had no openings");
        }

        tracing::debug!(
            columns,
            rows,
            passages = maze.passage_count(),
            "maze generated"
        );
        maze
    }
}
