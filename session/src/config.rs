//! Session configuration loaded from TOML.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use warp_adventure_core::{ArchetypeTable, RoomCoord, GRID_COLUMNS, GRID_ROWS};
use warp_adventure_world::WorldConfig;

/// Tunables for a single play session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Side length of every room in pixels; values below 160 are raised to 160.
    pub room_side_length: u32,
    /// Number of room columns.
    pub grid_columns: u32,
    /// Number of room rows.
    pub grid_rows: u32,
    /// Probability that a passage opens between two adjacent rooms.
    pub connection_chance: f64,
    /// Probability that a room receives a collectible on its first visit.
    pub collectible_chance: f64,
    /// Rooms the objective may be placed in.
    pub objective_candidates: Vec<RoomCoord>,
    /// Weights of the room-to-archetype hash.
    pub archetype_weights: ArchetypeTable,
    /// Delay between the outcome latch and the narrative notification.
    pub outcome_delay_ms: u64,
    /// Seed for every random decision; drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let world = WorldConfig::default();
        Self {
            room_side_length: world.side_length,
            grid_columns: GRID_COLUMNS,
            grid_rows: GRID_ROWS,
            connection_chance: 0.7,
            collectible_chance: world.collectible_chance,
            objective_candidates: world.objective_candidates,
            archetype_weights: world.archetypes,
            outcome_delay_ms: 2_000,
            seed: None,
        }
    }
}

/// Reasons a session configuration is rejected.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read session config at {}", .path.display())]
    Read {
        /// Location of the file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The configuration file is not valid TOML or has unexpected fields.
    #[error("failed to parse session config toml contents")]
    Parse(#[from] toml::de::Error),
    /// A probability lies outside `[0, 1]`.
    #[error("{name} must lie within [0, 1], got {value}")]
    Probability {
        /// Name of the offending field.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// The grid has no rooms.
    #[error("grid dimensions must be non-zero, got {columns}x{rows}")]
    EmptyGrid {
        /// Requested columns.
        columns: u32,
        /// Requested rows.
        rows: u32,
    },
    /// The grid holds a single room, leaving the start room without exits.
    #[error("grid must hold at least two rooms, got {columns}x{rows}")]
    SingleRoomGrid {
        /// Requested columns.
        columns: u32,
        /// Requested rows.
        rows: u32,
    },
    /// The grid exceeds the supported room count.
    #[error("grid {columns}x{rows} exceeds the {}x{} maximum", GRID_COLUMNS, GRID_ROWS)]
    OversizedGrid {
        /// Requested columns.
        columns: u32,
        /// Requested rows.
        rows: u32,
    },
    /// An objective candidate lies outside the grid.
    #[error(
        "objective candidate ({}, {}) lies outside the {columns}x{rows} grid",
        .room.x(),
        .room.y()
    )]
    ObjectiveOutsideGrid {
        /// Rejected candidate.
        room: RoomCoord,
        /// Grid columns.
        columns: u32,
        /// Grid rows.
        rows: u32,
    },
}

impl SessionConfig {
    /// Reads and validates the configuration stored at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field against its permitted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("connection_chance", self.connection_chance),
            ("collectible_chance", self.collectible_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { name, value });
            }
        }

        let (columns, rows) = (self.grid_columns, self.grid_rows);
        if columns == 0 || rows == 0 {
            return Err(ConfigError::EmptyGrid { columns, rows });
        }
        if columns == 1 && rows == 1 {
            return Err(ConfigError::SingleRoomGrid { columns, rows });
        }
        if columns > GRID_COLUMNS || rows > GRID_ROWS {
            return Err(ConfigError::OversizedGrid { columns, rows });
        }

        if let Some(room) = self
            .objective_candidates
            .iter()
            .copied()
            .find(|room| room.x() >= columns || room.y() >= rows)
        {
            return Err(ConfigError::ObjectiveOutsideGrid {
                room,
                columns,
                rows,
            });
        }
        Ok(())
    }

    /// Delay between the outcome latch and the narrative notification.
    #[must_use]
    pub fn outcome_delay(&self) -> Duration {
        Duration::from_millis(self.outcome_delay_ms)
    }

    pub(crate) fn world_config(&self, seed: u64) -> WorldConfig {
        WorldConfig {
            side_length: self.room_side_length,
            collectible_chance: self.collectible_chance,
            archetypes: self.archetype_weights,
            objective_candidates: self.objective_candidates.clone(),
            seed,
        }
    }
}
