#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Steering system that decides where the alien in the player's room travels.
//!
//! Each archetype maps to a [`Steering`] strategy. The system reads immutable
//! snapshots and emits a single [`Command::SteerAlien`] per tick; the world
//! applies the shared bounce movement.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use warp_adventure_core::{
    AlienKind, AlienSnapshot, Command, Heading, PlayerSnapshot, TURN_INTERVAL_TICKS,
};

/// Distance below which a pursuing alien keeps its previous heading.
const PURSUIT_THRESHOLD: f32 = 2.0;
/// Minimum normalised component for an axis to take part in pursuit.
const AXIS_ACTIVATION: f32 = 0.382;

/// Decision produced by a steering strategy for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Steer {
    /// Heading to travel along this tick.
    pub heading: Heading,
    /// New wander interval when the heading was re-rolled.
    pub rearm: Option<u32>,
}

impl Steer {
    fn keep(alien: &AlienSnapshot) -> Self {
        Self {
            heading: alien.heading,
            rearm: None,
        }
    }
}

/// Strategy deciding an alien's heading from the current snapshots.
pub trait Steering {
    /// Produces the heading for the next tick.
    fn steer(&self, alien: &AlienSnapshot, player: &PlayerSnapshot, rng: &mut dyn RngCore)
        -> Steer;
}

/// Random walk that re-rolls its heading from a fixed palette on a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wander {
    palette: &'static [Heading],
}

impl Wander {
    /// Wanders along cardinal directions with occasional pauses.
    pub const CARDINAL: Self = Self::new(&Heading::CARDINAL_WANDER);
    /// Wanders along diagonals only.
    pub const DIAGONAL: Self = Self::new(&Heading::DIAGONALS);

    /// Creates a wander strategy drawing from the provided palette.
    #[must_use]
    pub const fn new(palette: &'static [Heading]) -> Self {
        Self { palette }
    }
}

impl Steering for Wander {
    fn steer(
        &self,
        alien: &AlienSnapshot,
        _player: &PlayerSnapshot,
        rng: &mut dyn RngCore,
    ) -> Steer {
        let elapsed = alien.ticks_since_turn.saturating_add(1);
        if elapsed < alien.turn_interval || self.palette.is_empty() {
            return Steer::keep(alien);
        }

        let heading = self.palette[rng.gen_range(0..self.palette.len())];
        Steer {
            heading,
            rearm: Some(rng.gen_range(TURN_INTERVAL_TICKS)),
        }
    }
}

/// Homes in on the player using eight-directional headings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pursuit;

impl Steering for Pursuit {
    fn steer(
        &self,
        alien: &AlienSnapshot,
        player: &PlayerSnapshot,
        _rng: &mut dyn RngCore,
    ) -> Steer {
        let delta = player.position - alien.position;
        let length = delta.length();
        if length <= PURSUIT_THRESHOLD {
            return Steer::keep(alien);
        }

        let axis = |component: f32| {
            if (component / length).abs() > AXIS_ACTIVATION {
                sign(component)
            } else {
                0
            }
        };
        let mut dx = axis(delta.x);
        let mut dy = axis(delta.y);
        if dx == 0 && dy == 0 {
            if delta.x.abs() > delta.y.abs() {
                dx = sign(delta.x);
            } else {
                dy = sign(delta.y);
            }
        }

        Steer {
            heading: Heading::new(dx, dy),
            rearm: None,
        }
    }
}

fn sign(value: f32) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

/// Selects the steering strategy used by an archetype.
#[must_use]
pub fn steering_for(kind: AlienKind) -> &'static dyn Steering {
    const BAT: Wander = Wander::CARDINAL;
    const SNAKE: Wander = Wander::DIAGONAL;
    match kind {
        AlienKind::Bat => &BAT,
        AlienKind::Dragon => &Pursuit,
        AlienKind::Snake => &SNAKE,
    }
}

/// Pure system emitting steering commands for the alien in the player's room.
#[derive(Debug)]
pub struct AlienBehavior {
    rng: ChaCha8Rng,
}

impl AlienBehavior {
    /// Creates the system with a deterministic random stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Emits a steering command when an alien shares the player's room.
    pub fn handle(
        &mut self,
        alien: Option<&AlienSnapshot>,
        player: &PlayerSnapshot,
        out: &mut Vec<Command>,
    ) {
        let Some(alien) = alien else {
            return;
        };
        if alien.room != player.room {
            return;
        }

        let Steer { heading, rearm } =
            steering_for(alien.kind).steer(alien, player, &mut self.rng);
        out.push(Command::SteerAlien { heading, rearm });
    }
}
