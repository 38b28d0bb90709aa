//! Alien state and the bounce movement shared by every archetype.

use glam::Vec2;
use rand::Rng;
use warp_adventure_core::{
    AlienKind, AlienSnapshot, Heading, RoomCoord, RoomGeometry, SPAWN_MARGIN, TURN_INTERVAL_TICKS,
};

/// Alien living in a single room.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Alien {
    pub(crate) kind: AlienKind,
    pub(crate) position: Vec2,
    pub(crate) heading: Heading,
    pub(crate) ticks_since_turn: u32,
    pub(crate) turn_interval: u32,
}

impl Alien {
    /// Creates an alien at a uniformly random position inside the spawn margin.
    pub(crate) fn spawn<R: Rng + ?Sized>(
        kind: AlienKind,
        geometry: &RoomGeometry,
        rng: &mut R,
    ) -> Self {
        let area = geometry.interior(SPAWN_MARGIN);
        let x = area.start + rng.gen::<f32>() * area.length();
        let y = area.start + rng.gen::<f32>() * area.length();
        let palette = kind.wander_palette();
        let heading = palette[rng.gen_range(0..palette.len())];

        Self {
            kind,
            position: Vec2::new(x, y),
            heading,
            ticks_since_turn: 0,
            turn_interval: rng.gen_range(TURN_INTERVAL_TICKS),
        }
    }

    /// Applies a steering decision and moves the alien, bouncing off walls.
    ///
    /// Each axis whose next coordinate would leave the interior inverts instead
    /// of moving. The position is clamped into the interior afterwards.
    pub(crate) fn steer(&mut self, heading: Heading, rearm: Option<u32>, geometry: &RoomGeometry) {
        match rearm {
            Some(interval) => {
                self.ticks_since_turn = 0;
                self.turn_interval = interval;
            }
            None => self.ticks_since_turn = self.ticks_since_turn.saturating_add(1),
        }

        let range = geometry.interior(self.kind.size() / 2.0);
        let next = self.position + heading.to_vec2() * self.kind.speed();
        let mut heading = heading;

        if range.contains(next.x) {
            self.position.x = next.x;
        } else {
            heading = heading.flip_x();
        }
        if range.contains(next.y) {
            self.position.y = next.y;
        } else {
            heading = heading.flip_y();
        }

        self.position = Vec2::new(range.clamp(self.position.x), range.clamp(self.position.y));
        self.heading = heading;
    }

    /// Circle test against another object centred on `point`.
    ///
    /// Contact occurs when the distance is below `(size + other_size) * scale / 2`.
    pub(crate) fn touches(&self, point: Vec2, other_size: f32, scale: f32) -> bool {
        self.position.distance(point) < (self.kind.size() + other_size) * scale / 2.0
    }

    pub(crate) fn snapshot(&self, room: RoomCoord) -> AlienSnapshot {
        AlienSnapshot {
            room,
            kind: self.kind,
            position: self.position,
            heading: self.heading,
            speed: self.kind.speed(),
            size: self.kind.size(),
            ticks_since_turn: self.ticks_since_turn,
            turn_interval: self.turn_interval,
        }
    }
}
