//! Pixel geometry of a single room derived from its side length.

use glam::Vec2;

use crate::{Connections, Direction};

/// Smallest room side length the geometry accepts; shorter inputs are clamped.
///
/// At this size the interior still leaves room for the alien spawn margin and
/// the collectible footprint once walls are subtracted.
pub const MIN_SIDE_LENGTH: u32 = 160;

const MIN_WALL_THICKNESS: u32 = 20;
const MIN_DOOR_SIZE: u32 = 80;
const MIN_PLAYER_SIZE: u32 = 8;

/// Wall, door and player dimensions for a square room.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoomGeometry {
    side_length: f32,
    wall_thickness: f32,
    door_size: f32,
    player_size: f32,
}

impl RoomGeometry {
    /// Derives the room geometry from the provided side length in pixels.
    ///
    /// Wall thickness is `max(20, S / 20)`, the door spans `max(80, S / 5)`
    /// and the player measures `max(8, S / 50)`, all using integer division.
    #[must_use]
    pub fn from_side_length(side_length: u32) -> Self {
        let side = side_length.max(MIN_SIDE_LENGTH);
        let wall_thickness = (side / 20).max(MIN_WALL_THICKNESS);
        let door_size = (side / 5).max(MIN_DOOR_SIZE);
        let player_size = (side / 50).max(MIN_PLAYER_SIZE);

        Self {
            side_length: side as f32,
            wall_thickness: wall_thickness as f32,
            door_size: door_size as f32,
            player_size: player_size as f32,
        }
    }

    /// Side length of the square room in pixels.
    #[must_use]
    pub const fn side_length(&self) -> f32 {
        self.side_length
    }

    /// Thickness of every wall in pixels.
    #[must_use]
    pub const fn wall_thickness(&self) -> f32 {
        self.wall_thickness
    }

    /// Length of the opening carved into a connected wall.
    #[must_use]
    pub const fn door_size(&self) -> f32 {
        self.door_size
    }

    /// Edge length of the player's square footprint.
    #[must_use]
    pub const fn player_size(&self) -> f32 {
        self.player_size
    }

    /// Half of the player's edge length, used as its collision extent.
    #[must_use]
    pub fn player_half_extent(&self) -> f32 {
        self.player_size / 2.0
    }

    /// Centre point of the room.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::splat(self.side_length / 2.0)
    }

    /// Interval along a wall occupied by the door, centred on the wall.
    #[must_use]
    pub fn door_interval(&self) -> Span {
        let start = (self.side_length - self.door_size) / 2.0;
        Span::new(start, start + self.door_size)
    }

    /// Range an object with the provided inset may occupy along either axis
    /// without overlapping a wall.
    #[must_use]
    pub fn interior(&self, inset: f32) -> Span {
        Span::new(
            self.wall_thickness + inset,
            self.side_length - self.wall_thickness - inset,
        )
    }

    /// Describes the wall on the given side of a room with the given connections.
    #[must_use]
    pub fn wall_span(&self, direction: Direction, connections: Connections) -> WallSpan {
        if connections.contains(direction) {
            WallSpan::Door(self.door_interval())
        } else {
            WallSpan::Solid
        }
    }

    /// Solid rectangles that make up the four walls of a room.
    ///
    /// A solid wall yields one rectangle spanning the full side; a wall with a
    /// door yields the two pieces on either side of the opening.
    #[must_use]
    pub fn wall_rects(&self, connections: Connections) -> Vec<WallRect> {
        let mut rects = Vec::with_capacity(8);
        for direction in Direction::ALL {
            match self.wall_span(direction, connections) {
                WallSpan::Solid => rects.push(self.wall_piece(direction, 0.0, self.side_length)),
                WallSpan::Door(door) => {
                    rects.push(self.wall_piece(direction, 0.0, door.start));
                    rects.push(self.wall_piece(direction, door.end, self.side_length));
                }
            }
        }
        rects
    }

    fn wall_piece(&self, direction: Direction, from: f32, to: f32) -> WallRect {
        let thickness = self.wall_thickness;
        let length = to - from;
        let far = self.side_length - thickness;
        let (origin, size) = match direction {
            Direction::North => (Vec2::new(from, 0.0), Vec2::new(length, thickness)),
            Direction::South => (Vec2::new(from, far), Vec2::new(length, thickness)),
            Direction::West => (Vec2::new(0.0, from), Vec2::new(thickness, length)),
            Direction::East => (Vec2::new(far, from), Vec2::new(thickness, length)),
        };
        WallRect {
            wall: direction,
            origin,
            size,
        }
    }
}

/// Closed interval along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    /// Lower bound of the interval.
    pub start: f32,
    /// Upper bound of the interval.
    pub end: f32,
}

impl Span {
    /// Creates a new interval.
    #[must_use]
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Reports whether the value lies within the interval, bounds included.
    #[must_use]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.start && value <= self.end
    }

    /// Clamps the value into the interval.
    #[must_use]
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.start).min(self.end)
    }

    /// Length of the interval.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.end - self.start
    }
}

/// Shape of a single wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WallSpan {
    /// The wall is closed across its full length.
    Solid,
    /// The wall has an opening spanning the contained interval.
    Door(Span),
}

/// Axis-aligned solid wall rectangle in room-local pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallRect {
    /// Side of the room the rectangle belongs to.
    pub wall: Direction,
    /// Top-left corner of the rectangle.
    pub origin: Vec2,
    /// Width and height of the rectangle.
    pub size: Vec2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_dimensions_follow_side_length() {
        let geometry = RoomGeometry::from_side_length(800);
        assert_eq!(geometry.wall_thickness(), 40.0);
        assert_eq!(geometry.door_size(), 160.0);
        assert_eq!(geometry.player_size(), 16.0);
    }

    #[test]
    fn small_rooms_use_minimum_dimensions() {
        let geometry = RoomGeometry::from_side_length(300);
        assert_eq!(geometry.wall_thickness(), 20.0);
        assert_eq!(geometry.door_size(), 80.0);
        assert_eq!(geometry.player_size(), 8.0);
    }

    #[test]
    fn side_length_is_clamped_to_minimum() {
        let geometry = RoomGeometry::from_side_length(10);
        assert_eq!(geometry.side_length(), MIN_SIDE_LENGTH as f32);
    }

    #[test]
    fn door_interval_is_centred() {
        let geometry = RoomGeometry::from_side_length(600);
        let door = geometry.door_interval();
        assert_eq!(door.start, 240.0);
        assert_eq!(door.end, 360.0);
        assert_eq!(door.length(), geometry.door_size());
    }

    #[test]
    fn solid_walls_yield_one_rect_per_side() {
        let geometry = RoomGeometry::from_side_length(600);
        let rects = geometry.wall_rects(Connections::NONE);
        assert_eq!(rects.len(), 4);
        assert!(rects
            .iter()
            .all(|rect| rect.size.x == 600.0 || rect.size.y == 600.0));
    }

    #[test]
    fn door_splits_wall_around_opening() {
        let geometry = RoomGeometry::from_side_length(600);
        let mut connections = Connections::NONE;
        connections.insert(Direction::East);
        let east: Vec<_> = geometry
            .wall_rects(connections)
            .into_iter()
            .filter(|rect| rect.wall == Direction::East)
            .collect();

        assert_eq!(east.len(), 2);
        assert_eq!(east[0].origin, Vec2::new(570.0, 0.0));
        assert_eq!(east[0].size, Vec2::new(30.0, 240.0));
        assert_eq!(east[1].origin, Vec2::new(570.0, 360.0));
        assert_eq!(east[1].size, Vec2::new(30.0, 240.0));
    }
}
