//! Wall, door and room-boundary tests for actors moving inside a room.

use glam::Vec2;
use warp_adventure_core::{Connections, Direction, MazeGraph, RoomCoord, RoomGeometry, WallSpan};

/// Sides inspected for a room change, in priority order.
const TRANSITION_ORDER: [Direction; 4] = [
    Direction::West,
    Direction::East,
    Direction::North,
    Direction::South,
];

/// Result of an actor passing through a door.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Room the actor enters.
    pub to: RoomCoord,
    /// Side of the previous room the actor exited through.
    pub via: Direction,
    /// Position of the actor inside the entered room.
    pub position: Vec2,
}

/// Reports whether an actor centred on `point` may occupy that position.
///
/// The actor must stay within `[half_extent, S - half_extent]` on both axes.
/// Inside a wall band the point is accepted only when the wall carries a door
/// and the parallel coordinate lies within the door interval, bounds included.
#[must_use]
pub fn can_move_to(
    geometry: &RoomGeometry,
    connections: Connections,
    point: Vec2,
    half_extent: f32,
) -> bool {
    let side = geometry.side_length();
    let bounds = [half_extent, side - half_extent];
    if point.x < bounds[0] || point.x > bounds[1] || point.y < bounds[0] || point.y > bounds[1] {
        return false;
    }

    let thickness = geometry.wall_thickness();
    Direction::ALL.into_iter().all(|wall| {
        let (in_band, along) = match wall {
            Direction::North => (point.y < thickness, point.x),
            Direction::South => (point.y > side - thickness, point.x),
            Direction::West => (point.x < thickness, point.y),
            Direction::East => (point.x > side - thickness, point.y),
        };
        if !in_band {
            return true;
        }
        match geometry.wall_span(wall, connections) {
            WallSpan::Solid => false,
            WallSpan::Door(door) => door.contains(along),
        }
    })
}

/// Detects whether an actor has crossed into a door far enough to change rooms.
///
/// Sides are checked west, east, north, south; the first connected side whose
/// wall band contains the actor wins. The actor is placed at the mirrored edge
/// of the neighbouring room, just clear of its wall.
#[must_use]
pub fn room_transition(
    geometry: &RoomGeometry,
    maze: &MazeGraph,
    room: RoomCoord,
    position: Vec2,
    half_extent: f32,
) -> Option<Transition> {
    let side = geometry.side_length();
    let thickness = geometry.wall_thickness();
    let near = thickness + half_extent;
    let far = side - thickness - half_extent;

    TRANSITION_ORDER.into_iter().find_map(|via| {
        let crossed = match via {
            Direction::West => position.x < thickness,
            Direction::East => position.x > side - thickness,
            Direction::North => position.y < thickness,
            Direction::South => position.y > side - thickness,
        };
        if !crossed {
            return None;
        }
        let to = maze.passage(room, via)?;
        let position = match via {
            Direction::West => Vec2::new(far, position.y),
            Direction::East => Vec2::new(near, position.y),
            Direction::North => Vec2::new(position.x, far),
            Direction::South => Vec2::new(position.x, near),
        };
        Some(Transition { to, via, position })
    })
}
