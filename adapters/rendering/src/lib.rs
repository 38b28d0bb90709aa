#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Warp Adventure adapters.
//!
//! Backends never read the world directly. They receive a [`Scene`] built from
//! a [`FrameSnapshot`] and draw its rectangles in order: background, walls,
//! collectible, objective, alien, player, projectiles and finally the score.

use std::time::Duration;

use anyhow::Result as AnyResult;
use glam::Vec2;
use warp_adventure_core::{AlienKind, FrameSnapshot, Outcome, RoomCoord, GRID_COLUMNS};

/// Number of digits the score is padded to.
pub const SCORE_DIGITS: usize = 6;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from a `0xRRGGBB` value.
    #[must_use]
    pub const fn from_hex(rgb: u32) -> Self {
        Self::from_rgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Packs the color back into a `0xRRGGBB` value, dropping alpha.
    #[must_use]
    pub fn to_hex(self) -> u32 {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.red) << 16) | (channel(self.green) << 8) | channel(self.blue)
    }
}

/// Wall colours cycled through as the player moves between rooms.
pub const ROOM_PALETTE: [Color; 59] = [
    Color::from_hex(0x000000),
    Color::from_hex(0xFFFFFF),
    Color::from_hex(0xFF0000),
    Color::from_hex(0x00FF00),
    Color::from_hex(0x0000FF),
    Color::from_hex(0xFFFF00),
    Color::from_hex(0xFF00FF),
    Color::from_hex(0x00FFFF),
    Color::from_hex(0xFF8000),
    Color::from_hex(0x8000FF),
    Color::from_hex(0x008000),
    Color::from_hex(0x800000),
    Color::from_hex(0x000080),
    Color::from_hex(0x808000),
    Color::from_hex(0x800080),
    Color::from_hex(0x008080),
    Color::from_hex(0xFF8080),
    Color::from_hex(0x80FF80),
    Color::from_hex(0x8080FF),
    Color::from_hex(0xFFFF80),
    Color::from_hex(0xFF80FF),
    Color::from_hex(0x80FFFF),
    Color::from_hex(0xFFC080),
    Color::from_hex(0xC080FF),
    Color::from_hex(0x80C080),
    Color::from_hex(0xC08080),
    Color::from_hex(0x8080C0),
    Color::from_hex(0xC0C080),
    Color::from_hex(0xC080C0),
    Color::from_hex(0x80C0C0),
    Color::from_hex(0xFFE0C0),
    Color::from_hex(0xE0C0FF),
    Color::from_hex(0xC0E0C0),
    Color::from_hex(0xE0C0E0),
    Color::from_hex(0xC0E0E0),
    Color::from_hex(0xFFFFC0),
    Color::from_hex(0xFFC0FF),
    Color::from_hex(0xC0FFFF),
    Color::from_hex(0xFFE0E0),
    Color::from_hex(0xE0FFE0),
    Color::from_hex(0xE0E0FF),
    Color::from_hex(0xE0E0E0),
    Color::from_hex(0xC0C0C0),
    Color::from_hex(0x808080),
    Color::from_hex(0x404040),
    Color::from_hex(0x202020),
    Color::from_hex(0x101010),
    Color::from_hex(0xFF4000),
    Color::from_hex(0xFF0040),
    Color::from_hex(0x40FF00),
    Color::from_hex(0x00FF40),
    Color::from_hex(0x0040FF),
    Color::from_hex(0x4000FF),
    Color::from_hex(0xFF8000),
    Color::from_hex(0xFF0080),
    Color::from_hex(0x80FF00),
    Color::from_hex(0x00FF80),
    Color::from_hex(0x0080FF),
    Color::from_hex(0x8000FF),
];

const BACKGROUND: Color = Color::from_hex(0x444444);
const PLAYER: Color = Color::from_hex(0xFFFF00);
const PROJECTILE: Color = Color::from_hex(0xFF0000);
const COLLECTIBLE: Color = Color::from_hex(0xE6C7B3);
const OBJECTIVE: Color = Color::from_hex(0x4488FF);
const SCORE: Color = Color::from_hex(0x8000FF);

/// Wall colour of the provided room.
#[must_use]
pub fn room_color(room: RoomCoord) -> Color {
    let index = (room.x() + room.y() * GRID_COLUMNS) as usize % ROOM_PALETTE.len();
    ROOM_PALETTE[index]
}

/// Colour an alien archetype is drawn with.
#[must_use]
pub const fn alien_color(kind: AlienKind) -> Color {
    match kind {
        AlienKind::Bat => Color::from_hex(0x8000FF),
        AlienKind::Dragon => Color::from_hex(0xFF0000),
        AlienKind::Snake => Color::from_hex(0x00FF00),
    }
}

/// Zero-padded score text.
#[must_use]
pub fn score_text(score: u32) -> String {
    format!("{score:0width$}", width = SCORE_DIGITS)
}

/// Axis-aligned rectangle in room-local pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Creates a square centred on `center`.
    #[must_use]
    pub fn centered(center: Vec2, side: f32) -> Self {
        Self::new(center - Vec2::splat(side / 2.0), Vec2::splat(side))
    }

    /// Reports whether the point lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.origin + self.size;
        point.x >= self.origin.x && point.x < max.x && point.y >= self.origin.y && point.y < max.y
    }
}

/// Filled rectangle drawn with a single colour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    /// Area covered by the sprite.
    pub rect: Rect,
    /// Fill colour.
    pub color: Color,
}

impl Sprite {
    /// Creates a sprite.
    #[must_use]
    pub const fn new(rect: Rect, color: Color) -> Self {
        Self { rect, color }
    }
}

/// Alien drawn in the current room.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlienPresentation {
    /// Archetype, used by backends that draw distinct silhouettes.
    pub kind: AlienKind,
    /// Bounding box and colour.
    pub sprite: Sprite,
}

/// Everything a backend draws for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Room being displayed.
    pub room: RoomCoord,
    /// Side length of the square room.
    pub side_length: f32,
    /// Floor colour.
    pub background: Color,
    /// Wall segments around the room, excluding door openings.
    pub walls: Vec<Sprite>,
    /// Collectible, unless absent or already picked up.
    pub collectible: Option<Sprite>,
    /// Objective, unless absent or destroyed.
    pub objective: Option<Sprite>,
    /// Alien of the current room.
    pub alien: Option<AlienPresentation>,
    /// Player square.
    pub player: Sprite,
    /// Live projectiles.
    pub projectiles: Vec<Sprite>,
    /// Zero-padded score.
    pub score: String,
    /// Colour of the score digits.
    pub score_color: Color,
    /// Latched outcome, if the session ended.
    pub outcome: Option<Outcome>,
}

impl Scene {
    /// Builds the scene for the player's current room.
    #[must_use]
    pub fn from_snapshot(frame: &FrameSnapshot) -> Self {
        let geometry = &frame.geometry;
        let wall_color = room_color(frame.room);
        let walls = geometry
            .wall_rects(frame.connections)
            .into_iter()
            .map(|wall| Sprite::new(Rect::new(wall.origin, wall.size), wall_color))
            .collect();

        let collectible = frame
            .collectible
            .filter(|bar| !bar.collected)
            .map(|bar| Sprite::new(Rect::new(bar.position, bar.size), COLLECTIBLE));
        let objective = frame
            .objective
            .filter(|core| !core.destroyed)
            .map(|core| Sprite::new(Rect::centered(core.position, core.size), OBJECTIVE));
        let alien = frame.alien.as_ref().map(|alien| AlienPresentation {
            kind: alien.kind,
            sprite: Sprite::new(
                Rect::centered(alien.position, alien.size),
                alien_color(alien.kind),
            ),
        });
        let projectiles = frame
            .projectiles
            .iter()
            .map(|projectile| {
                Sprite::new(
                    Rect::centered(projectile.position, warp_adventure_core::PROJECTILE_SIZE),
                    PROJECTILE,
                )
            })
            .collect();

        Self {
            room: frame.room,
            side_length: geometry.side_length(),
            background: BACKGROUND,
            walls,
            collectible,
            objective,
            alien,
            player: Sprite::new(
                Rect::centered(frame.player.position, frame.player.size),
                PLAYER,
            ),
            projectiles,
            score: score_text(frame.score),
            score_color: SCORE,
            outcome: frame.outcome,
        }
    }

    /// Sprites in back-to-front draw order, excluding the background.
    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> + '_ {
        self.walls
            .iter()
            .chain(self.collectible.iter())
            .chain(self.objective.iter())
            .chain(self.alien.iter().map(|alien| &alien.sprite))
            .chain(std::iter::once(&self.player))
            .chain(self.projectiles.iter())
    }
}

/// Key transitions captured by a backend since the previous frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Platform names of keys pressed this frame.
    pub pressed: Vec<String>,
    /// Platform names of keys released this frame.
    pub released: Vec<String>,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Warp Adventure scenes.
pub trait RenderingBackend {
    /// Runs the backend until it is requested to exit.
    ///
    /// The `update_scene` closure receives the frame delta and the input captured
    /// by the backend, and replaces the scene before it is drawn. Returning
    /// `false` asks the backend to stop.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp_adventure_core::{
        AlienSnapshot, CollectibleSnapshot, Connections, Direction, Heading, ObjectiveSnapshot,
        PlayerSnapshot, ProjectileId, ProjectileSnapshot, RoomGeometry,
    };

    fn frame() -> FrameSnapshot {
        let geometry = RoomGeometry::from_side_length(600);
        FrameSnapshot {
            tick: 12,
            room: RoomCoord::new(3, 2),
            connections: Connections::from_directions(&[Direction::North, Direction::East]),
            geometry,
            player: PlayerSnapshot {
                room: RoomCoord::new(3, 2),
                position: Vec2::new(300.0, 300.0),
                facing: Heading::EAST,
                size: geometry.player_size(),
            },
            projectiles: vec![ProjectileSnapshot {
                id: ProjectileId::new(0),
                position: Vec2::new(320.0, 300.0),
                velocity: Vec2::new(5.0, 0.0),
                room: RoomCoord::new(3, 2),
            }],
            alien: Some(AlienSnapshot {
                room: RoomCoord::new(3, 2),
                kind: AlienKind::Snake,
                position: Vec2::new(100.0, 120.0),
                heading: Heading::SOUTH_EAST,
                speed: AlienKind::Snake.speed(),
                size: AlienKind::Snake.size(),
                ticks_since_turn: 3,
                turn_interval: 50,
            }),
            collectible: Some(CollectibleSnapshot {
                room: RoomCoord::new(3, 2),
                position: Vec2::new(200.0, 200.0),
                size: Vec2::new(30.0, 10.0),
                collected: true,
            }),
            objective: Some(ObjectiveSnapshot {
                room: RoomCoord::new(3, 2),
                position: Vec2::new(300.0, 300.0),
                size: 40.0,
                destroyed: false,
            }),
            score: 75,
            outcome: None,
        }
    }

    #[test]
    fn hex_round_trips_through_color() {
        assert_eq!(Color::from_hex(0x4488FF).to_hex(), 0x4488FF);
        assert_eq!(Color::from_hex(0xFFFFFF), Color::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn room_colors_cycle_through_palette() {
        assert_eq!(room_color(RoomCoord::START), ROOM_PALETTE[0]);
        assert_eq!(room_color(RoomCoord::new(3, 2)), ROOM_PALETTE[23]);
        assert_eq!(room_color(RoomCoord::new(9, 5)), ROOM_PALETTE[0]);
    }

    #[test]
    fn score_is_zero_padded() {
        assert_eq!(score_text(0), "000000");
        assert_eq!(score_text(1075), "001075");
        assert_eq!(score_text(12_345_678), "12345678");
    }

    #[test]
    fn scene_omits_collected_items() {
        let scene = Scene::from_snapshot(&frame());
        assert!(scene.collectible.is_none());
        assert_eq!(
            scene.objective.map(|core| core.rect),
            Some(Rect::new(Vec2::new(280.0, 280.0), Vec2::splat(40.0)))
        );
        assert_eq!(scene.score, "000075");
    }

    #[test]
    fn scene_leaves_door_gaps_in_walls() {
        let scene = Scene::from_snapshot(&frame());
        assert_eq!(scene.walls.len(), 6);
        let north_door = Vec2::new(300.0, 10.0);
        let west_wall = Vec2::new(10.0, 300.0);
        assert!(!scene.walls.iter().any(|wall| wall.rect.contains(north_door)));
        assert!(scene.walls.iter().any(|wall| wall.rect.contains(west_wall)));
        assert!(scene
            .walls
            .iter()
            .all(|wall| wall.color == room_color(RoomCoord::new(3, 2))));
    }

    #[test]
    fn sprites_follow_draw_order() {
        let scene = Scene::from_snapshot(&frame());
        let sprites: Vec<&Sprite> = scene.sprites().collect();
        assert_eq!(sprites.len(), 6 + 1 + 1 + 1 + 1);
        assert_eq!(sprites[7].color, alien_color(AlienKind::Snake));
        assert_eq!(*sprites[8], scene.player);
        assert_eq!(sprites[9].rect, Rect::centered(Vec2::new(320.0, 300.0), 10.0));
    }
}
