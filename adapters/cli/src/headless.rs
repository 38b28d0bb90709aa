//! Terminal backend that drives scenes without opening a window.

use std::time::Duration;

use anyhow::{ensure, Result as AnyResult};
use glam::Vec2;
use warp_adventure_core::AlienKind;
use warp_adventure_rendering::{Presentation, RenderingBackend, Scene};

use crate::autopilot::Autopilot;

/// Feeds autopilot input to the scene update for a fixed number of frames.
#[derive(Debug)]
pub(crate) struct HeadlessBackend {
    frames: u64,
    frame_delta: Duration,
    autopilot: Autopilot,
}

impl HeadlessBackend {
    pub(crate) fn new(frames: u64, frame_delta: Duration, autopilot: Autopilot) -> Self {
        Self {
            frames,
            frame_delta,
            autopilot,
        }
    }
}

impl RenderingBackend for HeadlessBackend {
    fn run<F>(mut self, presentation: Presentation, mut update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, warp_adventure_rendering::FrameInput, &mut Scene) -> bool,
    {
        ensure!(!self.frame_delta.is_zero(), "frame delta must be positive");

        let Presentation {
            window_title,
            mut scene,
            ..
        } = presentation;
        tracing::info!(
            title = %window_title,
            frames = self.frames,
            "headless run started"
        );

        let mut presented = 0_u64;
        while presented < self.frames {
            let input = self.autopilot.next_input();
            presented += 1;
            if !update_scene(self.frame_delta, input, &mut scene) {
                break;
            }
        }

        tracing::info!(presented, room = ?scene.room, "headless run finished");
        Ok(())
    }
}

/// Draws the scene as text, sampling the centre of each `cell`-sized square.
pub(crate) fn render_ascii(scene: &Scene, cell: f32) -> String {
    let cell = cell.max(1.0);
    let count = (scene.side_length / cell).floor() as usize;
    let mut out = String::with_capacity(count * (count + 1));

    for row in 0..count {
        for column in 0..count {
            let point = Vec2::new((column as f32 + 0.5) * cell, (row as f32 + 0.5) * cell);
            out.push(glyph_at(scene, point));
        }
        out.push('\n');
    }
    out
}

fn glyph_at(scene: &Scene, point: Vec2) -> char {
    if scene
        .projectiles
        .iter()
        .any(|sprite| sprite.rect.contains(point))
    {
        return '*';
    }
    if scene.player.rect.contains(point) {
        return '@';
    }
    if let Some(alien) = scene
        .alien
        .as_ref()
        .filter(|alien| alien.sprite.rect.contains(point))
    {
        return match alien.kind {
            AlienKind::Bat => 'b',
            AlienKind::Dragon => 'd',
            AlienKind::Snake => 's',
        };
    }
    if scene
        .objective
        .is_some_and(|sprite| sprite.rect.contains(point))
    {
        return 'O';
    }
    if scene
        .collectible
        .is_some_and(|sprite| sprite.rect.contains(point))
    {
        return '=';
    }
    if scene.walls.iter().any(|sprite| sprite.rect.contains(point)) {
        return '#';
    }
    '.'
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp_adventure_core::{
        Connections, Direction, FrameSnapshot, Heading, PlayerSnapshot, RoomCoord, RoomGeometry,
    };
    use warp_adventure_rendering::Color;

    fn scene() -> Scene {
        let geometry = RoomGeometry::from_side_length(600);
        Scene::from_snapshot(&FrameSnapshot {
            tick: 0,
            room: RoomCoord::START,
            connections: Connections::from_directions(&[Direction::East]),
            geometry,
            player: PlayerSnapshot {
                room: RoomCoord::START,
                position: geometry.center(),
                facing: Heading::EAST,
                size: geometry.player_size(),
            },
            projectiles: Vec::new(),
            alien: None,
            collectible: None,
            objective: None,
            score: 0,
            outcome: None,
        })
    }

    fn presentation() -> Presentation {
        Presentation::new("test", Color::new(0.0, 0.0, 0.0, 1.0), scene())
    }

    #[test]
    fn ascii_view_shows_walls_door_and_player() {
        let view = render_ascii(&scene(), 10.0);
        let rows: Vec<&str> = view.lines().collect();
        assert_eq!(rows.len(), 60);
        assert!(rows[0].chars().all(|glyph| glyph == '#'));
        assert_eq!(rows[30].chars().last(), Some('.'));
        assert_eq!(rows[10].chars().last(), Some('#'));
        assert_eq!(rows[30].chars().nth(30), Some('@'));
    }

    #[test]
    fn backend_stops_when_update_declines() {
        let backend = HeadlessBackend::new(100, Duration::from_millis(16), Autopilot::new(1));
        let mut calls = 0;
        backend
            .run(presentation(), |_, _, _| {
                calls += 1;
                calls < 5
            })
            .expect("run");
        assert_eq!(calls, 5);
    }

    #[test]
    fn backend_runs_requested_frames() {
        let backend = HeadlessBackend::new(12, Duration::from_millis(16), Autopilot::new(2));
        let mut elapsed = Duration::ZERO;
        backend
            .run(presentation(), |delta, _, _| {
                elapsed += delta;
                true
            })
            .expect("run");
        assert_eq!(elapsed, Duration::from_millis(192));
    }

    #[test]
    fn zero_frame_delta_is_rejected() {
        let backend = HeadlessBackend::new(1, Duration::ZERO, Autopilot::new(3));
        assert!(backend.run(presentation(), |_, _, _| true).is_err());
    }
}
