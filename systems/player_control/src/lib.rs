#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Translates abstract key state into player commands once per tick.

use serde::{Deserialize, Serialize};
use warp_adventure_core::{Command, Heading};

/// Logical keys the simulation reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Moves the player up the screen.
    Up,
    /// Moves the player down the screen.
    Down,
    /// Moves the player left.
    Left,
    /// Moves the player right.
    Right,
    /// Fires a projectile.
    Fire,
}

impl Key {
    /// Maps a platform key name onto a logical key, ignoring case.
    ///
    /// Accepts `w`/`a`/`s`/`d`, the `Arrow*` names and `space`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "w" | "arrowup" | "up" => Some(Self::Up),
            "s" | "arrowdown" | "down" => Some(Self::Down),
            "a" | "arrowleft" | "left" => Some(Self::Left),
            "d" | "arrowright" | "right" => Some(Self::Right),
            " " | "space" | "spacebar" => Some(Self::Fire),
            _ => None,
        }
    }
}

/// Input captured for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Combined heading of the held movement keys.
    pub heading: Heading,
    /// Whether a fire press was pending.
    pub fire: bool,
}

/// Key state fed by the platform layer between ticks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    fire_pressed: bool,
}

impl InputState {
    /// Records a key press. Fire presses stay latched until the next snapshot.
    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Up => self.up = true,
            Key::Down => self.down = true,
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Fire => self.fire_pressed = true,
        }
    }

    /// Records a key release.
    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Up => self.up = false,
            Key::Down => self.down = false,
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            Key::Fire => {}
        }
    }

    /// Polls held keys and consumes a pending fire press.
    pub fn take_snapshot(&mut self) -> InputSnapshot {
        let dx = i8::from(self.right) - i8::from(self.left);
        let dy = i8::from(self.down) - i8::from(self.up);
        InputSnapshot {
            heading: Heading::new(dx, dy),
            fire: std::mem::take(&mut self.fire_pressed),
        }
    }
}

/// Pure system that turns a tick's input into player commands.
#[derive(Debug, Default)]
pub struct PlayerControl;

impl PlayerControl {
    /// Emits a fire command when requested, followed by the movement command.
    pub fn handle(&mut self, input: &InputSnapshot, out: &mut Vec<Command>) {
        if input.fire {
            out.push(Command::FireProjectile);
        }
        out.push(Command::MovePlayer {
            heading: input.heading,
        });
    }
}
