//! Seeded stand-in for a human at the keyboard.

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use warp_adventure_rendering::FrameInput;

const MOVE_KEYS: [&str; 4] = ["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight"];
const FIRE_KEY: &str = "space";
const HOLD_FRAMES: RangeInclusive<u32> = 15..=90;
const FIRE_CHANCE: f64 = 0.05;

/// Holds a random movement key for a random number of frames and taps fire
/// now and then.
#[derive(Debug)]
pub(crate) struct Autopilot {
    rng: ChaCha8Rng,
    held: Option<&'static str>,
    remaining: u32,
}

impl Autopilot {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            held: None,
            remaining: 0,
        }
    }

    /// Key transitions for the next frame. Releases are listed before presses.
    pub(crate) fn next_input(&mut self) -> FrameInput {
        let mut input = FrameInput::default();

        if self.remaining == 0 {
            if let Some(key) = self.held.take() {
                input.released.push(key.to_owned());
            }
            // One slot past the end means standing still.
            self.held = MOVE_KEYS.get(self.rng.gen_range(0..=MOVE_KEYS.len())).copied();
            if let Some(key) = self.held {
                input.pressed.push(key.to_owned());
            }
            self.remaining = self.rng.gen_range(HOLD_FRAMES);
        } else {
            self.remaining -= 1;
        }

        if self.rng.gen_bool(FIRE_CHANCE) {
            input.pressed.push(FIRE_KEY.to_owned());
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_produces_same_inputs() {
        let mut first = Autopilot::new(9);
        let mut second = Autopilot::new(9);
        for _ in 0..500 {
            assert_eq!(first.next_input(), second.next_input());
        }
    }

    #[test]
    fn at_most_one_movement_key_is_held() {
        let mut autopilot = Autopilot::new(3);
        let mut held: Vec<String> = Vec::new();
        for _ in 0..2_000 {
            let input = autopilot.next_input();
            held.retain(|key| !input.released.contains(key));
            held.extend(
                input
                    .pressed
                    .into_iter()
                    .filter(|key| key.as_str() != FIRE_KEY),
            );
            assert!(held.len() <= 1, "held {held:?}");
        }
    }
}
