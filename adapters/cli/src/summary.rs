//! End-of-run report printed by the command-line adapter.

use std::{collections::BTreeMap, fmt};

use serde::Serialize;
use warp_adventure_core::{Outcome, RoomCoord, SoundCue};
use warp_adventure_session::{NarrativeSink, Session, SoundSink};
use warp_adventure_world::query;

/// Counts every cue the session asked to play.
#[derive(Debug, Default)]
pub(crate) struct SoundLog {
    played: BTreeMap<&'static str, u32>,
}

impl SoundSink for SoundLog {
    fn play(&mut self, cue: SoundCue) {
        tracing::debug!(cue = cue.name(), "sound");
        *self.played.entry(cue.name()).or_default() += 1;
    }
}

/// Records the narrative the session asked to present.
#[derive(Debug, Default)]
pub(crate) struct Narrator {
    presented: Option<Outcome>,
}

impl Narrator {
    pub(crate) fn presented(&self) -> Option<Outcome> {
        self.presented
    }
}

impl NarrativeSink for Narrator {
    fn trigger_victory(&mut self) {
        tracing::info!("the warp core is destroyed; the maze is saved");
        self.presented = Some(Outcome::Victory);
    }

    fn trigger_defeat(&mut self) {
        tracing::info!("an alien caught the player");
        self.presented = Some(Outcome::Defeat);
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RunSummary {
    seed: u64,
    ticks: u64,
    simulated_seconds: f64,
    room: RoomCoord,
    score: u32,
    outcome: Option<Outcome>,
    narrated: Option<Outcome>,
    rooms_entered: u32,
    projectiles_fired: u32,
    aliens_destroyed: u32,
    collectibles_collected: u32,
    sounds: BTreeMap<&'static str, u32>,
}

impl RunSummary {
    pub(crate) fn collect(session: &Session, sounds: &SoundLog, narrator: &Narrator) -> Self {
        let stats = session.stats();
        let world = session.world();
        Self {
            seed: session.seed(),
            ticks: query::tick_index(world),
            simulated_seconds: session.elapsed().as_secs_f64(),
            room: query::player(world).room,
            score: query::score(world),
            outcome: session.outcome(),
            narrated: narrator.presented(),
            rooms_entered: stats.rooms_entered,
            projectiles_fired: stats.projectiles_fired,
            aliens_destroyed: stats.aliens_destroyed,
            collectibles_collected: stats.collectibles_collected,
            sounds: sounds.played.clone(),
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "seed:          {}", self.seed)?;
        writeln!(
            f,
            "ticks:         {} ({:.2}s simulated)",
            self.ticks, self.simulated_seconds
        )?;
        writeln!(f, "room:          ({}, {})", self.room.x(), self.room.y())?;
        writeln!(f, "score:         {:06}", self.score)?;
        let outcome = match self.outcome {
            Some(Outcome::Victory) => "victory",
            Some(Outcome::Defeat) => "defeat",
            None => "in progress",
        };
        writeln!(f, "outcome:       {outcome}")?;
        writeln!(f, "rooms entered: {}", self.rooms_entered)?;
        writeln!(
            f,
            "shots fired:   {} ({} aliens destroyed)",
            self.projectiles_fired, self.aliens_destroyed
        )?;
        write!(f, "collectibles:  {}", self.collectibles_collected)
    }
}
