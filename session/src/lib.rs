#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Composes the world and the pure systems into a frame-driven play session.
//!
//! The platform layer calls [`Session::frame`] once per render callback with
//! the elapsed wall time, the current [`InputState`] and the sound and
//! narrative collaborators. Each completed tick runs, in order: tick, player
//! control (fire, then movement and room transition), projectile advance,
//! alien steering, contact resolution and outcome scheduling.

mod config;

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use warp_adventure_core::{Command, Event, FrameSnapshot, MazeGraph, Outcome, SoundCue};
use warp_adventure_system_alien_behavior::AlienBehavior;
use warp_adventure_system_clock::SimulationClock;
use warp_adventure_system_maze::MazeGenerator;
use warp_adventure_system_outcome::{Notification, OutcomeNotifier};
use warp_adventure_system_player_control::PlayerControl;
use warp_adventure_world::{self as world, query, World};

pub use config::{ConfigError, SessionConfig};
pub use warp_adventure_system_player_control::{InputSnapshot, InputState, Key};

/// Collaborator that plays named sound effects.
pub trait SoundSink {
    /// Plays the cue once.
    fn play(&mut self, cue: SoundCue);
}

/// Collaborator presenting the closing narrative.
pub trait NarrativeSink {
    /// Presents the victory narrative.
    fn trigger_victory(&mut self);
    /// Presents the defeat narrative.
    fn trigger_defeat(&mut self);
}

impl SoundSink for Vec<SoundCue> {
    fn play(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}

impl NarrativeSink for Vec<Outcome> {
    fn trigger_victory(&mut self) {
        self.push(Outcome::Victory);
    }

    fn trigger_defeat(&mut self) {
        self.push(Outcome::Defeat);
    }
}

/// Summary of the work done by a single [`Session::frame`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Logical updates executed during the frame.
    pub ticks: u32,
    /// Outcome latched so far, if any.
    pub outcome: Option<Outcome>,
    /// Narrative notification delivered during the frame, if any.
    pub notified: Option<Outcome>,
}

/// Running totals gathered from world events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Logical updates executed.
    pub ticks: u64,
    /// Door transitions taken.
    pub rooms_entered: u32,
    /// Projectiles fired.
    pub projectiles_fired: u32,
    /// Aliens destroyed.
    pub aliens_destroyed: u32,
    /// Collectibles picked up.
    pub collectibles_collected: u32,
}

impl SessionStats {
    fn record(&mut self, event: &Event) {
        match event {
            Event::TimeAdvanced { tick } => self.ticks = *tick,
            Event::RoomEntered { .. } => self.rooms_entered += 1,
            Event::ProjectileFired { .. } => self.projectiles_fired += 1,
            Event::AlienDestroyed { .. } => self.aliens_destroyed += 1,
            Event::CollectibleCollected { .. } => self.collectibles_collected += 1,
            _ => {}
        }
    }
}

/// A single play session from maze generation to the closing narrative.
#[derive(Debug)]
pub struct Session {
    world: World,
    clock: SimulationClock<Outcome>,
    player_control: PlayerControl,
    alien_behavior: AlienBehavior,
    notifier: OutcomeNotifier,
    seed: u64,
    stats: SessionStats,
    events: Vec<Event>,
    commands: Vec<Command>,
    notifications: Vec<Notification>,
    due: Vec<Outcome>,
}

impl Session {
    /// Generates a maze and builds a session from a validated configuration.
    pub fn new(config: &SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let maze = MazeGenerator::new(config.connection_chance).generate(
            config.grid_columns,
            config.grid_rows,
            &mut rng,
        );
        Ok(Self::assemble(config, maze, seed, &mut rng))
    }

    /// Builds a session around a prepared maze.
    pub fn with_maze(config: &SessionConfig, maze: MazeGraph) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Ok(Self::assemble(config, maze, seed, &mut rng))
    }

    fn assemble(config: &SessionConfig, maze: MazeGraph, seed: u64, rng: &mut ChaCha8Rng) -> Self {
        let world = World::new(maze, config.world_config(rng.gen()));
        let alien_behavior = AlienBehavior::new(rng.gen());
        tracing::info!(
            seed,
            columns = config.grid_columns,
            rows = config.grid_rows,
            room_side_length = config.room_side_length,
            "session started"
        );

        Self {
            world,
            clock: SimulationClock::default(),
            player_control: PlayerControl,
            alien_behavior,
            notifier: OutcomeNotifier::new(config.outcome_delay()),
            seed,
            stats: SessionStats::default(),
            events: Vec::new(),
            commands: Vec::new(),
            notifications: Vec::new(),
            due: Vec::new(),
        }
    }

    /// Seed every random decision of the session derives from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Everything a renderer needs for the player's room.
    #[must_use]
    pub fn frame_snapshot(&self) -> FrameSnapshot {
        query::frame_snapshot(&self.world)
    }

    /// Outcome latched so far, if any.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        query::outcome(&self.world)
    }

    /// Running totals gathered from world events.
    #[must_use]
    pub const fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Simulated time elapsed, including time after the outcome latch.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.clock.now()
    }

    /// Events emitted by the world during the last frame.
    #[must_use]
    pub fn last_events(&self) -> &[Event] {
        &self.events
    }

    /// Advances the session by `elapsed` wall time.
    ///
    /// Every whole tick runs one logical update until an outcome latches; the
    /// timeline keeps running afterwards so the narrative notification still
    /// comes due. The notification delay counts from the tick that latched.
    pub fn frame(
        &mut self,
        elapsed: Duration,
        input: &mut InputState,
        sound: &mut dyn SoundSink,
        narrative: &mut dyn NarrativeSink,
    ) -> FrameReport {
        self.events.clear();
        let ticks = self.clock.advance(elapsed);

        let mut executed = 0;
        for _ in 0..ticks {
            if self.outcome().is_some() {
                break;
            }
            let start = self.events.len();
            self.tick(input);
            for event in &self.events[start..] {
                self.stats.record(event);
                if let Event::SoundTriggered { cue } = event {
                    sound.play(*cue);
                }
            }
            executed += 1;
        }

        self.notifier.handle(&self.events, &mut self.notifications);
        let latched_at = self.clock.tick_time(query::tick_index(&self.world));
        for notification in self.notifications.drain(..) {
            self.clock.schedule_from(latched_at, notification.delay, notification.outcome);
        }

        let mut notified = None;
        self.clock.drain_due(&mut self.due);
        for outcome in self.due.drain(..) {
            tracing::info!(?outcome, "narrative notified");
            match outcome {
                Outcome::Victory => narrative.trigger_victory(),
                Outcome::Defeat => narrative.trigger_defeat(),
            }
            notified = Some(outcome);
        }

        FrameReport {
            ticks: executed,
            outcome: self.outcome(),
            notified,
        }
    }

    fn tick(&mut self, input: &mut InputState) {
        let snapshot = input.take_snapshot();
        self.submit(Command::Tick);

        self.player_control.handle(&snapshot, &mut self.commands);
        self.flush_commands();

        self.submit(Command::AdvanceProjectiles);

        let alien = query::current_alien(&self.world);
        let player = query::player(&self.world);
        self.alien_behavior
            .handle(alien.as_ref(), &player, &mut self.commands);
        self.flush_commands();

        self.submit(Command::ResolveContacts);
    }

    fn submit(&mut self, command: Command) {
        world::apply(&mut self.world, command, &mut self.events);
    }

    fn flush_commands(&mut self) {
        for command in std::mem::take(&mut self.commands) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }
}
