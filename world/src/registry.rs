//! Lazily materialised per-room entities.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;
use rand::Rng;
use warp_adventure_core::{
    ArchetypeTable, CollectibleSnapshot, Event, ObjectiveSnapshot, RoomCoord, RoomGeometry,
    COLLECTIBLE_HEIGHT, COLLECTIBLE_WIDTH, OBJECTIVE_SIZE, SPAWN_MARGIN,
};

use crate::aliens::Alien;

/// Single-use bar placed in a room.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Collectible {
    /// Top-left corner of the bar.
    pub(crate) position: Vec2,
    pub(crate) collected: bool,
}

impl Collectible {
    fn place<R: Rng + ?Sized>(geometry: &RoomGeometry, rng: &mut R) -> Self {
        let area = geometry.interior(SPAWN_MARGIN);
        let x = area.start + rng.gen::<f32>() * (area.length() - COLLECTIBLE_WIDTH);
        let y = area.start + rng.gen::<f32>() * (area.length() - COLLECTIBLE_HEIGHT);
        Self {
            position: Vec2::new(x, y),
            collected: false,
        }
    }

    pub(crate) fn snapshot(&self, room: RoomCoord) -> CollectibleSnapshot {
        CollectibleSnapshot {
            room,
            position: self.position,
            size: Vec2::new(COLLECTIBLE_WIDTH, COLLECTIBLE_HEIGHT),
            collected: self.collected,
        }
    }
}

/// The maze's single destructible objective.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Objective {
    pub(crate) room: RoomCoord,
    pub(crate) position: Vec2,
    pub(crate) destroyed: bool,
}

impl Objective {
    pub(crate) fn snapshot(&self) -> ObjectiveSnapshot {
        ObjectiveSnapshot {
            room: self.room,
            position: self.position,
            size: OBJECTIVE_SIZE,
            destroyed: self.destroyed,
        }
    }
}

/// Caches the alien and collectible decided for every visited room.
#[derive(Debug)]
pub(crate) struct EntityRegistry {
    archetypes: ArchetypeTable,
    collectible_chance: f64,
    visited: BTreeSet<RoomCoord>,
    aliens: BTreeMap<RoomCoord, Alien>,
    cleared: BTreeSet<RoomCoord>,
    collectibles: BTreeMap<RoomCoord, Option<Collectible>>,
    objective: Objective,
}

impl EntityRegistry {
    pub(crate) fn new(
        archetypes: ArchetypeTable,
        collectible_chance: f64,
        objective: Objective,
    ) -> Self {
        Self {
            archetypes,
            collectible_chance: if collectible_chance.is_nan() {
                0.0
            } else {
                collectible_chance.clamp(0.0, 1.0)
            },
            visited: BTreeSet::new(),
            aliens: BTreeMap::new(),
            cleared: BTreeSet::new(),
            collectibles: BTreeMap::new(),
            objective,
        }
    }

    /// Decides the alien and collectible for a room on its first visit.
    ///
    /// Later calls for the same room are no-ops. The start room never hosts an
    /// alien, and a cleared room never receives a new one.
    pub(crate) fn materialize<R: Rng + ?Sized>(
        &mut self,
        room: RoomCoord,
        geometry: &RoomGeometry,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) {
        if !self.visited.insert(room) {
            return;
        }

        if !room.is_start() && !self.cleared.contains(&room) {
            let kind = self.archetypes.kind_for(room);
            let _ = self.aliens.insert(room, Alien::spawn(kind, geometry, rng));
            out_events.push(Event::AlienSpawned { room, kind });
        }

        let collectible = rng
            .gen_bool(self.collectible_chance)
            .then(|| Collectible::place(geometry, rng));
        if collectible.is_some() {
            out_events.push(Event::CollectiblePlaced { room });
        }
        let _ = self.collectibles.insert(room, collectible);

        tracing::debug!(
            x = room.x(),
            y = room.y(),
            alien = self.aliens.contains_key(&room),
            collectible = self.collectible(room).is_some(),
            "room materialized"
        );
    }

    pub(crate) fn alien(&self, room: RoomCoord) -> Option<&Alien> {
        self.aliens.get(&room)
    }

    pub(crate) fn alien_mut(&mut self, room: RoomCoord) -> Option<&mut Alien> {
        self.aliens.get_mut(&room)
    }

    /// Removes the room's alien permanently.
    pub(crate) fn remove_alien(&mut self, room: RoomCoord) -> Option<Alien> {
        let removed = self.aliens.remove(&room);
        let _ = self.cleared.insert(room);
        removed
    }

    pub(crate) fn collectible(&self, room: RoomCoord) -> Option<&Collectible> {
        self.collectibles.get(&room).and_then(Option::as_ref)
    }

    pub(crate) fn collectible_mut(&mut self, room: RoomCoord) -> Option<&mut Collectible> {
        self.collectibles.get_mut(&room).and_then(Option::as_mut)
    }

    /// The objective, when it lives in the provided room.
    pub(crate) fn objective_in(&self, room: RoomCoord) -> Option<&Objective> {
        (self.objective.room == room).then_some(&self.objective)
    }

    pub(crate) fn objective_mut(&mut self, room: RoomCoord) -> Option<&mut Objective> {
        (self.objective.room == room).then_some(&mut self.objective)
    }

    pub(crate) fn objective(&self) -> &Objective {
        &self.objective
    }

    pub(crate) fn is_cleared(&self, room: RoomCoord) -> bool {
        self.cleared.contains(&room)
    }
}

#[cfg(test)]
impl EntityRegistry {
    pub(crate) fn insert_alien(&mut self, room: RoomCoord, alien: Alien) {
        let _ = self.visited.insert(room);
        let _ = self.aliens.insert(room, alien);
    }

    pub(crate) fn insert_collectible(&mut self, room: RoomCoord, collectible: Collectible) {
        let _ = self.visited.insert(room);
        let _ = self.collectibles.insert(room, Some(collectible));
    }
}
