//! Projectile bookkeeping: spawning, advancing and retiring shots.

use glam::Vec2;
use warp_adventure_core::{
    Connections, Heading, ProjectileId, ProjectileSnapshot, RetireReason, RoomCoord, RoomGeometry,
    MAX_LIVE_PROJECTILES, PROJECTILE_SPEED,
};

use crate::{collision, SaturatedProjectiles};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) room: RoomCoord,
}

impl Projectile {
    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            position: self.position,
            velocity: self.velocity,
            room: self.room,
        }
    }
}

/// Live projectiles and identifier allocation.
#[derive(Debug)]
pub(crate) struct ProjectileSystem {
    live: Vec<Projectile>,
    next_id: ProjectileId,
}

impl ProjectileSystem {
    pub(crate) fn new() -> Self {
        Self {
            live: Vec::with_capacity(MAX_LIVE_PROJECTILES),
            next_id: ProjectileId::new(0),
        }
    }

    /// Spawns a projectile at `origin` travelling along `heading`.
    pub(crate) fn fire(
        &mut self,
        room: RoomCoord,
        origin: Vec2,
        heading: Heading,
    ) -> Result<ProjectileId, SaturatedProjectiles> {
        if self.live.len() >= MAX_LIVE_PROJECTILES {
            return Err(SaturatedProjectiles {
                live: self.live.len(),
            });
        }

        let id = self.next_id;
        self.next_id = ProjectileId::new(id.get().wrapping_add(1));
        self.live.push(Projectile {
            id,
            position: origin,
            velocity: heading.to_vec2() * PROJECTILE_SPEED,
            room,
        });
        Ok(id)
    }

    /// Moves every projectile by its velocity and retires those that left play.
    ///
    /// Checks run in order: the player left the projectile's room, the new
    /// position fails the wall test, the new position left `[0, S]`.
    pub(crate) fn advance(
        &mut self,
        player_room: RoomCoord,
        geometry: &RoomGeometry,
        connections: Connections,
        half_extent: f32,
        retired: &mut Vec<(ProjectileId, RetireReason)>,
    ) {
        let side = geometry.side_length();
        self.live.retain_mut(|projectile| {
            projectile.position += projectile.velocity;

            let reason = if projectile.room != player_room {
                Some(RetireReason::RoomMismatch)
            } else if !collision::can_move_to(
                geometry,
                connections,
                projectile.position,
                half_extent,
            ) {
                Some(RetireReason::WallImpact)
            } else if projectile.position.x < 0.0
                || projectile.position.x > side
                || projectile.position.y < 0.0
                || projectile.position.y > side
            {
                Some(RetireReason::OutOfBounds)
            } else {
                None
            };

            match reason {
                Some(reason) => {
                    retired.push((projectile.id, reason));
                    false
                }
                None => true,
            }
        });
    }

    /// Removes the projectile with the provided identifier.
    pub(crate) fn retire(&mut self, id: ProjectileId) -> Option<Projectile> {
        let index = self.live.iter().position(|projectile| projectile.id == id)?;
        Some(self.live.remove(index))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.live.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.live.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_caps_live_projectiles() {
        let mut system = ProjectileSystem::new();
        let origin = Vec2::new(300.0, 300.0);
        assert!(system.fire(RoomCoord::START, origin, Heading::EAST).is_ok());
        assert!(system.fire(RoomCoord::START, origin, Heading::EAST).is_ok());
        assert_eq!(
            system.fire(RoomCoord::START, origin, Heading::EAST),
            Err(SaturatedProjectiles { live: 2 })
        );
        assert_eq!(system.len(), 2);
    }

    #[test]
    fn identifiers_are_unique() {
        let mut system = ProjectileSystem::new();
        let first = system
            .fire(RoomCoord::START, Vec2::ZERO, Heading::EAST)
            .expect("first");
        let _ = system.retire(first);
        let second = system
            .fire(RoomCoord::START, Vec2::ZERO, Heading::EAST)
            .expect("second");
        assert_ne!(first, second);
    }

    #[test]
    fn advance_moves_by_velocity() {
        let geometry = RoomGeometry::from_side_length(600);
        let mut system = ProjectileSystem::new();
        let _ = system
            .fire(RoomCoord::START, Vec2::new(300.0, 300.0), Heading::SOUTH_WEST)
            .expect("fire");
        let mut retired = Vec::new();
        system.advance(RoomCoord::START, &geometry, Connections::NONE, 6.0, &mut retired);

        assert!(retired.is_empty());
        let projectile = system.iter().next().expect("live projectile");
        assert_eq!(projectile.position, Vec2::new(295.0, 305.0));
    }

    #[test]
    fn room_mismatch_retires_first() {
        let geometry = RoomGeometry::from_side_length(600);
        let mut system = ProjectileSystem::new();
        let id = system
            .fire(RoomCoord::START, Vec2::new(300.0, 300.0), Heading::EAST)
            .expect("fire");
        let mut retired = Vec::new();
        system.advance(
            RoomCoord::new(1, 0),
            &geometry,
            Connections::NONE,
            6.0,
            &mut retired,
        );

        assert_eq!(retired, vec![(id, RetireReason::RoomMismatch)]);
        assert_eq!(system.len(), 0);
    }

    #[test]
    fn solid_wall_retires_projectile() {
        let geometry = RoomGeometry::from_side_length(600);
        let mut system = ProjectileSystem::new();
        let id = system
            .fire(RoomCoord::START, Vec2::new(567.0, 300.0), Heading::EAST)
            .expect("fire");
        let mut retired = Vec::new();
        system.advance(RoomCoord::START, &geometry, Connections::NONE, 6.0, &mut retired);

        assert_eq!(retired, vec![(id, RetireReason::WallImpact)]);
    }
}
