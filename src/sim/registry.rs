//! Entity registry for falling bricks and fired projectiles
//!
//! Entities live in per-kind tables sorted by id. Despawning only clears the
//! liveness flag, so ids and table positions stay stable while a tick is
//! iterating; `sweep` compacts the tombstones once the tick is done.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::direction_deg;

/// Stable entity identifier, unique across bricks and projectiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Brick class (colour), which decides the scoring outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrickClass {
    Red,
    Green,
    Black,
}

impl BrickClass {
    /// Spawn order: a roll of 0 is red, 1 green, 2 black
    pub const ALL: [BrickClass; 3] = [BrickClass::Red, BrickClass::Green, BrickClass::Black];
}

/// A falling brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: EntityId,
    pub class: BrickClass,
    pub pos: Vec2,
    /// Distance fallen during the most recent fall step (for swept catch tests)
    pub last_fall: f32,
    alive: bool,
}

impl Brick {
    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

/// A fired projectile travelling along a ray
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    /// Muzzle position at fire time
    pub origin: Vec2,
    /// Travel angle in degrees; mirror turns accumulate without wrapping
    pub angle_deg: f32,
    /// Distance travelled since firing or since the last bounce
    pub distance: f32,
    /// Shift of the ray start from `origin` after bounces
    pub bounce_offset: Vec2,
    alive: bool,
}

impl Projectile {
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Start of the current ray segment
    #[inline]
    pub fn ray_start(&self) -> Vec2 {
        self.origin + self.bounce_offset
    }

    /// Current world position
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.ray_start() + direction_deg(self.angle_deg) * self.distance
    }

    /// Advance along the current ray by one tick
    pub fn advance(&mut self) {
        self.distance += PROJECTILE_SPEED;
    }

    /// Restart the ray at `impact` with the travel angle turned by `turn_deg`
    pub fn bounce(&mut self, impact: Vec2, turn_deg: f32) {
        self.bounce_offset = impact - self.origin;
        self.distance = 0.0;
        self.angle_deg += turn_deg;
    }
}

/// Owner of every dynamic entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    bricks: Vec<Brick>,
    projectiles: Vec<Projectile>,
    next_id: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            bricks: Vec::new(),
            projectiles: Vec::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        id
    }

    /// Append a new live brick
    pub fn spawn_brick(&mut self, class: BrickClass, pos: Vec2) -> EntityId {
        let id = self.allocate_id();
        self.bricks.push(Brick {
            id,
            class,
            pos,
            last_fall: 0.0,
            alive: true,
        });
        id
    }

    /// Append a new live projectile at `origin` with zero distance travelled
    pub fn spawn_projectile(&mut self, origin: Vec2, angle_deg: f32) -> EntityId {
        let id = self.allocate_id();
        self.projectiles.push(Projectile {
            id,
            origin,
            angle_deg,
            distance: 0.0,
            bounce_offset: Vec2::ZERO,
            alive: true,
        });
        id
    }

    /// Mark an entity dead. Returns false if it was unknown or already dead.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        if let Ok(i) = self.bricks.binary_search_by_key(&id, |b| b.id) {
            let was_alive = self.bricks[i].alive;
            self.bricks[i].alive = false;
            return was_alive;
        }
        if let Ok(i) = self.projectiles.binary_search_by_key(&id, |p| p.id) {
            let was_alive = self.projectiles[i].alive;
            self.projectiles[i].alive = false;
            return was_alive;
        }
        false
    }

    pub fn brick(&self, id: EntityId) -> Option<&Brick> {
        self.bricks
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|i| &self.bricks[i])
    }

    pub fn projectile(&self, id: EntityId) -> Option<&Projectile> {
        self.projectiles
            .binary_search_by_key(&id, |p| p.id)
            .ok()
            .map(|i| &self.projectiles[i])
    }

    pub fn projectile_mut(&mut self, id: EntityId) -> Option<&mut Projectile> {
        self.projectiles
            .binary_search_by_key(&id, |p| p.id)
            .ok()
            .map(|i| &mut self.projectiles[i])
    }

    /// Live bricks in id order
    pub fn bricks(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.alive)
    }

    pub fn bricks_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.bricks.iter_mut().filter(|b| b.alive)
    }

    /// Live projectiles in id order
    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter().filter(|p| p.alive)
    }

    pub fn projectiles_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.projectiles.iter_mut().filter(|p| p.alive)
    }

    /// Snapshot of live brick ids, for iterating while despawning
    pub fn brick_ids(&self) -> Vec<EntityId> {
        self.bricks().map(|b| b.id).collect()
    }

    /// Snapshot of live projectile ids, for iterating while despawning
    pub fn projectile_ids(&self) -> Vec<EntityId> {
        self.projectiles().map(|p| p.id).collect()
    }

    /// First live brick (lowest id) whose box contains `point`
    pub fn brick_at(&self, point: Vec2) -> Option<&Brick> {
        self.bricks()
            .find(|b| super::collision::brick_contains(b.pos, point))
    }

    /// Despawn entities that left the playfield. Returns how many were removed.
    ///
    /// Bricks only fall, so a brick below the limit never comes back. A
    /// projectile outside the square is moving away from every mirror.
    pub fn despawn_out_of_bounds(&mut self, limit: f32) -> usize {
        let mut removed = 0;
        for brick in self.bricks.iter_mut().filter(|b| b.alive) {
            if brick.pos.y < -limit {
                brick.alive = false;
                removed += 1;
            }
        }
        for projectile in self.projectiles.iter_mut().filter(|p| p.alive) {
            let pos = projectile.position();
            if pos.x.abs() > limit || pos.y.abs() > limit {
                projectile.alive = false;
                removed += 1;
            }
        }
        removed
    }

    /// Drop tombstones. Only call between ticks.
    pub fn sweep(&mut self) {
        self.bricks.retain(|b| b.alive);
        self.projectiles.retain(|p| p.alive);
    }

    pub fn live_brick_count(&self) -> usize {
        self.bricks().count()
    }

    pub fn live_projectile_count(&self) -> usize {
        self.projectiles().count()
    }

    /// Stored entries including tombstones
    pub fn stored_len(&self) -> usize {
        self.bricks.len() + self.projectiles.len()
    }
}
