//! Render-side handles for simulation entities
//!
//! The runner arena hands out `hecs::Entity` ids; presentation state is keyed
//! by a separate small handle that is recycled once its entity is gone.

use hecs::Entity;
use std::collections::{HashMap, HashSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteHandle(pub u32);

#[derive(Debug, Default)]
pub struct SpritePool {
    live: HashMap<Entity, SpriteHandle>,
    free: Vec<SpriteHandle>,
    next: u32,
}

impl SpritePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `entity`, allocating (or recycling) one on first sight
    pub fn acquire(&mut self, entity: Entity) -> SpriteHandle {
        if let Some(handle) = self.live.get(&entity) {
            return *handle;
        }
        let handle = self.free.pop().unwrap_or_else(|| {
            let h = SpriteHandle(self.next);
            self.next += 1;
            h
        });
        self.live.insert(entity, handle);
        handle
    }

    pub fn get(&self, entity: Entity) -> Option<SpriteHandle> {
        self.live.get(&entity).copied()
    }

    /// Release handles of entities missing from `alive`. Returns how many were freed.
    pub fn retain_live<I>(&mut self, alive: I) -> usize
    where
        I: IntoIterator<Item = Entity>,
    {
        let alive: HashSet<Entity> = alive.into_iter().collect();
        let dead: Vec<Entity> = self
            .live
            .keys()
            .filter(|e| !alive.contains(e))
            .copied()
            .collect();
        for entity in &dead {
            if let Some(handle) = self.live.remove(entity) {
                self.free.push(handle);
            }
        }
        dead.len()
    }

    /// Drop every mapping, e.g. after a round reset
    pub fn clear(&mut self) {
        self.free.extend(self.live.drain().map(|(_, h)| h));
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Distinct handles ever allocated
    pub fn allocated(&self) -> u32 {
        self.next
    }
}
