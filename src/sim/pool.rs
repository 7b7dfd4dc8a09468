//! Obstacle arena
//!
//! Obstacles live in a slot arena addressed by `ObstacleId`. Retired slots go
//! on a free list and are reinitialized on the next acquire, so a long run
//! settles at a handful of slots and stops allocating.

use glam::Vec2;

use super::state::Obstacle;

/// Handle to an arena slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleId(u32);

impl ObstacleId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct Slot {
    obstacle: Obstacle,
    in_use: bool,
}

/// Arena of obstacle slots with an active list and a free list
#[derive(Debug, Clone, Default)]
pub struct ObstaclePool {
    slots: Vec<Slot>,
    /// Active obstacles. Release swap-removes, so order is not kept.
    active: Vec<ObstacleId>,
    free: Vec<ObstacleId>,
}

impl ObstaclePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a slot (recycled if one is free) and place an obstacle in it.
    pub fn acquire(&mut self, pos: Vec2, size: Vec2) -> ObstacleId {
        let obstacle = Obstacle::new(pos, size);
        let id = match self.free.pop() {
            Some(id) => {
                let slot = &mut self.slots[id.index()];
                slot.obstacle = obstacle;
                slot.in_use = true;
                id
            }
            None => {
                let id = ObstacleId(self.slots.len() as u32);
                self.slots.push(Slot {
                    obstacle,
                    in_use: true,
                });
                id
            }
        };
        self.active.push(id);
        id
    }

    /// Retire the obstacle at `index` in the active list.
    ///
    /// Swap-removes, so the last active obstacle takes its place.
    pub fn release_at(&mut self, index: usize) -> ObstacleId {
        let id = self.active.swap_remove(index);
        self.slots[id.index()].in_use = false;
        self.free.push(id);
        id
    }

    /// Retire an obstacle by handle. Returns false if it was not active.
    pub fn release(&mut self, id: ObstacleId) -> bool {
        match self.active.iter().position(|&a| a == id) {
            Some(index) => {
                self.release_at(index);
                true
            }
            None => false,
        }
    }

    /// Retire every active obstacle
    pub fn clear(&mut self) {
        for id in self.active.drain(..) {
            self.slots[id.index()].in_use = false;
            self.free.push(id);
        }
    }

    /// Active obstacle by handle
    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.slots
            .get(id.index())
            .filter(|s| s.in_use)
            .map(|s| &s.obstacle)
    }

    pub fn get_mut(&mut self, id: ObstacleId) -> Option<&mut Obstacle> {
        self.slots
            .get_mut(id.index())
            .filter(|s| s.in_use)
            .map(|s| &mut s.obstacle)
    }

    /// Handle of the obstacle at `index` in the active list
    pub fn active_id(&self, index: usize) -> ObstacleId {
        self.active[index]
    }

    /// Active obstacles in list order
    pub fn iter_active(&self) -> impl Iterator<Item = &Obstacle> + '_ {
        self.active.iter().map(|id| &self.slots[id.index()].obstacle)
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Total slots ever allocated
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Every slot is in exactly one of the active and free lists
    pub fn is_consistent(&self) -> bool {
        if self.active.len() + self.free.len() != self.slots.len() {
            return false;
        }
        let mut seen = vec![false; self.slots.len()];
        let active = self.active.iter().map(|id| (id, true));
        let free = self.free.iter().map(|id| (id, false));
        for (id, should_be_in_use) in active.chain(free) {
            let i = id.index();
            if i >= self.slots.len() || seen[i] || self.slots[i].in_use != should_be_in_use {
                return false;
            }
            seen[i] = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn acquire_at(pool: &mut ObstaclePool, x: f32) -> ObstacleId {
        pool.acquire(Vec2::new(x, 200.0), Vec2::new(30.0, 60.0))
    }

    #[test]
    fn test_acquire_allocates_then_reuses() {
        let mut pool = ObstaclePool::new();
        let a = acquire_at(&mut pool, 820.0);
        let b = acquire_at(&mut pool, 900.0);
        assert_ne!(a, b);
        assert_eq!(pool.capacity(), 2);

        assert!(pool.release(a));
        assert_eq!(pool.free_len(), 1);
        assert!(pool.get(a).is_none());

        let c = acquire_at(&mut pool, 950.0);
        assert_eq!(c, a);
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.free_len(), 0);
        assert_eq!(pool.get(c).unwrap().pos.x, 950.0);
    }

    #[test]
    fn test_acquire_reinitializes_passed_flag() {
        let mut pool = ObstaclePool::new();
        let a = acquire_at(&mut pool, 820.0);
        pool.get_mut(a).unwrap().passed = true;
        pool.release(a);

        let b = acquire_at(&mut pool, 820.0);
        assert_eq!(a, b);
        assert!(!pool.get(b).unwrap().passed);
    }

    #[test]
    fn test_double_release_is_noop() {
        let mut pool = ObstaclePool::new();
        let a = acquire_at(&mut pool, 820.0);
        assert!(pool.release(a));
        assert!(!pool.release(a));
        assert_eq!(pool.free_len(), 1);
        assert!(pool.is_consistent());
    }

    #[test]
    fn test_clear_returns_everything() {
        let mut pool = ObstaclePool::new();
        for i in 0..5 {
            acquire_at(&mut pool, 820.0 + i as f32 * 50.0);
        }
        pool.clear();
        assert_eq!(pool.active_len(), 0);
        assert_eq!(pool.free_len(), 5);
        assert!(pool.is_consistent());
    }

    #[test]
    fn test_release_moves_last_active_into_gap() {
        let mut pool = ObstaclePool::new();
        let a = acquire_at(&mut pool, 820.0);
        let b = acquire_at(&mut pool, 900.0);
        let c = acquire_at(&mut pool, 980.0);

        assert_eq!(pool.release_at(0), a);
        // Newest now sits where the oldest was
        assert_eq!(pool.active_id(0), c);
        assert_eq!(pool.active_id(1), b);
        let xs: Vec<f32> = pool.iter_active().map(|o| o.pos.x).collect();
        assert_eq!(xs, vec![980.0, 900.0]);
        assert!(pool.is_consistent());
    }

    proptest! {
        #[test]
        fn prop_slot_in_exactly_one_list(ops in proptest::collection::vec(any::<(bool, u8)>(), 1..200)) {
            let mut pool = ObstaclePool::new();
            for (acquire, pick) in ops {
                if acquire || pool.active_len() == 0 {
                    acquire_at(&mut pool, pick as f32);
                } else {
                    let index = pick as usize % pool.active_len();
                    pool.release_at(index);
                }
                prop_assert!(pool.is_consistent());
            }
        }
    }
}
