//! Deferred "stop emitting" callbacks for bursting slots.

use serde::Deserialize;

use super::pool::{EmitterPool, SlotKey};

/// What a scheduled reset does when its slot was re-armed in the meantime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Skip resets whose generation token is stale
    #[default]
    Generation,
    /// Always apply, even if it cuts a newer burst short
    Uncancellable,
}

#[derive(Debug, Clone, Copy)]
struct PendingReset {
    due: f64,
    key: SlotKey,
    generation: u32,
}

/// Fire-and-forget timers polled once per frame
#[derive(Debug, Clone, Default)]
pub struct BurstScheduler {
    policy: ResetPolicy,
    pending: Vec<PendingReset>,
}

impl BurstScheduler {
    pub fn new(policy: ResetPolicy) -> Self {
        Self {
            policy,
            pending: Vec::new(),
        }
    }

    pub fn policy(&self) -> ResetPolicy {
        self.policy
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Queue a reset of `key` at `due`, tagged with the burst's generation
    pub fn schedule(&mut self, key: SlotKey, generation: u32, due: f64) {
        self.pending.push(PendingReset {
            due,
            key,
            generation,
        });
    }

    /// Apply every reset due at `now`; returns how many slots were stopped
    pub fn tick(&mut self, now: f64, pool: &mut EmitterPool) -> usize {
        let policy = self.policy;
        let mut stopped = 0;
        self.pending.retain(|reset| {
            if reset.due > now {
                return true;
            }
            if let Some(slot) = pool.get_mut(reset.key) {
                let current = slot.generation() == reset.generation;
                if current || policy == ResetPolicy::Uncancellable {
                    slot.stop();
                    stopped += 1;
                } else {
                    log::trace!("stale reset for {:?} skipped", reset.key);
                }
            }
            false
        });
        stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EmitterOverrides, LayoutConfig};
    use crate::counter::Digit;
    use crate::visual::emitters::{DigitPosition, EmitterRole, EmitterTemplate};

    const KEY: SlotKey = SlotKey::new(DigitPosition::Units, EmitterRole::Previous, Digit::Four);

    fn pool() -> EmitterPool {
        EmitterPool::build(
            Some(&EmitterTemplate::default()),
            &[EmitterRole::Previous],
            &EmitterOverrides::default(),
            &LayoutConfig::default(),
            4,
            |_| true,
        )
    }

    fn burst_at(scheduler: &mut BurstScheduler, pool: &mut EmitterPool, now: f64) {
        let generation = pool.get_mut(KEY).unwrap().burst(1.0);
        scheduler.schedule(KEY, generation, now + 0.1);
    }

    #[test]
    fn test_reset_fires_after_delay() {
        let mut pool = pool();
        let mut scheduler = BurstScheduler::new(ResetPolicy::Generation);
        burst_at(&mut scheduler, &mut pool, 0.0);

        assert_eq!(scheduler.tick(0.05, &mut pool), 0);
        assert!(pool.get(KEY).unwrap().is_bursting());

        assert_eq!(scheduler.tick(0.1, &mut pool), 1);
        assert!(!pool.get(KEY).unwrap().is_bursting());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_generation_keeps_rearmed_burst_alive() {
        let mut pool = pool();
        let mut scheduler = BurstScheduler::new(ResetPolicy::Generation);
        burst_at(&mut scheduler, &mut pool, 0.0);
        burst_at(&mut scheduler, &mut pool, 0.06);

        // First reset is stale and must not cut the second burst
        scheduler.tick(0.11, &mut pool);
        assert!(pool.get(KEY).unwrap().is_bursting());

        scheduler.tick(0.2, &mut pool);
        assert!(!pool.get(KEY).unwrap().is_bursting());
    }

    #[test]
    fn test_uncancellable_cuts_rearmed_burst() {
        let mut pool = pool();
        let mut scheduler = BurstScheduler::new(ResetPolicy::Uncancellable);
        burst_at(&mut scheduler, &mut pool, 0.0);
        burst_at(&mut scheduler, &mut pool, 0.06);

        scheduler.tick(0.11, &mut pool);
        assert!(!pool.get(KEY).unwrap().is_bursting());
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_reset_of_removed_slot_is_dropped() {
        let mut pool = pool();
        let mut scheduler = BurstScheduler::new(ResetPolicy::Generation);
        burst_at(&mut scheduler, &mut pool, 0.0);
        pool.remove_digit(Digit::Four);

        assert_eq!(scheduler.tick(1.0, &mut pool), 0);
        assert_eq!(scheduler.pending(), 0);
    }
}
