//! Repetition counters
//!
//! [`DhikrCounter`] counts toward one entry's target and then locks.
//! [`Tasbeeh`] is the free-running counter that signals every full cycle.

use crate::catalog::{AdhkarCatalog, Category, Dhikr};
use crate::error::{Error, Result};
use crate::haptics::{
    Chime, Haptics, COMPLETION_PATTERN, CYCLE_CHIME_HZ, CYCLE_CHIME_MS, RESET_PULSE, TAP_PULSE,
    TASBEEH_TAP_PULSE,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default tasbeeh cycle
pub const DEFAULT_CYCLE: u32 = 33;

/// Result of tapping a [`DhikrCounter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Counted; carries the new count
    Counted(u32),
    /// This tap reached the target
    Completed,
    /// Target already reached; nothing changed
    Ignored,
}

/// Counter for a single remembrance
#[derive(Debug, Clone)]
pub struct DhikrCounter {
    dhikr_id: u32,
    target: u32,
    count: u32,
}

impl DhikrCounter {
    pub fn new(dhikr: &Dhikr) -> Self {
        Self {
            dhikr_id: dhikr.id,
            target: dhikr.count.max(1),
            count: 0,
        }
    }

    pub fn dhikr_id(&self) -> u32 {
        self.dhikr_id
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn is_complete(&self) -> bool {
        self.count >= self.target
    }

    pub fn tap(&mut self, haptics: &dyn Haptics) -> TapOutcome {
        if self.is_complete() {
            return TapOutcome::Ignored;
        }

        haptics.vibrate(TAP_PULSE);
        self.count += 1;

        if self.is_complete() {
            haptics.vibrate(COMPLETION_PATTERN);
            tracing::debug!(dhikr = self.dhikr_id, "Dhikr completed");
            TapOutcome::Completed
        } else {
            TapOutcome::Counted(self.count)
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Fraction of the target reached, 0.0..=1.0
    pub fn progress(&self) -> f64 {
        f64::from(self.count) / f64::from(self.target)
    }
}

/// Completed entries across a catalog
#[derive(Debug, Clone, Default)]
pub struct CategoryProgress {
    completed: HashSet<u32>,
}

impl CategoryProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completion; returns `false` if already recorded
    pub fn mark_complete(&mut self, dhikr_id: u32) -> bool {
        self.completed.insert(dhikr_id)
    }

    pub fn is_complete(&self, dhikr_id: u32) -> bool {
        self.completed.contains(&dhikr_id)
    }

    /// Completed fraction of `category`; an empty category is 0.0
    pub fn progress(&self, category: Category, catalog: &AdhkarCatalog) -> f64 {
        let entries = catalog.by_category(category);
        if entries.is_empty() {
            return 0.0;
        }
        let done = entries.iter().filter(|d| self.is_complete(d.id)).count();
        done as f64 / entries.len() as f64
    }

    pub fn is_category_complete(&self, category: Category, catalog: &AdhkarCatalog) -> bool {
        self.progress(category, catalog) >= 1.0
    }

    pub fn clear(&mut self) {
        self.completed.clear();
    }
}

/// Tasbeeh cycle length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TasbeehTarget {
    Cycle(u32),
    /// Open counting; no cycle signal
    Unlimited,
}

impl TasbeehTarget {
    pub fn cycle(n: u32) -> Result<Self> {
        if n == 0 {
            return Err(Error::InvalidTarget(n));
        }
        Ok(TasbeehTarget::Cycle(n))
    }

    fn cycle_len(&self) -> Option<u32> {
        match *self {
            TasbeehTarget::Cycle(n) if n > 0 => Some(n),
            _ => None,
        }
    }
}

impl Default for TasbeehTarget {
    fn default() -> Self {
        TasbeehTarget::Cycle(DEFAULT_CYCLE)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tasbeeh {
    count: u64,
    target: TasbeehTarget,
}

impl Tasbeeh {
    pub fn new(target: TasbeehTarget) -> Self {
        Self { count: 0, target }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn target(&self) -> TasbeehTarget {
        self.target
    }

    /// Change the cycle length; the running count is kept
    pub fn set_target(&mut self, target: TasbeehTarget) {
        self.target = target;
    }

    /// Count one; returns `true` when this tap closes a cycle
    ///
    /// A closed cycle vibrates the completion pattern and rings the chime.
    pub fn tap(&mut self, haptics: &dyn Haptics, chime: &dyn Chime) -> bool {
        self.count += 1;
        haptics.vibrate(TASBEEH_TAP_PULSE);

        let cycle_done = self
            .target
            .cycle_len()
            .is_some_and(|n| self.count % u64::from(n) == 0);
        if cycle_done {
            haptics.vibrate(COMPLETION_PATTERN);
            chime.ring(CYCLE_CHIME_HZ, CYCLE_CHIME_MS);
            tracing::debug!(count = self.count, "Tasbeeh cycle completed");
        }
        cycle_done
    }

    pub fn reset(&mut self, haptics: &dyn Haptics) {
        self.count = 0;
        haptics.vibrate(RESET_PULSE);
    }

    /// Full cycles counted so far
    pub fn cycles(&self) -> u64 {
        self.target
            .cycle_len()
            .map_or(0, |n| self.count / u64::from(n))
    }

    /// Position within the current cycle, 0.0..1.0
    pub fn cycle_progress(&self) -> f64 {
        self.target.cycle_len().map_or(0.0, |n| {
            let n = u64::from(n);
            (self.count % n) as f64 / n as f64
        })
    }
}
