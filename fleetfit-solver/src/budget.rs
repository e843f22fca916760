//! Wall-clock and interrupt limits for a single search.
//!
//! The generator calls [`SearchBudget::on_node`] for every node it visits.
//! The interrupt flag is read on each call; the clock is only sampled when
//! the node counter hits a mask boundary, keeping the per-node cost low.

use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::{Duration, Instant},
};

use thiserror::Error;

/// Default mask: sample the clock every 1024 nodes.
pub const DEFAULT_CLOCK_CHECK_MASK: u64 = 0x3FF;

/// Reason a search stopped before exploring the whole tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BudgetExhausted {
    /// The configured wall-clock limit elapsed.
    #[error("time limit of {limit:?} reached")]
    TimeLimit {
        /// The configured limit.
        limit: Duration,
    },
    /// The caller raised the interrupt flag.
    #[error("interrupt signal received")]
    Interrupted,
}

/// Per-call search limits.
#[derive(Debug)]
pub struct SearchBudget<'a> {
    started_at: Instant,
    time_limit: Option<Duration>,
    clock_check_mask: u64,
    steps: u64,
    interrupt: Option<&'a AtomicBool>,
}

impl<'a> SearchBudget<'a> {
    /// A budget that never stops the search.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::new(None, DEFAULT_CLOCK_CHECK_MASK, None)
    }

    /// Start a budget now.
    ///
    /// `clock_check_mask` selects how often the clock is read: it is sampled
    /// whenever `nodes & clock_check_mask == 0`. A mask of zero reads it at
    /// every node.
    #[must_use]
    pub fn new(
        time_limit: Option<Duration>,
        clock_check_mask: u64,
        interrupt: Option<&'a AtomicBool>,
    ) -> Self {
        Self {
            started_at: Instant::now(),
            time_limit,
            clock_check_mask,
            steps: 0,
            interrupt,
        }
    }

    /// Record a visited node and report whether the search may continue.
    ///
    /// # Errors
    /// Returns [`BudgetExhausted`] once the interrupt flag is set or the time
    /// limit has elapsed at a clock sample point.
    #[inline]
    pub fn on_node(&mut self) -> Result<(), BudgetExhausted> {
        self.steps = self.steps.wrapping_add(1);
        if self
            .interrupt
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            return Err(BudgetExhausted::Interrupted);
        }
        if let Some(limit) = self.time_limit
            && (self.steps & self.clock_check_mask) == 0
            && self.started_at.elapsed() >= limit
        {
            return Err(BudgetExhausted::TimeLimit { limit });
        }
        Ok(())
    }

    /// Nodes recorded so far.
    #[must_use]
    pub const fn nodes(&self) -> u64 {
        self.steps
    }
}
