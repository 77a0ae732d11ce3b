//! The generation pipeline.
//!
//! Stages run strictly in dependency order: users, then events and their
//! sessions, then tickets, then listings, then trades. Each stage appends to
//! the shared [`Dataset`] and never touches records created by an earlier
//! stage. All shared state, including the seeded RNG, lives in one
//! [`GenContext`] that is passed explicitly through every stage.

pub mod events;
pub mod listings;
pub mod tickets;
pub mod trades;
pub mod users;

use crate::fake::FakeData;
use crate::model::{Dataset, IdCounters};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Target row counts for one run, after scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenPlan {
    pub users: usize,
    pub events: usize,
    pub tickets: usize,
    pub listings: usize,
    pub trades: usize,
}

impl Default for GenPlan {
    fn default() -> Self {
        Self {
            users: 3000,
            events: 300,
            tickets: 10_000,
            listings: 12_000,
            trades: 3000,
        }
    }
}

impl GenPlan {
    /// Apply an overall scale multiplier to every count (flooring).
    pub fn scaled(self, factor: f64) -> Self {
        let scale = |count: usize| (count as f64 * factor) as usize;
        Self {
            users: scale(self.users),
            events: scale(self.events),
            tickets: scale(self.tickets),
            listings: scale(self.listings),
            trades: scale(self.trades),
        }
    }

    /// Derived session count: every event gets a fixed number of sessions.
    pub fn sessions(&self) -> usize {
        self.events * events::SESSIONS_PER_EVENT
    }
}

/// Mutable state threaded through all pipeline stages.
pub struct GenContext {
    pub fake: FakeData<ChaCha8Rng>,
    pub ids: IdCounters,
    pub data: Dataset,
    /// Non-fatal conditions (capacity clamping, early stops) surfaced to the
    /// caller instead of being printed from library code.
    pub warnings: Vec<String>,
}

impl GenContext {
    pub fn new(seed: u64) -> Self {
        Self {
            fake: FakeData::new(ChaCha8Rng::seed_from_u64(seed)),
            ids: IdCounters::default(),
            data: Dataset::default(),
            warnings: Vec::new(),
        }
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Result of a full pipeline run.
pub struct GenOutcome {
    pub data: Dataset,
    pub warnings: Vec<String>,
}

/// Run every stage in order against a fresh context.
pub fn run(plan: &GenPlan, seed: u64) -> anyhow::Result<GenOutcome> {
    let mut ctx = GenContext::new(seed);
    users::generate(&mut ctx, plan.users);
    events::generate(&mut ctx, plan.events)?;
    tickets::generate(&mut ctx, plan.tickets)?;
    listings::generate(&mut ctx, plan.listings)?;
    trades::generate(&mut ctx, plan.trades)?;
    Ok(GenOutcome {
        data: ctx.data,
        warnings: ctx.warnings,
    })
}
