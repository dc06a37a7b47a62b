use tracing::trace;

use super::universal_state::{UniversalChartState, UniversalStateInput};

/// Runtime metrics exposed by [`UniversalStateMemo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateMemoStats {
    pub hits: u64,
    pub misses: u64,
}

/// Single-entry memo keyed on input identity.
///
/// The assembler never caches; hosts that re-render often keep one memo per
/// chart and call [`UniversalStateMemo::get_or_assemble`] on every pass.
#[derive(Debug, Default)]
pub struct UniversalStateMemo {
    cached: Option<(UniversalStateInput, UniversalChartState)>,
    stats: StateMemoStats,
}

impl UniversalStateMemo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached state when `input` shares identity with the last
    /// input, otherwise assembles and caches a fresh one.
    pub fn get_or_assemble(&mut self, input: &UniversalStateInput) -> &UniversalChartState {
        let hit = matches!(&self.cached, Some((cached, _)) if cached.same_identity(input));
        if hit {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
            self.cached = None;
            trace!(misses = self.stats.misses, "universal state memo miss");
        }
        &self
            .cached
            .get_or_insert_with(|| (input.clone(), input.assemble()))
            .1
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    #[must_use]
    pub fn stats(&self) -> StateMemoStats {
        self.stats
    }
}
