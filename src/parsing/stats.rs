use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Counters of one parse run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Rule invocations
    pub calls: usize,
    pub found: usize,
    pub not_found: usize,
    /// Token outcomes replayed from the memo (0 unless memoization is on)
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub elapsed: Duration,
}

impl fmt::Display for ParseStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{} (read attempts/successful reads/failed reads/cache hits/cache misses)",
            self.calls, self.found, self.not_found, self.cache_hits, self.cache_misses
        )
    }
}
