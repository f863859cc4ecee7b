use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use quick_cache::sync::Cache;
use tracing::debug;

use crate::match_file::Match;

#[derive(Debug, Clone)]
struct CachedMatch {
    loaded: Instant,
    record: Arc<Match>,
}

/// Loaded match records keyed by path. Entries older than `ttl` are reloaded
/// from disk on the next lookup.
pub struct MatchCache {
    records: Cache<PathBuf, CachedMatch>,
    ttl: Duration,
}

impl MatchCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            records: Cache::new(capacity.max(1)),
            ttl,
        }
    }

    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Match>> {
        let key = path.to_path_buf();
        if let Some(cached) = self.records.get(&key) {
            if cached.loaded.elapsed() < self.ttl {
                debug!("Cache hit for {}", path.display());
                return Ok(cached.record);
            }
            debug!("Cache entry for {} expired", path.display());
        } else {
            debug!("Cache miss for {}", path.display());
        }
        let record = Arc::new(Match::from_path(path)?);
        self.records.insert(
            key,
            CachedMatch {
                loaded: Instant::now(),
                record: Arc::clone(&record),
            },
        );
        Ok(record)
    }

    /// Returns whether an entry was present.
    pub fn invalidate(&self, path: &Path) -> bool {
        self.records.remove(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for MatchCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchCache")
            .field("len", &self.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}
