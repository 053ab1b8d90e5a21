//! Memo tables for move queries.
//!
//! Every key starts with the board signature, so an entry can never be served
//! for a different position. Each table is a bounded LRU; a capacity of zero
//! turns the cache into a pass-through.
//!
//! The cache is internally synchronized and can be shared between sessions and
//! searches through an `Arc`. The lock is never held while a value is being
//! computed.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use parking_lot::Mutex;

use crate::board::{ChessError, Color, Move, Position};

/// Default number of entries kept per table.
pub const DEFAULT_CACHE_CAPACITY: usize = 1 << 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct DestinationKey {
    pub(crate) signature: u64,
    pub(crate) from: Position,
    pub(crate) legal: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct TowardsKey {
    pub(crate) signature: u64,
    pub(crate) target: Position,
    pub(crate) by: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct LegalMovesKey {
    pub(crate) signature: u64,
    pub(crate) color: Color,
}

/// Hit/miss/eviction counters plus the current number of stored entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU map. Recency is tracked with stamps in a queue; stale queue entries
/// are skipped on eviction and dropped when the queue grows too long.
struct Lru<K, V> {
    map: HashMap<K, (V, u64)>,
    order: VecDeque<(K, u64)>,
    tick: u64,
    capacity: usize,
}

impl<K: Hash + Eq + Copy, V: Clone> Lru<K, V> {
    fn new(capacity: usize) -> Self {
        Lru {
            map: HashMap::new(),
            order: VecDeque::new(),
            tick: 0,
            capacity,
        }
    }

    fn get(&mut self, key: &K) -> Option<V> {
        self.tick += 1;
        let tick = self.tick;
        let (value, stamp) = self.map.get_mut(key)?;
        *stamp = tick;
        let value = value.clone();
        self.order.push_back((*key, tick));
        self.compact();
        Some(value)
    }

    /// Store `value`; returns how many entries were evicted to make room.
    fn insert(&mut self, key: K, value: V) -> u64 {
        self.tick += 1;
        self.map.insert(key, (value, self.tick));
        self.order.push_back((key, self.tick));

        let mut evicted = 0;
        while self.map.len() > self.capacity {
            let Some((old, stamp)) = self.order.pop_front() else {
                break;
            };
            if self.map.get(&old).map(|(_, s)| *s) == Some(stamp) {
                self.map.remove(&old);
                evicted += 1;
            }
        }
        self.compact();
        evicted
    }

    fn compact(&mut self) {
        if self.order.len() <= self.capacity.saturating_mul(2) + 16 {
            return;
        }
        let map = &self.map;
        self.order
            .retain(|(key, stamp)| map.get(key).map(|(_, s)| s) == Some(stamp));
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }
}

struct Tables {
    destinations: Lru<DestinationKey, Vec<Position>>,
    towards: Lru<TowardsKey, Vec<Move>>,
    legal_moves: Lru<LegalMovesKey, Vec<Move>>,
    stats: CacheStats,
}

impl Tables {
    fn destinations(&mut self) -> &mut Lru<DestinationKey, Vec<Position>> {
        &mut self.destinations
    }

    fn towards(&mut self) -> &mut Lru<TowardsKey, Vec<Move>> {
        &mut self.towards
    }

    fn legal_moves(&mut self) -> &mut Lru<LegalMovesKey, Vec<Move>> {
        &mut self.legal_moves
    }

    fn len(&self) -> usize {
        self.destinations.len() + self.towards.len() + self.legal_moves.len()
    }
}

/// Bounded memo for destination lists, attacks on a square and per-color
/// legal move lists.
pub struct QueryCache {
    capacity: usize,
    tables: Mutex<Tables>,
}

impl QueryCache {
    /// A cache keeping at most `capacity` entries in each of its tables.
    pub fn new(capacity: usize) -> Self {
        QueryCache {
            capacity,
            tables: Mutex::new(Tables {
                destinations: Lru::new(capacity),
                towards: Lru::new(capacity),
                legal_moves: Lru::new(capacity),
                stats: CacheStats::default(),
            }),
        }
    }

    /// A cache that stores nothing.
    pub fn disabled() -> Self {
        QueryCache::new(0)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    pub fn stats(&self) -> CacheStats {
        let tables = self.tables.lock();
        CacheStats {
            entries: tables.len(),
            ..tables.stats
        }
    }

    pub fn len(&self) -> usize {
        self.tables.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&self) {
        let mut tables = self.tables.lock();
        tables.destinations.clear();
        tables.towards.clear();
        tables.legal_moves.clear();
        tables.stats = CacheStats::default();
    }

    pub(crate) fn destinations<F>(
        &self,
        key: DestinationKey,
        compute: F,
    ) -> Result<Vec<Position>, ChessError>
    where
        F: FnOnce() -> Result<Vec<Position>, ChessError>,
    {
        self.memo(Tables::destinations, key, compute)
    }

    pub(crate) fn towards<F>(&self, key: TowardsKey, compute: F) -> Result<Vec<Move>, ChessError>
    where
        F: FnOnce() -> Result<Vec<Move>, ChessError>,
    {
        self.memo(Tables::towards, key, compute)
    }

    pub(crate) fn legal_moves<F>(
        &self,
        key: LegalMovesKey,
        compute: F,
    ) -> Result<Vec<Move>, ChessError>
    where
        F: FnOnce() -> Result<Vec<Move>, ChessError>,
    {
        self.memo(Tables::legal_moves, key, compute)
    }

    fn memo<K, V, F>(
        &self,
        table: fn(&mut Tables) -> &mut Lru<K, V>,
        key: K,
        compute: F,
    ) -> Result<V, ChessError>
    where
        K: Hash + Eq + Copy,
        V: Clone,
        F: FnOnce() -> Result<V, ChessError>,
    {
        if self.capacity == 0 {
            return compute();
        }

        {
            let mut tables = self.tables.lock();
            if let Some(value) = table(&mut *tables).get(&key) {
                tables.stats.hits += 1;
                return Ok(value);
            }
            tables.stats.misses += 1;
        }

        let value = compute()?;

        let mut tables = self.tables.lock();
        let evicted = table(&mut *tables).insert(key, value.clone());
        if evicted > 0 {
            tables.stats.evictions += evicted;
            log::trace!("query cache evicted {evicted} entries");
        }
        Ok(value)
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        QueryCache::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("capacity", &self.capacity)
            .field("stats", &self.stats())
            .finish()
    }
}
