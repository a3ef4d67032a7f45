use std::{iter, mem, sync::Arc};

use crate::{HashStrategy, PrimeSieve, ProbeKind, ProbeSequence, TableError, sieve};

/// Capacity used by [`Table::default`]
const DEFAULT_CAPACITY: usize = 17;

/// Load factor threshold a new table starts with
const DEFAULT_MAX_LOAD: f64 = 0.6;

/// A single position in the backing array
#[derive(Debug, Clone)]
enum Slot<V> {
    /// Nothing stored here yet
    Empty,
    /// A stored key-value pair
    Occupied {
        /// The key, compared on every probe
        key: String,
        /// The value associated with the key
        value: V,
    },
}

/// Outcome of a [`Table::get`]: the value if present, plus how many occupied slots were
/// skipped before the walk ended.
#[derive(Debug, PartialEq, Eq)]
pub struct Lookup<'a, V> {
    /// The stored value, `None` when the key is absent
    value: Option<&'a V>,
    /// Number of probe steps taken
    collisions: usize,
}

impl<'a, V> Lookup<'a, V> {
    /// The stored value, if the key was found
    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        self.value
    }

    /// Whether the key was found
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.value.is_some()
    }

    /// Number of probe steps taken before the walk ended
    #[must_use]
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Splits the lookup into `(value, found, collisions)`
    #[must_use]
    pub fn into_parts(self) -> (Option<&'a V>, bool, usize) {
        (self.value, self.value.is_some(), self.collisions)
    }
}

/// An open-addressing hash table from string keys to values of type `V`.
///
/// Entries live directly in a flat slot array. Collisions are resolved by walking a
/// [`ProbeSequence`], and the array grows to the smallest prime at least twice its size once the
/// load factor passes the configured threshold. Entries cannot be removed.
///
/// Note: This implementation is not thread-safe. Wrap it in a lock for shared mutation.
#[derive(Debug, Clone)]
pub struct Table<V> {
    /// The backing array, `capacity` slots long
    slots: Vec<Slot<V>>,
    /// Number of occupied slots
    count: usize,
    /// Load factor above which the next `put` grows the table
    max_load: f64,
    /// Collision resolution strategy
    probe: ProbeKind,
    /// Home slot hash function
    hash: HashStrategy,
    /// Prime sieve used for capacity selection, owned or shared with other tables
    sieve: Option<Arc<PrimeSieve>>,
}

impl<V> Default for Table<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<V> Table<V> {
    /// Creates a table with exactly `capacity` slots (at least one). The capacity is not rounded
    /// to a prime; use [`make_sieve`](Self::make_sieve) and [`set_capacity`](Self::set_capacity)
    /// for that.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: empty_slots(capacity.max(1)),
            count: 0,
            max_load: DEFAULT_MAX_LOAD,
            probe: ProbeKind::default(),
            hash: HashStrategy::default(),
            sieve: None,
        }
    }

    /// Looks up `key`, reporting the number of collisions on the way
    #[must_use]
    pub fn get(&self, key: &str) -> Lookup<'_, V> {
        let capacity = self.capacity();
        for (collisions, position) in self.walk(key, capacity).enumerate() {
            match self.slots.get(position) {
                None | Some(Slot::Empty) => return Lookup { value: None, collisions },
                Some(Slot::Occupied { key: stored, value }) if stored == key => {
                    return Lookup { value: Some(value), collisions };
                }
                Some(Slot::Occupied { .. }) => {}
            }
        }

        Lookup { value: None, collisions: capacity }
    }

    /// Returns true if the table holds `key`
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.get(key).is_found()
    }

    /// Stores `value` under `key`, returning the previous value if the key was already present.
    ///
    /// The table grows first if its load factor is above the threshold.
    ///
    /// # Errors
    ///
    /// [`TableError::ProbeExhausted`] when the probe walk finds neither the key nor a free slot
    /// even after growing the table once, which quadratic probing can cause. No entry is lost or
    /// changed.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Result<Option<V>, TableError> {
        while self.current_load() > self.max_load {
            self.grow()?;
        }

        let key = key.into();
        let position = match self.locate(&key) {
            Ok(position) => position,
            Err(exhausted) => {
                // a walk that cycles through part of the table (double hashing on a
                // non-prime capacity) reaches every slot once the capacity is prime
                log::debug!("{exhausted}, growing before retrying");
                self.grow()?;
                self.locate(&key).inspect_err(|err| log::warn!("{err}"))?
            }
        };
        let Some(slot) = self.slots.get_mut(position) else {
            return Err(TableError::ProbeExhausted { key, capacity: self.slots.len() });
        };

        if let Slot::Occupied { value: stored, .. } = slot {
            return Ok(Some(mem::replace(stored, value)));
        }
        *slot = Slot::Occupied { key, value };
        self.count = self.count.saturating_add(1);
        Ok(None)
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of stored entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if nothing has been stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The configured load factor threshold.
    ///
    /// This is the limit, not the current occupancy; see [`current_load`](Self::current_load).
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.configured_max_load()
    }

    /// The load factor above which the table grows
    #[must_use]
    pub fn configured_max_load(&self) -> f64 {
        self.max_load
    }

    /// Occupied slots divided by capacity
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn current_load(&self) -> f64 {
        self.count as f64 / self.capacity() as f64
    }

    /// Sets the growth threshold
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidMaxLoad`] unless `0 < max_load < 1`.
    pub fn set_max_load(&mut self, max_load: f64) -> Result<(), TableError> {
        if max_load > 0.0 && max_load < 1.0 {
            self.max_load = max_load;
            Ok(())
        } else {
            Err(TableError::InvalidMaxLoad(max_load))
        }
    }

    /// Probe strategy in use
    #[must_use]
    pub fn probe(&self) -> ProbeKind {
        self.probe
    }

    /// Switches the probe strategy, rehashing any stored entries along the new walk
    ///
    /// # Errors
    ///
    /// [`TableError::ProbeExhausted`] when the stored entries cannot all be placed with the new
    /// strategy. The table keeps its previous strategy and layout.
    pub fn set_probe(&mut self, kind: ProbeKind) -> Result<(), TableError> {
        let previous = mem::replace(&mut self.probe, kind);
        self.relayout().inspect_err(|_| self.probe = previous)
    }

    /// Hash strategy in use
    #[must_use]
    pub fn hash_strategy(&self) -> HashStrategy {
        self.hash
    }

    /// Switches the hash strategy, rehashing any stored entries
    ///
    /// # Errors
    ///
    /// Same as [`set_probe`](Self::set_probe); on error the previous strategy is kept.
    pub fn set_hash(&mut self, strategy: HashStrategy) -> Result<(), TableError> {
        let previous = mem::replace(&mut self.hash, strategy);
        self.relayout().inspect_err(|_| self.hash = previous)
    }

    /// Builds a prime sieve covering `0..=bound` for this table
    pub fn make_sieve(&mut self, bound: usize) {
        self.sieve = Some(Arc::new(PrimeSieve::new(bound)));
    }

    /// Uses a sieve built elsewhere, possibly shared with other tables
    pub fn share_sieve(&mut self, sieve: Arc<PrimeSieve>) {
        self.sieve = Some(sieve);
    }

    /// The sieve this table selects primes from, if any
    #[must_use]
    pub fn sieve(&self) -> Option<&PrimeSieve> {
        self.sieve.as_deref()
    }

    /// Resizes the table to the largest prime at most `bound` and rehashes every entry.
    /// Note this rounds down, while growth rounds up.
    ///
    /// # Errors
    ///
    /// [`TableError::SieveMissing`] without a sieve, the sieve's errors for `bound`, and
    /// [`TableError::CapacityTooSmall`] or [`TableError::ProbeExhausted`] when the stored entries
    /// do not fit. On error the table is unchanged.
    pub fn set_capacity(&mut self, bound: usize) -> Result<usize, TableError> {
        let sieve = self.sieve.as_ref().ok_or(TableError::SieveMissing)?;
        let capacity = sieve.largest_prime_at_most(bound)?;
        self.rehash(capacity)?;
        Ok(capacity)
    }

    /// Returns an iterator over the stored pairs in slot order
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: self.slots.iter() }
    }

    /// Probe walk for `key` in a table of `capacity` slots
    fn walk(&self, key: &str, capacity: usize) -> ProbeSequence {
        ProbeSequence::new(self.probe, self.hash.index(key, capacity), capacity)
    }

    /// Finds the slot holding `key`, or the first empty slot on its walk
    fn locate(&self, key: &str) -> Result<usize, TableError> {
        let capacity = self.capacity();
        self.walk(key, capacity)
            .find(|&position| match self.slots.get(position) {
                Some(Slot::Occupied { key: stored, .. }) => stored == key,
                Some(Slot::Empty) | None => true,
            })
            .ok_or_else(|| TableError::ProbeExhausted { key: key.to_string(), capacity })
    }

    /// Re-places stored entries after the hash or probe strategy changed
    fn relayout(&mut self) -> Result<(), TableError> {
        if self.is_empty() {
            return Ok(());
        }
        log::debug!(
            "re-placing {} entries for {} hashing with {} probing",
            self.count,
            self.hash.name(),
            self.probe.name()
        );
        self.rehash(self.capacity())
    }

    /// Grows to the smallest prime at least twice the current capacity
    fn grow(&mut self) -> Result<(), TableError> {
        let target = self.capacity().saturating_mul(2);
        let from_sieve = self.sieve.as_deref().map(|sieve| sieve.smallest_prime_at_least(target));
        let capacity = match from_sieve {
            Some(Ok(prime)) => prime,
            Some(Err(err)) => {
                log::debug!("{err}, falling back to trial division");
                sieve::next_prime(target)
            }
            None => sieve::next_prime(target),
        };

        log::debug!("growing table from {} to {capacity} slots", self.capacity());
        self.rehash(capacity)
    }

    /// Moves every entry into a fresh array of `capacity` slots.
    ///
    /// All placements are computed before anything moves, so a failure leaves the table intact.
    fn rehash(&mut self, capacity: usize) -> Result<(), TableError> {
        if self.count > capacity {
            return Err(TableError::CapacityTooSmall { capacity, count: self.count });
        }

        // placement[new position] = old position
        let mut placement: Vec<Option<usize>> = vec![None; capacity];
        for (old_position, slot) in self.slots.iter().enumerate() {
            let Slot::Occupied { key, .. } = slot else {
                continue;
            };
            let position = self
                .walk(key, capacity)
                .find(|&position| matches!(placement.get(position), Some(None)))
                .ok_or_else(|| TableError::ProbeExhausted { key: key.clone(), capacity })?;
            if let Some(target) = placement.get_mut(position) {
                *target = Some(old_position);
            }
        }

        let mut old = mem::take(&mut self.slots);
        let mut slots = Vec::with_capacity(capacity);
        for source in placement {
            let slot = match source {
                Some(old_position) => old
                    .get_mut(old_position)
                    .map_or(Slot::Empty, |slot| mem::replace(slot, Slot::Empty)),
                None => Slot::Empty,
            };
            slots.push(slot);
        }
        self.slots = slots;

        log::debug!("rehashed {} entries into {capacity} slots", self.count);
        Ok(())
    }
}

/// Allocates `capacity` empty slots
fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}

/// Iterator over the key-value pairs of a [`Table`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Remaining slots
    slots: std::slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|slot| match slot {
            Slot::Occupied { key, value } => Some((key.as_str(), value)),
            Slot::Empty => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sieve::is_prime;
    use proptest::prelude::*;
    use std::collections::HashMap;

    /// Keys of the form "i:j" for i in 0..10 and j in 1..=10, each with value "j:i"
    fn grid_pairs() -> Vec<(String, String)> {
        (0..10)
            .flat_map(|i| (1..=10).rev().map(move |j| (format!("{i}:{j}"), format!("{j}:{i}"))))
            .collect()
    }

    #[test]
    fn test_put_and_get() {
        let mut table = Table::new(11);
        assert_eq!(table.put("apple", 1), Ok(None));
        assert_eq!(table.put("banana", 2), Ok(None));

        assert_eq!(table.get("apple").value(), Some(&1));
        assert_eq!(table.get("banana").value(), Some(&2));
        assert!(!table.get("cherry").is_found());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_overwrite_keeps_single_entry() {
        let mut table = Table::new(11);
        table.put("key", 1).unwrap();
        // "kez" shares the home slot, so the second "key" put has to walk past it
        table.put("kez", 2).unwrap();
        assert_eq!(table.put("key", 10), Ok(Some(1)));
        assert_eq!(table.put("kez", 20), Ok(Some(2)));

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("key").value(), Some(&10));
        assert_eq!(table.get("kez").value(), Some(&20));
        assert_eq!(table.iter().filter(|(key, _)| *key == "key").count(), 1);
    }

    #[test]
    fn test_grid_keys_with_linear_probing() {
        let mut table = Table::new(1000);
        for (key, value) in grid_pairs() {
            table.put(key, value).unwrap();
        }

        assert_eq!(table.len(), 100);
        assert_eq!(table.capacity(), 1000);
        for (key, value) in grid_pairs() {
            let (got, found, _) = table.get(&key).into_parts();
            assert!(found, "table doesn't have key: {key}");
            assert_eq!(got, Some(&value));
        }
    }

    #[test]
    fn test_grid_keys_with_double_hashing() {
        let size = 10_000;
        let mut table = Table::new(size);
        table.make_sieve(size);
        table.set_probe(ProbeKind::DoubleHash).unwrap();
        assert_eq!(table.set_capacity(size), Ok(9973));

        for (key, value) in grid_pairs() {
            table.put(key, value).unwrap();
        }

        let mut total = 0;
        for (key, value) in grid_pairs() {
            let lookup = table.get(&key);
            assert_eq!(lookup.value(), Some(&value), "key: {key}");
            total += lookup.collisions();
        }
        // 90 keys of length 3 share one home slot and walk the same stride
        assert!(total >= (0..90).sum::<usize>());
    }

    #[test]
    fn test_absent_keys() {
        let mut table = Table::new(20);
        for i in 0..10 {
            table.put(i.to_string(), i).unwrap();
        }
        for i in 10..20 {
            assert!(!table.get(&i.to_string()).is_found(), "found {i}");
            assert!(!table.has_key(&i.to_string()));
        }
    }

    #[test]
    fn test_growth_from_twenty() {
        let mut table = Table::new(20);
        assert_eq!(table.capacity(), 20);

        for i in 0..20 {
            table.put(i.to_string(), i).unwrap();
        }

        assert!(table.capacity() > 20);
        assert_ne!(table.capacity(), 23);
        assert_eq!(table.capacity(), 41);
        assert!(is_prime(table.capacity()));
        assert!(table.current_load() <= table.configured_max_load());
        assert!(table.load_factor() <= 0.6);
        for i in 0..20 {
            assert_eq!(table.get(&i.to_string()).value(), Some(&i));
        }
    }

    #[test]
    fn test_growth_overshoots_by_at_most_one_put() {
        let mut table = Table::new(20);
        // 12 / 20 is not above 0.6, so the 13th put lands without growing
        for i in 0..13 {
            table.put(format!("k{i}"), i).unwrap();
        }
        assert_eq!(table.capacity(), 20);
        assert!(table.current_load() > 0.6);

        table.put("k13", 13).unwrap();
        assert_eq!(table.capacity(), 41);
    }

    #[test]
    fn test_collision_counts() {
        let mut table = Table::new(1000);
        // same length, same home slot
        table.put("a", 1).unwrap();
        table.put("b", 2).unwrap();
        table.put("c", 3).unwrap();

        assert_eq!(table.get("a").collisions(), 0);
        assert_eq!(table.get("c").collisions(), 2);

        let missing = table.get("d");
        assert!(!missing.is_found());
        assert_eq!(missing.collisions(), 3);

        // different length, empty home slot
        assert_eq!(table.get("zz").collisions(), 0);
    }

    #[test]
    fn test_lookup_on_full_table_terminates() {
        let mut table = Table::new(3);
        table.set_max_load(0.9).unwrap();
        for key in ["a", "b", "c"] {
            table.put(key, ()).unwrap();
        }
        assert_eq!(table.capacity(), 3);
        assert!((table.current_load() - 1.0).abs() < f64::EPSILON);

        let lookup = table.get("d");
        assert!(!lookup.is_found());
        assert_eq!(lookup.collisions(), 3);
    }

    #[test]
    fn test_quadratic_walk_grows_when_exhausted() {
        let mut table = Table::new(7);
        table.set_probe(ProbeKind::Quadratic).unwrap();
        table.set_max_load(0.9).unwrap();

        // offsets 0, 1, 4, 2 are the only ones a quadratic walk reaches in 7 slots
        for key in ["a", "b", "c", "d"] {
            table.put(key, ()).unwrap();
        }
        assert_eq!(table.capacity(), 7);

        assert_eq!(table.put("e", ()), Ok(None));
        assert_eq!(table.capacity(), 17);
        assert_eq!(table.len(), 5);
        for key in ["a", "b", "c", "d", "e"] {
            assert!(table.has_key(key), "missing {key}");
        }
    }

    #[test]
    fn test_double_hashing_on_non_prime_capacity() {
        // the stride for one-letter keys shares a factor with 20, so their walk covers 10 slots
        let mut table = Table::new(20);
        table.set_probe(ProbeKind::DoubleHash).unwrap();

        for (i, key) in ('a'..='l').enumerate() {
            assert_eq!(table.put(key.to_string(), i), Ok(None), "put {key}");
        }

        assert_eq!(table.len(), 12);
        assert_eq!(table.capacity(), 41);
        for (i, key) in ('a'..='l').enumerate() {
            assert_eq!(table.get(&key.to_string()).value(), Some(&i));
        }
    }

    #[test]
    fn test_switching_probe_keeps_keys_unique() {
        let mut table = Table::new(101);
        table.put("a", 1).unwrap();
        table.put("b", 2).unwrap();

        table.set_probe(ProbeKind::DoubleHash).unwrap();
        assert_eq!(table.probe(), ProbeKind::DoubleHash);
        assert_eq!(table.put("b", 3), Ok(Some(2)));

        assert_eq!(table.len(), 2);
        assert_eq!(table.iter().filter(|(key, _)| *key == "b").count(), 1);
        assert_eq!(table.get("a").value(), Some(&1));
        assert_eq!(table.get("b").value(), Some(&3));
    }

    #[test]
    fn test_switching_hash_keeps_keys_unique() {
        let mut table = Table::new(101);
        table.put("ab", 1).unwrap();
        table.put("ba", 2).unwrap();

        table.set_hash(HashStrategy::Base27).unwrap();
        assert_eq!(table.put("ba", 3), Ok(Some(2)));

        assert_eq!(table.len(), 2);
        assert_eq!(table.iter().filter(|(key, _)| *key == "ba").count(), 1);
        assert_eq!(table.get("ab").value(), Some(&1));
        assert_eq!(table.get("ba").value(), Some(&3));
    }

    #[test]
    fn test_failed_probe_switch_keeps_previous_layout() {
        let mut table = Table::new(7);
        table.set_max_load(0.9).unwrap();
        for key in ["a", "b", "c", "d", "e"] {
            table.put(key, ()).unwrap();
        }

        // five entries sharing a home slot cannot fit the four slots a quadratic walk reaches
        let result = table.set_probe(ProbeKind::Quadratic);
        assert!(matches!(result, Err(TableError::ProbeExhausted { capacity: 7, .. })));

        assert_eq!(table.probe(), ProbeKind::Linear);
        assert_eq!(table.capacity(), 7);
        for key in ["a", "b", "c", "d", "e"] {
            assert!(table.has_key(key), "missing {key}");
        }
    }

    #[test]
    fn test_set_capacity_rounds_down() {
        let mut table: Table<u32> = Table::new(10);
        table.make_sieve(10_000);
        assert_eq!(table.set_capacity(10_000), Ok(9973));
        assert_eq!(table.capacity(), 9973);

        // growth rounds up from twice the capacity instead
        let mut table: Table<u32> = Table::new(10);
        table.make_sieve(100);
        for i in 0..7 {
            table.put(i.to_string(), i).unwrap();
        }
        assert_eq!(table.capacity(), 10);
        table.put("7", 7).unwrap();
        assert_eq!(table.capacity(), 23);
    }

    #[test]
    fn test_set_capacity_rehashes_entries() {
        let mut table = Table::new(5);
        table.make_sieve(1_000);
        table.put("one", 1).unwrap();
        table.put("three", 3).unwrap();

        assert_eq!(table.set_capacity(100), Ok(97));
        assert_eq!(table.get("one").value(), Some(&1));
        assert_eq!(table.get("three").value(), Some(&3));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_set_capacity_errors_leave_table_intact() {
        let mut table = Table::new(11);
        assert_eq!(table.set_capacity(10), Err(TableError::SieveMissing));

        table.make_sieve(50);
        assert_eq!(
            table.set_capacity(51),
            Err(TableError::SieveOutOfBounds { index: 51, bound: 50 })
        );
        assert_eq!(table.set_capacity(1), Err(TableError::NoPrimeAtOrBelow(1)));

        for key in ["a", "bb", "ccc", "dddd"] {
            table.put(key, key.len()).unwrap();
        }
        assert_eq!(
            table.set_capacity(3),
            Err(TableError::CapacityTooSmall { capacity: 3, count: 4 })
        );
        assert_eq!(table.capacity(), 11);
        assert_eq!(table.get("ccc").value(), Some(&3));
    }

    #[test]
    fn test_shared_sieve() {
        let sieve = Arc::new(PrimeSieve::new(1_000));
        let mut first: Table<i32> = Table::new(4);
        let mut second: Table<i32> = Table::new(4);
        first.share_sieve(Arc::clone(&sieve));
        second.share_sieve(Arc::clone(&sieve));

        assert_eq!(Arc::strong_count(&sieve), 3);
        assert_eq!(first.set_capacity(500), Ok(499));
        assert_eq!(second.set_capacity(30), Ok(29));
        assert_eq!(second.sieve().map(PrimeSieve::bound), Some(1_000));
    }

    #[test]
    fn test_growth_past_sieve_bound_stays_prime() {
        let mut table = Table::new(7);
        table.make_sieve(10);
        for i in 0..200 {
            table.put(format!("key-{i}"), i).unwrap();
            assert!(is_prime(table.capacity()), "capacity {} is not prime", table.capacity());
        }
        assert_eq!(table.len(), 200);
    }

    #[test]
    fn test_growth_past_sieve_bound_uses_trial_division() {
        let mut table = Table::new(7);
        table.make_sieve(10);
        for i in 0..6 {
            table.put(i.to_string(), i).unwrap();
        }
        // 14 is past the sieve, so the next prime comes from trial division
        assert_eq!(table.capacity(), 17);
        assert_eq!(table.sieve().map(PrimeSieve::bound), Some(10));
    }

    #[test]
    fn test_max_load_validation() {
        let mut table: Table<()> = Table::default();
        assert_eq!(table.capacity(), 17);
        assert!((table.load_factor() - 0.6).abs() < f64::EPSILON);

        assert!(table.set_max_load(0.0).is_err());
        assert!(table.set_max_load(1.0).is_err());
        assert!(table.set_max_load(f64::NAN).is_err());
        assert_eq!(table.set_max_load(0.75), Ok(()));
        assert!((table.configured_max_load() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_small_max_load_still_bounds_occupancy() {
        let mut table = Table::new(1);
        table.set_max_load(0.1).unwrap();
        for i in 0..50 {
            table.put(i.to_string(), i).unwrap();
            #[allow(clippy::cast_precision_loss)]
            let before = (table.len() - 1) as f64 / table.capacity() as f64;
            assert!(before <= 0.1);
        }
    }

    #[test]
    fn test_every_hash_strategy_round_trips() {
        for strategy in HashStrategy::ALL {
            let mut table = Table::new(13);
            table.set_hash(strategy).unwrap();
            assert_eq!(table.hash_strategy(), strategy);
            for (key, value) in grid_pairs() {
                table.put(key, value).unwrap();
            }
            for (key, value) in grid_pairs() {
                assert_eq!(table.get(&key).value(), Some(&value), "{}", strategy.name());
            }
        }
    }

    #[test]
    fn test_iter() {
        let mut table = Table::new(11);
        table.put("key1", 1).unwrap();
        table.put("key2", 2).unwrap();
        table.put("key3", 3).unwrap();

        let mut count = 0;
        let mut sum = 0;
        for (_, &value) in table.iter() {
            count += 1;
            sum += value;
        }

        assert_eq!(count, 3);
        assert_eq!(sum, 6);
    }

    /// Probe kinds that always reach a free slot on a prime-sized table
    fn complete_probe() -> impl Strategy<Value = ProbeKind> {
        prop_oneof![Just(ProbeKind::Linear), Just(ProbeKind::DoubleHash)]
    }

    fn hash_strategy() -> impl Strategy<Value = HashStrategy> {
        prop_oneof![
            Just(HashStrategy::Length),
            Just(HashStrategy::Base27),
            Just(HashStrategy::LengthScaled)
        ]
    }

    proptest! {
        #[test]
        fn prop_behaves_like_a_map(
            pairs in prop::collection::vec(("[a-z0-9:]{0,8}", any::<u16>()), 0..200),
            probe in complete_probe(),
            strategy in hash_strategy(),
        ) {
            let mut table = Table::new(11);
            table.set_probe(probe).unwrap();
            table.set_hash(strategy).unwrap();
            let mut model = HashMap::new();

            for (key, value) in &pairs {
                let previous = table.put(key.as_str(), *value).unwrap();
                prop_assert_eq!(previous, model.insert(key.clone(), *value));

                #[allow(clippy::cast_precision_loss)]
                let before = (table.len() - 1) as f64 / table.capacity() as f64;
                prop_assert!(before <= table.configured_max_load());
                prop_assert!(is_prime(table.capacity()));
            }

            prop_assert_eq!(table.len(), model.len());
            for (key, value) in &model {
                prop_assert_eq!(table.get(key).value(), Some(value));
            }
            prop_assert_eq!(table.iter().count(), model.len());
        }

        #[test]
        fn prop_absent_keys_are_not_found(
            keys in prop::collection::hash_set("[a-z]{1,6}", 1..60),
            probe in complete_probe(),
        ) {
            let mut table = Table::new(11);
            table.set_probe(probe).unwrap();
            for key in keys.iter().filter(|key| key.len() % 2 == 0) {
                table.put(key.as_str(), ()).unwrap();
            }
            for key in keys.iter().filter(|key| key.len() % 2 == 1) {
                prop_assert!(!table.has_key(key));
            }
        }
    }
}
