use std::sync::{PoisonError, RwLock};

use super::pattern::PatternTable;

#[derive(Debug)]
struct Slot {
    table: PatternTable,
    generation: u64,
}

/// Guarded, replaceable pattern table shared between an editor and the
/// dither calls that read it.
///
/// Readers get copies or run under a read guard; [`set`](Self::set)
/// commits a whole new table under the write lock. A dither running in
/// [`with_current`](Self::with_current) therefore sees either the old or
/// the new table, never a mix.
#[derive(Debug)]
pub struct SharedPatternTable {
    slot: RwLock<Slot>,
}

impl SharedPatternTable {
    pub fn new(table: PatternTable) -> Self {
        Self {
            slot: RwLock::new(Slot {
                table,
                generation: 0,
            }),
        }
    }

    /// Independent copy of the current table.
    pub fn get(&self) -> PatternTable {
        self.read(|table| table.clone())
    }

    /// Replace the table wholesale and return the new generation.
    pub fn set(&self, table: PatternTable) -> u64 {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        slot.table = table;
        slot.generation += 1;
        tracing::debug!(
            generation = slot.generation,
            size = slot.table.size(),
            "pattern table committed"
        );
        slot.generation
    }

    /// Restore the built-in horizontal-line table.
    pub fn reset(&self) -> u64 {
        self.set(PatternTable::default())
    }

    /// Number of commits since construction.
    pub fn generation(&self) -> u64 {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .generation
    }

    /// Run `f` against the current table while holding the read guard.
    pub fn with_current<R>(&self, f: impl FnOnce(&PatternTable) -> R) -> R {
        self.read(f)
    }

    fn read<R>(&self, f: impl FnOnce(&PatternTable) -> R) -> R {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        f(&slot.table)
    }
}

impl Default for SharedPatternTable {
    fn default() -> Self {
        Self::new(PatternTable::default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn starts_with_default_table() {
        let shared = SharedPatternTable::default();
        assert_eq!(shared.get(), PatternTable::horizontal_line());
        assert_eq!(shared.generation(), 0);
    }

    #[test]
    fn get_returns_independent_copy() {
        let shared = SharedPatternTable::default();
        let copy = shared.get();
        shared.set(PatternTable::filled(4, 0).unwrap());
        assert_eq!(copy, PatternTable::horizontal_line());
        assert_eq!(shared.get(), PatternTable::filled(4, 0).unwrap());
    }

    #[test]
    fn set_takes_ownership_of_new_table() {
        let shared = SharedPatternTable::default();
        let mut replacement = PatternTable::filled(8, 10).unwrap();
        shared.set(replacement.clone());
        replacement = PatternTable::filled(8, 99).unwrap();
        assert_eq!(shared.get().cell(0, 0), 10);
        assert_eq!(replacement.cell(0, 0), 99);
    }

    #[test]
    fn generation_counts_commits() {
        let shared = SharedPatternTable::default();
        assert_eq!(shared.set(PatternTable::bayer_4x4()), 1);
        assert_eq!(shared.reset(), 2);
        assert_eq!(shared.generation(), 2);
        assert_eq!(shared.get(), PatternTable::default());
    }

    #[test]
    fn concurrent_readers_never_see_torn_tables() {
        let shared = Arc::new(SharedPatternTable::new(PatternTable::filled(4, 0).unwrap()));
        let writer = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for i in 0..200u32 {
                    let value = if i % 2 == 0 { 255 } else { 0 };
                    shared.set(PatternTable::filled(4, value).unwrap());
                }
            })
        };
        for _ in 0..200 {
            shared.with_current(|table| {
                let first = table.cell(0, 0);
                let uniform = table.as_array().iter().all(|&v| v == first);
                assert!(uniform, "observed a mixed table");
            });
        }
        writer.join().unwrap();
    }
}
