//! Boat cargo model: what is held, keyed by item kind and colour.
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::map::Colour;

/// Kind of item a pickup task puts in the hold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Offering,
    Statue,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Offering => "offering",
            Self::Statue => "statue",
        };
        f.write_str(name)
    }
}

/// Structured inventory key. A delivery only matches a pickup with the same
/// item kind and colour.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CargoKey {
    pub item: ItemKind,
    pub colour: Colour,
}

impl CargoKey {
    #[must_use]
    pub const fn new(item: ItemKind, colour: Colour) -> Self {
        Self { item, colour }
    }
}

impl fmt::Display for CargoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.colour, self.item)
    }
}

/// Held item counts. The invariant `total() <= cargo capacity` is enforced
/// at every mutation point by the callers passing their capacity in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Inventory {
    counts: BTreeMap<CargoKey, u32>,
}

impl Inventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total items held across every key.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    #[must_use]
    pub fn count(&self, key: CargoKey) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Store one item, refusing when the hold is already at capacity.
    pub fn try_pickup(&mut self, key: CargoKey, capacity: u32) -> bool {
        if self.total() >= capacity {
            return false;
        }
        *self.counts.entry(key).or_insert(0) += 1;
        true
    }

    /// Hand over one matching item, refusing when none is held.
    pub fn try_deliver(&mut self, key: CargoKey) -> bool {
        match self.counts.get_mut(&key) {
            Some(count) if *count > 0 => {
                *count -= 1;
                if *count == 0 {
                    self.counts.remove(&key);
                }
                true
            }
            _ => false,
        }
    }

    /// Held entries in key order, for diagnostics.
    pub fn items(&self) -> impl Iterator<Item = (CargoKey, u32)> + '_ {
        self.counts.iter().map(|(key, count)| (*key, *count))
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.counts.is_empty() {
            return f.write_str("empty hold");
        }
        let mut first = true;
        for (key, count) in &self.counts {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{count}x {key}")?;
            first = false;
        }
        Ok(())
    }
}
