use std::collections::BTreeMap;

/// Occurrence count of every byte value present in a buffer.
///
/// Symbols that never occur are absent rather than stored with a zero count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyMap {
    pub fn count(buffer: &[u8]) -> Self {
        let mut counts = BTreeMap::new();
        for &byte in buffer {
            *counts.entry(byte).or_default() += 1;
        }

        Self { counts }
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the length of the counted buffer.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }
}

impl FromIterator<(u8, u64)> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().filter(|&(_, c)| c > 0).collect(),
        }
    }
}
