/// A fixed-size bit set backed by `u64` words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSet {
    words: Box<[u64]>,
    len: usize,
}

impl BitSet {
    /// Creates a bit set able to hold `len` bits, all cleared.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(64)].into_boxed_slice(),
            len,
        }
    }

    /// Number of addressable bits.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the set addresses no bits at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sets the bit at the given index. Out of range indices are ignored.
    pub fn set(&mut self, index: usize, value: bool) {
        if index >= self.len {
            return;
        }

        let word = &mut self.words[index / 64];
        let bit = 1u64 << (index % 64);
        if value {
            *word |= bit;
        } else {
            *word &= !bit;
        }
    }

    /// Returns the bit at the given index. Out of range indices read as cleared.
    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        index < self.len && (self.words[index / 64] >> (index % 64)) & 1 == 1
    }

    /// Sets the bit and returns whether it was previously clear.
    pub fn insert(&mut self, index: usize) -> bool {
        let fresh = index < self.len && !self.get(index);
        if fresh {
            self.set(index, true);
        }
        fresh
    }

    /// Number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}
