//! A fixed-size cube of cell words.

use rand::Rng;
use strata_utils::types::{SECTION_BITS, SECTION_SIZE, SECTION_VOLUME};

use super::CellWord;

const MASK: usize = SECTION_SIZE as usize - 1;

/// A `16³` cube of cells, stored flat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    cells: Box<[CellWord]>,
}

impl Default for Section {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl Section {
    /// Number of cells in a section.
    pub const VOLUME: usize = SECTION_VOLUME;

    /// Creates a section where every cell is air with no fluid.
    #[must_use]
    pub fn new_empty() -> Self {
        Self {
            cells: vec![CellWord::EMPTY; SECTION_VOLUME].into_boxed_slice(),
        }
    }

    /// Creates a section from raw words. Returns `None` unless exactly
    /// [`Section::VOLUME`] words are given.
    #[must_use]
    pub fn from_words(words: &[u32]) -> Option<Self> {
        if words.len() != SECTION_VOLUME {
            return None;
        }
        Some(Self {
            cells: words.iter().map(|&w| CellWord(w)).collect(),
        })
    }

    #[inline]
    const fn index(x: usize, y: usize, z: usize) -> usize {
        (x << (2 * SECTION_BITS)) + (y << SECTION_BITS) + z
    }

    #[inline]
    pub(super) const fn coords(index: usize) -> (usize, usize, usize) {
        (
            (index >> (2 * SECTION_BITS)) & MASK,
            (index >> SECTION_BITS) & MASK,
            index & MASK,
        )
    }

    /// Reads a cell. Coordinates must already be masked into the section.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> CellWord {
        debug_assert!(x <= MASK && y <= MASK && z <= MASK);
        self.cells[Self::index(x, y, z)]
    }

    /// Writes a cell. Coordinates must already be masked into the section.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, word: CellWord) {
        debug_assert!(x <= MASK && y <= MASK && z <= MASK);
        self.cells[Self::index(x, y, z)] = word;
    }

    /// Picks a uniformly random cell and returns its local coordinates
    /// together with its word.
    pub fn sample_random<R: Rng + ?Sized>(&self, rng: &mut R) -> ((usize, usize, usize), CellWord) {
        let index = rng.random_range(0..SECTION_VOLUME);
        (Self::coords(index), self.cells[index])
    }

    /// All words in storage order.
    #[must_use]
    pub fn words(&self) -> &[CellWord] {
        &self.cells
    }

    /// Mutable access to all words in storage order.
    pub fn words_mut(&mut self) -> &mut [CellWord] {
        &mut self.cells
    }
}
