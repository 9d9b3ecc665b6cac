//! Chunk storage.
//!
//! A chunk is a cube of `2³` sections. Cells are addressed by world
//! position; the chunk only ever sees positions that map into it.

mod cell;
mod section;

pub use cell::CellWord;
pub use section::Section;

use strata_registry::Registry;
use strata_utils::types::{SECTION_VOLUME, SECTIONS_PER_CHUNK};
use strata_utils::{BlockPos, ChunkPos};
use thiserror::Error;

/// Errors when rebuilding a chunk from persisted words.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
    /// The word slice does not cover every cell of the chunk.
    #[error("chunk {pos} needs {expected} words, got {actual}")]
    WrongLength {
        /// Chunk being loaded.
        pos: ChunkPos,
        /// Words a chunk holds.
        expected: usize,
        /// Words that were supplied.
        actual: usize,
    },
}

/// Number of cell words stored by one chunk.
pub const CHUNK_VOLUME: usize = SECTION_VOLUME * SECTIONS_PER_CHUNK;

/// The cells of one chunk.
#[derive(Debug, Clone)]
pub struct Chunk {
    pos: ChunkPos,
    sections: Box<[Section]>,
}

impl Chunk {
    /// Creates a chunk where every cell is air with no fluid.
    #[must_use]
    pub fn new_empty(pos: ChunkPos) -> Self {
        Self {
            pos,
            sections: (0..SECTIONS_PER_CHUNK)
                .map(|_| Section::new_empty())
                .collect(),
        }
    }

    /// Rebuilds a chunk from persisted words, section after section in
    /// section index order.
    ///
    /// Words naming ids the registry does not know are rewritten to the
    /// fallback content, and a single warning reports how many were fixed.
    pub fn from_words(pos: ChunkPos, words: &[u32], registry: &Registry) -> Result<Self, ChunkError> {
        if words.len() != CHUNK_VOLUME {
            return Err(ChunkError::WrongLength {
                pos,
                expected: CHUNK_VOLUME,
                actual: words.len(),
            });
        }

        let mut repaired = 0usize;
        let sections = words
            .chunks_exact(SECTION_VOLUME)
            .map(|chunk_words| {
                let mut section = Section::new_empty();
                for (cell, &raw) in section.words_mut().iter_mut().zip(chunk_words) {
                    let word = CellWord(raw);
                    *cell = if word.is_valid(registry) {
                        word
                    } else {
                        repaired += 1;
                        CellWord::from_content(&word.to_content(registry))
                    };
                }
                section
            })
            .collect();

        if repaired > 0 {
            log::warn!("Chunk {pos}: replaced {repaired} cells holding unknown ids with fallbacks");
        }

        Ok(Self { pos, sections })
    }

    /// All words of the chunk in the order [`Chunk::from_words`] reads them.
    #[must_use]
    pub fn to_words(&self) -> Vec<u32> {
        self.sections
            .iter()
            .flat_map(|section| section.words().iter().map(|word| word.0))
            .collect()
    }

    /// Position of this chunk.
    #[must_use]
    pub const fn pos(&self) -> ChunkPos {
        self.pos
    }

    /// Whether `pos` lies inside this chunk.
    #[must_use]
    pub fn contains(&self, pos: BlockPos) -> bool {
        pos.chunk_pos() == self.pos
    }

    /// Reads the cell at a world position inside this chunk.
    #[must_use]
    pub fn get(&self, pos: BlockPos) -> CellWord {
        debug_assert!(self.contains(pos), "{pos} is outside chunk {}", self.pos);
        let (x, y, z) = pos.section_local();
        self.sections[pos.section_pos().index_in_chunk()].get(x, y, z)
    }

    /// Writes the cell at a world position inside this chunk.
    pub fn set(&mut self, pos: BlockPos, word: CellWord) {
        debug_assert!(self.contains(pos), "{pos} is outside chunk {}", self.pos);
        let (x, y, z) = pos.section_local();
        self.sections[pos.section_pos().index_in_chunk()].set(x, y, z, word);
    }

    /// Every cell of the chunk with its world position.
    pub fn cells(&self) -> impl Iterator<Item = (BlockPos, CellWord)> + '_ {
        self.sections.iter().enumerate().flat_map(move |(index, section)| {
            let origin = self.pos.section_at(index).origin();
            section.words().iter().enumerate().map(move |(i, &word)| {
                let (x, y, z) = Section::coords(i);
                (origin.offset(x as i32, y as i32, z as i32), word)
            })
        })
    }

    /// The sections of this chunk in section index order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}
