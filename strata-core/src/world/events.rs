use crossbeam::channel::{self, Receiver, Sender};
use strata_utils::{BlockPos, ChunkPos, SectionPos};

/// A cell's stored word changed.
///
/// Sent once per content write and once per static-flag flip. Each
/// subscriber receives its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionChanged {
    /// Chunk holding the cell.
    pub chunk: ChunkPos,
    /// Section holding the cell.
    pub section: SectionPos,
    /// The cell itself.
    pub pos: BlockPos,
}

impl SectionChanged {
    /// The event for a write at `pos`.
    #[must_use]
    pub fn at(pos: BlockPos) -> Self {
        Self {
            chunk: pos.chunk_pos(),
            section: pos.section_pos(),
            pos,
        }
    }
}

/// Fans section changes out to every live receiver.
#[derive(Debug, Default)]
pub(crate) struct SectionChangeBus {
    senders: Vec<Sender<SectionChanged>>,
}

impl SectionChangeBus {
    pub(crate) fn subscribe(&mut self) -> Receiver<SectionChanged> {
        let (sender, receiver) = channel::unbounded();
        self.senders.push(sender);
        receiver
    }

    /// Sends to every subscriber and forgets the ones whose receiver was dropped.
    pub(crate) fn emit(&mut self, event: SectionChanged) {
        if self.senders.is_empty() {
            return;
        }
        self.senders.retain(|sender| sender.send(event).is_ok());
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.senders.len()
    }
}
