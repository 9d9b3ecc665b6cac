use std::marker::PhantomData;
use std::thread::{self, ThreadId};

/// Pins a value to the thread that created it.
///
/// The raw-pointer marker makes the owner `!Send + !Sync`, and
/// [`ThreadGuard::check`] panics if it is ever reached from another thread
/// anyway, for example through an `unsafe` wrapper.
#[derive(Debug)]
pub struct ThreadGuard {
    owner: ThreadId,
    _not_send: PhantomData<*const ()>,
}

impl Default for ThreadGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadGuard {
    /// A guard owned by the calling thread.
    #[must_use]
    pub fn new() -> Self {
        Self::owned_by(thread::current().id())
    }

    /// A guard owned by the given thread.
    #[must_use]
    pub const fn owned_by(owner: ThreadId) -> Self {
        Self {
            owner,
            _not_send: PhantomData,
        }
    }

    /// Panics unless called on the owning thread.
    #[inline]
    #[track_caller]
    pub fn check(&self) {
        let current = thread::current().id();
        assert!(
            current == self.owner,
            "world owned by {:?} accessed from {current:?}",
            self.owner
        );
    }
}
