//! GPU memory accounting

use std::cell::Cell;
use std::rc::Rc;

use bytesize::ByteSize;

/// Sink for memory accounting, typically shared by every manager of a context group
pub trait MemoryTracker {
    fn track_mem_alloc(&self, bytes: u64);
    fn track_mem_free(&self, bytes: u64);
}

/// Per-resource-type view of a [`MemoryTracker`]
///
/// Keeps the total currently represented by one manager so that it can be checked and reported
/// independently of the shared tracker.
pub struct MemoryTypeTracker {
    tracker: Option<Rc<dyn MemoryTracker>>,
    mem_represented: Cell<u64>,
}

impl MemoryTypeTracker {
    pub fn new(tracker: Option<Rc<dyn MemoryTracker>>) -> Self {
        Self {
            tracker,
            mem_represented: Cell::new(0),
        }
    }

    pub fn track_mem_alloc(&self, bytes: u64) {
        self.mem_represented.set(self.mem_represented.get() + bytes);
        if let Some(tracker) = &self.tracker {
            if bytes > 0 {
                tracker.track_mem_alloc(bytes);
            }
        }

        log::trace!(
            "tracked alloc of {}, now representing {}",
            ByteSize(bytes),
            ByteSize(self.mem_represented.get())
        );
    }

    pub fn track_mem_free(&self, bytes: u64) {
        let represented = self.mem_represented.get();
        debug_assert!(
            bytes <= represented,
            "freeing {} bytes but only {} are tracked",
            bytes,
            represented
        );

        self.mem_represented.set(represented.saturating_sub(bytes));
        if let Some(tracker) = &self.tracker {
            if bytes > 0 {
                tracker.track_mem_free(bytes);
            }
        }

        log::trace!(
            "tracked free of {}, now representing {}",
            ByteSize(bytes),
            ByteSize(self.mem_represented.get())
        );
    }

    pub fn mem_represented(&self) -> u64 {
        self.mem_represented.get()
    }
}
