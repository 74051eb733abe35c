//! Test doubles for the driver and the embedder

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Once;

use crate::context::GlApi;
use crate::error_state::ErrorStateClient;
use crate::gl;
use crate::memory_tracker::MemoryTracker;

/// Scripted driver: errors are returned in the order they were pushed
#[derive(Default)]
pub struct FakeGl {
    errors: RefCell<VecDeque<u32>>,
    deleted: RefCell<Vec<u32>>,
    strings: RefCell<HashMap<u32, String>>,
    integers: RefCell<HashMap<u32, i32>>,
    extensions: RefCell<HashSet<String>>,
}

impl FakeGl {
    pub fn push_errors(&self, errors: &[u32]) {
        self.errors.borrow_mut().extend(errors.iter().copied());
    }

    pub fn pending_errors(&self) -> usize {
        self.errors.borrow().len()
    }

    /// Service ids deleted so far, in call order
    pub fn deleted(&self) -> Vec<u32> {
        self.deleted.borrow().clone()
    }

    pub fn set_string(&self, pname: u32, value: &str) {
        self.strings.borrow_mut().insert(pname, value.to_owned());
    }

    pub fn set_integer(&self, pname: u32, value: i32) {
        self.integers.borrow_mut().insert(pname, value);
    }

    pub fn add_extension(&self, name: &str) {
        self.extensions.borrow_mut().insert(name.to_owned());
    }
}

impl GlApi for FakeGl {
    fn get_error(&self) -> u32 {
        self.errors.borrow_mut().pop_front().unwrap_or(gl::NO_ERROR)
    }

    fn delete_renderbuffers(&self, service_ids: &[u32]) {
        self.deleted.borrow_mut().extend_from_slice(service_ids);
    }

    fn get_string(&self, pname: u32) -> String {
        self.strings.borrow().get(&pname).cloned().unwrap_or_default()
    }

    fn get_integer(&self, pname: u32) -> i32 {
        self.integers.borrow().get(&pname).copied().unwrap_or(0)
    }

    fn has_extension(&self, name: &str) -> bool {
        self.extensions.borrow().contains(name)
    }
}

#[derive(Default)]
pub struct RecordingClient {
    context_lost: Cell<u32>,
    out_of_memory: Cell<u32>,
}

impl RecordingClient {
    pub fn context_lost_count(&self) -> u32 {
        self.context_lost.get()
    }

    pub fn out_of_memory_count(&self) -> u32 {
        self.out_of_memory.get()
    }
}

impl ErrorStateClient for RecordingClient {
    fn on_context_lost_error(&self) {
        self.context_lost.set(self.context_lost.get() + 1);
    }

    fn on_out_of_memory_error(&self) {
        self.out_of_memory.set(self.out_of_memory.get() + 1);
    }
}

#[derive(Default)]
pub struct RecordingTracker {
    allocs: RefCell<Vec<u64>>,
    frees: RefCell<Vec<u64>>,
}

impl RecordingTracker {
    pub fn allocs(&self) -> Vec<u64> {
        self.allocs.borrow().clone()
    }

    pub fn frees(&self) -> Vec<u64> {
        self.frees.borrow().clone()
    }

    /// Bytes currently allocated according to the calls received
    pub fn total(&self) -> i64 {
        let allocated: u64 = self.allocs.borrow().iter().sum();
        let freed: u64 = self.frees.borrow().iter().sum();
        allocated as i64 - freed as i64
    }
}

impl MemoryTracker for RecordingTracker {
    fn track_mem_alloc(&self, bytes: u64) {
        self.allocs.borrow_mut().push(bytes);
    }

    fn track_mem_free(&self, bytes: u64) {
        self.frees.borrow_mut().push(bytes);
    }
}

#[derive(Debug, Clone)]
pub struct CapturedRecord {
    pub level: log::Level,
    pub target: String,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

thread_local! {
    static RECORDS: RefCell<Vec<CapturedRecord>> = RefCell::new(Vec::new());
}

/// Logger keeping records per test thread, forwarding them to the regular env_logger setup
struct CaptureLogger {
    inner: env_logger::Logger,
}

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        RECORDS.with(|records| {
            records.borrow_mut().push(CapturedRecord {
                level: record.level(),
                target: record.target().to_owned(),
                message: record.args().to_string(),
                file: record.file().map(str::to_owned),
                line: record.line(),
            })
        });

        self.inner.log(record);
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

static INSTALL: Once = Once::new();

/// Install the capturing logger and forget what this thread logged so far
pub fn capture_logs() {
    INSTALL.call_once(|| {
        let mut builder = crate::log::builder();
        builder.is_test(true);

        let logger = Box::leak(Box::new(CaptureLogger {
            inner: builder.build(),
        }));

        if log::set_logger(logger).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    });

    RECORDS.with(|records| records.borrow_mut().clear());
}

/// Records logged by the current thread since the last [`capture_logs`]
pub fn captured() -> Vec<CapturedRecord> {
    RECORDS.with(|records| records.borrow().clone())
}
