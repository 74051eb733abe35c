//! Registry of renderbuffer objects for one context
//!
//! Clients name renderbuffers with their own ids; the manager maps them to driver names, keeps
//! track of which ones hold undefined contents and accounts for the memory they use.

use std::cell::Cell;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::rc::Rc;

use bytesize::ByteSize;
use cgmath::Vector2;

use crate::context::GlApi;
use crate::feature_info::FeatureInfo;
use crate::gl;
use crate::memory_tracker::{MemoryTracker, MemoryTypeTracker};
use crate::util::{renderbuffer_bytes_per_pixel, safe_multiply_uint32};

/// State shared between a manager and every renderbuffer it created
///
/// Renderbuffers can outlive their registry entry, and even the manager, so the aggregates they
/// contribute to live here rather than in [`RenderbufferManager`].
struct ManagerShared {
    gl: Rc<dyn GlApi>,
    memory_tracker: MemoryTypeTracker,
    have_context: Cell<bool>,
    renderbuffer_count: Cell<u32>,
    num_uncleared_renderbuffers: Cell<u32>,
}

impl ManagerShared {
    fn start_tracking(&self, renderbuffer: &Renderbuffer) {
        increment(&self.renderbuffer_count);
        if !renderbuffer.cleared() {
            increment(&self.num_uncleared_renderbuffers);
        }
    }

    fn stop_tracking(&self, renderbuffer: &Renderbuffer) {
        decrement(&self.renderbuffer_count);
        if !renderbuffer.cleared() {
            decrement(&self.num_uncleared_renderbuffers);
        }

        self.memory_tracker
            .track_mem_free(renderbuffer.estimated_size() as u64);
    }
}

fn increment(counter: &Cell<u32>) {
    counter.set(counter.get() + 1);
}

fn decrement(counter: &Cell<u32>) {
    debug_assert!(counter.get() > 0, "renderbuffer counter underflow");
    counter.set(counter.get().saturating_sub(1));
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Storage {
    samples: i32,
    internal_format: u32,
    size: Vector2<i32>,
    estimated_size: u32,
}

/// A renderbuffer object tracked by a [`RenderbufferManager`]
///
/// Handles are shared with `Rc`. The driver object is deleted when the last handle goes away, and
/// only if the context was still alive when the manager was destroyed. Fields that feed manager
/// aggregates can only be changed through the manager.
pub struct Renderbuffer {
    shared: Rc<ManagerShared>,
    client_id: u32,
    service_id: u32,
    deleted: Cell<bool>,
    has_been_bound: Cell<bool>,
    cleared: Cell<bool>,
    storage: Cell<Storage>,
}

impl Renderbuffer {
    fn new(shared: Rc<ManagerShared>, client_id: u32, service_id: u32) -> Self {
        Self {
            shared,
            client_id,
            service_id,
            deleted: Cell::new(false),
            has_been_bound: Cell::new(false),
            // Nothing to clear until storage is allocated
            cleared: Cell::new(true),
            storage: Cell::new(Storage {
                samples: 0,
                internal_format: gl::RGBA4,
                size: Vector2::new(0, 0),
                estimated_size: 0,
            }),
        }
    }

    pub fn client_id(&self) -> u32 {
        self.client_id
    }

    pub fn service_id(&self) -> u32 {
        self.service_id
    }

    pub fn samples(&self) -> i32 {
        self.storage.get().samples
    }

    pub fn internal_format(&self) -> u32 {
        self.storage.get().internal_format
    }

    pub fn width(&self) -> i32 {
        self.storage.get().size.x
    }

    pub fn height(&self) -> i32 {
        self.storage.get().size.y
    }

    pub fn size(&self) -> Vector2<i32> {
        self.storage.get().size
    }

    /// Whether the contents are defined
    pub fn cleared(&self) -> bool {
        self.cleared.get()
    }

    pub fn has_been_bound(&self) -> bool {
        self.has_been_bound.get()
    }

    /// Whether the client deleted this renderbuffer; other holders may still keep it alive
    pub fn is_deleted(&self) -> bool {
        self.deleted.get()
    }

    /// Bound at least once and not deleted
    pub fn is_valid(&self) -> bool {
        self.has_been_bound() && !self.is_deleted()
    }

    /// Bytes of GPU memory this renderbuffer is accounted for
    pub fn estimated_size(&self) -> u32 {
        self.storage.get().estimated_size
    }
}

impl Drop for Renderbuffer {
    fn drop(&mut self) {
        if self.shared.have_context.get() {
            self.shared.gl.delete_renderbuffers(&[self.service_id]);
        }

        self.shared.stop_tracking(self);

        log::debug!(
            "destroyed renderbuffer {} (service id {}, context {})",
            self.client_id,
            self.service_id,
            if self.shared.have_context.get() {
                "alive"
            } else {
                "lost"
            }
        );
    }
}

impl std::fmt::Debug for Renderbuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Renderbuffer")
            .field("client_id", &self.client_id)
            .field("service_id", &self.service_id)
            .field("deleted", &self.deleted.get())
            .field("has_been_bound", &self.has_been_bound.get())
            .field("cleared", &self.cleared.get())
            .field("storage", &self.storage.get())
            .finish()
    }
}

/// Maps client renderbuffer ids to driver renderbuffers for one context
pub struct RenderbufferManager {
    shared: Rc<ManagerShared>,
    renderbuffers: HashMap<u32, Rc<Renderbuffer>>,
    max_renderbuffer_size: i32,
    max_samples: i32,
    is_es: bool,
    depth24_supported: bool,
}

impl RenderbufferManager {
    pub fn new(
        gl: Rc<dyn GlApi>,
        memory_tracker: Option<Rc<dyn MemoryTracker>>,
        features: &FeatureInfo,
    ) -> Self {
        Self {
            shared: Rc::new(ManagerShared {
                gl,
                memory_tracker: MemoryTypeTracker::new(memory_tracker),
                have_context: Cell::new(true),
                renderbuffer_count: Cell::new(0),
                num_uncleared_renderbuffers: Cell::new(0),
            }),
            renderbuffers: HashMap::new(),
            max_renderbuffer_size: features.max_renderbuffer_size,
            max_samples: features.max_samples,
            is_es: features.is_es,
            depth24_supported: features.oes_depth24,
        }
    }

    pub fn max_renderbuffer_size(&self) -> i32 {
        self.max_renderbuffer_size
    }

    pub fn max_samples(&self) -> i32 {
        self.max_samples
    }

    /// Live renderbuffers, including deleted ones still held outside the registry
    pub fn renderbuffer_count(&self) -> u32 {
        self.shared.renderbuffer_count.get()
    }

    pub fn num_uncleared_renderbuffers(&self) -> u32 {
        self.shared.num_uncleared_renderbuffers.get()
    }

    pub fn have_uncleared_renderbuffers(&self) -> bool {
        self.num_uncleared_renderbuffers() != 0
    }

    /// Bytes currently accounted for by this manager's renderbuffers
    pub fn mem_represented(&self) -> u64 {
        self.shared.memory_tracker.mem_represented()
    }

    /// Register a renderbuffer the driver created as `service_id`
    ///
    /// `client_id` must not already be registered.
    pub fn create_renderbuffer(&mut self, client_id: u32, service_id: u32) -> Rc<Renderbuffer> {
        let renderbuffer = Rc::new(Renderbuffer::new(
            self.shared.clone(),
            client_id,
            service_id,
        ));
        self.shared.start_tracking(&renderbuffer);

        let previous = self.renderbuffers.insert(client_id, renderbuffer.clone());
        debug_assert!(
            previous.is_none(),
            "renderbuffer {} created twice",
            client_id
        );

        log::debug!(
            "created renderbuffer {} (service id {})",
            client_id,
            service_id
        );

        renderbuffer
    }

    pub fn get_renderbuffer(&self, client_id: u32) -> Option<&Rc<Renderbuffer>> {
        self.renderbuffers.get(&client_id)
    }

    /// Find the client id registered for a driver renderbuffer
    pub fn get_client_id(&self, service_id: u32) -> Option<u32> {
        self.renderbuffers
            .values()
            .find(|rb| rb.service_id == service_id)
            .map(|rb| rb.client_id)
    }

    /// Drop the registry's handle and mark the renderbuffer deleted
    ///
    /// The driver object goes away once every other handle has been dropped too.
    pub fn remove_renderbuffer(&mut self, client_id: u32) {
        if let Some(renderbuffer) = self.renderbuffers.remove(&client_id) {
            renderbuffer.deleted.set(true);
            log::debug!("removed renderbuffer {}", client_id);
        }
    }

    /// Record new storage for `renderbuffer`, leaving its contents undefined
    pub fn set_info(
        &self,
        renderbuffer: &Renderbuffer,
        samples: i32,
        internal_format: u32,
        width: i32,
        height: i32,
    ) {
        self.assert_owned(renderbuffer);

        if !renderbuffer.cleared() {
            decrement(&self.shared.num_uncleared_renderbuffers);
        }

        self.shared
            .memory_tracker
            .track_mem_free(renderbuffer.estimated_size() as u64);

        let estimated_size = self
            .compute_estimated_renderbuffer_size(width, height, samples, internal_format)
            .unwrap_or(0);

        renderbuffer.storage.set(Storage {
            samples,
            internal_format,
            size: Vector2::new(width, height),
            estimated_size,
        });
        renderbuffer.cleared.set(false);

        self.shared
            .memory_tracker
            .track_mem_alloc(estimated_size as u64);

        if !renderbuffer.cleared() {
            increment(&self.shared.num_uncleared_renderbuffers);
        }

        log::debug!(
            "renderbuffer {}: {}x{} {} with {} samples, {}",
            renderbuffer.client_id,
            width,
            height,
            crate::util::get_string_enum(internal_format),
            samples,
            ByteSize(estimated_size as u64)
        );
    }

    pub fn set_cleared(&self, renderbuffer: &Renderbuffer, cleared: bool) {
        self.assert_owned(renderbuffer);

        if !renderbuffer.cleared() {
            decrement(&self.shared.num_uncleared_renderbuffers);
        }

        renderbuffer.cleared.set(cleared);

        if !renderbuffer.cleared() {
            increment(&self.shared.num_uncleared_renderbuffers);
        }
    }

    /// Record that the client bound `renderbuffer`
    pub fn mark_as_valid(&self, renderbuffer: &Renderbuffer) {
        self.assert_owned(renderbuffer);
        renderbuffer.has_been_bound.set(true);
    }

    /// Bytes needed for a renderbuffer, `None` on overflow or negative dimensions
    pub fn compute_estimated_renderbuffer_size(
        &self,
        width: i32,
        height: i32,
        samples: i32,
        internal_format: u32,
    ) -> Option<u32> {
        let width = u32::try_from(width).ok()?;
        let height = u32::try_from(height).ok()?;
        let samples = samples.max(1) as u32;

        let pixels = safe_multiply_uint32(width, height)?;
        let samples = safe_multiply_uint32(pixels, samples)?;

        let impl_format = self.internal_renderbuffer_format_to_impl_format(internal_format);
        safe_multiply_uint32(samples, renderbuffer_bytes_per_pixel(impl_format))
    }

    /// Format the driver actually allocates for `format`
    ///
    /// Desktop drivers lack the packed GLES formats, which map to their unsized equivalents. GLES
    /// drivers get 16-bit depth upgraded to 24-bit when they support it.
    pub fn internal_renderbuffer_format_to_impl_format(&self, format: u32) -> u32 {
        if !self.is_es {
            match format {
                gl::DEPTH_COMPONENT16 => gl::DEPTH_COMPONENT,
                gl::RGBA4 | gl::RGB5_A1 => gl::RGBA,
                gl::RGB565 => gl::RGB,
                _ => format,
            }
        } else if format == gl::DEPTH_COMPONENT16 && self.depth24_supported {
            gl::DEPTH_COMPONENT24_OES
        } else {
            format
        }
    }

    /// Release every registered renderbuffer
    ///
    /// Without a context, driver objects are abandoned instead of deleted. This applies to
    /// renderbuffers held elsewhere as well, whenever they are finally dropped.
    pub fn destroy(&mut self, have_context: bool) {
        self.shared.have_context.set(have_context);

        log::debug!(
            "destroying {} renderbuffers (context {})",
            self.renderbuffers.len(),
            if have_context { "alive" } else { "lost" }
        );

        self.renderbuffers.clear();
    }

    fn assert_owned(&self, renderbuffer: &Renderbuffer) {
        debug_assert!(
            Rc::ptr_eq(&self.shared, &renderbuffer.shared),
            "renderbuffer {} belongs to another manager",
            renderbuffer.client_id
        );
    }
}

impl Drop for RenderbufferManager {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            debug_assert!(
                self.renderbuffers.is_empty(),
                "renderbuffer manager dropped without destroy()"
            );
            debug_assert_eq!(
                self.renderbuffer_count(),
                0,
                "renderbuffers outlived their manager"
            );
        }
    }
}
