//! Shared mock collaborators for barrier solver integration tests.
//!
//! The solver sees resources only through the `TrackedResource` /
//! `TrackedTexture` traits; these mocks stand in for the engine's real
//! texture and buffer types. A mock texture owns its layout the way a real
//! resource does, and tests update it when they "execute" the transitions
//! the solver emitted.

use std::sync::{Arc, Mutex};

use barrier_solver::{ResourceId, ResourceLayout, TrackedResource, TrackedTexture};

/// Initialize logging for a test run. Safe to call repeatedly.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A texture-like resource with an externally owned layout.
pub struct MockTexture {
    id: ResourceId,
    name: String,
    discardable: bool,
    layout: Mutex<ResourceLayout>,
}

impl MockTexture {
    /// A content-preserving texture currently in `layout`.
    pub fn new(id: u64, name: &str, layout: ResourceLayout) -> Arc<Self> {
        Arc::new(Self {
            id: ResourceId::from_raw(id),
            name: name.to_string(),
            discardable: false,
            layout: Mutex::new(layout),
        })
    }

    /// A discardable-content texture; its layout starts undefined.
    pub fn discardable(id: u64, name: &str) -> Arc<Self> {
        Arc::new(Self {
            id: ResourceId::from_raw(id),
            name: name.to_string(),
            discardable: true,
            layout: Mutex::new(ResourceLayout::Undefined),
        })
    }

    /// Simulate barrier execution: the resource records its new layout.
    pub fn set_layout(&self, layout: ResourceLayout) {
        *self.layout.lock().unwrap() = layout;
    }

    /// The trait-object handle the solver operates on.
    pub fn handle(this: &Arc<Self>) -> Arc<dyn TrackedTexture> {
        Arc::clone(this) as Arc<dyn TrackedTexture>
    }
}

impl TrackedResource for MockTexture {
    fn resource_id(&self) -> ResourceId {
        self.id
    }

    fn debug_name(&self) -> String {
        self.name.clone()
    }
}

impl TrackedTexture for MockTexture {
    fn is_discardable_content(&self) -> bool {
        self.discardable
    }

    fn current_layout(&self) -> ResourceLayout {
        *self.layout.lock().unwrap()
    }
}

/// A buffer-like resource; no layout, just an identity.
pub struct MockBuffer {
    id: ResourceId,
}

impl MockBuffer {
    pub fn new(id: u64) -> Self {
        Self {
            id: ResourceId::from_raw(id),
        }
    }
}

impl TrackedResource for MockBuffer {
    fn resource_id(&self) -> ResourceId {
        self.id
    }
}
