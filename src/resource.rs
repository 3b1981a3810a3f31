//! Tracked resource identity and per-resource status.
//!
//! The solver never owns GPU resources. It sees them through the
//! [`TrackedResource`] / [`TrackedTexture`] traits and keys all of its
//! bookkeeping on the opaque [`ResourceId`] handle, never on an address, so
//! a stale map entry can never dangle into freed resource memory.

use std::collections::HashMap;

use crate::layout::{ResourceAccess, ResourceLayout, StageMask};

/// Opaque stable identity of a tracked resource.
///
/// Equality and hashing follow the handle value. The owner of the resource
/// decides how handles are allocated; the solver only requires that a handle
/// is unique per live resource and stable for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(u64);

impl ResourceId {
    /// Create an id from a raw handle value.
    pub fn from_raw(handle: u64) -> Self {
        Self(handle)
    }

    /// Get the raw handle value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ResourceId {
    fn from(handle: u64) -> Self {
        Self(handle)
    }
}

/// A GPU-visible resource the solver can track.
///
/// Implemented by buffer-like resources directly; textures implement the
/// [`TrackedTexture`] extension.
pub trait TrackedResource: Send + Sync {
    /// Stable identity of this resource.
    fn resource_id(&self) -> ResourceId;

    /// Human-readable name, used in diagnostics only.
    fn debug_name(&self) -> String {
        format!("resource #{}", self.resource_id().raw())
    }
}

/// A texture-like resource with a layout of its own.
///
/// The current layout is owned and mutated by the resource (or its backend)
/// outside this crate; the solver only queries it. The tracked layout and
/// the resource's own layout must stay in agreement, divergence means the
/// texture was transitioned behind the solver's back.
pub trait TrackedTexture: TrackedResource {
    /// Whether the texture's prior contents need not survive a transition
    /// out of the undefined state.
    fn is_discardable_content(&self) -> bool;

    /// The layout the texture itself believes it is in.
    fn current_layout(&self) -> ResourceLayout;
}

/// Last known state of a tracked resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceStatus {
    /// Layout the resource was left in. Always `Undefined` for buffers.
    pub layout: ResourceLayout,
    /// Access mode of the last declared use.
    pub access: ResourceAccess,
    /// Accumulated stages consuming the resource since the last barrier.
    pub stage_mask: StageMask,
}

impl ResourceStatus {
    /// Create a status from its parts.
    pub fn new(layout: ResourceLayout, access: ResourceAccess, stage_mask: StageMask) -> Self {
        Self {
            layout,
            access,
            stage_mask,
        }
    }
}

/// Status of every resource declared within the current tracking epoch.
pub type ResourceStatusMap = HashMap<ResourceId, ResourceStatus>;

static_assertions::assert_impl_all!(ResourceId: Send, Sync, Copy);
static_assertions::assert_impl_all!(ResourceStatus: Send, Sync, Copy);
static_assertions::assert_obj_safe!(TrackedResource, TrackedTexture);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_id_roundtrip() {
        let id = ResourceId::from_raw(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(ResourceId::from(42u64), id);
        assert_ne!(ResourceId::from_raw(43), id);
    }

    #[test]
    fn test_default_status_is_undefined() {
        let status = ResourceStatus::default();
        assert_eq!(status.layout, ResourceLayout::Undefined);
        assert_eq!(status.access, ResourceAccess::Undefined);
        assert!(status.stage_mask.is_empty());
    }

    #[test]
    fn test_default_debug_name_uses_handle() {
        struct Plain(ResourceId);
        impl TrackedResource for Plain {
            fn resource_id(&self) -> ResourceId {
                self.0
            }
        }

        let res = Plain(ResourceId::from_raw(7));
        assert_eq!(res.debug_name(), "resource #7");
    }
}
