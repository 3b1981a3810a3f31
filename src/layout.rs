//! Resource layouts, access modes and pipeline stage masks.
//!
//! These types describe how a GPU resource is about to be used. The
//! [`BarrierSolver`] compares a declared usage against the last known state
//! of the resource to decide whether a barrier is required.
//!
//! The (layout, access) and (layout, stage mask) legality rules live here as
//! exhaustive matches so the contract stays auditable and directly testable.
//!
//! [`BarrierSolver`]: crate::BarrierSolver

use bitflags::bitflags;

use crate::resource::TrackedTexture;

/// Logical GPU-visible state of a resource.
///
/// Layouts apply to textures; buffers have no layout concept and are tracked
/// with the [`Undefined`](Self::Undefined) sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceLayout {
    /// Unknown or irrelevant state. Also the buffer sentinel.
    #[default]
    Undefined,
    /// Sampled in a shader (texture read).
    Texture,
    /// Written as a render target.
    RenderTarget,
    /// Bound as render target but read-only (e.g. depth compare).
    RenderTargetReadOnly,
    /// Cleared outside a render pass.
    Clear,
    /// Read/write storage (unordered access).
    Uav,
    /// Source of a copy operation. Transient: valid only while the copy
    /// facility owns the resource.
    CopySrc,
    /// Destination of a copy operation. Transient, like `CopySrc`.
    CopyDst,
    /// Marker layout a texture is forced into when leaving the copy scope.
    CopyEnd,
    /// Read/write during mipmap generation.
    MipmapGen,
    /// Ready for presentation to the swapchain.
    PresentReady,
}

impl ResourceLayout {
    /// The access mode this layout mandates, if it mandates one.
    ///
    /// Layouts not listed here may be combined with any non-`Undefined`
    /// access.
    pub fn required_access(self) -> Option<ResourceAccess> {
        match self {
            Self::Texture => Some(ResourceAccess::Read),
            Self::RenderTargetReadOnly => Some(ResourceAccess::Read),
            Self::CopySrc => Some(ResourceAccess::Read),
            Self::CopyDst => Some(ResourceAccess::Write),
            Self::MipmapGen => Some(ResourceAccess::ReadWrite),
            Self::Undefined
            | Self::RenderTarget
            | Self::Clear
            | Self::Uav
            | Self::CopyEnd
            | Self::PresentReady => None,
        }
    }

    /// Whether a declared usage in this layout carries a stage mask.
    ///
    /// Only shader-visible layouts do; for every other layout the stage mask
    /// must be empty.
    pub fn uses_stage_mask(self) -> bool {
        matches!(self, Self::Texture | Self::Uav)
    }

    /// Whether this is one of the scope-limited copy layouts that must not
    /// survive past the copy facility's scope.
    pub fn is_copy_transient(self) -> bool {
        matches!(self, Self::CopySrc | Self::CopyDst)
    }

    /// Check that `access` is legal for this layout.
    pub fn accepts_access(self, access: ResourceAccess) -> bool {
        match self.required_access() {
            Some(required) => access == required,
            None => true,
        }
    }
}

/// Coarse read/write intent of a declared resource usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceAccess {
    /// No known access; only valid as the "previous" side of a first use.
    #[default]
    Undefined,
    /// Read-only access.
    Read,
    /// Write-only access.
    Write,
    /// Combined read and write access.
    ReadWrite,
}

impl ResourceAccess {
    /// Human-readable name, for diagnostics only.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "Undefined",
            Self::Read => "Read",
            Self::Write => "Write",
            Self::ReadWrite => "ReadWrite",
        }
    }
}

impl std::fmt::Display for ResourceAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Pipeline stages that will consume or produce a resource in its new
    /// state.
    ///
    /// Meaningful only for the [`ResourceLayout::Texture`] and
    /// [`ResourceLayout::Uav`] layouts; empty everywhere else.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StageMask: u8 {
        /// Vertex shader stage.
        const VERTEX = 1 << 0;
        /// Hull (tessellation control) shader stage.
        const HULL = 1 << 1;
        /// Domain (tessellation evaluation) shader stage.
        const DOMAIN = 1 << 2;
        /// Geometry shader stage.
        const GEOMETRY = 1 << 3;
        /// Pixel (fragment) shader stage.
        const PIXEL = 1 << 4;
        /// Compute shader stage.
        const COMPUTE = 1 << 5;
    }
}

impl Default for StageMask {
    fn default() -> Self {
        Self::empty()
    }
}

/// Backend rule deciding when two layout values are interchangeable for
/// barrier purposes.
///
/// A graphics backend may treat several distinct [`ResourceLayout`] values as
/// the same hardware state (e.g. an API without a read-only render target
/// layout). The solver consults this rule both to decide whether a barrier
/// is needed and to verify that a texture was not transitioned behind its
/// back.
pub trait LayoutSemantics: Send + Sync {
    /// Whether `tracked` and `requested` are the same layout for `texture`
    /// as far as barriers are concerned.
    fn is_same_layout(
        &self,
        tracked: ResourceLayout,
        requested: ResourceLayout,
        texture: &dyn TrackedTexture,
    ) -> bool;
}

/// Strictest possible rule: layouts are interchangeable only when identical.
///
/// Used as the default when no backend-specific rule is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactLayoutSemantics;

impl LayoutSemantics for ExactLayoutSemantics {
    fn is_same_layout(
        &self,
        tracked: ResourceLayout,
        requested: ResourceLayout,
        _texture: &dyn TrackedTexture,
    ) -> bool {
        tracked == requested
    }
}

static_assertions::assert_obj_safe!(LayoutSemantics);
