//! Barrier resolution over declared resource usages.
//!
//! [`BarrierSolver`] is the orchestrating piece of the crate: callers declare,
//! in command order, how each resource is about to be used, and the solver
//! decides whether the hardware needs a barrier first. When it does, a
//! [`ResourceTransition`] is appended to the caller's [`TransitionList`]; the
//! caller translates it into a backend barrier at the matching point in the
//! command stream. The solver itself never executes anything.
//!
//! One solver instance belongs to exactly one compilation thread.
//! Multi-threaded graph compilation uses one solver per thread and reconciles
//! the resulting state afterwards through [`BarrierSolver::assume_transitions`].

use std::sync::Arc;

use crate::error::BarrierError;
use crate::layout::{
    ExactLayoutSemantics, LayoutSemantics, ResourceAccess, ResourceLayout, StageMask,
};
use crate::resource::{ResourceStatus, ResourceStatusMap, TrackedResource, TrackedTexture};
use crate::transition::{ResourceTransition, TransitionList};

/// Tracks per-resource state and resolves the minimal barriers between
/// declared usages.
///
/// The solver's entire persistent state is the status table (last known
/// layout/access/stages per resource) plus a small registry of textures
/// currently sitting in a transient copy layout. Both are scoped to a
/// tracking epoch and cleared by [`reset`](Self::reset).
pub struct BarrierSolver {
    /// Last known state of every resource declared this epoch.
    resource_status: ResourceStatusMap,
    /// Textures transitioned into `CopySrc`/`CopyDst` and not yet forced
    /// out. Deduplicated only against the last entry; duplicates are
    /// harmless.
    copy_state_textures: Vec<Arc<dyn TrackedTexture>>,
    /// Backend rule for layout interchangeability.
    layout_semantics: Arc<dyn LayoutSemantics>,
}

impl BarrierSolver {
    /// Create a solver using the given backend layout-equivalence rule.
    pub fn new(layout_semantics: Arc<dyn LayoutSemantics>) -> Self {
        Self {
            resource_status: ResourceStatusMap::new(),
            copy_state_textures: Vec::new(),
            layout_semantics,
        }
    }

    /// Read-only view of the status table.
    ///
    /// Useful for diagnostics and for building the externally merged table
    /// passed to [`assume_transitions`](Self::assume_transitions).
    pub fn resource_status(&self) -> &ResourceStatusMap {
        &self.resource_status
    }

    /// Declare the next use of a texture and resolve the barrier for it.
    ///
    /// Appends at most one transition to `transitions` and updates the
    /// status table to `{new_layout, access, stage_mask}`. When no barrier
    /// is needed, `stage_mask` is OR-merged into the tracked mask instead,
    /// accumulating consumers without re-barriering.
    ///
    /// Preconditions (programmer errors, checked in debug builds):
    /// `new_layout` and `access` must not be `Undefined`, `stage_mask` must
    /// be non-empty exactly for the `Texture`/`Uav` layouts, and the
    /// (layout, access) pair must be legal per
    /// [`ResourceLayout::accepts_access`].
    ///
    /// # Errors
    ///
    /// [`BarrierError::ReadOfUndefinedContent`] when the first declared use
    /// of a discardable-content texture requests a read; nothing is mutated
    /// in that case.
    pub fn resolve_texture(
        &mut self,
        transitions: &mut TransitionList,
        texture: &Arc<dyn TrackedTexture>,
        new_layout: ResourceLayout,
        access: ResourceAccess,
        stage_mask: StageMask,
    ) -> Result<(), BarrierError> {
        debug_assert!(
            new_layout != ResourceLayout::Undefined,
            "cannot resolve to an Undefined layout"
        );
        debug_assert!(
            access != ResourceAccess::Undefined,
            "cannot resolve to an Undefined access"
        );
        debug_assert!(
            new_layout.uses_stage_mask() || stage_mask.is_empty(),
            "stage mask must be empty when the layout is not Texture or Uav"
        );
        debug_assert!(
            !new_layout.uses_stage_mask() || !stage_mask.is_empty(),
            "stage mask cannot be empty when the layout is Texture or Uav"
        );
        debug_assert!(
            new_layout.accepts_access(access),
            "invalid layout-access pair: {new_layout:?} with {}",
            access.as_str()
        );

        let id = texture.resource_id();
        let first_use = !self.resource_status.contains_key(&id);

        // The single recoverable error: reading a texture whose contents are
        // undefined on first use. Checked up front so a failed call leaves
        // no observable mutation behind.
        if first_use && texture.is_discardable_content() && access == ResourceAccess::Read {
            return Err(BarrierError::ReadOfUndefinedContent(texture.debug_name()));
        }

        if new_layout.is_copy_transient() {
            // Textures must leave copy layouts before the copy scope closes;
            // remember them. Dedup only against the last entry, duplicates
            // further back are harmless.
            let already_last = self
                .copy_state_textures
                .last()
                .is_some_and(|last| last.resource_id() == id);
            if !already_last {
                self.copy_state_textures.push(Arc::clone(texture));
            }
        }

        match self.resource_status.get_mut(&id) {
            None => {
                let old_layout = if texture.is_discardable_content() {
                    ResourceLayout::Undefined
                } else {
                    texture.current_layout()
                };

                self.resource_status
                    .insert(id, ResourceStatus::new(new_layout, access, stage_mask));

                let transition = ResourceTransition {
                    resource: id,
                    old_layout,
                    new_layout,
                    old_access: ResourceAccess::Undefined,
                    new_access: access,
                    old_stage_mask: StageMask::empty(),
                    new_stage_mask: stage_mask,
                };
                log::trace!(
                    "first use of {}: {:?} -> {:?} ({})",
                    texture.debug_name(),
                    old_layout,
                    new_layout,
                    access
                );
                transitions.push(transition);
            }
            Some(status) => {
                debug_assert!(
                    self.layout_semantics.is_same_layout(
                        status.layout,
                        texture.current_layout(),
                        texture.as_ref()
                    ),
                    "layout of {} was altered outside the barrier solver",
                    texture.debug_name()
                );

                // A barrier is needed on any real layout change, and for Uav
                // usage whenever a write hazard is involved even without one.
                let needs_barrier = !self.layout_semantics.is_same_layout(
                    status.layout,
                    new_layout,
                    texture.as_ref(),
                ) || (new_layout == ResourceLayout::Uav
                    && (access != ResourceAccess::Read
                        || status.access != ResourceAccess::Read));

                if needs_barrier {
                    let transition = ResourceTransition {
                        resource: id,
                        old_layout: status.layout,
                        new_layout,
                        old_access: status.access,
                        new_access: access,
                        old_stage_mask: status.stage_mask,
                        new_stage_mask: stage_mask,
                    };
                    log::trace!(
                        "barrier for {}: {:?} ({}) -> {:?} ({})",
                        texture.debug_name(),
                        transition.old_layout,
                        transition.old_access,
                        transition.new_layout,
                        transition.new_access
                    );
                    transitions.push(transition);

                    // The barrier consumed the accumulated stages.
                    status.stage_mask = StageMask::empty();
                }

                status.layout = new_layout;
                status.access = access;
                status.stage_mask |= stage_mask;
            }
        }

        Ok(())
    }

    /// Declare the next use of a buffer and resolve the barrier for it.
    ///
    /// Buffers have no layout; a barrier is needed unless both the previous
    /// and the requested access are reads. The first declared use of a
    /// buffer emits nothing, there is no prior state to wait for.
    pub fn resolve_buffer(
        &mut self,
        transitions: &mut TransitionList,
        buffer: &dyn TrackedResource,
        access: ResourceAccess,
        stage_mask: StageMask,
    ) {
        debug_assert!(
            access != ResourceAccess::Undefined,
            "cannot resolve to an Undefined access"
        );

        let id = buffer.resource_id();
        match self.resource_status.get_mut(&id) {
            None => {
                self.resource_status.insert(
                    id,
                    ResourceStatus::new(ResourceLayout::Undefined, access, stage_mask),
                );
            }
            Some(status) => {
                // Read-after-Read is the only hazard-free pair.
                if access != ResourceAccess::Read || status.access != ResourceAccess::Read {
                    let transition = ResourceTransition {
                        resource: id,
                        old_layout: ResourceLayout::Undefined,
                        new_layout: ResourceLayout::Undefined,
                        old_access: status.access,
                        new_access: access,
                        old_stage_mask: status.stage_mask,
                        new_stage_mask: stage_mask,
                    };
                    log::trace!(
                        "barrier for {}: {} -> {}",
                        buffer.debug_name(),
                        transition.old_access,
                        transition.new_access
                    );
                    transitions.push(transition);

                    status.stage_mask = StageMask::empty();
                }

                status.access = access;
                status.stage_mask |= stage_mask;
            }
        }
    }

    /// Overwrite (or insert) a texture's tracked state without emitting a
    /// transition.
    ///
    /// Used when a transition was performed through a mechanism outside this
    /// solver and the status table simply has to be told the result. The
    /// (layout, access) pair must be legal, as for
    /// [`resolve_texture`](Self::resolve_texture).
    pub fn assume_transition(
        &mut self,
        texture: &dyn TrackedTexture,
        new_layout: ResourceLayout,
        access: ResourceAccess,
        stage_mask: StageMask,
    ) {
        debug_assert!(
            new_layout.accepts_access(access),
            "invalid layout-access pair: {new_layout:?} with {}",
            access.as_str()
        );

        self.resource_status.insert(
            texture.resource_id(),
            ResourceStatus::new(new_layout, access, stage_mask),
        );
    }

    /// Merge an externally built status table into this solver's own.
    ///
    /// Used to import state recorded by an independently tracked operation
    /// sequence (e.g. another compilation thread's solver). On key collision
    /// the solver's existing entry wins and the incoming one is discarded.
    pub fn assume_transitions(&mut self, external: &ResourceStatusMap) {
        for (id, status) in external {
            self.resource_status.entry(*id).or_insert(*status);
        }
    }

    /// Force every texture still sitting in a transient copy layout out of
    /// it, then clear the registry.
    ///
    /// `CopySrc`/`CopyDst` are valid only while the copy facility owns the
    /// resource; each texture still in one of them (per its own reported
    /// layout) is resolved to `CopyEnd` with read access and an empty stage
    /// mask, appending the corresponding transitions to `transitions`.
    /// Unrelated status table entries are untouched.
    pub fn reset_copy_layouts_only(
        &mut self,
        transitions: &mut TransitionList,
    ) -> Result<(), BarrierError> {
        let textures = std::mem::take(&mut self.copy_state_textures);
        if !textures.is_empty() {
            log::debug!(
                "closing copy scope: {} texture(s) to check",
                textures.len()
            );
        }

        for texture in &textures {
            // The caller may already have moved it out through other means.
            if texture.current_layout().is_copy_transient() {
                self.resolve_texture(
                    transitions,
                    texture,
                    ResourceLayout::CopyEnd,
                    ResourceAccess::Read,
                    StageMask::empty(),
                )?;
            }
        }

        Ok(())
    }

    /// End the tracking epoch: close the copy scope, then forget every
    /// resource.
    ///
    /// After this call every resource is "unseen" again and its next
    /// declared use behaves as a first use.
    pub fn reset(&mut self, transitions: &mut TransitionList) -> Result<(), BarrierError> {
        self.reset_copy_layouts_only(transitions)?;

        log::debug!(
            "epoch reset: dropping {} tracked resource(s)",
            self.resource_status.len()
        );
        self.resource_status.clear();
        Ok(())
    }
}

impl Default for BarrierSolver {
    fn default() -> Self {
        Self::new(Arc::new(ExactLayoutSemantics))
    }
}

impl std::fmt::Debug for BarrierSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BarrierSolver")
            .field("tracked_resources", &self.resource_status.len())
            .field("copy_state_textures", &self.copy_state_textures.len())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(BarrierSolver: Send, Sync);
