//! Transition descriptors and the caller-owned transition log.

use crate::layout::{ResourceAccess, ResourceLayout, StageMask};
use crate::resource::ResourceId;

/// A single resource state change the caller must turn into a barrier.
///
/// Descriptors are facts, not commands: the solver never executes anything.
/// The caller translates each descriptor into a backend-specific barrier and
/// inserts it at the point in the command stream where the corresponding
/// `resolve` call was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceTransition {
    /// The resource changing state.
    pub resource: ResourceId,
    /// Layout before the transition. `Undefined` for buffers and for the
    /// first use of a discardable texture.
    pub old_layout: ResourceLayout,
    /// Layout after the transition. `Undefined` for buffers.
    pub new_layout: ResourceLayout,
    /// Access mode before the transition.
    pub old_access: ResourceAccess,
    /// Access mode after the transition.
    pub new_access: ResourceAccess,
    /// Stages that consumed the resource in its old state.
    pub old_stage_mask: StageMask,
    /// Stages that will consume the resource in its new state.
    pub new_stage_mask: StageMask,
}

/// Ordered, append-only log of transitions produced by one resolution pass.
///
/// Constructed and owned by the caller; the solver only appends. Descriptors
/// appear in exactly the order the `resolve` calls were made.
#[derive(Debug, Default, Clone)]
pub struct TransitionList {
    transitions: Vec<ResourceTransition>,
}

impl TransitionList {
    /// Create an empty transition log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transition. Solver-internal; the log is append-only for
    /// everyone.
    pub(crate) fn push(&mut self, transition: ResourceTransition) {
        self.transitions.push(transition);
    }

    /// All transitions recorded so far, in call order.
    pub fn transitions(&self) -> &[ResourceTransition] {
        &self.transitions
    }

    /// Iterate over recorded transitions in call order.
    pub fn iter(&self) -> std::slice::Iter<'_, ResourceTransition> {
        self.transitions.iter()
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether no transition has been recorded.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Drop all recorded transitions, e.g. after the caller consumed them.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}

impl<'a> IntoIterator for &'a TransitionList {
    type Item = &'a ResourceTransition;
    type IntoIter = std::slice::Iter<'a, ResourceTransition>;

    fn into_iter(self) -> Self::IntoIter {
        self.transitions.iter()
    }
}

static_assertions::assert_impl_all!(ResourceTransition: Send, Sync, Copy);
static_assertions::assert_impl_all!(TransitionList: Send, Sync);
