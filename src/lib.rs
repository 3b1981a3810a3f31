//! # barrier-solver
//!
//! Resource state tracking and minimal barrier resolution for render graph
//! compilation.
//!
//! Given a stream of "I am about to use resource R as (layout, access,
//! stages)" declarations, [`BarrierSolver`] decides per declaration whether
//! the hardware needs an explicit barrier before the new usage is safe, and
//! when it does, appends a [`ResourceTransition`] describing the state change
//! to a caller-owned [`TransitionList`]. The crate is pure bookkeeping: it
//! never talks to a graphics API, never allocates resources, and never
//! reorders or batches anything. Decisions are strictly online, one
//! declaration at a time, in call order.
//!
//! ## Overview
//!
//! - [`BarrierSolver`] - per-resource state table and the resolve / assume /
//!   reset operations
//! - [`ResourceLayout`], [`ResourceAccess`], [`StageMask`] - how a use is
//!   declared
//! - [`TrackedResource`] / [`TrackedTexture`] - the seam to the caller's
//!   resource types
//! - [`LayoutSemantics`] - the backend's layout-interchangeability rule
//!
//! ## Example
//!
//! ```ignore
//! let mut solver = BarrierSolver::default();
//! let mut transitions = TransitionList::new();
//!
//! // Declare uses in command order; translate each appended transition
//! // into a backend barrier at the matching point in the command stream.
//! solver.resolve_texture(&mut transitions, &color, ResourceLayout::RenderTarget,
//!     ResourceAccess::Write, StageMask::empty())?;
//! solver.resolve_texture(&mut transitions, &color, ResourceLayout::Texture,
//!     ResourceAccess::Read, StageMask::PIXEL)?;
//!
//! // End of frame: nothing may stay in a transient copy layout, and the
//! // next epoch starts from a clean table.
//! solver.reset(&mut transitions)?;
//! ```

pub mod error;
pub mod layout;
pub mod resource;
pub mod solver;
pub mod transition;

// Re-export the public surface for convenience
pub use error::BarrierError;
pub use layout::{ExactLayoutSemantics, LayoutSemantics, ResourceAccess, ResourceLayout, StageMask};
pub use resource::{ResourceId, ResourceStatus, ResourceStatusMap, TrackedResource, TrackedTexture};
pub use solver::BarrierSolver;
pub use transition::{ResourceTransition, TransitionList};
