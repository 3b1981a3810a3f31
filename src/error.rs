//! Barrier solver error types.

/// Errors that can occur while resolving resource transitions.
///
/// Precondition violations (illegal layout/access pairs, stage mask misuse,
/// layouts altered behind the solver's back) are programmer errors and are
/// reported through `debug_assert!`, not through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarrierError {
    /// The first declared use of a discardable-content texture requested a
    /// read access. The texture's contents are undefined at that point, so
    /// the read cannot be satisfied; the caller almost certainly meant to
    /// mark the texture as content-preserving.
    ReadOfUndefinedContent(String),
}

impl std::fmt::Display for BarrierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadOfUndefinedContent(name) => write!(
                f,
                "transitioning texture {name} from Undefined to a read-only layout; \
                 perhaps it should not have discardable content"
            ),
        }
    }
}

impl std::error::Error for BarrierError {}
