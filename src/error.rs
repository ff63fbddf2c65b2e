//! Error taxonomy for `vxconnect`.
//!
//! Two families are distinguished, matching the split the spec draws
//! between "reported to the direct caller" and "flows through the LUT
//! pipeline as data":
//!
//! - [`TrackerError`] aborts the enclosing public operation and leaves
//!   tracker state unchanged (precondition violations).
//! - [`LutSignal`] is the `ENODATA`/`EHOOKFAIL` pair that flows through
//!   [`crate::handler_lut::HandlerLut::query`] and is converted to "skip
//!   this candidate" by the voxel successor rather than aborting anything.
//!
//! Partition-inconsistency conditions (foreign graph encountered, hash
//! missing from graph, repair on an empty group, non-empty frontier
//! remainder after a bounded repair) are not represented as errors at all:
//! they are logged via `tracing::warn!` at the point they're detected and
//! the operation proceeds best-effort.

use thiserror::Error;

/// Errors that abort the enclosing public operation.
///
/// Raising one of these leaves tracker state unchanged: public entry
/// points are atomic with respect to this error family.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// A position was supplied with non-integer coordinates.
    #[error("non-integer coordinate: {0}")]
    NonIntegerCoordinate(String),

    /// `HandlerLut::register` was called with a key that is already bound.
    #[error("duplicate handler registration for key {key:?} in {table}")]
    ErrDuplicate {
        /// Display label of the LUT the registration was attempted on.
        table: &'static str,
        /// Debug-formatted key that was already bound.
        key: String,
    },

    /// A registration argument that should have been callable was not.
    #[error("expected a function handler for key {key:?} in {table}, got none")]
    ErrArgsExpectedTFunc {
        /// Display label of the LUT the registration was attempted on.
        table: &'static str,
        /// Debug-formatted key the (non-)handler was registered for.
        key: String,
    },

    /// A vertex-space/group-space operation observed a mutation to graph
    /// state while a BFM run was still in flight, violating the
    /// assumption that the successor function is pure for the duration
    /// of a single run.
    #[error("graph state mutated while a BFM run was in flight")]
    MutatedDuringBfm,
}

/// Crate-level result alias for operations that can raise [`TrackerError`].
pub type Result<T> = std::result::Result<T, TrackerError>;

/// The composable signal threaded through [`crate::handler_lut::HandlerLut`].
///
/// `NoData` is the "ENODATA" of : either no handler was registered
/// for the key, or a handler explicitly reported "not mine". `HookFail` is
/// "EHOOKFAIL": a handler returned nothing and claimed no explicit reason,
/// which is a bug in the handler rather than a normal absence of data.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LutSignal {
    /// No handler for this key, or a handler composably declined.
    #[error("ENODATA")]
    NoData,
    /// A handler returned nothing with no explicit reason (logged as a bug).
    #[error("EHOOKFAIL")]
    HookFail,
}

/// Result alias for [`crate::handler_lut::HandlerLut::query`] and friends.
pub type LutResult<T> = std::result::Result<T, LutSignal>;

#[cfg(test)]
#[path = "unit_tests/error.rs"]
mod tests;
