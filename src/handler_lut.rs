//! Generic key→handler table with uniqueness checks and uniform error
//! codes.
//!
//! [`NeighbourSetLut`](crate::neighbour_lut::NeighbourSetLut) and
//! [`InboundFilterLut`](crate::filter_lut::InboundFilterLut) are both thin
//! specializations over this one generic table, layered on a shared base
//! rather than duplicating lookup logic per concern.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::error::{LutSignal, TrackerError};

/// What a registered handler may report back to [`HandlerLut::query`].
///
/// Handlers are ordinary closures, not a foreign-language callable that
/// might "return nothing"; the nil/no-return cases  describes are
/// modeled as the explicit [`HandlerOutcome::HookFail`] variant so a
/// handler can still misbehave without Rust's type system ruling it out
/// entirely. A handler may also legitimately panic to signal a
/// precondition violation ("Handlers may raise; such raises
/// propagate") — ordinary Rust unwinding handles that case without any
/// help from this type.
pub enum HandlerOutcome<O> {
    /// The handler produced a result.
    Found(O),
    /// The handler explicitly declined: "not mine" (composable `ENODATA`).
    NoData,
    /// The handler produced nothing and claimed no explicit reason (a bug
    /// in the handler, reported as `EHOOKFAIL`).
    HookFail,
}

type Handler<I, O> = Box<dyn Fn(&I) -> HandlerOutcome<O>>;

/// A key→handler table. `K` is the handler key (e.g. a cell name), `I` is
/// the data passed to `query` and handed to the matched handler, `O` is
/// the handler's result type.
pub struct HandlerLut<K, I, O> {
    label: &'static str,
    getkey: Box<dyn Fn(&I) -> K>,
    handlers: HashMap<K, Handler<I, O>>,
}

impl<K, I, O> fmt::Debug for HandlerLut<K, I, O>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerLut")
            .field("label", &self.label)
            .field("keys", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<K, I, O> HandlerLut<K, I, O>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Construct an empty table. `label` is used in error messages and
    /// diagnostics only.
    pub fn new(label: &'static str, getkey: impl Fn(&I) -> K + 'static) -> Self {
        Self {
            label,
            getkey: Box::new(getkey),
            handlers: HashMap::new(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Register a handler under `key`.
    ///
    /// # Errors
    /// Returns [`TrackerError::ErrDuplicate`] if `key` is already bound
    /// ("fails with `ERR_DUPLICATE` when `key` already
    /// bound").
    pub fn register(
        &mut self,
        key: K,
        handler: impl Fn(&I) -> HandlerOutcome<O> + 'static,
    ) -> Result<(), TrackerError> {
        if self.handlers.contains_key(&key) {
            return Err(TrackerError::ErrDuplicate {
                table: self.label,
                key: format!("{key:?}"),
            });
        }
        self.handlers.insert(key, Box::new(handler));
        Ok(())
    }

    /// True if a handler is registered for `key`.
    pub fn has_handler(&self, key: &K) -> bool {
        self.handlers.contains_key(key)
    }

    /// Query the table for `data`, dispatching to the handler bound to
    /// `getkey(data)`.
    ///
    /// Dispatch semantics:
    /// - no handler for the derived key → `Err(LutSignal::NoData)`.
    /// - handler reports [`HandlerOutcome::NoData`] → propagated as
    ///   `Err(LutSignal::NoData)` (the composability signal).
    /// - handler reports [`HandlerOutcome::HookFail`] → logged and
    ///   returned as `Err(LutSignal::HookFail)`.
    /// - otherwise → `Ok(result)`.
    pub fn query(&self, data: &I) -> Result<O, LutSignal> {
        let key = (self.getkey)(data);
        match self.handlers.get(&key) {
            None => Err(LutSignal::NoData),
            Some(handler) => match handler(data) {
                HandlerOutcome::Found(result) => Ok(result),
                HandlerOutcome::NoData => Err(LutSignal::NoData),
                HandlerOutcome::HookFail => {
                    tracing::warn!(table = self.label, key = ?key, "handler returned no data and no explicit reason (EHOOKFAIL)");
                    Err(LutSignal::HookFail)
                }
            },
        }
    }
}

#[cfg(test)]
#[path = "unit_tests/handler_lut.rs"]
mod tests;
