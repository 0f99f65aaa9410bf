//! Cross-cutting instrumentation for cache operations.
//!
//! Two independent decorators, each wrapping an [`Operation`] without
//! changing its signature: [`CountCalls`] bumps a persistent invocation
//! counter, [`RecordHistory`] appends per-call inputs and outputs to
//! ordered logs. Both keep their state in the same external store the
//! wrapped operation uses, keyed by a statically declared [`OpIdentity`].
//!
//! Composition is by nesting and order-sensitive. The reference chain puts
//! counting outermost, so a call is counted exactly once whether or not it
//! is also logged:
//!
//! ```text
//! CountCalls -> RecordHistory -> operation
//! ```

use std::sync::Arc;

use tracekv_kv::KVStore;

use crate::error::CacheError;

/// Identity of a tracked operation: the owning component's name plus the
/// operation's name, declared statically rather than derived at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpIdentity {
    pub component: &'static str,
    pub operation: &'static str,
}

impl OpIdentity {
    pub const fn new(component: &'static str, operation: &'static str) -> Self {
        Self {
            component,
            operation,
        }
    }

    /// Dotted name, e.g. `"Cache.store"`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.component, self.operation)
    }

    /// Store key of the invocation counter. Same as the qualified name.
    pub fn counter_key(&self) -> String {
        self.qualified_name()
    }

    /// Store key of the inputs log, e.g. `"Cache.store:inputs"`.
    pub fn inputs_key(&self) -> String {
        format!("{}:inputs", self.qualified_name())
    }

    /// Store key of the outputs log, e.g. `"Cache.store:outputs"`.
    pub fn outputs_key(&self) -> String {
        format!("{}:outputs", self.qualified_name())
    }
}

/// An invocable operation; the unit the decorators wrap.
pub trait Operation: Send + Sync {
    type Input;
    type Output;

    fn invoke(&self, input: Self::Input) -> Result<Self::Output, CacheError>;
}

/// Stable string form of an operation input or output, as recorded in the
/// history logs.
pub trait Recorded {
    fn record(&self) -> String;
}

impl Recorded for String {
    fn record(&self) -> String {
        self.clone()
    }
}

/// Decorator that atomically increments the identity's counter key before
/// delegating. The increment is visible to any reader the moment `invoke`
/// returns, and happens even when the inner operation fails.
pub struct CountCalls<O> {
    identity: OpIdentity,
    store: Arc<dyn KVStore>,
    inner: O,
}

impl<O> CountCalls<O> {
    pub fn new(identity: OpIdentity, store: Arc<dyn KVStore>, inner: O) -> Self {
        Self {
            identity,
            store,
            inner,
        }
    }
}

impl<O: Operation> Operation for CountCalls<O> {
    type Input = O::Input;
    type Output = O::Output;

    fn invoke(&self, input: Self::Input) -> Result<Self::Output, CacheError> {
        self.store.incr(&self.identity.counter_key())?;
        self.inner.invoke(input)
    }
}

/// Decorator that appends the input record to the identity's inputs log,
/// delegates, then appends the output record to the outputs log.
///
/// When the inner operation fails the output append never happens, so the
/// two logs can end up with unequal lengths; readers pair entries
/// positionally up to the shorter log (see [`crate::replay::history`]).
pub struct RecordHistory<O> {
    identity: OpIdentity,
    store: Arc<dyn KVStore>,
    inner: O,
}

impl<O> RecordHistory<O> {
    pub fn new(identity: OpIdentity, store: Arc<dyn KVStore>, inner: O) -> Self {
        Self {
            identity,
            store,
            inner,
        }
    }
}

impl<O: Operation> Operation for RecordHistory<O>
where
    O::Input: Recorded,
    O::Output: Recorded,
{
    type Input = O::Input;
    type Output = O::Output;

    fn invoke(&self, input: Self::Input) -> Result<Self::Output, CacheError> {
        self.store
            .rpush(&self.identity.inputs_key(), input.record().as_bytes())?;
        let output = self.inner.invoke(input)?;
        self.store
            .rpush(&self.identity.outputs_key(), output.record().as_bytes())?;
        Ok(output)
    }
}
