// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::Realm;
use crate::{
    ecmascript::{
        builtins::error::{Error, ErrorHeapData},
        types::{String, Value},
    },
    heap::{CreateHeapData, GcStats, Heap, heap_gc},
};

#[derive(Debug, Default, Clone, Copy)]
pub struct Options {
    /// Turns [`Agent::gc`] into a no-op.
    pub disable_gc: bool,
    /// Passes every constructed instance through `make_safe` before
    /// `construct` returns it.
    pub shadow_on_construct: bool,
}

pub type JsResult<T> = std::result::Result<T, JsError>;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct JsError(pub(crate) Value);

impl JsError {
    pub(crate) fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(self) -> Value {
        self.0
    }

    /// The kind of the thrown error, if an error record was thrown.
    pub fn kind(self, agent: &Agent) -> Option<ExceptionType> {
        match self.0 {
            Value::Error(error) => Some(error.kind(agent)),
            _ => None,
        }
    }

    /// The message of the thrown error, if an error record was thrown.
    pub fn message(self, agent: &Agent) -> Option<&str> {
        match self.0 {
            Value::Error(error) => Some(error.message(agent)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionType {
    Error,
    RangeError,
    ReferenceError,
    SyntaxError,
    TypeError,
}

/// ### [9.7 Agents](https://tc39.es/ecma262/#sec-agents)
///
/// The agent owns the heap and a single realm. There is no execution context
/// stack: every operation runs to completion on the caller's thread.
#[derive(Debug)]
pub struct Agent {
    pub(crate) heap: Heap,
    pub(crate) options: Options,
    realm: Realm,
}

impl Agent {
    pub fn new(options: Options) -> Self {
        let mut heap = Heap::new();
        let realm = Realm::create(&mut heap);
        Self {
            heap,
            options,
            realm,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn current_realm(&self) -> &Realm {
        &self.realm
    }

    /// Number of shadow nodes that are still pending.
    pub fn pending_shadow_nodes(&self) -> usize {
        self.heap.shadow_registry.len()
    }

    /// ### [5.2.3.2 Throw an Exception](https://tc39.es/ecma262/#sec-throw-an-exception)
    pub fn throw_exception(&mut self, kind: ExceptionType, message: &'static str) -> JsError {
        let message = String::from_str(self, message);
        let error: Error = self.heap.create(ErrorHeapData::new(kind, message));
        JsError::new(Value::Error(error))
    }

    /// Collects every heap slot not reachable from `roots` or the realm
    /// intrinsics. Handles to collected slots must not be used afterwards.
    pub fn gc(&mut self, roots: &[Value]) -> GcStats {
        if self.options.disable_gc {
            return GcStats::default();
        }
        heap_gc(self, roots)
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thrown_errors_carry_kind_and_message() {
        let mut agent = Agent::default();
        let error = agent.throw_exception(ExceptionType::TypeError, "Cannot do that");
        assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError));
        assert_eq!(error.message(&agent), Some("Cannot do that"));
        assert!(matches!(error.value(), Value::Error(_)));
    }

    #[test]
    fn disabled_gc_collects_nothing() {
        let mut agent = Agent::new(Options {
            disable_gc: true,
            ..Default::default()
        });
        agent.throw_exception(ExceptionType::Error, "garbage");
        assert_eq!(agent.gc(&[]), GcStats::default());
    }
}
