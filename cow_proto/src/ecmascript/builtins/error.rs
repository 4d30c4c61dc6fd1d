// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::ops::Index;

use crate::{
    ecmascript::{
        execution::{Agent, ExceptionType},
        types::{String, Value},
    },
    heap::{CreateHeapData, Heap, HeapMarkAndSweep, WorkQueues, indexes::ErrorIndex},
};

#[derive(Debug, Clone)]
pub struct ErrorHeapData {
    pub(crate) kind: ExceptionType,
    pub(crate) message: String,
}

impl ErrorHeapData {
    pub(crate) fn new(kind: ExceptionType, message: String) -> Self {
        Self { kind, message }
    }
}

/// A thrown error record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Error(pub(crate) ErrorIndex);

impl Error {
    pub(crate) const fn get_index(self) -> usize {
        self.0.into_index()
    }

    pub fn kind(self, agent: &Agent) -> ExceptionType {
        agent[self].kind
    }

    pub fn message(self, agent: &Agent) -> &str {
        agent[self].message.as_str(agent)
    }
}

impl From<Error> for Value {
    fn from(value: Error) -> Self {
        Value::Error(value)
    }
}

impl Index<Error> for Agent {
    type Output = ErrorHeapData;

    fn index(&self, index: Error) -> &Self::Output {
        &self.heap.errors[index]
    }
}

impl Index<Error> for Vec<Option<ErrorHeapData>> {
    type Output = ErrorHeapData;

    fn index(&self, index: Error) -> &Self::Output {
        self.get(index.get_index())
            .expect("Error out of bounds")
            .as_ref()
            .expect("Error slot empty")
    }
}

impl CreateHeapData<ErrorHeapData, Error> for Heap {
    fn create(&mut self, data: ErrorHeapData) -> Error {
        self.errors.push(Some(data));
        Error(ErrorIndex::last(&self.errors))
    }
}

impl HeapMarkAndSweep for Error {
    fn mark_values(&self, queues: &mut WorkQueues) {
        queues.errors.push(*self);
    }
}

impl HeapMarkAndSweep for ErrorHeapData {
    fn mark_values(&self, _: &mut WorkQueues) {
        // Error messages are interned strings, which are never collected.
    }
}
