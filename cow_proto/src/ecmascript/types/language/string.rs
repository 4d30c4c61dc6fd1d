// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::ops::Index;

use super::Value;
use crate::{ecmascript::execution::Agent, heap::indexes::StringIndex};

#[derive(Debug, Clone)]
pub struct StringHeapData {
    pub(crate) data: Box<str>,
}

/// ### [6.1.4 The String Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-string-type)
///
/// Strings are interned: two strings with equal contents are always the same
/// handle, so comparing handles compares contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct String(pub(crate) StringIndex);

impl String {
    pub fn from_str(agent: &mut Agent, str: &str) -> Self {
        agent.heap.intern_string(str)
    }

    pub fn as_str(self, agent: &Agent) -> &str {
        &agent[self].data
    }

    pub fn len(self, agent: &Agent) -> usize {
        agent[self].data.len()
    }

    pub fn is_empty(self, agent: &Agent) -> bool {
        agent[self].data.is_empty()
    }

    pub(crate) const fn get_index(self) -> usize {
        self.0.into_index()
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl TryFrom<Value> for String {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(string) => Ok(string),
            _ => Err(()),
        }
    }
}

impl Index<String> for Agent {
    type Output = StringHeapData;

    fn index(&self, index: String) -> &Self::Output {
        &self.heap.strings[index]
    }
}

impl Index<String> for Vec<Option<StringHeapData>> {
    type Output = StringHeapData;

    fn index(&self, index: String) -> &Self::Output {
        self.get(index.get_index())
            .expect("String out of bounds")
            .as_ref()
            .expect("String slot empty")
    }
}
