// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt::Display;

use crate::ecmascript::{
    execution::Agent,
    types::{String, Value},
};

/// ### [6.1.7 The Object Type](https://tc39.es/ecma262/#sec-object-type)
///
/// A property key is either an array index or a String. Array index strings
/// are always normalised into the `Integer` variant, so equal keys are equal
/// handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Integer(u32),
    String(String),
}

/// Returns the array index named by `str` if it is in canonical numeric form.
fn parse_array_index(str: &str) -> Option<u32> {
    if str.is_empty()
        || (str.len() > 1 && str.starts_with('0'))
        || !str.bytes().all(|byte| byte.is_ascii_digit())
    {
        return None;
    }
    let index = str.parse::<u32>().ok()?;
    // 2^32 - 1 is not an array index.
    (index != u32::MAX).then_some(index)
}

impl PropertyKey {
    pub fn from_str(agent: &mut Agent, str: &str) -> Self {
        if let Some(index) = parse_array_index(str) {
            PropertyKey::Integer(index)
        } else {
            PropertyKey::String(String::from_str(agent, str))
        }
    }

    pub fn is_array_index(self) -> bool {
        matches!(self, PropertyKey::Integer(index) if index != u32::MAX)
    }

    pub fn into_value(self) -> Value {
        match self {
            PropertyKey::Integer(index) => Value::from(index),
            PropertyKey::String(string) => Value::String(string),
        }
    }

    pub fn as_display(self, agent: &Agent) -> DisplayablePropertyKey<'_> {
        DisplayablePropertyKey { key: self, agent }
    }
}

impl From<u32> for PropertyKey {
    fn from(value: u32) -> Self {
        PropertyKey::Integer(value)
    }
}

pub struct DisplayablePropertyKey<'a> {
    key: PropertyKey,
    agent: &'a Agent,
}

impl Display for DisplayablePropertyKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.key {
            PropertyKey::Integer(index) => index.fmt(f),
            PropertyKey::String(string) => string.as_str(self.agent).fmt(f),
        }
    }
}
