// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # cow_proto
//!
//! A small ECMAScript-style object model whose prototype objects can be
//! shadowed copy-on-write. Instances passed through
//! [`make_safe`](ecmascript::builtins::shadow::make_safe) read structural
//! data of participating prototypes through lazily created shallow copies,
//! and only commit those copies onto the instance when a write happens.

pub mod ecmascript;
pub mod heap;

pub use heap::Heap;
