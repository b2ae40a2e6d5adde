// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Directive model and the interpreter that executes it
//!
//! Lines dispatched by [`crate::io::parser`] become [`Directive`] values, which
//! an [`Interpreter`] session applies to its scope state, face assembler and
//! proto registry.

mod directive;
mod interpreter;
mod proto;
mod scope;

pub use directive::{Directive, Keyword, TransformOp};
pub use interpreter::Interpreter;
pub use proto::ProtoRegistry;
pub use scope::ScopeState;
