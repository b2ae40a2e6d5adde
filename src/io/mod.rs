// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - lexing, dispatching, and importing

mod importer;
pub mod lexer;
pub mod parser;

pub use importer::import_rwx_file;
pub use lexer::{lines, Cursor, Line};
pub use parser::{lookup_keyword, parse_line, parse_rwx, ParsedLine};
