// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Hand-written recursive descent parser for script templates.
//!
//! Turns template source text into the parse artifact ([`lockscript_ast::Script`]) or a
//! [`ParseFailure`] carrying the alphabetized list of token descriptions that
//! would have been valid at the failure point, plus the 1-based line/column
//! of the offending input. The failure shape is exactly what the compiler's
//! diagnostics formatter consumes.

mod line_map;
mod parser;
mod stream;

pub use parser::{parse_script, ParseFailure};
