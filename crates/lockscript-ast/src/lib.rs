// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Syntax tree and diagnostic types for the lockscript compiler.
//!
//! This crate is the leaf of the workspace: every other crate builds on the
//! node and error types defined here.
//!
//! # Design
//!
//! - [`Range`] — line/column source location, 1-based; the all-zero range
//!   marks errors that have no source position (environment-level failures)
//! - [`AstNode`] — parse artifact nodes, produced by `lockscript-parser`
//! - [`ResolvedNode`] — resolution artifact nodes; resolution errors are
//!   embedded per node rather than aborting the walk

pub mod ast;
pub mod error;
pub mod range;
pub mod resolved;

pub use ast::{AstNode, AstNodeKind, Script};
pub use error::CompileError;
pub use range::Range;
pub use resolved::{ResolvedNode, ResolvedScript, ResolvedValue};
