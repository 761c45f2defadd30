// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Reference virtual machine and reduction engine for lockscript.
//!
//! This crate supplies the collaborators the compiler core treats as opaque:
//!
//! - bytecode encodings (script numbers, minimal data pushes)
//! - HASH160 / HASH256 digests
//! - the standard opcode identifier table
//! - [`InstructionSetVm`], the capability the compiler threads through to
//!   the reducer, plus [`StackVm`], a small reference implementation
//! - [`reduce_script`], which folds a resolved script into final bytecode
//!
//! The reference VM implements only the opcodes that are useful inside
//! `$( ... )` evaluations (pushes, stack shuffling, equality, digests). It is
//! not a consensus validator.

pub mod encoding;
pub mod hash;
pub mod opcodes;
pub mod reduce;
pub mod vm;

pub use encoding::{encode_data_push, encode_script_number};
pub use hash::{hash160, hash256, ripemd160, sha256};
pub use opcodes::standard_opcode_table;
pub use reduce::{reduce_script, ReducedNode, ReductionResult};
pub use vm::{Evaluation, InstructionSetVm, ProgramState, StackVm, StateConstructor, VmError};
