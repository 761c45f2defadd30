// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Compilation orchestration for lockscript templates.
//!
//! Drives a named script template through the staged pipeline
//! (parse → resolve → reduce), resolves cross-script dependencies with
//! cycle detection, and applies the protocol transforms (P2SH assembly,
//! locktime-type enforcement) required for consensus-valid bytecode.
//!
//! # Entry points
//!
//! - [`compile_script`] — the recommended entry: locktime gate, dependency
//!   resolution, protocol transforms
//! - [`compile_script_raw`] — dependency resolution only, no transforms
//!   (tooling that inspects bytecode before wrapping)
//! - [`compile_script_text`] — one script body, no identifier lookup
//!
//! All three return [`CompilationResult`]; callers must branch on the
//! variant and never assume bytecode is present.

mod describe;
mod environment;
mod pipeline;
mod result;
mod transforms;

pub use describe::describe_expected;
pub use environment::{
    CompilationData, Environment, LockingScriptType, OperationData, TimeLockType,
    LOCKTIME_THRESHOLD,
};
pub use pipeline::{compile_script_raw, compile_script_text};
pub use result::{
    CompilationFailure, CompilationResult, CompilationSuccess, StageKind, Transform,
};

use transforms::{apply_protocol_transforms, check_time_lock};

/// Compile the script with the given identifier, applying protocol
/// transforms.
///
/// Ordering: the locktime-type gate runs first (it needs no compilation
/// work and is the most protocol-relevant error), then the dependency
/// resolver, then the transform layer. Each step short-circuits on failure.
pub fn compile_script(
    script_id: &str,
    data: &CompilationData,
    environment: &Environment,
) -> CompilationResult {
    if let Some(failure) = check_time_lock(script_id, data, environment) {
        return failure;
    }
    let raw = compile_script_raw(script_id, data, environment);
    apply_protocol_transforms(script_id, raw, data, environment)
}
