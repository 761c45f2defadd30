//! The tagged compilation outcome.

use lockscript_ast::{CompileError, ResolvedScript, Script};
use lockscript_vm::ReductionResult;

/// Which pipeline stage an error belongs to.
///
/// Environment-level failures (unknown script id, circular dependency,
/// locktime mismatch) are tagged `Parse` with a zero range, since they are
/// detected before any true parsing happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Parse,
    Resolve,
    Reduce,
}

/// Which protocol transform produced the final bytecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    P2shLocking,
    P2shUnlocking,
}

/// Outcome of one compilation.
///
/// A sum type rather than an exception: recursive internal callers and hosts
/// alike branch on the variant, and a failure can never claim bytecode.
#[derive(Debug, Clone, PartialEq)]
pub enum CompilationResult {
    Success(CompilationSuccess),
    Failure(CompilationFailure),
}

/// Successful compilation: final bytecode plus all stage artifacts.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationSuccess {
    pub bytecode: Vec<u8>,
    pub parse: Script,
    pub resolve: ResolvedScript,
    pub reduce: ReductionResult,
    /// Set when a protocol transform replaced the raw bytecode.
    pub transformed: Option<Transform>,
}

/// Failed compilation: the failing stage, every error from that stage, and
/// whichever artifacts earlier stages had already produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationFailure {
    pub error_type: StageKind,
    /// Always non-empty.
    pub errors: Vec<CompileError>,
    pub parse: Option<Script>,
    pub resolve: Option<ResolvedScript>,
    pub reduce: Option<ReductionResult>,
}

impl CompilationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CompilationResult::Success(_))
    }

    /// The compiled bytecode, if this result is a success.
    pub fn bytecode(&self) -> Option<&[u8]> {
        match self {
            CompilationResult::Success(success) => Some(&success.bytecode),
            CompilationResult::Failure(_) => None,
        }
    }
}

/// A failure detected before (or without) parsing: unknown script id,
/// circular dependency, or locktime-type mismatch.
pub(crate) fn environment_failure(message: String) -> CompilationResult {
    CompilationResult::Failure(CompilationFailure {
        error_type: StageKind::Parse,
        errors: vec![CompileError::unlocated(message)],
        parse: None,
        resolve: None,
        reduce: None,
    })
}
