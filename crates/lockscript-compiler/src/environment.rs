//! Compilation environment and per-call compilation data.

use indexmap::IndexMap;
use lockscript_vm::{InstructionSetVm, StateConstructor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// The first locktime value interpreted as a timestamp rather than a block
/// height.
pub const LOCKTIME_THRESHOLD: u32 = 500_000_000;

/// Classification of a locking script.
///
/// Most scripts carry no classification; absence of an entry in
/// [`Environment::locking_script_types`] is the default, no-transform case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockingScriptType {
    /// Emitted as compiled.
    Standard,
    /// Wrapped in the pay-to-script-hash pattern after compilation.
    P2sh,
}

/// Which locktime values a script accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeLockType {
    /// Block-height locktime: values below [`LOCKTIME_THRESHOLD`].
    Height,
    /// Timestamp locktime: values at or above [`LOCKTIME_THRESHOLD`].
    Timestamp,
}

/// Transaction-level values available to resolution and the transform layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationData {
    pub locktime: Option<u32>,
}

/// Variable bindings and operation data for one top-level compile call.
///
/// Passed unchanged through every recursive sub-compilation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompilationData {
    /// Variable name to bytecode value bindings.
    pub bytecode: HashMap<String, Vec<u8>>,
    pub operation_data: Option<OperationData>,
}

/// The compilation environment: script sources, classification maps, and the
/// virtual-machine capability.
///
/// Conceptually immutable. The shared tables sit behind `Arc`, so extending
/// the ancestry chain clones cheaply and two compilations over the same
/// script table can never interfere. The ancestry chain is the only field
/// whose value differs between recursive calls.
#[derive(Clone, Default)]
pub struct Environment {
    /// Script identifier to template source text.
    pub scripts: Arc<IndexMap<String, String>>,
    /// Opcode identifier to bytecode.
    pub opcodes: Arc<HashMap<String, Vec<u8>>>,
    /// Virtual machine for `$( ... )` evaluations; `None` for pure-data
    /// compilations.
    pub vm: Option<Arc<dyn InstructionSetVm>>,
    /// Constructor for the program state evaluations start from.
    pub create_state: Option<StateConstructor>,
    /// Locking script classifications (sparse).
    pub locking_script_types: Arc<HashMap<String, LockingScriptType>>,
    /// Unlocking script id to the locking script id it spends.
    pub unlocking_scripts: Arc<HashMap<String, String>>,
    /// Locktime type requirements per unlocking script (sparse).
    pub unlocking_script_time_lock_types: Arc<HashMap<String, TimeLockType>>,
    /// Script identifiers currently being compiled in this call tree, in
    /// call order. Used only for circular-dependency detection.
    pub ancestry: Vec<String>,
}

impl Environment {
    /// A new environment value whose ancestry chain ends in `script_id`.
    pub fn extend_ancestry(&self, script_id: &str) -> Environment {
        let mut extended = self.clone();
        extended.ancestry.push(script_id.to_string());
        extended
    }
}
