//! Protocol transforms: locktime-type enforcement and P2SH assembly.
//!
//! Both P2SH transforms are expressed as more compilation: a synthetic
//! one-off script over a fresh environment that shares the VM and opcode
//! table but nothing else, compiled through the ordinary dependency
//! resolver.

use crate::environment::{
    CompilationData, Environment, LockingScriptType, TimeLockType, LOCKTIME_THRESHOLD,
};
use crate::pipeline::compile_script_raw;
use crate::result::{environment_failure, CompilationResult, CompilationSuccess, Transform};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Hash the locking bytecode and compare: the P2SH locking pattern.
const P2SH_LOCKING_SOURCE: &str = "OP_HASH160 <$(<lockingBytecode> OP_HASH160)> OP_EQUAL";
const P2SH_LOCKING_ID: &str = "p2shLocking";

/// Unlocking bytecode followed by the revealed locking script.
const P2SH_UNLOCKING_SOURCE: &str = "unlockingBytecode <lockingBytecode>";
const P2SH_UNLOCKING_ID: &str = "p2shUnlocking";

/// Reject locktime values incompatible with the script's declared locktime
/// type. Runs before any compilation work; a mismatch is the most
/// protocol-relevant error and is reported first.
///
/// Scripts with no declared requirement, and calls that supply no locktime,
/// are not checked.
pub(crate) fn check_time_lock(
    script_id: &str,
    data: &CompilationData,
    environment: &Environment,
) -> Option<CompilationResult> {
    let required = environment
        .unlocking_script_time_lock_types
        .get(script_id)?;
    let locktime = data.operation_data.as_ref()?.locktime?;
    let message = match required {
        TimeLockType::Height if locktime >= LOCKTIME_THRESHOLD => format!(
            "the script '{script_id}' requires a height-based locktime, but the provided \
             locktime ({locktime}) is a timestamp (>= {LOCKTIME_THRESHOLD})"
        ),
        TimeLockType::Timestamp if locktime < LOCKTIME_THRESHOLD => format!(
            "the script '{script_id}' requires a timestamp-based locktime, but the provided \
             locktime ({locktime}) is a block height (< {LOCKTIME_THRESHOLD})"
        ),
        _ => return None,
    };
    Some(environment_failure(message))
}

/// Apply whichever P2SH transform the script's classification calls for.
///
/// On a wrapping failure, that failure is surfaced (superseding the raw
/// success), including the case where the paired locking script compiled
/// but the final unlocking assembly did not.
pub(crate) fn apply_protocol_transforms(
    script_id: &str,
    raw: CompilationResult,
    data: &CompilationData,
    environment: &Environment,
) -> CompilationResult {
    let CompilationResult::Success(success) = raw else {
        return raw;
    };

    if environment.locking_script_types.get(script_id) == Some(&LockingScriptType::P2sh) {
        debug!(script = script_id, "applying p2sh locking wrap");
        return match compile_p2sh_locking(&success.bytecode, environment) {
            CompilationResult::Success(wrapped) => {
                CompilationResult::Success(CompilationSuccess {
                    bytecode: wrapped.bytecode,
                    transformed: Some(Transform::P2shLocking),
                    ..success
                })
            }
            failure => failure,
        };
    }

    if let Some(locking_id) = environment.unlocking_scripts.get(script_id) {
        if environment.locking_script_types.get(locking_id) == Some(&LockingScriptType::P2sh) {
            debug!(
                script = script_id,
                locking = locking_id.as_str(),
                "assembling p2sh unlocking script"
            );
            // the revealed script must be the raw (unwrapped) locking bytecode
            let locking = compile_script_raw(locking_id, data, environment);
            let CompilationResult::Success(locking_success) = locking else {
                return locking;
            };
            return match compile_p2sh_unlocking(
                &success.bytecode,
                &locking_success.bytecode,
                environment,
            ) {
                CompilationResult::Success(assembled) => {
                    CompilationResult::Success(CompilationSuccess {
                        bytecode: assembled.bytecode,
                        transformed: Some(Transform::P2shUnlocking),
                        ..success
                    })
                }
                failure => failure,
            };
        }
    }

    CompilationResult::Success(success)
}

/// Compile the synthetic P2SH locking wrapper around `locking_bytecode`.
fn compile_p2sh_locking(locking_bytecode: &[u8], environment: &Environment) -> CompilationResult {
    let mut bindings = HashMap::new();
    bindings.insert("lockingBytecode".to_string(), locking_bytecode.to_vec());
    compile_synthetic(
        P2SH_LOCKING_ID,
        P2SH_LOCKING_SOURCE,
        bindings,
        environment,
    )
}

/// Compile the synthetic P2SH unlocking assembly.
fn compile_p2sh_unlocking(
    unlocking_bytecode: &[u8],
    locking_bytecode: &[u8],
    environment: &Environment,
) -> CompilationResult {
    let mut bindings = HashMap::new();
    bindings.insert(
        "unlockingBytecode".to_string(),
        unlocking_bytecode.to_vec(),
    );
    bindings.insert("lockingBytecode".to_string(), locking_bytecode.to_vec());
    compile_synthetic(
        P2SH_UNLOCKING_ID,
        P2SH_UNLOCKING_SOURCE,
        bindings,
        environment,
    )
}

/// Compile a one-off script in a fresh environment that shares only the VM
/// and opcode table with the caller's. Classification maps are empty (no
/// transform can recurse into itself) and the ancestry chain starts fresh.
fn compile_synthetic(
    script_id: &str,
    source: &str,
    bindings: HashMap<String, Vec<u8>>,
    environment: &Environment,
) -> CompilationResult {
    let mut scripts = IndexMap::new();
    scripts.insert(script_id.to_string(), source.to_string());
    let synthetic_environment = Environment {
        scripts: Arc::new(scripts),
        opcodes: Arc::clone(&environment.opcodes),
        vm: environment.vm.clone(),
        create_state: environment.create_state,
        locking_script_types: Arc::new(HashMap::new()),
        unlocking_scripts: Arc::new(HashMap::new()),
        unlocking_script_time_lock_types: Arc::new(HashMap::new()),
        ancestry: Vec::new(),
    };
    let data = CompilationData {
        bytecode: bindings,
        operation_data: None,
    };
    compile_script_raw(script_id, &data, &synthetic_environment)
}
