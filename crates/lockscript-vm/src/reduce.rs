//! Reduction: fold a resolved script into final bytecode.

use crate::encoding::encode_data_push;
use crate::vm::{InstructionSetVm, ProgramState, StateConstructor};
use lockscript_ast::{CompileError, Range, ResolvedScript, ResolvedValue};

/// Reduction artifact.
///
/// Exactly one of `bytecode` (non-erroneous) or `errors` is meaningful: when
/// `errors` is non-empty, `bytecode` is left empty and must not be used.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReductionResult {
    pub bytecode: Vec<u8>,
    pub errors: Vec<CompileError>,
    /// Per-node reduction trace, preserved for debugging.
    pub source: Vec<ReducedNode>,
}

/// The bytecode contributed by one resolved node, with the VM state trace
/// for evaluation nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducedNode {
    pub range: Range,
    pub bytecode: Vec<u8>,
    pub trace: Option<Vec<ProgramState>>,
}

/// Reduce a resolved script against the supplied virtual machine.
///
/// Push nodes wrap their reduced contents in a minimal data push; evaluation
/// nodes execute theirs on a fresh program state and are replaced by the top
/// stack item of the final state. A missing VM, a VM error, or an empty
/// final stack each produce a located error. All errors across the tree are
/// collected before returning.
pub fn reduce_script(
    script: &ResolvedScript,
    vm: Option<&dyn InstructionSetVm>,
    create_state: Option<StateConstructor>,
) -> ReductionResult {
    let mut result = ReductionResult::default();
    for node in script {
        match &node.value {
            ResolvedValue::Bytecode(bytes) => {
                result.bytecode.extend_from_slice(bytes);
                result.source.push(ReducedNode {
                    range: node.range,
                    bytecode: bytes.clone(),
                    trace: None,
                });
            }
            ResolvedValue::Error(message) => {
                result
                    .errors
                    .push(CompileError::new(message.clone(), node.range));
            }
            ResolvedValue::Push(inner) => {
                let reduced = reduce_script(inner, vm, create_state);
                if reduced.errors.is_empty() {
                    let encoded = encode_data_push(&reduced.bytecode);
                    result.bytecode.extend_from_slice(&encoded);
                    result.source.push(ReducedNode {
                        range: node.range,
                        bytecode: encoded,
                        trace: None,
                    });
                } else {
                    result.errors.extend(reduced.errors);
                }
            }
            ResolvedValue::Evaluation(inner) => {
                let reduced = reduce_script(inner, vm, create_state);
                if !reduced.errors.is_empty() {
                    result.errors.extend(reduced.errors);
                    continue;
                }
                let (Some(vm), Some(create_state)) = (vm, create_state) else {
                    result.errors.push(CompileError::new(
                        "evaluations are not supported by this compilation environment \
                         (no virtual machine was provided)",
                        node.range,
                    ));
                    continue;
                };
                let evaluation = vm.evaluate(&reduced.bytecode, create_state());
                if let Some(error) = &evaluation.state.error {
                    result.errors.push(CompileError::new(
                        format!("evaluation failed: {error}"),
                        node.range,
                    ));
                    continue;
                }
                let Some(top) = evaluation.state.stack.last() else {
                    result.errors.push(CompileError::new(
                        "evaluation completed with an empty stack; nothing to splice",
                        node.range,
                    ));
                    continue;
                };
                result.bytecode.extend_from_slice(top);
                result.source.push(ReducedNode {
                    range: node.range,
                    bytecode: top.clone(),
                    trace: Some(evaluation.trace),
                });
            }
        }
    }
    if !result.errors.is_empty() {
        result.bytecode.clear();
    }
    result
}
