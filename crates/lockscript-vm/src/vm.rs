//! The evaluation capability and a small reference implementation.

use crate::encoding::encode_script_number;
use crate::hash::{hash160, hash256, ripemd160, sha256};
use crate::opcodes;
use thiserror::Error;

/// Errors raised while executing bytecode on the reference VM.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    #[error("unknown opcode 0x{opcode:02x} at offset {offset}")]
    UnknownOpcode { opcode: u8, offset: usize },
    #[error("push at offset {offset} extends past the end of the bytecode")]
    TruncatedPush { offset: usize },
    #[error("{opcode} requires {required} stack item(s) but only {depth} present")]
    StackUnderflow {
        opcode: &'static str,
        required: usize,
        depth: usize,
    },
    #[error("OP_VERIFY failed: top stack item is falsy")]
    FailedVerify,
}

/// Execution state of a program: the operand stack, and the first error hit.
///
/// Once `error` is set, execution stops and the state is returned as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgramState {
    pub stack: Vec<Vec<u8>>,
    pub error: Option<VmError>,
}

impl ProgramState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Constructor for the state an evaluation starts from.
pub type StateConstructor = fn() -> ProgramState;

/// Outcome of evaluating bytecode: the final state plus the per-instruction
/// state trace kept for debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub state: ProgramState,
    pub trace: Vec<ProgramState>,
}

/// The virtual-machine capability the compiler threads through untouched.
///
/// The compiler core never inspects an implementation beyond handing it to
/// the reducer, so hosts may substitute a full consensus VM.
pub trait InstructionSetVm {
    fn evaluate(&self, bytecode: &[u8], state: ProgramState) -> Evaluation;
}

/// Reference stack VM.
///
/// Executes data pushes, small-integer pushes, basic stack shuffling,
/// equality, and the digest opcodes. Everything else is an execution error;
/// opcodes a script merely emits (without `$(...)`) never reach the VM.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackVm;

impl StackVm {
    pub fn new() -> Self {
        Self
    }

    fn step(&self, bytecode: &[u8], offset: usize, state: &mut ProgramState) -> Option<usize> {
        let opcode = bytecode[offset];
        match opcode {
            opcodes::OP_0 => {
                state.stack.push(Vec::new());
                Some(offset + 1)
            }
            1..=75 => self.push_bytes(bytecode, offset, 1, opcode as usize, state),
            opcodes::OP_PUSHDATA1 => {
                let Some(&len) = bytecode.get(offset + 1) else {
                    state.error = Some(VmError::TruncatedPush { offset });
                    return None;
                };
                self.push_bytes(bytecode, offset, 2, len as usize, state)
            }
            opcodes::OP_PUSHDATA2 => {
                let Some(bytes) = bytecode.get(offset + 1..offset + 3) else {
                    state.error = Some(VmError::TruncatedPush { offset });
                    return None;
                };
                let len = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
                self.push_bytes(bytecode, offset, 3, len, state)
            }
            opcodes::OP_PUSHDATA4 => {
                let Some(bytes) = bytecode.get(offset + 1..offset + 5) else {
                    state.error = Some(VmError::TruncatedPush { offset });
                    return None;
                };
                let len = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
                self.push_bytes(bytecode, offset, 5, len, state)
            }
            opcodes::OP_1NEGATE => {
                state.stack.push(encode_script_number(-1));
                Some(offset + 1)
            }
            opcodes::OP_1..=opcodes::OP_16 => {
                let value = (opcode - opcodes::OP_1 + 1) as i64;
                state.stack.push(encode_script_number(value));
                Some(offset + 1)
            }
            opcodes::OP_NOP => Some(offset + 1),
            opcodes::OP_VERIFY => {
                let Some(top) = self.pop(1, "OP_VERIFY", state) else {
                    return None;
                };
                if is_truthy(&top[0]) {
                    Some(offset + 1)
                } else {
                    state.error = Some(VmError::FailedVerify);
                    None
                }
            }
            opcodes::OP_DROP => {
                self.pop(1, "OP_DROP", state)?;
                Some(offset + 1)
            }
            opcodes::OP_DUP => {
                let Some(top) = state.stack.last().cloned() else {
                    state.error = Some(VmError::StackUnderflow {
                        opcode: "OP_DUP",
                        required: 1,
                        depth: 0,
                    });
                    return None;
                };
                state.stack.push(top);
                Some(offset + 1)
            }
            opcodes::OP_SWAP => {
                let items = self.pop(2, "OP_SWAP", state)?;
                let [a, b] = <[Vec<u8>; 2]>::try_from(items).ok()?;
                state.stack.push(b);
                state.stack.push(a);
                Some(offset + 1)
            }
            opcodes::OP_CAT => {
                let items = self.pop(2, "OP_CAT", state)?;
                let [mut a, b] = <[Vec<u8>; 2]>::try_from(items).ok()?;
                a.extend_from_slice(&b);
                state.stack.push(a);
                Some(offset + 1)
            }
            opcodes::OP_EQUAL | opcodes::OP_EQUALVERIFY => {
                let name = if opcode == opcodes::OP_EQUAL {
                    "OP_EQUAL"
                } else {
                    "OP_EQUALVERIFY"
                };
                let items = self.pop(2, name, state)?;
                let equal = items[0] == items[1];
                if opcode == opcodes::OP_EQUALVERIFY {
                    if equal {
                        Some(offset + 1)
                    } else {
                        state.error = Some(VmError::FailedVerify);
                        None
                    }
                } else {
                    state
                        .stack
                        .push(if equal { vec![0x01] } else { Vec::new() });
                    Some(offset + 1)
                }
            }
            opcodes::OP_RIPEMD160 => self.digest(ripemd160, "OP_RIPEMD160", offset, state),
            opcodes::OP_SHA256 => self.digest(sha256, "OP_SHA256", offset, state),
            opcodes::OP_HASH160 => self.digest(hash160, "OP_HASH160", offset, state),
            opcodes::OP_HASH256 => self.digest(hash256, "OP_HASH256", offset, state),
            _ => {
                state.error = Some(VmError::UnknownOpcode { opcode, offset });
                None
            }
        }
    }

    fn push_bytes(
        &self,
        bytecode: &[u8],
        offset: usize,
        header: usize,
        len: usize,
        state: &mut ProgramState,
    ) -> Option<usize> {
        let start = offset + header;
        let Some(data) = bytecode.get(start..start + len) else {
            state.error = Some(VmError::TruncatedPush { offset });
            return None;
        };
        state.stack.push(data.to_vec());
        Some(start + len)
    }

    /// Pop `count` items; on underflow, set the error and return `None`.
    /// Items are returned bottom-first in their original stack order.
    fn pop(&self, count: usize, opcode: &'static str, state: &mut ProgramState) -> Option<Vec<Vec<u8>>> {
        let depth = state.stack.len();
        if depth < count {
            state.error = Some(VmError::StackUnderflow {
                opcode,
                required: count,
                depth,
            });
            return None;
        }
        Some(state.stack.split_off(depth - count))
    }

    fn digest(
        &self,
        f: fn(&[u8]) -> Vec<u8>,
        opcode: &'static str,
        offset: usize,
        state: &mut ProgramState,
    ) -> Option<usize> {
        let items = self.pop(1, opcode, state)?;
        state.stack.push(f(&items[0]));
        Some(offset + 1)
    }
}

/// VM truthiness: empty and all-zero (allowing negative zero) are falsy.
fn is_truthy(item: &[u8]) -> bool {
    for (index, byte) in item.iter().enumerate() {
        if *byte != 0 {
            // negative zero: sign bit only, in the last byte
            if index == item.len() - 1 && *byte == 0x80 {
                return false;
            }
            return true;
        }
    }
    false
}

impl InstructionSetVm for StackVm {
    fn evaluate(&self, bytecode: &[u8], state: ProgramState) -> Evaluation {
        let mut state = state;
        let mut trace = Vec::new();
        let mut offset = 0;
        while offset < bytecode.len() && state.error.is_none() {
            match self.step(bytecode, offset, &mut state) {
                Some(next) => offset = next,
                None => break,
            }
            trace.push(state.clone());
        }
        Evaluation { state, trace }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(bytecode: &[u8]) -> ProgramState {
        StackVm::new().evaluate(bytecode, ProgramState::new()).state
    }

    #[test]
    fn test_direct_push() {
        let state = run(&[0x02, 0xab, 0xcd]);
        assert_eq!(state.error, None);
        assert_eq!(state.stack, vec![vec![0xab, 0xcd]]);
    }

    #[test]
    fn test_small_integer_pushes() {
        let state = run(&[opcodes::OP_1, opcodes::OP_16, opcodes::OP_1NEGATE]);
        assert_eq!(
            state.stack,
            vec![vec![0x01], vec![0x10], vec![0x81]]
        );
    }

    #[test]
    fn test_op_cat() {
        let state = run(&[0x01, 0x02, 0x01, 0x03, opcodes::OP_CAT]);
        assert_eq!(state.error, None);
        assert_eq!(state.stack, vec![vec![0x02, 0x03]]);
    }

    #[test]
    fn test_op_equal() {
        let equal = run(&[0x01, 0xaa, 0x01, 0xaa, opcodes::OP_EQUAL]);
        assert_eq!(equal.stack, vec![vec![0x01]]);
        let unequal = run(&[0x01, 0xaa, 0x01, 0xbb, opcodes::OP_EQUAL]);
        assert_eq!(unequal.stack, vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_op_hash160() {
        let state = run(&[0x00, opcodes::OP_HASH160]);
        assert_eq!(state.error, None);
        assert_eq!(state.stack, vec![crate::hash::hash160(b"")]);
    }

    #[test]
    fn test_stack_underflow_sets_error() {
        let state = run(&[opcodes::OP_EQUAL]);
        assert_eq!(
            state.error,
            Some(VmError::StackUnderflow {
                opcode: "OP_EQUAL",
                required: 2,
                depth: 0,
            })
        );
    }

    #[test]
    fn test_unknown_opcode() {
        let state = run(&[0xac]);
        assert_eq!(
            state.error,
            Some(VmError::UnknownOpcode {
                opcode: 0xac,
                offset: 0
            })
        );
    }

    #[test]
    fn test_truncated_push() {
        let state = run(&[0x05, 0x01]);
        assert_eq!(state.error, Some(VmError::TruncatedPush { offset: 0 }));
    }

    #[test]
    fn test_verify() {
        assert_eq!(run(&[opcodes::OP_1, opcodes::OP_VERIFY]).error, None);
        assert_eq!(
            run(&[opcodes::OP_0, opcodes::OP_VERIFY]).error,
            Some(VmError::FailedVerify)
        );
    }

    #[test]
    fn test_trace_records_each_step() {
        let evaluation = StackVm::new().evaluate(&[0x01, 0x02, opcodes::OP_DUP], ProgramState::new());
        assert_eq!(evaluation.trace.len(), 2);
        assert_eq!(evaluation.trace[0].stack, vec![vec![0x02]]);
        assert_eq!(evaluation.trace[1].stack, vec![vec![0x02], vec![0x02]]);
    }
}
