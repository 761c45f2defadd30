//! Opcode constants and the standard identifier table.

use std::collections::HashMap;

// Push opcodes
pub const OP_0: u8 = 0x00;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1NEGATE: u8 = 0x4f;
pub const OP_1: u8 = 0x51;
pub const OP_16: u8 = 0x60;

// Flow control
pub const OP_NOP: u8 = 0x61;
pub const OP_IF: u8 = 0x63;
pub const OP_ELSE: u8 = 0x67;
pub const OP_ENDIF: u8 = 0x68;
pub const OP_VERIFY: u8 = 0x69;
pub const OP_RETURN: u8 = 0x6a;

// Stack
pub const OP_DROP: u8 = 0x75;
pub const OP_DUP: u8 = 0x76;
pub const OP_SWAP: u8 = 0x7c;

// Splice
pub const OP_CAT: u8 = 0x7e;

// Bitwise / comparison
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;

// Crypto
pub const OP_RIPEMD160: u8 = 0xa6;
pub const OP_SHA256: u8 = 0xa8;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_HASH256: u8 = 0xaa;
pub const OP_CHECKSIG: u8 = 0xac;
pub const OP_CHECKSIGVERIFY: u8 = 0xad;
pub const OP_CHECKMULTISIG: u8 = 0xae;
pub const OP_CHECKMULTISIGVERIFY: u8 = 0xaf;

// Locktime
pub const OP_CHECKLOCKTIMEVERIFY: u8 = 0xb1;
pub const OP_CHECKSEQUENCEVERIFY: u8 = 0xb2;

/// The opcode identifier table supplied to compilation environments.
///
/// Scripts may name any opcode listed here; the reference VM executes only a
/// subset (see `vm.rs`), which is sufficient because non-evaluated segments
/// are emitted, not run.
pub fn standard_opcode_table() -> HashMap<String, Vec<u8>> {
    let mut table = HashMap::new();
    let mut op = |name: &str, code: u8| {
        table.insert(name.to_string(), vec![code]);
    };
    op("OP_0", OP_0);
    op("OP_FALSE", OP_0);
    op("OP_1NEGATE", OP_1NEGATE);
    for n in 0..=15u8 {
        op(&format!("OP_{}", n + 1), OP_1 + n);
    }
    op("OP_TRUE", OP_1);
    op("OP_NOP", OP_NOP);
    op("OP_IF", OP_IF);
    op("OP_ELSE", OP_ELSE);
    op("OP_ENDIF", OP_ENDIF);
    op("OP_VERIFY", OP_VERIFY);
    op("OP_RETURN", OP_RETURN);
    op("OP_DROP", OP_DROP);
    op("OP_DUP", OP_DUP);
    op("OP_SWAP", OP_SWAP);
    op("OP_CAT", OP_CAT);
    op("OP_EQUAL", OP_EQUAL);
    op("OP_EQUALVERIFY", OP_EQUALVERIFY);
    op("OP_RIPEMD160", OP_RIPEMD160);
    op("OP_SHA256", OP_SHA256);
    op("OP_HASH160", OP_HASH160);
    op("OP_HASH256", OP_HASH256);
    op("OP_CHECKSIG", OP_CHECKSIG);
    op("OP_CHECKSIGVERIFY", OP_CHECKSIGVERIFY);
    op("OP_CHECKMULTISIG", OP_CHECKMULTISIG);
    op("OP_CHECKMULTISIGVERIFY", OP_CHECKMULTISIGVERIFY);
    op("OP_CHECKLOCKTIMEVERIFY", OP_CHECKLOCKTIMEVERIFY);
    op("OP_CHECKSEQUENCEVERIFY", OP_CHECKSEQUENCEVERIFY);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_basics() {
        let table = standard_opcode_table();
        assert_eq!(table.get("OP_DUP"), Some(&vec![OP_DUP]));
        assert_eq!(table.get("OP_HASH160"), Some(&vec![0xa9]));
        assert_eq!(table.get("OP_16"), Some(&vec![OP_16]));
        assert_eq!(table.get("OP_TRUE"), Some(&vec![OP_1]));
        assert!(!table.contains_key("OP_17"));
    }
}
