// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Identifier resolution for parsed script templates.
//!
//! Resolution turns each parse-tree node into bytecode, recursing into push
//! and evaluation nodes. Identifiers are tried against, in order: the opcode
//! table, the variable bindings supplied with the compilation data, and the
//! script source table (through a caller-supplied callback that recursively
//! compiles the referenced script). A node that resolves against none of
//! them carries an error *in place* — resolution never aborts early, so one
//! pass reports every unresolvable identifier.

use lockscript_ast::{
    AstNodeKind, CompileError, ResolvedNode, ResolvedScript, ResolvedValue, Script,
};
use lockscript_vm::encode_script_number;
use std::collections::HashMap;

/// Callback used to resolve script identifiers by compiling the referenced
/// script; an `Err` message becomes that node's resolution error.
pub type ScriptResolver<'a> = dyn Fn(&str) -> Result<Vec<u8>, String> + 'a;

/// Lookup context for one resolution pass.
pub struct ResolverContext<'a> {
    /// Opcode identifier table from the environment.
    pub opcodes: &'a HashMap<String, Vec<u8>>,
    /// Variable bindings from the compilation data.
    pub variables: &'a HashMap<String, Vec<u8>>,
    /// Recursive script compilation, if the environment provides scripts.
    pub script_resolver: Option<&'a ScriptResolver<'a>>,
}

/// Identifier resolver over a parse artifact.
pub struct Resolver<'a> {
    context: ResolverContext<'a>,
}

impl<'a> Resolver<'a> {
    pub fn new(context: ResolverContext<'a>) -> Self {
        Self { context }
    }

    /// Resolve every node of `script`, embedding errors per node.
    pub fn resolve(&self, script: &Script) -> ResolvedScript {
        script
            .iter()
            .map(|node| {
                let value = match &node.kind {
                    AstNodeKind::Identifier(name) => self.resolve_identifier(name),
                    AstNodeKind::HexLiteral(bytes) => ResolvedValue::Bytecode(bytes.clone()),
                    AstNodeKind::IntegerLiteral(value) => {
                        ResolvedValue::Bytecode(encode_script_number(*value))
                    }
                    AstNodeKind::Utf8Literal(text) => {
                        ResolvedValue::Bytecode(text.as_bytes().to_vec())
                    }
                    AstNodeKind::Push(inner) => ResolvedValue::Push(self.resolve(inner)),
                    AstNodeKind::Evaluation(inner) => {
                        ResolvedValue::Evaluation(self.resolve(inner))
                    }
                };
                ResolvedNode::new(node.range, value)
            })
            .collect()
    }

    fn resolve_identifier(&self, name: &str) -> ResolvedValue {
        if let Some(bytecode) = self.context.opcodes.get(name) {
            return ResolvedValue::Bytecode(bytecode.clone());
        }
        if let Some(bytecode) = self.context.variables.get(name) {
            return ResolvedValue::Bytecode(bytecode.clone());
        }
        if let Some(resolve_script) = self.context.script_resolver {
            match resolve_script(name) {
                Ok(bytecode) => return ResolvedValue::Bytecode(bytecode),
                Err(message) => return ResolvedValue::Error(message),
            }
        }
        ResolvedValue::Error(format!("unknown identifier '{name}'"))
    }
}

/// Collect every resolution error embedded in a resolved script, in source
/// order, recursing into push and evaluation nodes.
pub fn collect_resolution_errors(script: &ResolvedScript) -> Vec<CompileError> {
    let mut errors = Vec::new();
    collect_into(script, &mut errors);
    errors
}

fn collect_into(script: &ResolvedScript, errors: &mut Vec<CompileError>) {
    for node in script {
        match &node.value {
            ResolvedValue::Error(message) => {
                errors.push(CompileError::new(message.clone(), node.range));
            }
            ResolvedValue::Push(inner) | ResolvedValue::Evaluation(inner) => {
                collect_into(inner, errors);
            }
            ResolvedValue::Bytecode(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockscript_ast::{AstNode, Range};

    fn identifier(name: &str) -> AstNode {
        AstNode::new(
            Range::point(1, 1),
            AstNodeKind::Identifier(name.to_string()),
        )
    }

    fn context<'a>(
        opcodes: &'a HashMap<String, Vec<u8>>,
        variables: &'a HashMap<String, Vec<u8>>,
    ) -> ResolverContext<'a> {
        ResolverContext {
            opcodes,
            variables,
            script_resolver: None,
        }
    }

    #[test]
    fn test_opcode_beats_variable() {
        let mut opcodes = HashMap::new();
        opcodes.insert("OP_DUP".to_string(), vec![0x76]);
        let mut variables = HashMap::new();
        variables.insert("OP_DUP".to_string(), vec![0xff]);
        let resolver = Resolver::new(context(&opcodes, &variables));
        let resolved = resolver.resolve(&vec![identifier("OP_DUP")]);
        assert_eq!(resolved[0].value, ResolvedValue::Bytecode(vec![0x76]));
    }

    #[test]
    fn test_variable_binding() {
        let opcodes = HashMap::new();
        let mut variables = HashMap::new();
        variables.insert("key".to_string(), vec![0x01, 0x02]);
        let resolver = Resolver::new(context(&opcodes, &variables));
        let resolved = resolver.resolve(&vec![identifier("key")]);
        assert_eq!(resolved[0].value, ResolvedValue::Bytecode(vec![0x01, 0x02]));
    }

    #[test]
    fn test_literals_resolve_to_bytecode() {
        let opcodes = HashMap::new();
        let variables = HashMap::new();
        let resolver = Resolver::new(context(&opcodes, &variables));
        let script = vec![
            AstNode::new(Range::point(1, 1), AstNodeKind::IntegerLiteral(257)),
            AstNode::new(Range::point(1, 5), AstNodeKind::Utf8Literal("ab".to_string())),
            AstNode::new(Range::point(1, 9), AstNodeKind::HexLiteral(vec![0xee])),
        ];
        let resolved = resolver.resolve(&script);
        assert_eq!(resolved[0].value, ResolvedValue::Bytecode(vec![0x01, 0x01]));
        assert_eq!(resolved[1].value, ResolvedValue::Bytecode(vec![0x61, 0x62]));
        assert_eq!(resolved[2].value, ResolvedValue::Bytecode(vec![0xee]));
    }

    #[test]
    fn test_script_resolver_callback() {
        let opcodes = HashMap::new();
        let variables = HashMap::new();
        let callback = |name: &str| -> Result<Vec<u8>, String> {
            if name == "other" {
                Ok(vec![0x51])
            } else {
                Err(format!("no script '{name}'"))
            }
        };
        let resolver = Resolver::new(ResolverContext {
            opcodes: &opcodes,
            variables: &variables,
            script_resolver: Some(&callback),
        });
        let resolved = resolver.resolve(&vec![identifier("other"), identifier("missing")]);
        assert_eq!(resolved[0].value, ResolvedValue::Bytecode(vec![0x51]));
        assert_eq!(
            resolved[1].value,
            ResolvedValue::Error("no script 'missing'".to_string())
        );
    }

    #[test]
    fn test_all_errors_collected_in_order() {
        let opcodes = HashMap::new();
        let variables = HashMap::new();
        let resolver = Resolver::new(context(&opcodes, &variables));
        let script = vec![
            identifier("first_unknown"),
            AstNode::new(
                Range::point(1, 10),
                AstNodeKind::Push(vec![identifier("second_unknown")]),
            ),
        ];
        let resolved = resolver.resolve(&script);
        let errors = collect_resolution_errors(&resolved);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("first_unknown"));
        assert!(errors[1].message.contains("second_unknown"));
    }
}
