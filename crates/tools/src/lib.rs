//! Lockscript Tools
//!
//! CLI tooling for compiling lockscript template documents.

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use lockscript_compiler::{Environment, LockingScriptType, TimeLockType};
use lockscript_vm::{standard_opcode_table, ProgramState, StackVm};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging with a default filter.
///
/// Use `RUST_LOG` environment variable to override the default filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,lockscript_tools=debug,lockscript_compiler=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// A wallet template document, as loaded from JSON.
///
/// `scripts` preserves document order so diagnostics and iteration are
/// stable. All other sections are optional; variable values are hex strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDocument {
    pub scripts: IndexMap<String, String>,
    #[serde(default)]
    pub variables: HashMap<String, String>,
    #[serde(default)]
    pub locking_script_types: HashMap<String, LockingScriptType>,
    #[serde(default)]
    pub unlocking_scripts: HashMap<String, String>,
    #[serde(default)]
    pub unlocking_script_time_lock_types: HashMap<String, TimeLockType>,
}

impl TemplateDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid template document")
    }

    /// Decode the document's hex-encoded variable values.
    pub fn decode_variables(&self) -> Result<HashMap<String, Vec<u8>>> {
        let mut decoded = HashMap::new();
        for (name, value) in &self.variables {
            let bytes = hex::decode(value)
                .with_context(|| format!("variable '{name}' is not valid hex"))?;
            decoded.insert(name.clone(), bytes);
        }
        Ok(decoded)
    }

    /// Build a compilation environment over the reference VM.
    pub fn environment(&self) -> Environment {
        Environment {
            scripts: Arc::new(self.scripts.clone()),
            opcodes: Arc::new(standard_opcode_table()),
            vm: Some(Arc::new(StackVm::new())),
            create_state: Some(ProgramState::new),
            locking_script_types: Arc::new(self.locking_script_types.clone()),
            unlocking_scripts: Arc::new(self.unlocking_scripts.clone()),
            unlocking_script_time_lock_types: Arc::new(
                self.unlocking_script_time_lock_types.clone(),
            ),
            ancestry: Vec::new(),
        }
    }
}

/// Parse a `NAME=HEX` command-line binding.
pub fn parse_binding(binding: &str) -> Result<(String, Vec<u8>)> {
    let Some((name, value)) = binding.split_once('=') else {
        bail!("binding '{binding}' is not of the form NAME=HEX");
    };
    if name.is_empty() {
        bail!("binding '{binding}' has an empty name");
    }
    let bytes =
        hex::decode(value).with_context(|| format!("binding '{name}' is not valid hex"))?;
    Ok((name.to_string(), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_document_round_trip() {
        let document = TemplateDocument::from_json(
            r#"{
                "scripts": { "lock": "OP_1", "unlock": "<key>" },
                "variables": { "key": "abcd" },
                "lockingScriptTypes": { "lock": "p2sh" },
                "unlockingScripts": { "unlock": "lock" },
                "unlockingScriptTimeLockTypes": { "unlock": "height" }
            }"#,
        )
        .unwrap();
        assert_eq!(document.scripts.len(), 2);
        assert_eq!(
            document.decode_variables().unwrap()["key"],
            vec![0xab, 0xcd]
        );
        assert_eq!(
            document.locking_script_types["lock"],
            LockingScriptType::P2sh
        );
        assert_eq!(
            document.unlocking_script_time_lock_types["unlock"],
            TimeLockType::Height
        );
    }

    #[test]
    fn test_sections_default_to_empty() {
        let document =
            TemplateDocument::from_json(r#"{ "scripts": { "t": "OP_1" } }"#).unwrap();
        assert!(document.variables.is_empty());
        assert!(document.locking_script_types.is_empty());
    }

    #[test]
    fn test_bad_variable_hex_is_reported() {
        let document = TemplateDocument::from_json(
            r#"{ "scripts": {}, "variables": { "key": "xyz" } }"#,
        )
        .unwrap();
        let error = document.decode_variables().unwrap_err();
        assert!(error.to_string().contains("key"));
    }

    #[test]
    fn test_parse_binding() {
        assert_eq!(
            parse_binding("key=00ff").unwrap(),
            ("key".to_string(), vec![0x00, 0xff])
        );
        assert!(parse_binding("no_equals").is_err());
        assert!(parse_binding("=abcd").is_err());
        assert!(parse_binding("key=nothex").is_err());
    }
}
