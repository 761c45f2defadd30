//!
//! Compile one script from a lockscript template document.
//!
//! Usage: `lockc <template.json> <script-id> [--raw] [--locktime N] [--bind NAME=HEX]...`

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

use lockscript_compiler::{
    compile_script, compile_script_raw, CompilationData, CompilationResult, OperationData,
};
use lockscript_tools::{parse_binding, TemplateDocument};

#[derive(Parser, Debug)]
#[command(name = "lockc")]
#[command(about = "Compile a script from a lockscript template document")]
struct Args {
    /// Path to the template document (JSON)
    template: PathBuf,

    /// Identifier of the script to compile
    script_id: String,

    /// Skip protocol transforms (P2SH wrapping) and emit raw bytecode
    #[arg(long = "raw")]
    raw: bool,

    /// Transaction locktime for locktime-type checking
    #[arg(long = "locktime")]
    locktime: Option<u32>,

    /// Extra variable binding, NAME=HEX (repeatable, overrides the document)
    #[arg(long = "bind")]
    bind: Vec<String>,
}

fn main() {
    lockscript_tools::init_logging();

    let args = Args::parse();

    let json = match fs::read_to_string(&args.template) {
        Ok(json) => json,
        Err(error) => {
            error!("Failed to read {}: {}", args.template.display(), error);
            process::exit(1);
        }
    };
    let document = match TemplateDocument::from_json(&json) {
        Ok(document) => document,
        Err(error) => {
            error!("{error:#}");
            process::exit(1);
        }
    };

    let mut bytecode = match document.decode_variables() {
        Ok(bytecode) => bytecode,
        Err(error) => {
            error!("{error:#}");
            process::exit(1);
        }
    };
    for binding in &args.bind {
        match parse_binding(binding) {
            Ok((name, value)) => {
                bytecode.insert(name, value);
            }
            Err(error) => {
                error!("{error:#}");
                process::exit(1);
            }
        }
    }

    let data = CompilationData {
        bytecode,
        operation_data: args
            .locktime
            .map(|locktime| OperationData {
                locktime: Some(locktime),
            }),
    };
    let environment = document.environment();

    info!("Compiling '{}'...", args.script_id);
    let result = if args.raw {
        compile_script_raw(&args.script_id, &data, &environment)
    } else {
        compile_script(&args.script_id, &data, &environment)
    };

    match result {
        CompilationResult::Success(success) => {
            println!("{}", hex::encode(success.bytecode));
        }
        CompilationResult::Failure(failure) => {
            for compile_error in &failure.errors {
                error!("{compile_error}");
            }
            process::exit(1);
        }
    }
}
