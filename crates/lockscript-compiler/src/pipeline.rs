//! The staged pipeline and the dependency resolver.

use crate::describe::describe_expected;
use crate::environment::{CompilationData, Environment};
use crate::result::{
    environment_failure, CompilationFailure, CompilationResult, CompilationSuccess, StageKind,
};
use lockscript_ast::{CompileError, Range};
use lockscript_parser::parse_script;
use lockscript_resolve::{collect_resolution_errors, Resolver, ResolverContext};
use lockscript_vm::reduce_script;
use tracing::trace;

/// Compile raw script text through parse → resolve → reduce.
///
/// Short-circuits on the first failing stage but always carries whichever
/// artifacts earlier stages produced, for debugging. Failures are values;
/// this function never panics on malformed input.
pub fn compile_script_text(
    script: &str,
    data: &CompilationData,
    environment: &Environment,
) -> CompilationResult {
    let parsed = match parse_script(script) {
        Ok(parsed) => parsed,
        Err(failure) => {
            return CompilationResult::Failure(CompilationFailure {
                error_type: StageKind::Parse,
                errors: vec![CompileError::new(
                    describe_expected(&failure.expected),
                    Range::point(failure.line, failure.column),
                )],
                parse: None,
                resolve: None,
                reduce: None,
            });
        }
    };

    let resolve_script_id = |identifier: &str| -> Result<Vec<u8>, String> {
        match compile_script_raw(identifier, data, environment) {
            CompilationResult::Success(success) => Ok(success.bytecode),
            CompilationResult::Failure(failure) => Err(format!(
                "compilation error in referenced script '{identifier}': {}",
                failure
                    .errors
                    .iter()
                    .map(|error| error.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; ")
            )),
        }
    };
    let resolver = Resolver::new(ResolverContext {
        opcodes: &environment.opcodes,
        variables: &data.bytecode,
        script_resolver: Some(&resolve_script_id),
    });
    let resolved = resolver.resolve(&parsed);
    let resolution_errors = collect_resolution_errors(&resolved);
    if !resolution_errors.is_empty() {
        return CompilationResult::Failure(CompilationFailure {
            error_type: StageKind::Resolve,
            errors: resolution_errors,
            parse: Some(parsed),
            resolve: Some(resolved),
            reduce: None,
        });
    }

    let reduction = reduce_script(
        &resolved,
        environment.vm.as_deref(),
        environment.create_state,
    );
    if !reduction.errors.is_empty() {
        return CompilationResult::Failure(CompilationFailure {
            error_type: StageKind::Reduce,
            errors: reduction.errors.clone(),
            parse: Some(parsed),
            resolve: Some(resolved),
            reduce: Some(reduction),
        });
    }

    CompilationResult::Success(CompilationSuccess {
        bytecode: reduction.bytecode.clone(),
        parse: parsed,
        resolve: resolved,
        reduce: reduction,
        transformed: None,
    })
}

/// Look up a script by identifier and compile it, guarding against circular
/// dependencies.
///
/// The ancestry chain is extended by value for the recursive call, so a
/// failed branch can never leave stale state behind, and two top-level
/// compilations never share cycle-detection state. Recursion depth is
/// bounded by the number of distinct script identifiers in the environment.
pub fn compile_script_raw(
    script_id: &str,
    data: &CompilationData,
    environment: &Environment,
) -> CompilationResult {
    trace!(
        script = script_id,
        depth = environment.ancestry.len(),
        "compiling script"
    );
    let Some(source) = environment.scripts.get(script_id) else {
        return environment_failure(format!(
            "no script with the identifier '{script_id}' exists in the compilation environment"
        ));
    };
    if environment
        .ancestry
        .iter()
        .any(|ancestor| ancestor == script_id)
    {
        return environment_failure(format!(
            "circular dependency detected while compiling '{script_id}': {} \u{2192} {script_id}",
            environment.ancestry.join(" \u{2192} ")
        ));
    }
    let extended = environment.extend_ancestry(script_id);
    compile_script_text(source, data, &extended)
}
