//! # Rhai Runner
//!
//! Embedded backend: user solutions are [Rhai](https://rhai.rs) scripts that define
//! `fn solve(params)` and return an object map of numbers.
//!
//! Each load and each evaluation builds its own [`Engine`] whose progress hook watches the
//! [`Deadline`] of that call alone, so concurrent judgements never share a countdown. The
//! engine starts raw (no packages), gets arithmetic, logic and iteration back, and then only
//! the builtins in [`super::builtins`]. `eval` is disabled outright.
//!
//! This is a soft boundary. Scripts cannot reach I/O, but they share the host's memory and
//! CPU; the limits in [`ScriptLimits`] bound the obvious ways to exhaust them.

use super::builtins;
use super::convert::{dynamic_to_raw, params_to_dynamic};
use crate::ENTRY_POINT;
use crate::deadline::Deadline;
use crate::error::{EvalError, LoadError};
use crate::traits::runner::{Solution, SolutionLoader};
use crate::types::RawValue;
use rhai::packages::{ArithmeticPackage, LogicPackage, Package};
use rhai::{AST, Array, CallFnOptions, Dynamic, Engine, INT, Scope};
use std::ops::{Range, RangeInclusive};
use util::task_spec::Params;

/// Resource caps applied to every engine the runner builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLimits {
    pub max_call_levels: usize,
    pub max_expr_depth: usize,
    pub max_function_expr_depth: usize,
    pub max_string_size: usize,
    pub max_array_size: usize,
    pub max_map_size: usize,
}

impl Default for ScriptLimits {
    fn default() -> Self {
        Self {
            max_call_levels: 32,
            max_expr_depth: 64,
            max_function_expr_depth: 32,
            max_string_size: 64 * 1024,
            max_array_size: 1_000_000,
            max_map_size: 10_000,
        }
    }
}

fn build_engine(limits: &ScriptLimits, deadline: &Deadline) -> Engine {
    let mut engine = Engine::new_raw();

    engine.register_global_module(ArithmeticPackage::new().as_shared_module());
    engine.register_global_module(LogicPackage::new().as_shared_module());
    engine
        .register_iterator::<Array>()
        .register_iterator::<Range<INT>>()
        .register_iterator::<RangeInclusive<INT>>();
    builtins::register(&mut engine);

    engine.disable_symbol("eval");

    engine
        .set_max_call_levels(limits.max_call_levels)
        .set_max_expr_depths(limits.max_expr_depth, limits.max_function_expr_depth)
        .set_max_string_size(limits.max_string_size)
        .set_max_array_size(limits.max_array_size)
        .set_max_map_size(limits.max_map_size);

    engine.on_print(|text| tracing::debug!(target: "judge::script", "{text}"));
    engine.on_debug(|text, source, pos| {
        tracing::debug!(target: "judge::script", source = ?source, position = %pos, "{text}")
    });

    // Termination raised here is not catchable by script-level try/catch.
    let deadline = deadline.clone();
    engine.on_progress(move |_ops| deadline.is_expired().then_some(Dynamic::UNIT));

    engine
}

/// Loads Rhai source into a [`RhaiSolution`].
#[derive(Debug, Clone, Default)]
pub struct RhaiLoader {
    limits: ScriptLimits,
}

impl RhaiLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SolutionLoader for RhaiLoader {
    fn load(&self, source: &str, deadline: &Deadline) -> Result<Box<dyn Solution>, LoadError> {
        let engine = build_engine(&self.limits, deadline);

        let ast = engine
            .compile(source)
            .map_err(|e| LoadError::Syntax(e.to_string()))?;

        let mut scope = Scope::new();
        engine
            .run_ast_with_scope(&mut scope, &ast)
            .map_err(|e| LoadError::Evaluation(e.to_string()))?;

        check_entry_point(&ast)?;

        Ok(Box::new(RhaiSolution {
            ast,
            scope,
            limits: self.limits,
        }))
    }
}

fn check_entry_point(ast: &AST) -> Result<(), LoadError> {
    let mut arity = None;
    for f in ast.iter_functions().filter(|f| f.name == ENTRY_POINT) {
        if f.params.len() == 1 {
            return Ok(());
        }
        arity.get_or_insert(f.params.len());
    }
    match arity {
        Some(n) => Err(LoadError::EntryPointArity(n)),
        None => Err(LoadError::MissingEntryPoint),
    }
}

/// A compiled script together with the scope its top level left behind.
pub struct RhaiSolution {
    ast: AST,
    scope: Scope<'static>,
    limits: ScriptLimits,
}

impl Solution for RhaiSolution {
    fn evaluate(&self, params: &Params, deadline: &Deadline) -> Result<RawValue, EvalError> {
        let engine = build_engine(&self.limits, deadline);

        // Each test starts from the same post-load scope.
        let mut scope = self.scope.clone();
        let options = CallFnOptions::new().eval_ast(false).rewind_scope(true);

        engine
            .call_fn_with_options::<Dynamic>(
                options,
                &mut scope,
                &self.ast,
                ENTRY_POINT,
                (params_to_dynamic(params),),
            )
            .map(dynamic_to_raw)
            .map_err(|e| EvalError(e.to_string()))
    }
}
