//! # Runners
//!
//! Execution backends behind [`SolutionLoader`](crate::traits::runner::SolutionLoader).
//!
//! - [`rhai_runner`]: embedded Rhai scripts, the default backend.
//! - [`builtins`]: the allow-listed operations scripts may call.
//! - [`convert`]: script values to and from the judge's neutral types.

pub mod builtins;
pub mod convert;
pub mod rhai_runner;
