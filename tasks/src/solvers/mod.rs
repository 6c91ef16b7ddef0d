//! # Solvers
//!
//! Oracles: trusted reference implementations, one per task family. Each reads a test
//! case's [`Params`](util::task_spec::Params) and returns the expected
//! [`NumericResult`](util::task_spec::NumericResult).

pub mod equilibrium_solver;

pub use equilibrium_solver::solve_equilibrium_linear;
