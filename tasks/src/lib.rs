//! # Tasks
//!
//! The task catalog: economic domain models, the trusted oracles built on them, and the
//! use cases the service layer calls (`solve_task`, `submit_solution`).
//!
//! Everything here is read-only after first use and safe to share across concurrent
//! judgements.

pub mod equilibrium;
pub mod error;
pub mod models;
pub mod registry;
pub mod solvers;
pub mod submit;
