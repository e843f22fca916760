//! Exhaustive vehicle combination solver for FleetFit.
//!
//! This crate provides [`CombinationSolver`], the default implementation of the
//! [`Optimizer`](fleetfit_core::Optimizer) trait. A call proceeds in four
//! steps:
//!
//! 1. snapshot the active vehicle types from a
//!    [`VehicleCatalog`](fleetfit_core::VehicleCatalog);
//! 2. [`generate`] every capacity-satisfying allocation with a pruned
//!    depth-first search;
//! 3. [`filter_dominated`] candidates on vehicle count, unused seats and cost;
//! 4. [`rank`] the survivors and flag the best one as recommended.
//!
//! Each step is exposed on its own so callers and benchmarks can drive them
//! directly. Searches may be bounded by a [`SearchBudget`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod budget;
mod dominance;
mod generator;
mod ranker;
mod solver;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use budget::{BudgetExhausted, DEFAULT_CLOCK_CHECK_MASK, SearchBudget};
pub use dominance::{dominates, filter_dominated};
pub use generator::{Generation, generate};
pub use ranker::rank;
pub use solver::{CombinationSolver, SolverConfig};
