//! `CombinationSolver` wiring the catalog, generator, filter and ranker.

use std::{
    sync::{Arc, atomic::AtomicBool},
    time::{Duration, Instant},
};

use fleetfit_core::{
    Diagnostics, OptimizeError, OptimizeRequest, OptimizeResponse, Optimizer, VehicleCatalog,
    VehicleCombination,
};

use crate::{
    budget::{DEFAULT_CLOCK_CHECK_MASK, SearchBudget},
    dominance::filter_dominated,
    generator::generate,
    ranker::rank,
};

/// Configuration for [`CombinationSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Wall-clock limit for one search; `None` searches to completion.
    pub time_limit: Option<Duration>,
    /// The clock is read whenever `nodes & clock_check_mask == 0`.
    pub clock_check_mask: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit: None,
            clock_check_mask: DEFAULT_CLOCK_CHECK_MASK,
        }
    }
}

/// Exhaustive solver choosing vehicle combinations from a catalog.
///
/// Each call snapshots the active catalog, enumerates capacity-satisfying
/// allocations, drops dominated ones and returns the best few. Calls share
/// nothing but the catalog, so one solver can serve many threads.
///
/// # Examples
/// ```rust
/// use rust_decimal::Decimal;
/// use fleetfit_core::{CatalogError, OptimizeRequest, Optimizer, VehicleCatalog, VehicleType};
/// use fleetfit_solver::CombinationSolver;
///
/// struct FixedCatalog(Vec<VehicleType>);
///
/// impl VehicleCatalog for FixedCatalog {
///     fn vehicle_types(&self) -> Result<Vec<VehicleType>, CatalogError> {
///         Ok(self.0.clone())
///     }
/// }
///
/// let van = VehicleType::new(3, "Van", 12, 10, Decimal::new(2500, 0)).unwrap();
/// let solver = CombinationSolver::new(FixedCatalog(vec![van]));
/// let response = solver.optimize(&OptimizeRequest::new(10, Decimal::from(3))).unwrap();
///
/// let best = response.recommended().unwrap();
/// assert_eq!(best.total_vehicle_count(), 1);
/// assert_eq!(best.total_cost(), Decimal::new(7500, 0));
/// ```
#[derive(Debug)]
pub struct CombinationSolver<C>
where
    C: VehicleCatalog,
{
    catalog: C,
    config: SolverConfig,
    interrupt: Option<Arc<AtomicBool>>,
}

impl<C> CombinationSolver<C>
where
    C: VehicleCatalog,
{
    /// Construct a solver using default configuration.
    #[must_use]
    pub fn new(catalog: C) -> Self {
        Self::with_config(catalog, SolverConfig::default())
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(catalog: C, config: SolverConfig) -> Self {
        Self {
            catalog,
            config,
            interrupt: None,
        }
    }

    /// Stop searches once `flag` is set.
    ///
    /// The flag is shared, so one signal cancels every call in flight.
    #[must_use]
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// The catalog the solver reads from.
    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// The solver configuration.
    #[must_use]
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }
}

impl<C> Optimizer for CombinationSolver<C>
where
    C: VehicleCatalog,
{
    fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizeResponse, OptimizeError> {
        request.validate()?;
        let started_at = Instant::now();

        let snapshot = self.catalog.snapshot()?;
        if snapshot.is_empty() {
            log::warn!("no active vehicle types in catalog");
            return Err(OptimizeError::NoActiveInventory);
        }

        let mut budget = SearchBudget::new(
            self.config.time_limit,
            self.config.clock_check_mask,
            self.interrupt.as_deref(),
        );
        let generation =
            generate(&snapshot, request.passenger_count, &mut budget).map_err(|reason| {
                log::warn!("search for {} passengers stopped: {reason}", request.passenger_count);
                OptimizeError::Cancelled {
                    reason: reason.to_string(),
                }
            })?;

        let candidates = generation
            .candidates
            .into_iter()
            .map(|entries| {
                VehicleCombination::new(entries, request.passenger_count, request.num_days)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let candidates_generated = candidates.len();
        let survivors = filter_dominated(candidates);
        let candidates_dominated = candidates_generated.saturating_sub(survivors.len());
        let solutions = rank(survivors, request.max_solutions);

        let diagnostics = Diagnostics {
            solve_time: started_at.elapsed(),
            nodes_explored: generation.nodes_explored,
            candidates_generated: u64::try_from(candidates_generated).unwrap_or(u64::MAX),
            candidates_dominated: u64::try_from(candidates_dominated).unwrap_or(u64::MAX),
        };
        log::debug!("search diagnostics: {diagnostics:?}");
        log::info!(
            "optimised {} passengers over {} days: {} solutions from {} active vehicle types",
            request.passenger_count,
            request.num_days,
            solutions.len(),
            snapshot.len()
        );

        Ok(OptimizeResponse {
            passenger_count: request.passenger_count,
            num_days: request.num_days,
            solutions,
            diagnostics,
        })
    }
}
