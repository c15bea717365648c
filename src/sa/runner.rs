//! Annealing loop.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::config::ScheduleConfig;
use super::observer::{CancellationQuery, LogProgress, NeverCancel, ProgressObserver};
use super::perturbation::SwapProposer;
use super::schedule::AnnealingSchedule;
use crate::error::Result;
use crate::models::ScheduleState;
use crate::problem::ScheduleProblem;
use crate::result::Assignment;

/// How a solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveStatus {
    /// The temperature schedule was exhausted.
    Converged,
    /// Stopped by the cancellation query after completing `iteration`.
    Cancelled { iteration: usize },
}

/// Outcome of a schedule optimization run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleSolution {
    /// Final schedule grid.
    pub state: ScheduleState,

    /// Site to `(day, stop)` mapping derived from `state`.
    pub assignment: Assignment,

    /// Total cost after each completed temperature step.
    pub cost_history: Vec<f64>,

    /// Total cost of `state`.
    pub total_cost: f64,

    /// Temperature steps executed.
    pub iterations: usize,

    /// Temperature of the last executed step.
    pub final_temperature: f64,

    /// Swaps kept (including improvements and neutral moves).
    pub accepted_moves: usize,

    /// Swaps that strictly lowered the cost.
    pub improving_moves: usize,

    pub status: SolveStatus,
}

impl ScheduleSolution {
    pub fn is_cancelled(&self) -> bool {
        matches!(self.status, SolveStatus::Cancelled { .. })
    }
}

/// Executes the schedule annealing loop.
///
/// # Examples
///
/// ```
/// use u_siteplan::models::{CostMatrix, Site};
/// use u_siteplan::sa::{ScheduleConfig, ScheduleOptimizer};
/// use u_siteplan::ScheduleProblem;
///
/// let sites: Vec<Site> = (0..4).map(|i| Site::new(i, format!("site {i}"))).collect();
/// let edges = CostMatrix::from_fn(4, |i, j| i.abs_diff(j) as f64).unwrap();
/// let problem = ScheduleProblem::new(sites, edges, None).unwrap();
///
/// let config = ScheduleConfig::default()
///     .with_max_stops_per_day(2)
///     .with_days(2)
///     .with_annealing_iters(100)
///     .with_seed(7);
/// let solution = ScheduleOptimizer::run(&problem, &config).unwrap();
///
/// assert_eq!(solution.cost_history.len(), 100);
/// assert_eq!(solution.assignment.len(), 3);
/// ```
pub struct ScheduleOptimizer;

impl ScheduleOptimizer {
    /// Runs to completion without observers.
    pub fn run(problem: &ScheduleProblem, config: &ScheduleConfig) -> Result<ScheduleSolution> {
        Self::run_with(problem, config, &mut (), &NeverCancel)
    }

    /// Runs with a progress observer and a cancellation query.
    ///
    /// The random source is seeded from `config.seed`, or from entropy when
    /// no seed is set.
    pub fn run_with<O, C>(
        problem: &ScheduleProblem,
        config: &ScheduleConfig,
        observer: &mut O,
        cancel: &C,
    ) -> Result<ScheduleSolution>
    where
        O: ProgressObserver + ?Sized,
        C: CancellationQuery + ?Sized,
    {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        };
        Self::run_with_rng(problem, config, &mut rng, observer, cancel)
    }

    /// Runs drawing every random decision from `rng`; `config.seed` is ignored.
    pub fn run_with_rng<R, O, C>(
        problem: &ScheduleProblem,
        config: &ScheduleConfig,
        rng: &mut R,
        observer: &mut O,
        cancel: &C,
    ) -> Result<ScheduleSolution>
    where
        R: Rng + ?Sized,
        O: ProgressObserver + ?Sized,
        C: CancellationQuery + ?Sized,
    {
        // Initializing
        config.validate()?;
        problem.validate()?;

        let n_sites = problem.n_sites();
        let n_days = config.days_for(n_sites);
        let max_stops = config.max_stops_per_day;

        let model = problem.cost_model();
        let mut state = ScheduleState::random(n_sites, n_days, max_stops, rng)?;
        let initial_cost = model.total_cost(&state);
        let schedule = AnnealingSchedule::log_spaced(
            initial_cost,
            config.decay_base,
            config.decay_span,
            config.annealing_iters,
        );
        let proposer = SwapProposer::new(n_days, max_stops);

        debug!(
            event = "solve_start",
            n_sites,
            n_days,
            max_stops_per_day = max_stops,
            annealing_iters = config.annealing_iters,
            initial_cost,
        );

        let mut log = config.verbose.then(|| LogProgress::new(config.annealing_iters));
        if let Some(log) = log.as_mut() {
            log.before_solve(&state, problem.edges(), problem.nodes());
        }
        observer.before_solve(&state, problem.edges(), problem.nodes());

        // Iterating
        let mut cost_history = Vec::with_capacity(schedule.len());
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut final_temperature = initial_cost;
        let mut status = SolveStatus::Converged;

        for (iteration, temperature) in schedule.iter().enumerate() {
            for _ in 0..proposer.batch_size() {
                let mv = proposer.propose(rng);
                let before = model.pair_cost(&state, mv.day1, mv.day2);
                state.swap(mv.day1, mv.stop1, mv.day2, mv.stop2);
                let after = model.pair_cost(&state, mv.day1, mv.day2);
                let delta = after - before;

                if accept(delta, temperature, rng) {
                    accepted_moves += 1;
                    if delta < 0.0 {
                        improving_moves += 1;
                    }
                } else {
                    state.swap(mv.day1, mv.stop1, mv.day2, mv.stop2);
                }
            }

            cost_history.push(model.total_cost(&state));
            final_temperature = temperature;

            if let Some(log) = log.as_mut() {
                log.after_iteration(iteration, &cost_history, temperature);
            }
            observer.after_iteration(iteration, &cost_history, temperature);

            if cancel.is_cancelled() {
                status = SolveStatus::Cancelled { iteration };
                break;
            }
        }

        let total_cost = model.total_cost(&state);
        debug!(
            event = "solve_end",
            status = ?status,
            iterations = cost_history.len(),
            accepted_moves,
            improving_moves,
            total_cost,
        );

        Ok(ScheduleSolution {
            assignment: Assignment::from_state(&state),
            iterations: cost_history.len(),
            state,
            cost_history,
            total_cost,
            final_temperature,
            accepted_moves,
            improving_moves,
            status,
        })
    }
}

/// Metropolis criterion: always keep non-worsening moves, keep a worsening
/// move with probability `exp(-delta / T)`.
#[inline]
fn accept<R: Rng + ?Sized>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    if delta <= 0.0 {
        true
    } else if temperature > 0.0 {
        (-delta / temperature).exp() > rng.random::<f64>()
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostModel;
    use crate::error::{ScheduleError, ValidationError};
    use crate::models::{CostMatrix, Site};
    use std::cell::Cell;

    fn sites(n: usize) -> Vec<Site> {
        (0..n).map(|i| Site::new(i, format!("s{i}"))).collect()
    }

    fn line_problem(n: usize) -> ScheduleProblem {
        let edges = CostMatrix::from_fn(n, |i, j| i.abs_diff(j) as f64).unwrap();
        ScheduleProblem::new(sites(n), edges, None).unwrap()
    }

    #[test]
    fn test_accept_rule() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(accept(-1.0, 0.0, &mut rng));
        assert!(accept(0.0, 0.0, &mut rng));
        assert!(!accept(1.0, 0.0, &mut rng));
        // exp(-1e-300) rounds to 1.0, above every draw from [0, 1)
        assert!(accept(1e-300, 1.0, &mut rng));
        assert!(!accept(1e6, 1e-3, &mut rng));
    }

    #[test]
    fn test_history_length_on_convergence() {
        let problem = line_problem(6);
        let config = ScheduleConfig::default()
            .with_max_stops_per_day(3)
            .with_annealing_iters(250)
            .with_seed(1);
        let solution = ScheduleOptimizer::run(&problem, &config).unwrap();

        assert_eq!(solution.status, SolveStatus::Converged);
        assert_eq!(solution.cost_history.len(), 250);
        assert_eq!(solution.iterations, 250);
        assert!((solution.total_cost - solution.cost_history[249]).abs() < 1e-9);
        assert!(solution.state.validate(6).is_ok());
    }

    #[test]
    fn test_cancellation_after_index() {
        let problem = line_problem(6);
        let config = ScheduleConfig::default()
            .with_max_stops_per_day(3)
            .with_annealing_iters(1_000)
            .with_seed(1);

        let polls = Cell::new(0usize);
        let cancel = crate::sa::CancelWhen(|| {
            polls.set(polls.get() + 1);
            polls.get() == 5
        });
        let solution = ScheduleOptimizer::run_with(&problem, &config, &mut (), &cancel).unwrap();

        assert_eq!(solution.status, SolveStatus::Cancelled { iteration: 4 });
        assert!(solution.is_cancelled());
        assert_eq!(solution.cost_history.len(), 5);
        assert_eq!(polls.get(), 5);
        assert_eq!(solution.assignment.len(), 5);
    }

    #[test]
    fn test_observer_called_once_per_iteration() {
        let problem = line_problem(5);
        let config = ScheduleConfig::default()
            .with_max_stops_per_day(2)
            .with_annealing_iters(40)
            .with_seed(9);

        let mut calls = Vec::new();
        let mut observer = |i: usize, history: &[f64], t: f64| {
            assert_eq!(history.len(), i + 1);
            calls.push(t);
        };
        ScheduleOptimizer::run_with(&problem, &config, &mut observer, &NeverCancel).unwrap();

        assert_eq!(calls.len(), 40);
        for w in calls.windows(2) {
            assert!(w[1] <= w[0]);
        }
    }

    #[test]
    fn test_temperature_scaled_by_initial_cost() {
        #[derive(Default)]
        struct Recorder {
            initial_cost: Option<f64>,
            rows: usize,
            first_temperature: Option<f64>,
        }
        impl ProgressObserver for Recorder {
            fn before_solve(
                &mut self,
                state: &ScheduleState,
                edges: &CostMatrix,
                nodes: Option<&crate::models::NodeCosts>,
            ) {
                self.initial_cost = Some(CostModel::new(edges, nodes).total_cost(state));
                self.rows = state.n_days();
            }
            fn after_iteration(&mut self, i: usize, _h: &[f64], t: f64) {
                if i == 0 {
                    self.first_temperature = Some(t);
                }
            }
        }

        let problem = line_problem(6);
        let config = ScheduleConfig::default()
            .with_max_stops_per_day(3)
            .with_annealing_iters(30)
            .with_seed(4);
        let mut recorder = Recorder::default();
        ScheduleOptimizer::run_with(&problem, &config, &mut recorder, &NeverCancel).unwrap();

        let initial_cost = recorder.initial_cost.unwrap();
        assert!(initial_cost > 0.0);
        assert_eq!(recorder.rows, 2);
        assert_eq!(recorder.first_temperature, Some(initial_cost));

        let schedule = AnnealingSchedule::log_spaced(
            initial_cost,
            config.decay_base,
            config.decay_span,
            config.annealing_iters,
        );
        assert_eq!(schedule.temperatures()[0], initial_cost);
    }

    #[test]
    fn test_oversized_days_rejected() {
        let problem = line_problem(4);
        let config = ScheduleConfig::default().with_days(usize::MAX);
        let err = ScheduleOptimizer::run(&problem, &config).unwrap_err();
        assert!(matches!(err, ScheduleError::Validation(ValidationError::InvalidConfig(_))));
    }

    #[test]
    fn test_capacity_failure_runs_nothing() {
        struct Spy {
            started: bool,
        }
        impl ProgressObserver for Spy {
            fn before_solve(
                &mut self,
                _state: &ScheduleState,
                _edges: &CostMatrix,
                _nodes: Option<&crate::models::NodeCosts>,
            ) {
                self.started = true;
            }
            fn after_iteration(&mut self, _i: usize, _h: &[f64], _t: f64) {
                self.started = true;
            }
        }

        let problem = line_problem(20);
        let config = ScheduleConfig::default()
            .with_max_stops_per_day(2)
            .with_days(1)
            .with_annealing_iters(10);
        let mut spy = Spy { started: false };
        let err = ScheduleOptimizer::run_with(&problem, &config, &mut spy, &NeverCancel)
            .unwrap_err();

        assert_eq!(
            err,
            ScheduleError::Validation(ValidationError::InsufficientCapacity {
                n_days: 1,
                max_stops_per_day: 2,
                capacity: 2,
                required: 19,
            })
        );
        assert!(!spy.started);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let problem = line_problem(4);
        let config = ScheduleConfig::default().with_decay_base(1.5);
        assert!(ScheduleOptimizer::run(&problem, &config)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_injected_rng_ignores_seed() {
        let problem = line_problem(7);
        let config = ScheduleConfig::default()
            .with_max_stops_per_day(3)
            .with_annealing_iters(60)
            .with_seed(123);

        let mut a = ChaCha8Rng::seed_from_u64(5);
        let mut b = ChaCha8Rng::seed_from_u64(5);
        let first =
            ScheduleOptimizer::run_with_rng(&problem, &config, &mut a, &mut (), &NeverCancel)
                .unwrap();
        let second =
            ScheduleOptimizer::run_with_rng(&problem, &config, &mut b, &mut (), &NeverCancel)
                .unwrap();
        assert_eq!(first.state, second.state);
        assert_eq!(first.cost_history, second.cost_history);
    }

    #[test]
    fn test_verbose_run_completes() {
        let problem = line_problem(5);
        let config = ScheduleConfig::default()
            .with_max_stops_per_day(2)
            .with_annealing_iters(20)
            .with_verbose(true)
            .with_seed(2);
        let solution = ScheduleOptimizer::run(&problem, &config).unwrap();
        assert_eq!(solution.cost_history.len(), 20);
    }
}
