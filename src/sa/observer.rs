//! Progress reporting and cancellation capabilities.
//!
//! The optimizer calls [`ProgressObserver::after_iteration`] and then polls
//! [`CancellationQuery::is_cancelled`] exactly once per temperature step.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::models::{CostMatrix, NodeCosts, ScheduleState};

/// Receives read-only snapshots of a running solve.
pub trait ProgressObserver {
    /// Called once with the randomized initial state, before any swap.
    fn before_solve(
        &mut self,
        _state: &ScheduleState,
        _edges: &CostMatrix,
        _nodes: Option<&NodeCosts>,
    ) {
    }

    /// Called after each temperature step with the cost history so far.
    fn after_iteration(&mut self, iteration: usize, cost_history: &[f64], temperature: f64);
}

impl ProgressObserver for () {
    fn after_iteration(&mut self, _iteration: usize, _cost_history: &[f64], _temperature: f64) {}
}

impl<F> ProgressObserver for F
where
    F: FnMut(usize, &[f64], f64),
{
    fn after_iteration(&mut self, iteration: usize, cost_history: &[f64], temperature: f64) {
        self(iteration, cost_history, temperature)
    }
}

/// Asked once per temperature step whether the solve should stop.
pub trait CancellationQuery {
    fn is_cancelled(&self) -> bool;
}

/// Never requests cancellation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancellationQuery for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl CancellationQuery for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: CancellationQuery + ?Sized> CancellationQuery for &T {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

impl<T: CancellationQuery + ?Sized> CancellationQuery for Arc<T> {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// Adapts a closure into a [`CancellationQuery`].
///
/// ```
/// use std::cell::Cell;
/// use u_siteplan::sa::{CancelWhen, CancellationQuery};
///
/// let polls = Cell::new(0);
/// let cancel = CancelWhen(|| {
///     polls.set(polls.get() + 1);
///     polls.get() >= 3
/// });
/// assert!(!cancel.is_cancelled());
/// assert!(!cancel.is_cancelled());
/// assert!(cancel.is_cancelled());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CancelWhen<F>(pub F);

impl<F: Fn() -> bool> CancellationQuery for CancelWhen<F> {
    fn is_cancelled(&self) -> bool {
        (self.0)()
    }
}

/// Logs the inputs and, ten times per solve, the mean cost of the last
/// window of steps.
#[derive(Debug, Clone)]
pub struct LogProgress {
    interval: usize,
}

impl LogProgress {
    /// Reporter for a solve of `annealing_iters` steps.
    pub fn new(annealing_iters: usize) -> Self {
        Self {
            interval: (annealing_iters / 10).max(1),
        }
    }

    pub fn interval(&self) -> usize {
        self.interval
    }
}

impl ProgressObserver for LogProgress {
    fn before_solve(
        &mut self,
        state: &ScheduleState,
        edges: &CostMatrix,
        nodes: Option<&NodeCosts>,
    ) {
        info!(
            event = "initial_state",
            n_days = state.n_days(),
            max_stops_per_day = state.max_stops_per_day(),
            n_sites = edges.size(),
            node_costs = nodes.is_some(),
            "initial state\n{state}"
        );
        debug!(event = "inputs", edges = ?edges, nodes = ?nodes);
    }

    fn after_iteration(&mut self, iteration: usize, cost_history: &[f64], temperature: f64) {
        let step = iteration + 1;
        if step % self.interval != 0 {
            return;
        }
        let window = &cost_history[cost_history.len().saturating_sub(self.interval)..];
        let mean_cost = window.iter().sum::<f64>() / window.len() as f64;
        info!(
            event = "progress",
            step,
            temperature,
            mean_cost,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        {
            let mut obs = |i: usize, h: &[f64], _t: f64| seen.push((i, h.len()));
            obs.after_iteration(0, &[1.0], 5.0);
            obs.after_iteration(1, &[1.0, 2.0], 2.5);
        }
        assert_eq!(seen, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_atomic_cancellation() {
        let flag = Arc::new(AtomicBool::new(false));
        assert!(!flag.is_cancelled());
        flag.store(true, Ordering::Relaxed);
        assert!(flag.is_cancelled());
        assert!((&*flag).is_cancelled());
        assert!(!NeverCancel.is_cancelled());
    }

    #[test]
    fn test_log_progress_interval() {
        assert_eq!(LogProgress::new(20_000).interval(), 2_000);
        assert_eq!(LogProgress::new(5).interval(), 1);

        let mut log = LogProgress::new(10);
        let history: Vec<f64> = (0..10).map(|i| i as f64).collect();
        for i in 0..10 {
            log.after_iteration(i, &history[..=i], 1.0);
        }
    }
}
