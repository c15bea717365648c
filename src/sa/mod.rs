//! Simulated annealing over schedule grids.
//!
//! Each temperature step attempts one random swap per interior slot, scoring
//! only the days a swap touches and keeping it by the Metropolis criterion.
//! The temperature ladder is log-spaced and scaled by the cost of the
//! randomized initial schedule.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

mod config;
mod observer;
mod perturbation;
mod runner;
mod schedule;

pub use config::{ScheduleConfig, ANNEALING_ITERS_RANGE, MAX_STOPS_RANGE, N_DAYS_RANGE};
pub use observer::{CancelWhen, CancellationQuery, LogProgress, NeverCancel, ProgressObserver};
pub use perturbation::{SwapMove, SwapProposer};
pub use runner::{ScheduleOptimizer, ScheduleSolution, SolveStatus};
pub use schedule::AnnealingSchedule;
