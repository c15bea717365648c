//! Multi-day site visitation scheduling by simulated annealing.
//!
//! Given a home site (index 0), a set of sites to visit, and a cost matrix
//! between them, finds an assignment of sites to `(day, stop)` slots that
//! minimizes total travel plus visiting cost. Every day starts and ends at
//! home and visits at most `max_stops_per_day` sites.
//!
//! - **`models`**: sites, cost inputs, and the schedule grid
//! - **`cost`**: daily and total cost evaluation
//! - **`sa`**: temperature schedule, swap moves, and the annealing loop
//! - **`result`**: site to `(day, stop)` extraction and plan summaries
//! - **`provider`**: cost matrix sources
//!
//! # Examples
//!
//! ```
//! use u_siteplan::models::{CostMatrix, Site};
//! use u_siteplan::sa::{ScheduleConfig, ScheduleOptimizer};
//! use u_siteplan::ScheduleProblem;
//!
//! let sites: Vec<Site> = (0..7).map(|i| Site::new(i, format!("site {i}"))).collect();
//! let edges = CostMatrix::from_fn(7, |i, j| (i as f64 - j as f64).abs()).unwrap();
//! let problem = ScheduleProblem::new(sites, edges, None).unwrap();
//!
//! let config = ScheduleConfig::default()
//!     .with_max_stops_per_day(3)
//!     .with_annealing_iters(500)
//!     .with_seed(42);
//! let solution = ScheduleOptimizer::run(&problem, &config).unwrap();
//!
//! for (site, pos) in solution.assignment.iter() {
//!     assert!(pos.stop <= 3, "site {site} at stop {}", pos.stop);
//! }
//! ```
//!
//! # Architecture
//!
//! The crate contains only the optimizer. Fetching travel times, user
//! interfaces, and persisting results belong to callers, which plug in
//! through [`provider::CostMatrixProvider`], [`sa::ProgressObserver`], and
//! [`sa::CancellationQuery`].

pub mod cost;
pub mod error;
pub mod models;
pub mod problem;
pub mod provider;
pub mod result;
pub mod sa;

pub use error::{ProviderError, Result, ScheduleError, ValidationError};
pub use problem::ScheduleProblem;
