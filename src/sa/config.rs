//! Solver configuration.

use crate::error::ValidationError;

/// Accepted range for [`ScheduleConfig::max_stops_per_day`].
pub const MAX_STOPS_RANGE: std::ops::RangeInclusive<usize> = 2..=30;

/// Accepted range for an explicit [`ScheduleConfig::n_days`].
pub const N_DAYS_RANGE: std::ops::RangeInclusive<usize> = 1..=365;

/// Accepted range for [`ScheduleConfig::annealing_iters`].
pub const ANNEALING_ITERS_RANGE: std::ops::RangeInclusive<usize> = 10..=10_000_000;

/// Configuration for the schedule optimizer.
///
/// # Examples
///
/// ```
/// use u_siteplan::sa::ScheduleConfig;
///
/// let config = ScheduleConfig::default()
///     .with_max_stops_per_day(4)
///     .with_days(3)
///     .with_annealing_iters(5_000)
///     .with_decay_base(0.5)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScheduleConfig {
    /// Maximum number of sites visited in one day (2–30).
    pub max_stops_per_day: usize,

    /// Number of days in the schedule (1–365).
    ///
    /// `None` derives `ceil(n_sites / max_stops_per_day)` from the problem.
    pub n_days: Option<usize>,

    /// Number of temperature steps (10–10,000,000).
    ///
    /// Every step attempts `n_days * max_stops_per_day` swaps.
    pub annealing_iters: usize,

    /// Base of the temperature decay, in (0, 1). Lower cools faster.
    pub decay_base: f64,

    /// Exponent reached at the last step: `T_last = T_0 * decay_base^decay_span`.
    pub decay_span: f64,

    /// Log the inputs and periodic progress at `info` level.
    pub verbose: bool,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            max_stops_per_day: 5,
            n_days: None,
            annealing_iters: 20_000,
            decay_base: 0.5,
            decay_span: 20.0,
            verbose: false,
            seed: None,
        }
    }
}

impl ScheduleConfig {
    pub fn with_max_stops_per_day(mut self, n: usize) -> Self {
        self.max_stops_per_day = n;
        self
    }

    pub fn with_days(mut self, n: usize) -> Self {
        self.n_days = Some(n);
        self
    }

    pub fn with_annealing_iters(mut self, n: usize) -> Self {
        self.annealing_iters = n;
        self
    }

    pub fn with_decay_base(mut self, base: f64) -> Self {
        self.decay_base = base;
        self
    }

    pub fn with_decay_span(mut self, span: f64) -> Self {
        self.decay_span = span;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of days used for a problem with `n_sites` sites (home included).
    pub fn days_for(&self, n_sites: usize) -> usize {
        self.n_days
            .unwrap_or_else(|| n_sites.div_ceil(self.max_stops_per_day.max(1)).max(1))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !MAX_STOPS_RANGE.contains(&self.max_stops_per_day) {
            return Err(ValidationError::InvalidConfig(format!(
                "max_stops_per_day must be in [2, 30], got {}",
                self.max_stops_per_day
            )));
        }
        if !ANNEALING_ITERS_RANGE.contains(&self.annealing_iters) {
            return Err(ValidationError::InvalidConfig(format!(
                "annealing_iters must be in [10, 10000000], got {}",
                self.annealing_iters
            )));
        }
        if !(self.decay_base > 0.0 && self.decay_base < 1.0) {
            return Err(ValidationError::InvalidConfig(format!(
                "decay_base must be in (0, 1), got {}",
                self.decay_base
            )));
        }
        if !(self.decay_span.is_finite() && self.decay_span > 0.0) {
            return Err(ValidationError::InvalidConfig(format!(
                "decay_span must be positive, got {}",
                self.decay_span
            )));
        }
        if let Some(n_days) = self.n_days.filter(|n| !N_DAYS_RANGE.contains(n)) {
            return Err(ValidationError::InvalidConfig(format!(
                "n_days must be in [1, 365], got {n_days}"
            )));
        }
        Ok(())
    }
}
