//! Temperature ladder.

/// Precomputed, decreasing temperatures: `T_k = scale * base^(k * step)`.
///
/// With `step = span / (len - 1)` the ladder starts at `scale` and ends at
/// `scale * base^span`, log-spaced in between.
///
/// # Examples
///
/// ```
/// use u_siteplan::sa::AnnealingSchedule;
///
/// let schedule = AnnealingSchedule::log_spaced(100.0, 0.5, 2.0, 3);
/// assert_eq!(schedule.temperatures(), &[100.0, 50.0, 25.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealingSchedule {
    temperatures: Vec<f64>,
}

impl AnnealingSchedule {
    /// `T_k = scale * base^(k * step)` for `k = 0..len`.
    pub fn geometric(scale: f64, base: f64, step: f64, len: usize) -> Self {
        let temperatures = (0..len)
            .map(|k| scale * base.powf(k as f64 * step))
            .collect();
        Self { temperatures }
    }

    /// Ladder of `len` rungs whose exponent runs from 0 to `span`.
    pub fn log_spaced(scale: f64, base: f64, span: f64, len: usize) -> Self {
        let step = if len > 1 { span / (len - 1) as f64 } else { 0.0 };
        Self::geometric(scale, base, step, len)
    }

    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.temperatures.iter().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.temperatures.last().copied()
    }
}
