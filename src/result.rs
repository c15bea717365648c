//! Extraction of the final site assignment.

use std::fmt;

use crate::models::{Cell, ScheduleState, Site};
use crate::problem::ScheduleProblem;
use crate::sa::ScheduleSolution;

/// 1-based position of a visit: the `stop`-th site of `day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayStop {
    pub day: usize,
    pub stop: usize,
}

/// Mapping from every site `1..n_sites` to its `(day, stop)`.
///
/// Stops are numbered among the sites actually visited that day, so they
/// run `1..=k` without gaps regardless of where unused slots sit in the grid.
///
/// # Examples
///
/// ```
/// use u_siteplan::models::{Cell, ScheduleState};
/// use u_siteplan::result::{Assignment, DayStop};
///
/// let state = ScheduleState::from_rows(
///     vec![
///         vec![Cell::Home, Cell::Unused, Cell::Site(2), Cell::Home],
///         vec![Cell::Home, Cell::Site(3), Cell::Site(1), Cell::Home],
///     ],
///     4,
/// ).unwrap();
/// let assignment = Assignment::from_state(&state);
///
/// assert_eq!(assignment.get(2), Some(DayStop { day: 1, stop: 1 }));
/// assert_eq!(assignment.get(1), Some(DayStop { day: 2, stop: 2 }));
/// assert_eq!(assignment.day(2), &[3, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    /// Indexed by site; entry 0 (home) is always `None`.
    positions: Vec<Option<DayStop>>,
    /// Ordered site ids per day.
    days: Vec<Vec<usize>>,
}

impl Assignment {
    pub fn from_state(state: &ScheduleState) -> Self {
        let days: Vec<Vec<usize>> = state
            .rows()
            .map(|row| {
                row.iter()
                    .filter_map(|cell| match cell {
                        Cell::Site(id) => Some(*id),
                        Cell::Home | Cell::Unused => None,
                    })
                    .collect()
            })
            .collect();

        let n_sites = days.iter().flatten().max().map_or(1, |&max| max + 1);
        let mut positions = vec![None; n_sites];
        for (d, sites) in days.iter().enumerate() {
            for (s, &site) in sites.iter().enumerate() {
                positions[site] = Some(DayStop {
                    day: d + 1,
                    stop: s + 1,
                });
            }
        }

        Self { positions, days }
    }

    /// Position of `site`, `None` for home or unknown sites.
    pub fn get(&self, site: usize) -> Option<DayStop> {
        self.positions.get(site).copied().flatten()
    }

    /// `(site, position)` pairs in site order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, DayStop)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .filter_map(|(site, pos)| pos.map(|p| (site, p)))
    }

    /// Number of assigned sites.
    pub fn len(&self) -> usize {
        self.positions.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ordered sites of a 1-based day; empty for days out of range.
    pub fn day(&self, day: usize) -> &[usize] {
        day.checked_sub(1)
            .and_then(|d| self.days.get(d))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ordered sites of every day.
    pub fn days(&self) -> &[Vec<usize>] {
        &self.days
    }
}

/// One day of a [`SchedulePlan`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayPlan {
    /// 1-based day.
    pub day: usize,
    /// Visited sites in order.
    pub sites: Vec<usize>,
    pub cost: f64,
}

/// One site's row of a [`SchedulePlan::table`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanRow {
    pub index: usize,
    pub name: String,
    /// 1-based day, 0 for home.
    pub day: usize,
    /// 1-based stop, 0 for home.
    pub stop: usize,
}

/// Human-oriented summary of a solution: per-day stops with names and costs.
#[derive(Debug, Clone)]
pub struct SchedulePlan<'a> {
    sites: &'a [Site],
    assignment: &'a Assignment,
    days: Vec<DayPlan>,
}

impl<'a> SchedulePlan<'a> {
    pub fn new(problem: &'a ScheduleProblem, solution: &'a ScheduleSolution) -> Self {
        let costs = problem.cost_model().day_costs(&solution.state);
        let days = solution
            .assignment
            .days()
            .iter()
            .zip(costs)
            .enumerate()
            .map(|(d, (sites, cost))| DayPlan {
                day: d + 1,
                sites: sites.clone(),
                cost,
            })
            .collect();
        Self {
            sites: problem.sites(),
            assignment: &solution.assignment,
            days,
        }
    }

    pub fn days(&self) -> &[DayPlan] {
        &self.days
    }

    /// One row per site in index order; home is reported at day 0, stop 0.
    pub fn table(&self) -> Vec<PlanRow> {
        self.sites
            .iter()
            .map(|site| {
                let pos = self.assignment.get(site.index()).unwrap_or(DayStop { day: 0, stop: 0 });
                PlanRow {
                    index: site.index(),
                    name: site.name().to_string(),
                    day: pos.day,
                    stop: pos.stop,
                }
            })
            .collect()
    }
}

impl fmt::Display for SchedulePlan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "======== SOLUTION =========")?;
        for day in &self.days {
            writeln!(f, "Day {} ({:.2})", day.day, day.cost)?;
            for (stop, &site) in day.sites.iter().enumerate() {
                let name = self.sites.get(site).map_or("?", Site::name);
                writeln!(f, "{}. {}", stop + 1, name)?;
            }
            writeln!(f)?;
        }
        write!(f, "===========================")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_gaps_do_not_shift_stops() {
        use Cell::*;
        let state = ScheduleState::from_rows(
            vec![vec![Home, Unused, Site(1), Unused, Site(2), Home]],
            3,
        )
        .unwrap();
        let a = Assignment::from_state(&state);
        assert_eq!(a.get(1), Some(DayStop { day: 1, stop: 1 }));
        assert_eq!(a.get(2), Some(DayStop { day: 1, stop: 2 }));
        assert_eq!(a.get(0), None);
        assert_eq!(a.get(99), None);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_empty_day_kept() {
        use Cell::*;
        let state = ScheduleState::from_rows(
            vec![vec![Home, Unused, Home], vec![Home, Site(1), Home]],
            2,
        )
        .unwrap();
        let a = Assignment::from_state(&state);
        assert!(a.day(1).is_empty());
        assert_eq!(a.day(2), &[1]);
        assert!(a.day(0).is_empty());
        assert!(a.day(3).is_empty());
        assert_eq!(a.days().len(), 2);
    }

    proptest! {
        #[test]
        fn prop_assignment_is_bijection(
            seed in any::<u64>(),
            n_days in 1usize..5,
            max_stops in 2usize..7,
            fill in 0.0f64..=1.0,
        ) {
            let n_slots = n_days * max_stops;
            let n_sites = 1 + ((n_slots as f64) * fill) as usize;
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let state = ScheduleState::random(n_sites, n_days, max_stops, &mut rng).unwrap();
            let a = Assignment::from_state(&state);

            prop_assert_eq!(a.len(), n_sites - 1);
            let mut seen = std::collections::HashSet::new();
            for site in 1..n_sites {
                let pos = a.get(site);
                prop_assert!(pos.is_some());
                prop_assert!(seen.insert(pos));
            }
            for day in 1..=n_days {
                let sites = a.day(day);
                for (i, &site) in sites.iter().enumerate() {
                    prop_assert_eq!(a.get(site), Some(DayStop { day, stop: i + 1 }));
                }
            }
        }
    }
}
