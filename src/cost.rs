//! Cost evaluation over schedule grids.

use crate::models::{Cell, CostMatrix, NodeCosts, ScheduleState};

/// Read-only view of the edge and node costs of a problem.
///
/// A day's cost is the edge cost along its stops (`Home` to first site, ...,
/// last site to `Home`) plus the node cost of every visited site. `Unused`
/// cells are skipped, so sites separated by unused slots are still paired
/// directly.
///
/// # Examples
///
/// ```
/// use u_siteplan::cost::CostModel;
/// use u_siteplan::models::{Cell, CostMatrix};
///
/// let edges = CostMatrix::from_rows(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 5.0],
///     vec![2.0, 5.0, 0.0],
/// ]).unwrap();
/// let model = CostModel::new(&edges, None);
///
/// let row = [Cell::Home, Cell::Site(1), Cell::Unused, Cell::Site(2), Cell::Home];
/// assert_eq!(model.daily_cost(&row), 1.0 + 5.0 + 2.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CostModel<'a> {
    edges: &'a CostMatrix,
    nodes: Option<&'a NodeCosts>,
}

impl<'a> CostModel<'a> {
    pub fn new(edges: &'a CostMatrix, nodes: Option<&'a NodeCosts>) -> Self {
        Self { edges, nodes }
    }

    pub fn edges(&self) -> &'a CostMatrix {
        self.edges
    }

    pub fn nodes(&self) -> Option<&'a NodeCosts> {
        self.nodes
    }

    /// Cost of one day. A day without sites costs 0.
    pub fn daily_cost(&self, row: &[Cell]) -> f64 {
        let mut cost = 0.0;
        let mut prev: Option<usize> = None;
        let mut visited = false;

        for cell in row {
            let Some(site) = cell.site_index() else {
                continue;
            };
            if let Cell::Site(id) = cell {
                visited = true;
                if let Some(nodes) = self.nodes {
                    cost += nodes.get(*id);
                }
            }
            if let Some(from) = prev {
                cost += self.edges.get(from, site);
            }
            prev = Some(site);
        }

        if visited {
            cost
        } else {
            0.0
        }
    }

    /// Sum of [`daily_cost`](Self::daily_cost) over every day.
    pub fn total_cost(&self, state: &ScheduleState) -> f64 {
        state.rows().map(|row| self.daily_cost(row)).sum()
    }

    /// Cost of each day, in day order.
    pub fn day_costs(&self, state: &ScheduleState) -> Vec<f64> {
        state.rows().map(|row| self.daily_cost(row)).collect()
    }

    /// Cost of the days touched by a swap between `day1` and `day2`.
    ///
    /// A day is counted once when both positions lie in it.
    #[inline]
    pub fn pair_cost(&self, state: &ScheduleState, day1: usize, day2: usize) -> f64 {
        let cost = self.daily_cost(state.row(day1));
        if day1 == day2 {
            cost
        } else {
            cost + self.daily_cost(state.row(day2))
        }
    }
}
