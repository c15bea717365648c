//! Cost matrix sources.
//!
//! The optimizer only consumes a finished [`CostMatrix`]. Where it comes
//! from (a routing service, a cache, a file) is up to the provider; its
//! failures reach the caller as
//! [`ScheduleError::ExternalData`](crate::ScheduleError::ExternalData)
//! without retries.

use crate::error::ProviderError;
use crate::models::{CostMatrix, Site};

/// Travel mode requested from a routing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
}

/// Quantity used as the edge cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CostType {
    Distance,
    #[default]
    Time,
}

/// What a provider is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostQuery {
    pub travel_mode: TravelMode,
    pub cost_type: CostType,
}

impl CostQuery {
    pub fn new(travel_mode: TravelMode, cost_type: CostType) -> Self {
        Self {
            travel_mode,
            cost_type,
        }
    }
}

/// Produces a complete `n_sites x n_sites` cost matrix for a set of sites.
pub trait CostMatrixProvider {
    fn cost_matrix(&self, sites: &[Site], query: &CostQuery) -> Result<CostMatrix, ProviderError>;
}

/// A precomputed matrix serves every query as-is.
impl CostMatrixProvider for CostMatrix {
    fn cost_matrix(
        &self,
        _sites: &[Site],
        _query: &CostQuery,
    ) -> Result<CostMatrix, ProviderError> {
        Ok(self.clone())
    }
}

/// One directed pair of the edge list.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeRecord {
    pub site_1: usize,
    pub site_2: usize,
    pub distance: f64,
    pub time: f64,
}

/// Builds the matrix from directed edge records, e.g. rows of a cost file.
///
/// The query's [`CostType`] selects the `distance` or `time` column. Pairs
/// without a record cost 0; a later record for the same pair overrides an
/// earlier one.
///
/// # Examples
///
/// ```
/// use u_siteplan::models::Site;
/// use u_siteplan::provider::{
///     CostMatrixProvider, CostQuery, CostType, EdgeListProvider, EdgeRecord, TravelMode,
/// };
///
/// let provider = EdgeListProvider::new(vec![
///     EdgeRecord { site_1: 0, site_2: 1, distance: 3.2, time: 7.0 },
///     EdgeRecord { site_1: 1, site_2: 0, distance: 3.4, time: 8.0 },
/// ]);
/// let sites = vec![Site::new(0, "home"), Site::new(1, "well")];
///
/// let query = CostQuery::new(TravelMode::Driving, CostType::Time);
/// let m = provider.cost_matrix(&sites, &query).unwrap();
/// assert_eq!(m.get(0, 1), 7.0);
/// assert_eq!(m.get(1, 1), 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EdgeListProvider {
    edges: Vec<EdgeRecord>,
}

impl EdgeListProvider {
    pub fn new(edges: Vec<EdgeRecord>) -> Self {
        Self { edges }
    }

    pub fn push(&mut self, edge: EdgeRecord) {
        self.edges.push(edge);
    }

    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }
}

impl CostMatrixProvider for EdgeListProvider {
    fn cost_matrix(&self, sites: &[Site], query: &CostQuery) -> Result<CostMatrix, ProviderError> {
        let n = sites.len();
        let mut data = vec![0.0; n * n];
        for edge in &self.edges {
            if edge.site_1 >= n || edge.site_2 >= n {
                return Err(ProviderError::InvalidEdge {
                    site_1: edge.site_1,
                    site_2: edge.site_2,
                    n_sites: n,
                });
            }
            data[edge.site_1 * n + edge.site_2] = match query.cost_type {
                CostType::Distance => edge.distance,
                CostType::Time => edge.time,
            };
        }
        CostMatrix::new(n, data).map_err(|e| ProviderError::Other(e.to_string()))
    }
}
