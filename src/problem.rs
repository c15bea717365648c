//! Problem instance: sites plus their cost inputs.

use crate::cost::CostModel;
use crate::error::{Result, ValidationError};
use crate::models::{CostMatrix, NodeCosts, Site};
use crate::provider::{CostMatrixProvider, CostQuery};

/// Sites to schedule together with a complete cost matrix and optional
/// node costs. Site 0 is home.
///
/// Construction checks that the inputs agree in size; the optimizer checks
/// capacity against its configuration.
#[derive(Debug, Clone)]
pub struct ScheduleProblem {
    sites: Vec<Site>,
    edges: CostMatrix,
    nodes: Option<NodeCosts>,
}

impl ScheduleProblem {
    pub fn new(
        sites: Vec<Site>,
        edges: CostMatrix,
        nodes: Option<NodeCosts>,
    ) -> std::result::Result<Self, ValidationError> {
        let problem = Self {
            sites,
            edges,
            nodes,
        };
        problem.validate()?;
        Ok(problem)
    }

    /// Builds node costs from [`Site::node_cost`].
    ///
    /// Either every site carries a node cost or none does. With
    /// `ignore_node_cost` they are dropped.
    pub fn from_sites(
        sites: Vec<Site>,
        edges: CostMatrix,
        ignore_node_cost: bool,
    ) -> std::result::Result<Self, ValidationError> {
        let nodes = if ignore_node_cost {
            None
        } else {
            collect_node_costs(&sites)?
        };
        Self::new(sites, edges, nodes)
    }

    /// Requests the cost matrix from `provider`.
    ///
    /// Provider failures are returned as
    /// [`ScheduleError::ExternalData`](crate::ScheduleError::ExternalData).
    pub fn from_provider<P>(
        sites: Vec<Site>,
        provider: &P,
        query: &CostQuery,
        ignore_node_cost: bool,
    ) -> Result<Self>
    where
        P: CostMatrixProvider + ?Sized,
    {
        let edges = provider.cost_matrix(&sites, query)?;
        Ok(Self::from_sites(sites, edges, ignore_node_cost)?)
    }

    /// Checks that sites, matrix and node costs agree.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let expected = self.sites.len();
        if self.edges.size() != expected {
            return Err(ValidationError::DimensionMismatch {
                expected,
                actual: self.edges.size(),
            });
        }
        if let Some(nodes) = &self.nodes {
            if nodes.len() != expected {
                return Err(ValidationError::NodeCostLength {
                    expected,
                    actual: nodes.len(),
                });
            }
        }
        if let Some((pos, site)) = self
            .sites
            .iter()
            .enumerate()
            .find(|(pos, site)| site.index() != *pos)
        {
            return Err(ValidationError::InvalidState(format!(
                "site at position {pos} has index {}",
                site.index()
            )));
        }
        Ok(())
    }

    /// Number of sites, home included.
    pub fn n_sites(&self) -> usize {
        self.sites.len()
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn edges(&self) -> &CostMatrix {
        &self.edges
    }

    pub fn nodes(&self) -> Option<&NodeCosts> {
        self.nodes.as_ref()
    }

    pub fn cost_model(&self) -> CostModel<'_> {
        CostModel::new(&self.edges, self.nodes.as_ref())
    }
}

fn collect_node_costs(sites: &[Site]) -> std::result::Result<Option<NodeCosts>, ValidationError> {
    let costs: Vec<Option<f64>> = sites.iter().map(Site::node_cost).collect();
    if costs.iter().all(Option::is_none) {
        return Ok(None);
    }
    let costs: Option<Vec<f64>> = costs.into_iter().collect();
    match costs {
        Some(costs) => Ok(Some(NodeCosts::new(costs)?)),
        None => Err(ValidationError::MixedNodeCosts),
    }
}
