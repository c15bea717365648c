//! Site metadata.

/// Geographic position of a site.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A location to visit.
///
/// Index 0 is the home site every day starts and ends at. Apart from
/// `node_cost`, which [`ScheduleProblem::from_sites`](crate::ScheduleProblem::from_sites)
/// may collect, the metadata is carried through untouched for result sinks
/// and cost providers.
///
/// # Examples
///
/// ```
/// use u_siteplan::models::Site;
///
/// let site = Site::new(3, "Quarry").with_coordinates(41.1, -81.4).with_node_cost(30.0);
/// assert_eq!(site.index(), 3);
/// assert_eq!(site.name(), "Quarry");
/// assert_eq!(site.node_cost(), Some(30.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Site {
    index: usize,
    name: String,
    coordinates: Option<Coordinates>,
    node_cost: Option<f64>,
}

impl Site {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            coordinates: None,
            node_cost: None,
        }
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(Coordinates {
            latitude,
            longitude,
        });
        self
    }

    /// Sets the cost of visiting this site (e.g. time spent on location).
    pub fn with_node_cost(mut self, cost: f64) -> Self {
        self.node_cost = Some(cost);
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn node_cost(&self) -> Option<f64> {
        self.node_cost
    }

    /// Returns `true` if this is the home anchor.
    pub fn is_home(&self) -> bool {
        self.index == 0
    }
}
