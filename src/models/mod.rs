//! Domain types: sites, cost inputs, and the schedule grid.

mod matrix;
mod site;
mod state;

pub use matrix::{CostMatrix, NodeCosts};
pub use site::{Coordinates, Site};
pub use state::{Cell, ScheduleState};
