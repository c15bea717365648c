//! Schedule grid.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::ValidationError;

/// One slot of the schedule grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    /// Fixed start/end anchor of a day (site 0).
    Home,
    /// Interior slot with no site assigned.
    Unused,
    /// Interior slot visiting the given site (`>= 1`).
    Site(usize),
}

impl Cell {
    /// Site index this cell visits, with `Home` mapped to 0.
    pub fn site_index(self) -> Option<usize> {
        match self {
            Cell::Home => Some(0),
            Cell::Unused => None,
            Cell::Site(id) => Some(id),
        }
    }
}

/// Candidate schedule: `n_days` rows of `max_stops_per_day + 2` cells.
///
/// The first and last cell of every row is [`Cell::Home`]; the interior
/// cells hold each site `1..n_sites` exactly once, padded with
/// [`Cell::Unused`]. Swaps only ever touch interior cells, so the
/// invariants hold for the lifetime of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleState {
    n_days: usize,
    max_stops_per_day: usize,
    cells: Vec<Cell>,
}

impl ScheduleState {
    /// Builds a randomized initial grid.
    ///
    /// Sites `1..n_sites` and `n_slots - (n_sites - 1)` unused cells are
    /// shuffled over all interior slots.
    pub fn random<R: Rng + ?Sized>(
        n_sites: usize,
        n_days: usize,
        max_stops_per_day: usize,
        rng: &mut R,
    ) -> Result<Self, ValidationError> {
        check_capacity(n_sites, n_days, max_stops_per_day)?;

        let n_slots = n_days * max_stops_per_day;
        let mut interior: Vec<Cell> = (1..=n_slots)
            .map(|id| if id < n_sites { Cell::Site(id) } else { Cell::Unused })
            .collect();
        interior.shuffle(rng);

        let width = max_stops_per_day + 2;
        let mut cells = Vec::with_capacity(n_days * width);
        for day in interior.chunks(max_stops_per_day) {
            cells.push(Cell::Home);
            cells.extend_from_slice(day);
            cells.push(Cell::Home);
        }

        Ok(Self {
            n_days,
            max_stops_per_day,
            cells,
        })
    }

    /// Rebuilds a grid from explicit rows, checking every invariant.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_siteplan::models::{Cell, ScheduleState};
    ///
    /// let state = ScheduleState::from_rows(
    ///     vec![
    ///         vec![Cell::Home, Cell::Site(2), Cell::Unused, Cell::Home],
    ///         vec![Cell::Home, Cell::Site(1), Cell::Site(3), Cell::Home],
    ///     ],
    ///     4,
    /// ).unwrap();
    /// assert_eq!(state.n_days(), 2);
    /// assert_eq!(state.unused_count(), 1);
    /// ```
    pub fn from_rows(rows: Vec<Vec<Cell>>, n_sites: usize) -> Result<Self, ValidationError> {
        let n_days = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if n_days == 0 || width < 3 {
            return Err(ValidationError::InvalidState(format!(
                "grid must have at least one day and one interior column, got {n_days}x{width}"
            )));
        }
        if let Some((day, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(ValidationError::InvalidState(format!(
                "day {day} has {} columns, expected {width}",
                row.len()
            )));
        }

        let state = Self {
            n_days,
            max_stops_per_day: width - 2,
            cells: rows.into_iter().flatten().collect(),
        };
        state.validate(n_sites)?;
        Ok(state)
    }

    /// Checks anchors, capacity, and that each site `1..n_sites` appears once.
    pub fn validate(&self, n_sites: usize) -> Result<(), ValidationError> {
        check_capacity(n_sites, self.n_days, self.max_stops_per_day)?;

        let mut seen = vec![false; n_sites];
        seen[0] = true;
        for (day, row) in self.rows().enumerate() {
            let last = row.len() - 1;
            for (col, &cell) in row.iter().enumerate() {
                let anchor = col == 0 || col == last;
                match cell {
                    Cell::Home if anchor => {}
                    Cell::Home => {
                        return Err(ValidationError::InvalidState(format!(
                            "home at interior cell ({day}, {col})"
                        )))
                    }
                    _ if anchor => {
                        return Err(ValidationError::InvalidState(format!(
                            "anchor cell ({day}, {col}) is not home"
                        )))
                    }
                    Cell::Unused => {}
                    Cell::Site(id) if id == 0 || id >= n_sites => {
                        return Err(ValidationError::InvalidState(format!(
                            "site {id} at ({day}, {col}) is outside 1..{n_sites}"
                        )))
                    }
                    Cell::Site(id) => {
                        if seen[id] {
                            return Err(ValidationError::InvalidState(format!(
                                "site {id} is scheduled more than once"
                            )));
                        }
                        seen[id] = true;
                    }
                }
            }
        }

        if let Some(missing) = seen.iter().position(|&s| !s) {
            return Err(ValidationError::InvalidState(format!(
                "site {missing} is not scheduled"
            )));
        }
        Ok(())
    }

    pub fn n_days(&self) -> usize {
        self.n_days
    }

    pub fn max_stops_per_day(&self) -> usize {
        self.max_stops_per_day
    }

    /// Number of interior slots (`n_days * max_stops_per_day`).
    pub fn n_slots(&self) -> usize {
        self.n_days * self.max_stops_per_day
    }

    /// Columns per row, anchors included.
    pub fn width(&self) -> usize {
        self.max_stops_per_day + 2
    }

    /// Cells of one day, anchors included.
    pub fn row(&self, day: usize) -> &[Cell] {
        let width = self.width();
        &self.cells[day * width..(day + 1) * width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width())
    }

    pub fn cell(&self, day: usize, col: usize) -> Cell {
        self.cells[day * self.width() + col]
    }

    pub fn unused_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Unused).count()
    }

    /// Exchanges two interior cells.
    ///
    /// Applying the same swap twice restores the grid.
    ///
    /// # Panics
    ///
    /// Panics if a day is out of range. Stops must lie in
    /// `1..=max_stops_per_day`; anchors are never swapped.
    #[inline]
    pub fn swap(&mut self, day1: usize, stop1: usize, day2: usize, stop2: usize) {
        debug_assert!((1..=self.max_stops_per_day).contains(&stop1));
        debug_assert!((1..=self.max_stops_per_day).contains(&stop2));
        let width = self.width();
        self.cells.swap(day1 * width + stop1, day2 * width + stop2);
    }
}

impl fmt::Display for ScheduleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (day, row) in self.rows().enumerate() {
            write!(f, "day {:>3}:", day + 1)?;
            for cell in row {
                match cell {
                    Cell::Home => write!(f, "    H")?,
                    Cell::Unused => write!(f, "    -")?,
                    Cell::Site(id) => write!(f, " {id:>4}")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn check_capacity(
    n_sites: usize,
    n_days: usize,
    max_stops_per_day: usize,
) -> Result<(), ValidationError> {
    if n_sites == 0 {
        return Err(ValidationError::InvalidState(
            "at least the home site is required".into(),
        ));
    }
    let required = n_sites - 1;
    let Some(capacity) = n_days.checked_mul(max_stops_per_day) else {
        return Err(ValidationError::InvalidState(format!(
            "grid of {n_days} days x {max_stops_per_day} stops overflows"
        )));
    };
    if capacity < required || n_days == 0 || max_stops_per_day == 0 {
        return Err(ValidationError::InsufficientCapacity {
            n_days,
            max_stops_per_day,
            capacity,
            required,
        });
    }
    Ok(())
}
