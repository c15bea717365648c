//! Edge and node cost inputs.

use crate::error::ValidationError;

/// Square matrix of travel costs between sites, stored row-major.
///
/// `get(from, to)` is the cost of travelling from `from` to `to`. The matrix
/// may be asymmetric and the diagonal need not be zero. Every entry is
/// checked on construction to be finite and non-negative.
///
/// # Examples
///
/// ```
/// use u_siteplan::models::CostMatrix;
///
/// let m = CostMatrix::from_rows(vec![
///     vec![0.0, 4.0],
///     vec![5.0, 0.0],
/// ]).unwrap();
/// assert_eq!(m.size(), 2);
/// assert_eq!(m.get(0, 1), 4.0);
/// assert_eq!(m.get(1, 0), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostMatrix {
    n: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Creates a matrix from `n * n` row-major values.
    pub fn new(n: usize, data: Vec<f64>) -> Result<Self, ValidationError> {
        if n == 0 {
            return Err(ValidationError::EmptyMatrix);
        }
        if data.len() != n * n {
            return Err(ValidationError::InvalidState(format!(
                "expected {} matrix entries for {n} sites, got {}",
                n * n,
                data.len()
            )));
        }
        for (k, &value) in data.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidCost {
                    row: k / n,
                    col: k % n,
                    value,
                });
            }
        }
        Ok(Self { n, data })
    }

    /// Creates a matrix from nested rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ValidationError> {
        let n = rows.len();
        if n == 0 {
            return Err(ValidationError::EmptyMatrix);
        }
        let mut data = Vec::with_capacity(n * n);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n {
                return Err(ValidationError::NonSquare {
                    rows: n,
                    row,
                    len: values.len(),
                });
            }
            data.extend(values);
        }
        Self::new(n, data)
    }

    /// Creates a matrix by evaluating `f(from, to)` for every pair.
    pub fn from_fn<F>(n: usize, mut f: F) -> Result<Self, ValidationError>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                data.push(f(i, j));
            }
        }
        Self::new(n, data)
    }

    /// An all-zero `n x n` matrix.
    pub fn zeros(n: usize) -> Result<Self, ValidationError> {
        Self::new(n, vec![0.0; n * n])
    }

    /// Number of sites (rows) including home.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Cost of travelling from `from` to `to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.n + to]
    }

    /// Outgoing costs of `from`.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.n..(from + 1) * self.n]
    }
}

/// Per-site visiting cost, indexed by site.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeCosts(Vec<f64>);

impl NodeCosts {
    pub fn new(costs: Vec<f64>) -> Result<Self, ValidationError> {
        for (index, &value) in costs.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidNodeCost { index, value });
            }
        }
        Ok(Self(costs))
    }

    #[inline]
    pub fn get(&self, site: usize) -> f64 {
        self.0[site]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}
