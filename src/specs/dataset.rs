use serde::Serialize;

/// A parsed training table: one feature row and one label per sample.
///
/// Every row of `x` has the same width and `y` has one entry per row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    #[serde(rename = "X")]
    x: Vec<Vec<f64>>,
    y: Vec<f64>,
    #[serde(skip)]
    num_features: usize,
}

impl Dataset {
    /// Builds a dataset from rows the parser already checked.
    pub(crate) fn from_rows(x: Vec<Vec<f64>>, y: Vec<f64>, num_features: usize) -> Self {
        debug_assert_eq!(x.len(), y.len());
        debug_assert!(x.iter().all(|row| row.len() == num_features));
        Self { x, y, num_features }
    }

    #[inline]
    pub fn x(&self) -> &[Vec<f64>] {
        &self.x
    }

    #[inline]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    #[inline]
    pub fn num_features(&self) -> usize {
        self.num_features
    }
}
