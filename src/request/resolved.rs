use std::{collections::HashMap, num::NonZeroUsize};

use super::error::{RequestError, Result};
use crate::{
    schema::{COST_FUNCTION_KEY, OPTIMIZER_KEY},
    specs::{CostFunctionSpec, OptimizerSpec},
};

/// Field values already coerced and range checked, keyed by their wire name.
///
/// The registry's assemblers read from this to build the typed parameters.
#[derive(Debug, Default)]
pub struct Resolved {
    values: HashMap<&'static str, f64>,
    cost_function: Option<CostFunctionSpec>,
    optimizer: Option<OptimizerSpec>,
    num_features: usize,
}

impl Resolved {
    pub(crate) fn with_num_features(num_features: usize) -> Self {
        Self {
            num_features,
            ..Self::default()
        }
    }

    pub(crate) fn insert(&mut self, name: &'static str, value: f64) {
        self.values.insert(name, value);
    }

    pub(crate) fn set_cost_function(&mut self, spec: CostFunctionSpec) {
        self.cost_function = Some(spec);
    }

    pub(crate) fn set_optimizer(&mut self, spec: OptimizerSpec) {
        self.optimizer = Some(spec);
    }

    pub fn number(&self, name: &'static str) -> Result<f64> {
        self.values
            .get(name)
            .copied()
            .ok_or(RequestError::MissingParameter { field: name })
    }

    pub fn count(&self, name: &'static str) -> Result<usize> {
        // Integer fields are truncated during coercion.
        self.number(name).map(|v| v as usize)
    }

    pub fn non_zero(&self, name: &'static str) -> Result<NonZeroUsize> {
        let value = self.count(name)?;
        NonZeroUsize::new(value).ok_or_else(|| RequestError::InvalidParameter {
            field: name,
            value: value.to_string(),
        })
    }

    pub fn cost_function(&self) -> Result<CostFunctionSpec> {
        self.cost_function.ok_or(RequestError::MissingParameter {
            field: COST_FUNCTION_KEY,
        })
    }

    pub fn optimizer(&self) -> Result<OptimizerSpec> {
        self.optimizer.ok_or(RequestError::MissingParameter {
            field: OPTIMIZER_KEY,
        })
    }

    pub fn num_features(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.num_features).ok_or(RequestError::MissingParameter {
            field: "numFeatures",
        })
    }
}
