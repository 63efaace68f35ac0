use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::schema::{Algorithm, CostFunctionKind, OptimizerKind};

/// The specification for the cost function a linear regression minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params")]
pub enum CostFunctionSpec {
    MeanSquaredError {},
    MeanAbsoluteError {},
    HuberLoss { delta: f64 },
    LogCoshLoss {},
}

/// The specification for the optimizer a linear regression trains with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all_fields = "camelCase")]
pub enum OptimizerSpec {
    #[serde(rename = "BatchGradientDescent")]
    GradientDescent {},
    MiniBatchGradientDescent {
        batch_size: NonZeroUsize,
    },
    MomentumOptimizer {
        momentum: f64,
    },
    AdamOptimizer {
        beta1: f64,
        beta2: f64,
        epsilon: f64,
    },
    RMSPropOptimizer {
        beta: f64,
        epsilon: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearRegressionParams {
    pub learning_rate: f64,
    pub epochs: NonZeroUsize,
    pub cost_function: CostFunctionSpec,
    pub optimizer: OptimizerSpec,
    pub num_features: NonZeroUsize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeParams {
    pub max_depth: NonZeroUsize,
    pub min_samples_split: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_estimators: NonZeroUsize,
    pub max_depth: NonZeroUsize,
    pub min_samples_split: usize,
}

/// Hyperparameters for one algorithm.
///
/// Serializes as the `algorithm` / `params` pair of the training and
/// prediction bodies, so a field can never be sent under the wrong algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", content = "params", rename_all = "camelCase")]
pub enum AlgorithmParams {
    LinearRegression(LinearRegressionParams),
    DecisionTreeRegressor(TreeParams),
    DecisionTreeClassifier(TreeParams),
    RandomForestRegressor(ForestParams),
    RandomForestClassifier(ForestParams),
}

impl CostFunctionSpec {
    pub fn kind(&self) -> CostFunctionKind {
        match self {
            Self::MeanSquaredError {} => CostFunctionKind::MeanSquaredError,
            Self::MeanAbsoluteError {} => CostFunctionKind::MeanAbsoluteError,
            Self::HuberLoss { .. } => CostFunctionKind::HuberLoss,
            Self::LogCoshLoss {} => CostFunctionKind::LogCoshLoss,
        }
    }
}

impl OptimizerSpec {
    pub fn kind(&self) -> OptimizerKind {
        match self {
            Self::GradientDescent {} => OptimizerKind::GradientDescent,
            Self::MiniBatchGradientDescent { .. } => OptimizerKind::MiniBatchGradientDescent,
            Self::MomentumOptimizer { .. } => OptimizerKind::MomentumOptimizer,
            Self::AdamOptimizer { .. } => OptimizerKind::AdamOptimizer,
            Self::RMSPropOptimizer { .. } => OptimizerKind::RMSPropOptimizer,
        }
    }
}

impl AlgorithmParams {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::LinearRegression(_) => Algorithm::LinearRegression,
            Self::DecisionTreeRegressor(_) => Algorithm::DecisionTreeRegressor,
            Self::DecisionTreeClassifier(_) => Algorithm::DecisionTreeClassifier,
            Self::RandomForestRegressor(_) => Algorithm::RandomForestRegressor,
            Self::RandomForestClassifier(_) => Algorithm::RandomForestClassifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn nz(v: usize) -> NonZeroUsize {
        NonZeroUsize::new(v).unwrap()
    }

    #[test]
    fn tree_params_carry_only_their_own_fields() {
        let params = AlgorithmParams::DecisionTreeRegressor(TreeParams {
            max_depth: nz(5),
            min_samples_split: 2,
        });

        assert_eq!(
            serde_json::to_value(params).unwrap(),
            json!({
                "algorithm": "decisionTreeRegressor",
                "params": { "max_depth": 5, "min_samples_split": 2 }
            })
        );
    }

    #[test]
    fn linear_regression_nests_cost_function_and_optimizer() {
        let params = AlgorithmParams::LinearRegression(LinearRegressionParams {
            learning_rate: 0.01,
            epochs: nz(100),
            cost_function: CostFunctionSpec::HuberLoss { delta: 1.5 },
            optimizer: OptimizerSpec::MiniBatchGradientDescent { batch_size: nz(16) },
            num_features: nz(3),
        });

        assert_eq!(
            serde_json::to_value(params).unwrap(),
            json!({
                "algorithm": "linearRegression",
                "params": {
                    "learningRate": 0.01,
                    "epochs": 100,
                    "costFunction": { "type": "HuberLoss", "params": { "delta": 1.5 } },
                    "optimizer": { "type": "MiniBatchGradientDescent", "params": { "batchSize": 16 } },
                    "numFeatures": 3
                }
            })
        );
    }

    #[test]
    fn fieldless_kinds_send_empty_params() {
        assert_eq!(
            serde_json::to_value(CostFunctionSpec::MeanSquaredError {}).unwrap(),
            json!({ "type": "MeanSquaredError", "params": {} })
        );
        assert_eq!(
            serde_json::to_value(OptimizerSpec::GradientDescent {}).unwrap(),
            json!({ "type": "BatchGradientDescent", "params": {} })
        );
    }

    #[test]
    fn params_read_back_from_service_echo() {
        let value = json!({
            "algorithm": "randomForestClassifier",
            "params": { "n_estimators": 10, "max_depth": 4, "min_samples_split": 3 }
        });

        let params: AlgorithmParams = serde_json::from_value(value).unwrap();
        assert_eq!(params.algorithm(), Algorithm::RandomForestClassifier);
    }
}
